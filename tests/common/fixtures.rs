//! Test dataset creation

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const DATASET_HEADER: &str = "lastfm_url,track,artist,seeds,number_of_emotion_tags,valence_tags,arousal_tags,dominance_tags,mbid,spotify_id,genre";

const DATASET_ROWS: &[&str] = &[
    "https://last.fm/1,Happy,Pharrell Williams,\"['happy', 'fun']\",2,0.9,0.8,0.6,m1,sp-happy,pop",
    "https://last.fm/2,Dynamite,BTS,\"['happy', 'energetic']\",2,0.9,0.9,0.6,m2,sp-dynamite,k-pop",
    "https://last.fm/3,Tum Hi Ho,Arijit Singh,\"['sad', 'romantic']\",2,0.3,0.3,0.4,m3,sp-tum-hi-ho,bollywood",
    "https://last.fm/4,Someone Like You,Adele,\"['sad', 'melancholy']\",2,0.2,0.3,0.4,m4,sp-someone,pop",
    "https://last.fm/5,Weightless,Marconi Union,\"['calm', 'relaxed']\",2,0.5,0.1,0.5,m5,sp-weightless,ambient",
    "https://last.fm/6,Believer,Imagine Dragons,\"['energetic', 'powerful']\",2,0.5,0.9,0.7,m6,sp-believer,rock",
    // Unterminated seed list, classified from its scores.
    "https://last.fm/7,Bad Seeds,Some Band,\"['happy\",1,0.2,0.3,0.4,m7,sp-bad-seeds,rock",
    // No title, dropped.
    "https://last.fm/8,,Nameless,\"['happy']\",1,0.9,0.9,0.5,m8,sp-nameless,pop",
];

/// Creates a temporary CSV dataset.
/// Returns (temp_dir, dataset_path)
pub fn create_test_dataset() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("muse_v3.csv");

    let mut contents = String::from(DATASET_HEADER);
    contents.push('\n');
    for row in DATASET_ROWS {
        contents.push_str(row);
        contents.push('\n');
    }
    fs::write(&path, contents)?;

    Ok((dir, path))
}
