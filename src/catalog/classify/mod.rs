//! Turns raw dataset rows into normalized [`Song`]s.

mod language;
mod mood;
mod seeds;
mod tags;

pub use language::{detect_language, english_word_score, LanguageSource};
pub use mood::{detect_mood, mood_from_scores, NEUTRAL_SCORE};
pub use seeds::{parse_seeds, SeedParseError};
pub use tags::{generate_tags, MAX_TAGS};

use super::{AudioFeatures, RawRecord, Song, UNKNOWN_ARTIST, UNKNOWN_GENRE, UNKNOWN_TITLE};
use rand::Rng;
use rand_distr::Alphanumeric;

const EXTERNAL_ID_LENGTH: usize = 26;

/// A classified row, together with the details of how it was classified.
#[derive(Debug, Clone)]
pub struct Classification {
    pub song: Song,
    pub language_source: LanguageSource,
    pub seeds_error: Option<SeedParseError>,
}

fn synthesize_external_id() -> String {
    let rng = rand::rng();
    rng.sample_iter(&Alphanumeric)
        .take(EXTERNAL_ID_LENGTH)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect()
}

pub fn classify(record: &RawRecord) -> Song {
    classify_detailed(record).song
}

pub fn classify_detailed(record: &RawRecord) -> Classification {
    let (seeds, seeds_error) = match record.seeds().map(parse_seeds) {
        None => (vec![], None),
        Some(Ok(seeds)) => (seeds, None),
        Some(Err(err)) => (vec![], Some(err)),
    };

    let valence = record.valence().unwrap_or(NEUTRAL_SCORE);
    let arousal = record.arousal().unwrap_or(NEUTRAL_SCORE);

    let (language, language_source) = detect_language(
        record.track().unwrap_or_default(),
        record.artist().unwrap_or_default(),
        record.genre().unwrap_or_default(),
    );

    let song = Song {
        title: record.track().unwrap_or(UNKNOWN_TITLE).to_owned(),
        artist: record.artist().unwrap_or(UNKNOWN_ARTIST).to_owned(),
        mood: detect_mood(&seeds, valence, arousal),
        language,
        genre: record.genre().unwrap_or(UNKNOWN_GENRE).to_owned(),
        tags: generate_tags(&seeds),
        external_id: record
            .spotify_id()
            .map(str::to_owned)
            .unwrap_or_else(synthesize_external_id),
        features: AudioFeatures::new(valence, arousal),
        seeds,
    };

    Classification {
        song,
        language_source,
        seeds_error,
    }
}
