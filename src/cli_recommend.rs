use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use moodtunes_server::catalog::load_catalog;
use moodtunes_server::config::DEFAULT_COUNT;
use moodtunes_server::recommend::{
    flavor_text, CascadeMode, MoodQuery, Recommendation, RecommendationEngine,
};

fn parse_dataset_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s)
        .canonicalize()
        .with_context(|| format!("Dataset not found: {}", s))?;
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the CSV music dataset.
    #[clap(value_parser = parse_dataset_path)]
    pub dataset: PathBuf,

    /// Songs to print for each query.
    #[clap(short, long, default_value_t = DEFAULT_COUNT)]
    pub count: usize,

    #[clap(long, value_enum, default_value_t = CascadeMode::Strict)]
    pub cascade: CascadeMode,
}

/// Splits a `mood[, language]` line.
fn parse_line(line: &str) -> (&str, Option<&str>) {
    match line.split_once(',') {
        Some((mood, language)) => (mood.trim(), Some(language.trim())),
        None => (line.trim(), None),
    }
}

fn print_recommendation(recommendation: &Recommendation) {
    if recommendation.songs.is_empty() {
        println!("No songs found ({}).", recommendation.tier);
        return;
    }
    println!(
        "{} of {} candidates ({}):",
        recommendation.songs.len(),
        recommendation.candidates,
        recommendation.tier
    );
    for song in recommendation.songs.iter() {
        println!(
            "  {} - {} [{}, {}]\n    {}",
            song.title,
            song.artist,
            song.mood,
            song.language,
            song.youtube_url()
        );
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    println!(
        "Cli Recommend loading dataset at {}...",
        cli_args.dataset.display()
    );

    let result = load_catalog(&cli_args.dataset)?;
    println!(
        "Done! {} songs, {} problems.",
        result.catalog.len(),
        result.problems.len()
    );
    let engine = RecommendationEngine::new(Arc::new(result.catalog), cli_args.cascade);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Mood[, language]: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("Failed to read line")?;
        let (mood, language) = parse_line(&line);

        let query = match MoodQuery::parse(mood, language) {
            Ok(query) => query,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };
        let mut rng = rand::rng();
        println!("{}", flavor_text(&query.mood, &mut rng));
        let recommendation = engine.recommend_with_rng(&query, cli_args.count, &mut rng);
        print_recommendation(&recommendation);
        println!();
    }
}
