use super::classify::{classify_detailed, SeedParseError};
use super::{Language, Mood, RawRecord, Song};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::info;

const PROGRESS_LOG_INTERVAL: usize = 10_000;

/// Non fatal issues found while building the catalog. Each one refers to the
/// dataset line it was found at.
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    MalformedRow { line: u64, reason: String },
    MalformedSeeds { line: u64, error: SeedParseError },
    MissingIdentity { line: u64 },
}

impl Problem {
    /// Short label used for metrics and summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Problem::MalformedRow { .. } => "malformed_row",
            Problem::MalformedSeeds { .. } => "malformed_seeds",
            Problem::MissingIdentity { .. } => "missing_identity",
        }
    }
}

#[derive(Debug)]
pub struct CatalogBuildResult {
    pub catalog: Catalog,
    pub problems: Vec<Problem>,
}

/// Collects classified rows one at a time, the loader drives it.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    songs: Vec<Song>,
    problems: Vec<Problem>,
}

impl CatalogBuilder {
    pub fn new() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn add_record(&mut self, line: u64, record: &RawRecord) {
        let classification = classify_detailed(record);
        if let Some(error) = classification.seeds_error {
            self.problems.push(Problem::MalformedSeeds { line, error });
        }
        if !classification.song.is_identified() {
            self.problems.push(Problem::MissingIdentity { line });
            return;
        }

        self.songs.push(classification.song);
        if self.songs.len() % PROGRESS_LOG_INTERVAL == 0 {
            info!("Processed {} songs...", self.songs.len());
        }
    }

    pub fn add_problem(&mut self, problem: Problem) {
        self.problems.push(problem);
    }

    pub fn finish(self) -> CatalogBuildResult {
        CatalogBuildResult {
            catalog: Catalog { songs: self.songs },
            problems: self.problems,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_songs: usize,
    pub moods: BTreeMap<String, usize>,
    pub languages: BTreeMap<String, usize>,
}

/// The immutable set of songs served by the application.
#[derive(Debug, Default)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    /// Songs without a real title or artist are dropped.
    pub fn from_songs(songs: Vec<Song>) -> Catalog {
        Catalog {
            songs: songs.into_iter().filter(Song::is_identified).collect(),
        }
    }

    pub fn from_records<'a, I>(records: I) -> CatalogBuildResult
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        let mut builder = CatalogBuilder::new();
        for (index, record) in records.into_iter().enumerate() {
            // Line 1 is the header.
            builder.add_record(index as u64 + 2, record);
        }
        builder.finish()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn iter(&self) -> impl Iterator<Item = &Song> {
        self.songs.iter()
    }

    /// Distinct moods sorted by name.
    pub fn distinct_moods(&self) -> Vec<Mood> {
        let mut out: Vec<Mood> = self
            .iter()
            .map(|s| s.mood)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        out.sort_by_key(|m| m.as_str());
        out
    }

    /// Distinct languages sorted by display name.
    pub fn distinct_languages(&self) -> Vec<Language> {
        let mut out: Vec<Language> = self
            .iter()
            .map(|s| s.language)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        out.sort_by_key(|l| l.as_str());
        out
    }

    pub fn stats(&self) -> CatalogStats {
        let mut moods = BTreeMap::new();
        let mut languages = BTreeMap::new();
        for song in self.iter() {
            let language = song.language.as_str();
            *moods.entry(song.mood.as_str().to_owned()).or_insert(0) += 1;
            *languages.entry(language.to_owned()).or_insert(0) += 1;
        }
        CatalogStats {
            total_songs: self.len(),
            moods,
            languages,
        }
    }

    /// Songs whose title, artist, language or mood contains `query`,
    /// ignoring case, in catalog order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Song> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return vec![];
        }
        self.iter()
            .filter(|song| {
                song.title.to_lowercase().contains(&query)
                    || song.artist.to_lowercase().contains(&query)
                    || song.language.as_str().to_lowercase().contains(&query)
                    || song.mood.as_str().contains(&query)
            })
            .take(limit)
            .collect()
    }

    /// Up to `per_language` example songs for every language, in catalog order.
    pub fn language_samples(&self, per_language: usize) -> BTreeMap<&'static str, Vec<&Song>> {
        let mut out: BTreeMap<&'static str, Vec<&Song>> = BTreeMap::new();
        for song in self.iter() {
            let samples = out.entry(song.language.as_str()).or_default();
            if samples.len() < per_language {
                samples.push(song);
            }
        }
        out
    }
}
