//! Reads the mood dataset from disk.

use super::{CatalogBuildResult, CatalogBuilder, CatalogStats, LoadProblem, RawRecord};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const SAMPLES_PER_LANGUAGE: usize = 3;

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Dataset {path} is unavailable: {reason}")]
    DatasetUnavailable { path: PathBuf, reason: String },

    #[error("Dataset {path} does not contain any usable song")]
    Empty { path: PathBuf },
}

fn unavailable(path: &Path, err: csv::Error) -> CatalogLoadError {
    CatalogLoadError::DatasetUnavailable {
        path: path.to_owned(),
        reason: err.to_string(),
    }
}

fn read_records(path: &Path) -> Result<CatalogBuildResult, CatalogLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path)
        .map_err(|err| unavailable(path, err))?;
    let headers = reader
        .headers()
        .map_err(|err| unavailable(path, err))?
        .clone();

    let mut builder = CatalogBuilder::new();
    let mut row = csv::StringRecord::new();
    loop {
        match reader.read_record(&mut row) {
            Ok(false) => break,
            Ok(true) => {
                let line = row.position().map(|p| p.line()).unwrap_or_default();
                match row.deserialize::<RawRecord>(Some(&headers)) {
                    Ok(record) => builder.add_record(line, &record),
                    Err(err) => builder.add_problem(LoadProblem::MalformedRow {
                        line,
                        reason: err.to_string(),
                    }),
                }
            }
            Err(err) if err.is_io_error() => return Err(unavailable(path, err)),
            Err(err) => builder.add_problem(LoadProblem::MalformedRow {
                line: err.position().map(|p| p.line()).unwrap_or_default(),
                reason: err.to_string(),
            }),
        }
    }

    Ok(builder.finish())
}

fn log_problems(problems: &[LoadProblem]) {
    if problems.is_empty() {
        info!("Dataset parsed, no issues found.");
        return;
    }

    info!("Found {} problems:", problems.len());
    for problem in problems.iter() {
        debug!("- {:?}", problem);
    }
    let mut by_kind: BTreeMap<&'static str, usize> = BTreeMap::new();
    for problem in problems.iter() {
        *by_kind.entry(problem.kind()).or_insert(0) += 1;
    }
    for (kind, count) in by_kind.iter() {
        warn!("{} rows with {}", count, kind);
    }
}

/// Languages by song count, most common first, with their whole percent
/// share of the catalog.
fn language_shares(stats: &CatalogStats) -> Vec<(&str, usize, usize)> {
    let total = stats.total_songs.max(1);
    let mut shares: Vec<_> = stats
        .languages
        .iter()
        .map(|(language, &count)| (language.as_str(), count, count * 100 / total))
        .collect();
    shares.sort_by_key(|&(_, count, _)| Reverse(count));
    shares
}

fn log_distribution(result: &CatalogBuildResult) {
    let catalog = &result.catalog;
    let stats = catalog.stats();

    info!("Catalog has {} songs", stats.total_songs);
    info!("Language distribution:");
    let samples = catalog.language_samples(SAMPLES_PER_LANGUAGE);
    for (language, count, percent) in language_shares(&stats) {
        let examples = samples
            .get(language)
            .map(|songs| {
                songs
                    .iter()
                    .map(|s| format!("\"{}\" by {}", s.title, s.artist))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        info!(
            "  {}: {} songs, {}% ({})",
            language, count, percent, examples
        );
    }
    info!("Mood distribution:");
    for (mood, count) in stats.moods.iter() {
        info!("  {}: {} songs", mood, count);
    }
}

/// Loads and classifies the whole dataset at `path`.
///
/// Rows that cannot be read are reported as problems and skipped, while a
/// dataset that cannot be opened at all, or that yields no song, is an error.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogBuildResult, CatalogLoadError> {
    let path = path.as_ref();
    info!("Loading dataset from {}", path.display());

    let result = read_records(path)?;
    log_problems(&result.problems);

    if result.catalog.is_empty() {
        return Err(CatalogLoadError::Empty {
            path: path.to_owned(),
        });
    }
    log_distribution(&result);

    Ok(result)
}
