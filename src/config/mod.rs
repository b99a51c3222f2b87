mod file_config;

pub use file_config::{FileConfig, RecommendationConfig};

use crate::recommend::CascadeMode;
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_COUNT: usize = 6;
pub const DEFAULT_MAX_COUNT: usize = 50;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub dataset_path: Option<PathBuf>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,
    pub cors_origin: Option<String>,
    pub cascade: CascadeMode,
    pub default_count: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,
    pub cors_origin: String,

    pub recommendation: RecommendationSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationSettings {
    pub cascade: CascadeMode,
    pub default_count: usize,
    pub max_count: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            cascade: CascadeMode::Strict,
            default_count: DEFAULT_COUNT,
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

impl RecommendationSettings {
    /// The number of songs to return for a requested `count`.
    pub fn clamp_count(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_count)
            .clamp(1, self.max_count)
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let dataset_path = file
            .dataset_path
            .map(PathBuf::from)
            .or_else(|| cli.dataset_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("dataset_path must be specified via --dataset or in config file")
            })?;

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let content_cache_age_sec = file
            .content_cache_age_sec
            .unwrap_or(cli.content_cache_age_sec);
        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());
        let cors_origin = file
            .cors_origin
            .or_else(|| cli.cors_origin.clone())
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let rec_file = file.recommendation.unwrap_or_default();
        let default_count = rec_file
            .default_count
            .or(cli.default_count)
            .unwrap_or(DEFAULT_COUNT);
        let recommendation = RecommendationSettings {
            cascade: rec_file.cascade.unwrap_or(cli.cascade),
            default_count,
            max_count: rec_file
                .max_count
                .unwrap_or_else(|| DEFAULT_MAX_COUNT.max(default_count)),
        };
        if recommendation.default_count < 1 {
            bail!("default_count must be at least 1");
        }
        if recommendation.max_count < recommendation.default_count {
            bail!(
                "max_count ({}) must not be lower than default_count ({})",
                recommendation.max_count,
                recommendation.default_count
            );
        }

        Ok(Self {
            dataset_path,
            port,
            metrics_port,
            logging_level,
            content_cache_age_sec,
            frontend_dir_path,
            cors_origin,
            recommendation,
        })
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
