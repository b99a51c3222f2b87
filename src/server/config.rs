use super::RequestsLoggingLevel;
use crate::config::{AppConfig, RecommendationSettings, DEFAULT_CORS_ORIGIN};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    pub metrics_port: u16,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,
    /// Origin allowed to call the API from a browser.
    pub cors_origin: String,
    pub recommendation: RecommendationSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 3001,
            metrics_port: 9091,
            content_cache_age_sec: 3600,
            frontend_dir_path: None,
            cors_origin: DEFAULT_CORS_ORIGIN.to_owned(),
            recommendation: RecommendationSettings::default(),
        }
    }
}

impl From<&AppConfig> for ServerConfig {
    fn from(config: &AppConfig) -> Self {
        ServerConfig {
            requests_logging_level: config.logging_level.clone(),
            port: config.port,
            metrics_port: config.metrics_port,
            content_cache_age_sec: config.content_cache_age_sec,
            frontend_dir_path: config.frontend_dir_path.clone(),
            cors_origin: config.cors_origin.clone(),
            recommendation: config.recommendation.clone(),
        }
    }
}
