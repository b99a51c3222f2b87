use crate::catalog::{Catalog, LoadProblem};
use crate::recommend::MatchTier;
use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::collections::BTreeMap;
use std::time::Duration;

/// Metric name prefix for all MoodTunes metrics
const PREFIX: &str = "moodtunes";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Catalog Metrics
    pub static ref CATALOG_SONGS_TOTAL: GaugeVec = GaugeVec::new(
        Opts::new(format!("{PREFIX}_catalog_songs_total"), "Songs in the catalog by language"),
        &["language"]
    ).expect("Failed to create catalog_songs_total metric");

    pub static ref LOAD_PROBLEMS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_load_problems_total"), "Dataset rows with problems, by kind"),
        &["kind"]
    ).expect("Failed to create load_problems_total metric");

    // Recommendation Metrics
    pub static ref RECOMMENDATIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_recommendations_total"), "Recommendations by match tier"),
        &["tier"]
    ).expect("Failed to create recommendations_total metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(CATALOG_SONGS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(LOAD_PROBLEMS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(RECOMMENDATIONS_TOTAL.clone()));

    tracing::info!("Metrics system initialized successfully");
}

pub fn init_catalog_metrics(catalog: &Catalog) {
    let stats = catalog.stats();
    for (language, count) in stats.languages.iter() {
        CATALOG_SONGS_TOTAL
            .with_label_values(&[language.as_str()])
            .set(*count as f64);
    }

    tracing::info!(
        "Catalog metrics initialized: {} songs in {} languages",
        stats.total_songs,
        stats.languages.len()
    );
}

pub fn record_load_problems(problems: &[LoadProblem]) {
    let mut by_kind: BTreeMap<&str, u64> = BTreeMap::new();
    for problem in problems {
        *by_kind.entry(problem.kind()).or_insert(0) += 1;
    }
    for (kind, count) in by_kind {
        LOAD_PROBLEMS_TOTAL
            .with_label_values(&[kind])
            .inc_by(count as f64);
    }
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

pub fn record_recommendation(tier: MatchTier) {
    RECOMMENDATIONS_TOTAL
        .with_label_values(&[tier.as_str()])
        .inc();
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_else(|_| String::from(""));
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
