use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moodtunes_server::catalog::{load_catalog, LoadProblem};
use moodtunes_server::config::{AppConfig, CliConfig, FileConfig};
use moodtunes_server::recommend::{CascadeMode, RecommendationEngine};
use moodtunes_server::server::{metrics, run_server, RequestsLoggingLevel, ServerConfig};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Its values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the CSV music dataset.
    #[clap(value_parser = parse_path)]
    pub dataset: Option<PathBuf>,

    /// Path to the CSV music dataset, same as the positional argument.
    #[clap(long = "dataset", value_parser = parse_path, conflicts_with = "dataset")]
    pub dataset_flag: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// The maximum age of cacheable responses in seconds.
    #[clap(long, default_value_t = 3600)]
    pub content_cache_age_sec: usize,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Origin allowed to call the API from a browser.
    #[clap(long)]
    pub cors_origin: Option<String>,

    /// How far the recommender may stray from the requested mood and language.
    #[clap(long, value_enum, default_value_t = CascadeMode::Strict)]
    pub cascade: CascadeMode,

    /// Songs returned when a request does not ask for a count.
    #[clap(long)]
    pub default_count: Option<usize>,

    /// Load and check the dataset, then exit without serving.
    #[clap(long)]
    pub check_only: bool,
}

impl From<&CliArgs> for CliConfig {
    fn from(args: &CliArgs) -> Self {
        CliConfig {
            dataset_path: args.dataset.clone().or_else(|| args.dataset_flag.clone()),
            port: args.port,
            metrics_port: args.metrics_port,
            logging_level: args.logging_level.clone(),
            content_cache_age_sec: args.content_cache_age_sec,
            frontend_dir_path: args.frontend_dir_path.clone(),
            cors_origin: args.cors_origin.clone(),
            cascade: args.cascade,
            default_count: args.default_count,
        }
    }
}

fn describe_problem(problem: &LoadProblem) -> String {
    match problem {
        LoadProblem::MalformedRow { line, reason } => {
            format!("line {}: malformed row ({})", line, reason)
        }
        LoadProblem::MalformedSeeds { line, error } => {
            format!("line {}: malformed seeds ({})", line, error)
        }
        LoadProblem::MissingIdentity { line } => {
            format!("line {}: missing title or artist", line)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&CliConfig::from(&cli_args), file_config)?;

    metrics::init_metrics();
    let result = load_catalog(&app_config.dataset_path)?;
    metrics::record_load_problems(&result.problems);
    metrics::init_catalog_metrics(&result.catalog);

    if cli_args.check_only {
        println!(
            "{}: {} songs, {} problems",
            app_config.dataset_path.display(),
            result.catalog.len(),
            result.problems.len()
        );
        for problem in result.problems.iter() {
            println!("  {}", describe_problem(problem));
        }
        let stats = result.catalog.stats();
        for (language, count) in stats.languages.iter() {
            println!("  {}: {}", language, count);
        }
        return Ok(());
    }

    let engine = Arc::new(RecommendationEngine::new(
        Arc::new(result.catalog),
        app_config.recommendation.cascade,
    ));
    info!(
        "Recommending with the {:?} cascade",
        app_config.recommendation.cascade
    );

    run_server(ServerConfig::from(&app_config), engine).await
}
