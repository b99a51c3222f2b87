//! JSON API routes consumed by the frontend.

use crate::catalog::{AudioFeatures, CatalogStats, Language, Mood, Song};
use crate::recommend::{flavor_text, MoodQuery, QueryError, ANY_LANGUAGE};

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::http_cache;
use super::metrics::record_recommendation;
use super::state::{GuardedEngine, ServerState};
use super::ServerConfig;

const DEFAULT_SEARCH_LIMIT: usize = 20;
const MAX_SEARCH_LIMIT: usize = 100;

/// A song as exposed by the API, with its derived deep link.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SongView<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub mood: Mood,
    pub language: Language,
    pub genre: &'a str,
    pub tags: &'a [String],
    pub spotify_id: &'a str,
    pub youtube_url: String,
    pub features: AudioFeatures,
}

impl<'a> From<&'a Song> for SongView<'a> {
    fn from(song: &'a Song) -> Self {
        SongView {
            title: &song.title,
            artist: &song.artist,
            mood: song.mood,
            language: song.language,
            genre: &song.genre,
            tags: &song.tags,
            spotify_id: &song.external_id,
            youtube_url: song.youtube_url(),
            features: song.features,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

#[derive(Deserialize, Debug, Default)]
pub struct MoodRequest {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MoodResponse<'a> {
    status: &'static str,
    ai_text: &'static str,
    mood: &'a str,
    language: &'a str,
    total_found: usize,
    total_in_database: usize,
    match_tier: &'static str,
    recommendations: Vec<SongView<'a>>,
}

/// Runs a recommendation, kept synchronous so the thread rng never lives
/// across an await point.
fn recommend_response(
    engine: &GuardedEngine,
    config: &ServerConfig,
    request: &MoodRequest,
) -> Response {
    let raw_mood = request.mood.as_deref().unwrap_or_default().trim();
    let raw_language = request
        .language
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty());

    let query = match MoodQuery::parse(raw_mood, raw_language) {
        Ok(query) => query,
        Err(err @ QueryError::EmptyMood) => {
            return error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
    };
    let count = config.recommendation.clamp_count(request.count);
    info!(
        "Received request: mood=\"{}\", language={:?}, count={}",
        raw_mood, raw_language, count
    );

    let mut rng = rand::rng();
    let recommendation = engine.recommend_with_rng(&query, count, &mut rng);
    record_recommendation(recommendation.tier);

    let response = MoodResponse {
        status: "ok",
        ai_text: flavor_text(&query.mood, &mut rng),
        mood: raw_mood,
        language: raw_language.unwrap_or(ANY_LANGUAGE),
        total_found: recommendation.songs.len(),
        total_in_database: engine.catalog().len(),
        match_tier: recommendation.tier.as_str(),
        recommendations: recommendation
            .songs
            .iter()
            .map(|song| SongView::from(*song))
            .collect(),
    };
    Json(response).into_response()
}

async fn post_mood(
    State(state): State<ServerState>,
    body: Result<Json<MoodRequest>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(request)) => recommend_response(&state.engine, &state.config, &request),
        Err(rejection) => {
            debug!("Rejected mood request: {}", rejection.body_text());
            error_response(StatusCode::BAD_REQUEST, &rejection.body_text())
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MoodsResponse {
    status: &'static str,
    moods: Vec<&'static str>,
    languages: Vec<&'static str>,
    total_songs: usize,
}

async fn get_moods(State(engine): State<GuardedEngine>) -> impl IntoResponse {
    let catalog = engine.catalog();
    let moods: Vec<&'static str> = catalog.distinct_moods().iter().map(Mood::as_str).collect();
    let languages: Vec<&'static str> = catalog
        .distinct_languages()
        .iter()
        .map(Language::as_str)
        .collect();
    debug!(
        "Sending {} moods and {} languages",
        moods.len(),
        languages.len()
    );

    Json(MoodsResponse {
        status: "ok",
        moods,
        languages,
        total_songs: catalog.len(),
    })
}

#[derive(Serialize)]
struct StatsResponse {
    status: &'static str,
    #[serde(flatten)]
    stats: CatalogStats,
}

async fn get_stats(State(engine): State<GuardedEngine>) -> impl IntoResponse {
    Json(StatsResponse {
        status: "ok",
        stats: engine.catalog().stats(),
    })
}

#[derive(Deserialize, Debug)]
struct SearchParams {
    q: Option<String>,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct SearchResponse<'a> {
    status: &'static str,
    query: &'a str,
    results: Vec<SongView<'a>>,
}

async fn get_search(
    State(engine): State<GuardedEngine>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };
    let query = match params.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q,
        _ => return error_response(StatusCode::BAD_REQUEST, "Query parameter required"),
    };
    let limit = params
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);

    let results = engine
        .catalog()
        .search(query, limit)
        .into_iter()
        .map(SongView::from)
        .collect();
    Json(SearchResponse {
        status: "ok",
        query,
        results,
    })
    .into_response()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    csv_loaded: bool,
    total_songs: usize,
    message: &'static str,
}

async fn get_health(State(engine): State<GuardedEngine>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        // The catalog is always loaded before the server starts listening.
        csv_loaded: true,
        total_songs: engine.catalog().len(),
        message: "Server is running successfully",
    })
}

pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Endpoint not found")
}

pub fn make_api_routes(state: ServerState) -> Router {
    let catalog_routes: Router = Router::new()
        .route("/moods", get(get_moods))
        .route("/stats", get(get_stats))
        .layer(middleware::from_fn_with_state(state.config.content_cache_age_sec, http_cache))
        .with_state(state.clone());

    Router::new()
        .route("/mood", post(post_mood))
        .route("/search", get(get_search))
        .route("/health", get(get_health))
        .with_state(state)
        .merge(catalog_routes)
}
