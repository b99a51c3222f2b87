use anyhow::{Context, Result};
use std::time::Duration;

use axum::{
    extract::State,
    handler::HandlerWithoutStateExt,
    http::{header, HeaderValue, Method},
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;

use super::api::{make_api_routes, not_found};
use super::metrics::metrics_handler;
use super::{log_requests, state::*, ServerConfig};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServerStats {
    pub uptime: String,
    pub total_songs: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        total_songs: state.engine.catalog().len(),
    };
    Json(stats)
}

fn make_cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin = origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", origin))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

pub fn make_app(config: ServerConfig, engine: GuardedEngine) -> Result<Router> {
    let cors = make_cors_layer(&config.cors_origin)?;
    let state = ServerState::new(config.clone(), engine);

    let api_routes = make_api_routes(state.clone()).fallback(not_found);

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service = ServeDir::new(frontend_path)
                .append_index_html_on_directories(true)
                .not_found_service(not_found.into_service());
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .fallback(not_found)
            .with_state(state.clone()),
    };

    let app: Router = home_router
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
        .layer(cors);

    Ok(app)
}

pub fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

pub async fn run_server(config: ServerConfig, engine: GuardedEngine) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, engine)?;

    let listener = TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    let metrics_listener = TcpListener::bind(format!("127.0.0.1:{}", metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}", metrics_port))?;

    info!("Ready to serve at port {}!", port);
    info!("Metrics available at port {}!", metrics_port);

    tokio::select! {
        result = axum::serve(listener, app) => result.context("Server failed")?,
        result = axum::serve(metrics_listener, make_metrics_app()) => {
            result.context("Metrics server failed")?
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AudioFeatures, Catalog, Language, Mood, Song, UNKNOWN_GENRE};
    use crate::recommend::{CascadeMode, RecommendationEngine};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use std::sync::Arc;
    use tower::ServiceExt; // for `oneshot`

    fn engine() -> GuardedEngine {
        let songs = [
            ("Happy", "Pharrell Williams", Mood::Happy, Language::English),
            ("Kal Ho Naa Ho", "Sonu Nigam", Mood::Sad, Language::Hindi),
            ("Dynamite", "BTS", Mood::Happy, Language::Korean),
        ]
        .into_iter()
        .map(|(title, artist, mood, language)| Song {
            title: title.to_owned(),
            artist: artist.to_owned(),
            mood,
            language,
            genre: UNKNOWN_GENRE.to_owned(),
            tags: vec![],
            external_id: format!("id-{}", title),
            features: AudioFeatures::new(0.5, 0.5),
            seeds: vec![],
        })
        .collect();
        Arc::new(RecommendationEngine::new(
            Arc::new(Catalog::from_songs(songs)),
            CascadeMode::Strict,
        ))
    }

    fn app() -> Router {
        make_app(ServerConfig::default(), engine()).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[test]
    fn formats_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "0d 00:00:00");
        assert_eq!(
            format_uptime(Duration::from_secs(2 * 86_400 + 3 * 3600 + 4 * 60 + 5)),
            "2d 03:04:05"
        );
    }

    #[test]
    fn rejects_invalid_cors_origin() {
        let config = ServerConfig {
            cors_origin: "bad\norigin".to_owned(),
            ..Default::default()
        };
        assert!(make_app(config, engine()).is_err());
    }

    #[tokio::test]
    async fn home_reports_catalog_size() {
        let response = app().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["totalSongs"], 3);
        assert!(json["uptime"].as_str().unwrap().starts_with("0d "));
    }

    #[tokio::test]
    async fn unknown_routes_are_json_404() {
        for uri in ["/nope", "/api/nope", "/api/mood/extra"] {
            let response = app().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
            assert_eq!(body_json(response).await["error"], "Endpoint not found");
        }
    }

    #[tokio::test]
    async fn recommends_through_router() {
        let request = post_json("/api/mood", r#"{"mood":"happy","language":"Korean"}"#);
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["matchTier"], "exact");
        assert_eq!(json["recommendations"][0]["title"], "Dynamite");
        assert_eq!(json["totalInDatabase"], 3);
    }

    #[tokio::test]
    async fn malformed_mood_body_is_bad_request() {
        let response = app()
            .oneshot(post_json("/api/mood", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());

        let response = app()
            .oneshot(post_json("/api/mood", r#"{"language":"Hindi"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Mood is required");
    }

    #[tokio::test]
    async fn moods_and_stats_are_cacheable() {
        let response = app().oneshot(get_request("/api/moods")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "max-age=3600"
        );
        let json = body_json(response).await;
        assert_eq!(json["moods"], serde_json::json!(["happy", "sad"]));
        assert_eq!(
            json["languages"],
            serde_json::json!(["English", "Hindi", "Korean"])
        );

        let response = app().oneshot(get_request("/api/stats")).await.unwrap();
        assert!(response.headers().contains_key(header::CACHE_CONTROL));
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["totalSongs"], 3);
        assert_eq!(json["moods"]["happy"], 2);
        assert_eq!(json["languages"]["Hindi"], 1);
    }

    #[tokio::test]
    async fn search_requires_query() {
        let response = app().oneshot(get_request("/api/search")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Query parameter required"
        );

        let response = app()
            .oneshot(get_request("/api/search?q=%20%20"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_matches_and_limits() {
        let response = app()
            .oneshot(get_request("/api/search?q=happy&limit=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["query"], "happy");
        assert_eq!(json["results"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn health_reports_loaded_catalog() {
        let response = app().oneshot(get_request("/api/health")).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["csvLoaded"], true);
        assert_eq!(json["totalSongs"], 3);
        assert_eq!(json["message"], "Server is running successfully");
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let request = Request::builder()
            .uri("/api/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn serves_frontend_when_configured() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>MoodTunes</h1>").unwrap();
        let config = ServerConfig {
            frontend_dir_path: Some(dir.path().to_string_lossy().into_owned()),
            ..Default::default()
        };
        let app = make_app(config, engine()).unwrap();

        let response = app.clone().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"<h1>MoodTunes</h1>");

        let response = app.oneshot(get_request("/missing.js")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
