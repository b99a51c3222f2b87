//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per API endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::json;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========================================================================
    // Recommendation
    // ========================================================================

    /// POST /api/mood
    pub async fn recommend(
        &self,
        mood: &str,
        language: Option<&str>,
        count: Option<usize>,
    ) -> Response {
        let mut body = json!({ "mood": mood });
        if let Some(language) = language {
            body["language"] = json!(language);
        }
        if let Some(count) = count {
            body["count"] = json!(count);
        }
        self.post_mood_body(body.to_string()).await
    }

    /// POST /api/mood with a raw body
    pub async fn post_mood_body(&self, body: String) -> Response {
        self.client
            .post(self.url("/api/mood"))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .expect("Recommend request failed")
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// GET /api/moods
    pub async fn get_moods(&self) -> Response {
        self.get("/api/moods").await
    }

    /// GET /api/stats
    pub async fn get_stats(&self) -> Response {
        self.get("/api/stats").await
    }

    /// GET /api/search
    pub async fn search(&self, query: &str, limit: Option<usize>) -> Response {
        let mut params = vec![("q", query.to_owned())];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        self.client
            .get(self.url("/api/search"))
            .query(&params)
            .send()
            .await
            .expect("Search request failed")
    }

    /// GET /api/health
    pub async fn health(&self) -> Response {
        self.get("/api/health").await
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }
}
