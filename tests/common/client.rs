//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all catalog-server endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

/// HTTP test client
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

    // ========================================================================
    // Home / Stats
    // ========================================================================

    pub async fn home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Request failed")
    }

    // ========================================================================
    // Query Endpoints
    // ========================================================================

    pub async fn get_movies(&self) -> Response {
        self.client
            .get(format!("{}/v1/movies", self.base_url))
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_movie(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/v1/movie/{}", self.base_url, id))
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_series(&self) -> Response {
        self.client
            .get(format!("{}/v1/series", self.base_url))
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_movie_genres(&self) -> Response {
        self.client
            .get(format!("{}/v1/movie-genres", self.base_url))
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_movie_genre(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/v1/movie-genre/{}", self.base_url, id))
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_series_genres(&self) -> Response {
        self.client
            .get(format!("{}/v1/series-genres", self.base_url))
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_series_genre(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/v1/series-genre/{}", self.base_url, id))
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_maturity_ratings(&self) -> Response {
        self.client
            .get(format!("{}/v1/maturity-ratings", self.base_url))
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_maturity_rating(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/v1/maturity-rating/{}", self.base_url, id))
            .send()
            .await
            .expect("Request failed")
    }

    // ========================================================================
    // Mutation Endpoints
    // ========================================================================

    pub async fn post_movie(&self, body: &serde_json::Value) -> Response {
        self.client
            .post(format!("{}/v1/movies", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn post_series(&self, body: &serde_json::Value) -> Response {
        self.client
            .post(format!("{}/v1/series", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn post_movie_genre(&self, body: &serde_json::Value) -> Response {
        self.client
            .post(format!("{}/v1/movie-genres", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn post_series_genre(&self, body: &serde_json::Value) -> Response {
        self.client
            .post(format!("{}/v1/series-genres", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn post_maturity_rating(&self, body: &serde_json::Value) -> Response {
        self.client
            .post(format!("{}/v1/maturity-ratings", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }
}
