//! Health check and public landing endpoints

use axum::{response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Public landing page; never gated
pub async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "campus-core",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
