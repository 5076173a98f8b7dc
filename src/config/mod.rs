//! Configuration management for Campus Core

use anyhow::{Context, Result};
use std::env;
use url::Url;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Identity provider configuration
    pub provider: ProviderConfig,
    /// Document store configuration
    pub store: StoreConfig,
}

/// External identity provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the identity provider (e.g., https://id.example.com)
    pub url: String,
    /// Service API key for privileged operations (account deletion)
    pub api_key: String,
    /// Secret for verifying session-event webhook signatures (HMAC-SHA256).
    /// Required in production to prevent spoofed events.
    pub webhook_secret: Option<String>,
}

/// External document store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the document store (e.g., https://docs.example.com)
    pub url: String,
    /// Service API key
    pub api_key: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid HTTP_PORT")?,
            provider: ProviderConfig {
                url: require_url("PROVIDER_URL")?,
                api_key: env::var("PROVIDER_API_KEY").context("PROVIDER_API_KEY is required")?,
                webhook_secret: env::var("PROVIDER_WEBHOOK_SECRET").ok(),
            },
            store: StoreConfig {
                url: require_url("STORE_URL")?,
                api_key: env::var("STORE_API_KEY").context("STORE_API_KEY is required")?,
            },
        })
    }

    /// HTTP listen address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

/// Read a required env var and check it parses as an absolute URL.
/// A trailing slash is stripped so clients can join paths uniformly.
fn require_url(var: &str) -> Result<String> {
    let raw = env::var(var).with_context(|| format!("{var} is required"))?;
    Url::parse(&raw).with_context(|| format!("{var} is not a valid URL"))?;
    Ok(raw.trim_end_matches('/').to_string())
}
