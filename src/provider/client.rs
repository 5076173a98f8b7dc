//! HTTP client for the hosted identity provider

use super::{CreatedAccount, IdentityProvider, SignedInSubject};
use crate::config::ProviderConfig;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Identity provider HTTP client
#[derive(Clone)]
pub struct HttpIdentityProvider {
    config: ProviderConfig,
    http_client: Client,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: Option<String>,
}

impl HttpIdentityProvider {
    pub fn new(config: ProviderConfig) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.url)
    }
}

fn transport_error(e: reqwest::Error) -> AppError {
    AppError::Provider {
        status: 502,
        message: format!("identity provider unreachable: {e}"),
    }
}

/// Turn a non-success provider response into an error carrying the provider's
/// own status code and message.
async fn provider_error(response: reqwest::Response) -> AppError {
    let status = response.status().as_u16();
    let message = match response.json::<ProviderErrorBody>().await {
        Ok(body) => body
            .message
            .unwrap_or_else(|| "identity provider request failed".to_string()),
        Err(_) => "identity provider request failed".to_string(),
    };
    AppError::Provider { status, message }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignedInSubject> {
        let response = self
            .http_client
            .post(self.url("/v1/sessions"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }
        let subject = response
            .json::<SignedInSubject>()
            .await
            .map_err(|e| AppError::Provider {
                status: 502,
                message: format!("invalid sign-in response: {e}"),
            })?;
        debug!(subject_id = %subject.subject_id, "provider sign-in succeeded");
        Ok(subject)
    }

    async fn sign_out(&self, subject_id: &str) -> Result<()> {
        let response = self
            .http_client
            .delete(self.url(&format!("/v1/sessions/{subject_id}")))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }
        Ok(())
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<CreatedAccount> {
        let response = self
            .http_client
            .post(self.url("/v1/accounts"))
            .bearer_auth(&self.config.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }
        response
            .json::<CreatedAccount>()
            .await
            .map_err(|e| AppError::Provider {
                status: 502,
                message: format!("invalid account creation response: {e}"),
            })
    }

    async fn delete_account(&self, subject_id: &str) -> Result<()> {
        let response = self
            .http_client
            .delete(self.url(&format!("/v1/admin/accounts/{subject_id}")))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }
        debug!(subject_id, "provider account deleted");
        Ok(())
    }
}
