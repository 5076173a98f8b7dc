//! Session-change webhook
//!
//! The identity provider pushes session-change notifications here; they are
//! forwarded to the session gate's event channel. When a webhook secret is
//! configured, the payload signature (HMAC-SHA256, hex, in
//! `x-provider-signature`) is verified before the event is accepted.

use crate::error::{AppError, Result};
use crate::server::AppState;
use crate::session::SessionEvent;
use anyhow::anyhow;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-provider-signature";

/// Session-change event payload from the identity provider
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSessionEvent {
    /// "SIGNED_IN" or "SIGNED_OUT"; other event types are ignored
    pub event_type: String,
    pub subject_id: Option<String>,
    pub email: Option<String>,
    /// Event timestamp (epoch millis)
    #[serde(default)]
    pub time: i64,
}

/// Map a provider event to a gate event. `None` for event types this service
/// does not consume.
fn map_event(event: ProviderSessionEvent) -> Result<Option<SessionEvent>> {
    match event.event_type.as_str() {
        "SIGNED_IN" => {
            let subject_id = event
                .subject_id
                .ok_or_else(|| AppError::BadRequest("SIGNED_IN event without subjectId".to_string()))?;
            let email = event
                .email
                .ok_or_else(|| AppError::BadRequest("SIGNED_IN event without email".to_string()))?;
            Ok(Some(SessionEvent::SignedIn { subject_id, email }))
        }
        "SIGNED_OUT" => Ok(Some(SessionEvent::SignedOut)),
        other => {
            debug!(event_type = other, "ignoring provider event");
            Ok(None)
        }
    }
}

/// Verify the webhook signature against the shared secret
fn verify_signature(secret: &str, headers: &HeaderMap, body: &[u8]) -> Result<()> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing webhook signature".to_string()))?;
    let signature = hex::decode(signature)
        .map_err(|_| AppError::Unauthorized("Malformed webhook signature".to_string()))?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AppError::Internal(anyhow!("invalid webhook secret length")))?;
    mac.update(body);
    mac.verify_slice(&signature)
        .map_err(|_| AppError::Unauthorized("Invalid webhook signature".to_string()))
}

/// `POST /api/v1/events/session`
pub async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode> {
    if let Some(secret) = &state.config.provider.webhook_secret {
        verify_signature(secret, &headers, &body)?;
    }

    let payload: ProviderSessionEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("invalid event payload: {e}")))?;

    let Some(event) = map_event(payload)? else {
        return Ok(StatusCode::ACCEPTED);
    };

    state
        .events
        .send(event)
        .await
        .map_err(|_| AppError::Internal(anyhow!("session event channel closed")))?;

    Ok(StatusCode::ACCEPTED)
}
