//! Authentication endpoints
//!
//! Interactive sign-in sets the session optimistically through the gate's
//! mutator instead of waiting for the provider's next session-change
//! notification.

use crate::domain::{CreateProfileInput, Profile, Session};
use crate::error::Result;
use crate::middleware::CurrentSession;
use crate::server::AppState;
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub session_token: String,
    pub session: Session,
}

/// Login entry point unauthorized visitors are redirected to
pub async fn login_page() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "unauthenticated",
        "message": "Sign in to continue",
    }))
}

/// `POST /api/v1/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    request.validate()?;

    let subject = state
        .provider
        .sign_in(&request.email, &request.password)
        .await?;

    // Same degradation as the gate: a missing or unreadable profile document
    // yields an authenticated, role-less session.
    let session = match state.store.get_profile(&subject.subject_id).await {
        Ok(Some(profile)) => Session::from_profile(profile),
        Ok(None) => Session::without_profile(subject.subject_id.clone(), subject.email.clone()),
        Err(err) => {
            warn!(subject_id = %subject.subject_id, %err, "profile fetch failed during login");
            Session::without_profile(subject.subject_id.clone(), subject.email.clone())
        }
    };

    state.gate.set_session(Some(session.clone()));
    info!(subject_id = %subject.subject_id, role = ?session.role, "interactive login");

    Ok(Json(LoginResponse {
        session_token: subject.session_token,
        session,
    }))
}

/// `POST /api/v1/auth/logout`
pub async fn logout(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<StatusCode> {
    state.provider.sign_out(&session.subject_id).await?;
    state.gate.set_session(None);
    info!(subject_id = %session.subject_id, "interactive logout");
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/v1/auth/register`
///
/// Creates the provider account and the matching profile document. Until the
/// profile write succeeds the new subject is authenticated but role-less.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<CreateProfileInput>,
) -> Result<(StatusCode, Json<Profile>)> {
    input.validate()?;

    let account = state
        .provider
        .create_account(&input.email, &input.password)
        .await?;

    let profile = Profile {
        subject_id: account.subject_id,
        email: account.email,
        role: Some(input.role),
        display_name: input.display_name,
        class_name: input.class_name,
        created_at: Utc::now(),
        extra: serde_json::Map::new(),
    };
    state.store.put_profile(&profile).await?;

    Ok((StatusCode::CREATED, Json(profile)))
}
