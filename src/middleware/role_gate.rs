//! Role-scoped path enforcement
//!
//! A single middleware applied to the whole router replaces the per-view
//! authorization checks of a portal app: every request whose path falls under
//! a role-scoped prefix is checked against the current session before any
//! handler runs. Unauthorized visitors are silently redirected to the login
//! entry point; while the gate has not processed its first provider
//! notification, guarded paths answer with a loading placeholder and perform
//! no handler work.

use crate::domain::Role;
use crate::session::{role_scope, GateSnapshot, SessionGate, LOGIN_PATH};
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};

/// Returns `true` if any path segment is `.` or `..`.
fn has_dot_segments(path: &str) -> bool {
    path.split('/').any(|seg| seg == "." || seg == "..")
}

/// Outcome of checking a snapshot against a required role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// First provider notification not yet processed
    Loading,
    /// No session, role-less session, or wrong role
    RedirectToLogin,
    Allow,
}

/// Pure authorization decision for one role-scoped request
pub fn authorize(snapshot: &GateSnapshot, required: Role) -> GateDecision {
    if snapshot.loading {
        return GateDecision::Loading;
    }
    match &snapshot.session {
        Some(session) if session.has_role(required) => GateDecision::Allow,
        _ => GateDecision::RedirectToLogin,
    }
}

/// Placeholder body served while the gate is loading
fn loading_placeholder() -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "loading" })),
    )
        .into_response()
}

/// Middleware enforcing the role-scoped path prefixes.
///
/// Paths outside every role scope pass through untouched; requests with path
/// traversal segments are rejected before classification.
pub async fn role_gate_middleware(
    State(gate): State<SessionGate>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if has_dot_segments(path) {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let Some(required) = role_scope(path) else {
        return next.run(request).await;
    };

    match authorize(&gate.snapshot(), required) {
        GateDecision::Loading => loading_placeholder(),
        GateDecision::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
        GateDecision::Allow => next.run(request).await,
    }
}
