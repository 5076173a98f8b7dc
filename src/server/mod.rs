//! Server initialization and routing
//!
//! The role-scoped portals are nested under their path prefixes and the role
//! gate middleware is applied once to the whole router, so no handler carries
//! its own authorization check.

use crate::api;
use crate::config::Config;
use crate::provider::{HttpIdentityProvider, IdentityProvider};
use crate::session::{SessionEvent, SessionGate};
use crate::store::{DocumentStore, HttpDocumentStore, ProfileReader};
use anyhow::Result;
use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Capacity of the provider session-event channel
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn IdentityProvider>,
    pub store: Arc<dyn DocumentStore>,
    pub gate: SessionGate,
    /// Sender feeding the gate's subscription loop; used by the webhook
    pub events: mpsc::Sender<SessionEvent>,
}

/// Admin portal routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(api::users::list))
        .route("/accounts/{subject_id}", delete(api::account::delete_account))
        .route(
            "/announcements",
            get(api::announcements::list).post(api::announcements::create),
        )
        .route("/announcements/{id}", delete(api::announcements::remove))
        .route("/schedules", get(api::schedule::list).post(api::schedule::put))
        .route("/schedules/{class_name}", get(api::schedule::get_one))
        .route("/exams", get(api::exam::list).post(api::exam::put))
        .route("/exams/{class_name}", get(api::exam::get_one))
}

/// Principal portal routes
fn principal_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(api::users::list))
        .route(
            "/announcements",
            get(api::announcements::list).post(api::announcements::create),
        )
        .route("/announcements/{id}", delete(api::announcements::remove))
        .route("/homework", get(api::homework::list))
        .route("/schedules", get(api::schedule::list))
        .route("/exams", get(api::exam::list))
}

/// Teacher portal routes
fn teacher_routes() -> Router<AppState> {
    Router::new()
        .route("/homework", get(api::homework::list).post(api::homework::create))
        .route("/homework/{id}", delete(api::homework::remove))
        .route("/announcements", get(api::announcements::list))
        .route("/schedules/{class_name}", get(api::schedule::get_one))
        .route("/exams/{class_name}", get(api::exam::get_one))
}

/// Student portal routes
fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/homework", get(api::homework::list))
        .route("/announcements", get(api::announcements::list))
        .route("/schedules/{class_name}", get(api::schedule::get_one))
        .route("/exams/{class_name}", get(api::exam::get_one))
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(api::health::index))
        .route("/health", get(api::health::health))
        .route("/login", get(api::auth::login_page))
        .route("/api/v1/auth/login", post(api::auth::login))
        .route("/api/v1/auth/logout", post(api::auth::logout))
        .route("/api/v1/auth/register", post(api::auth::register))
        .route("/api/v1/events/session", post(api::session_event::receive))
        .nest("/admin", admin_routes())
        .nest("/principal", principal_routes())
        .nest("/teacher", teacher_routes())
        .nest("/student", student_routes())
        .layer(from_fn_with_state(
            state.gate.clone(),
            crate::middleware::role_gate_middleware,
        ))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Construct the external clients and the gate, spawn the gate's subscription
/// loop, and serve until shutdown.
pub async fn run(config: Config) -> Result<()> {
    let provider = Arc::new(HttpIdentityProvider::new(config.provider.clone()));
    let store = Arc::new(HttpDocumentStore::new(config.store.clone()));

    let gate = SessionGate::new(store.clone() as Arc<dyn ProfileReader>);
    let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    tokio::spawn(gate.clone().run(events_rx));

    let addr = config.http_addr();
    let state = AppState {
        config: Arc::new(config),
        provider,
        store,
        gate,
        events: events_tx,
    };

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    info!("Campus Core listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
