//! Common test utilities
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use campus_core::config::{Config, ProviderConfig, StoreConfig};
use campus_core::domain::{
    Announcement, ClassSchedule, ExamTimetable, Homework, Profile, Role, Session,
};
use campus_core::error::{AppError, Result};
use campus_core::provider::{CreatedAccount, IdentityProvider, SignedInSubject};
use campus_core::server::{build_router, AppState};
use campus_core::session::{SessionEvent, SessionGate};
use campus_core::store::{DocumentStore, ProfileReader};
use chrono::Utc;
use tokio::sync::mpsc;

/// Identity provider fake. Subject ids are derived from the email local part
/// so tests can predict them.
#[derive(Default)]
pub struct FakeProvider {
    pub reject_credentials: AtomicBool,
    /// When set, `delete_account` fails with this provider status and message
    pub delete_failure: Mutex<Option<(u16, String)>>,
    pub deleted: Mutex<Vec<String>>,
    pub signed_out: Mutex<Vec<String>>,
}

fn subject_id_for(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn sign_in(&self, email: &str, _password: &str) -> Result<SignedInSubject> {
        if self.reject_credentials.load(Ordering::SeqCst) {
            return Err(AppError::Provider {
                status: 401,
                message: "invalid credentials".to_string(),
            });
        }
        Ok(SignedInSubject {
            subject_id: subject_id_for(email),
            email: email.to_string(),
            session_token: "tok-test".to_string(),
        })
    }

    async fn sign_out(&self, subject_id: &str) -> Result<()> {
        self.signed_out.lock().unwrap().push(subject_id.to_string());
        Ok(())
    }

    async fn create_account(&self, email: &str, _password: &str) -> Result<CreatedAccount> {
        Ok(CreatedAccount {
            subject_id: subject_id_for(email),
            email: email.to_string(),
        })
    }

    async fn delete_account(&self, subject_id: &str) -> Result<()> {
        if let Some((status, message)) = self.delete_failure.lock().unwrap().clone() {
            return Err(AppError::Provider { status, message });
        }
        self.deleted.lock().unwrap().push(subject_id.to_string());
        Ok(())
    }
}

/// In-memory document store fake
#[derive(Default)]
pub struct InMemoryStore {
    pub profiles: Mutex<HashMap<String, Profile>>,
    pub announcements: Mutex<Vec<Announcement>>,
    pub homework: Mutex<Vec<Homework>>,
    pub schedules: Mutex<HashMap<String, ClassSchedule>>,
    pub exams: Mutex<HashMap<String, ExamTimetable>>,
    /// When set, profile reads fail as the store would on an outage
    pub fail_profile_reads: AtomicBool,
}

impl InMemoryStore {
    pub fn with_profile(self, profile: Profile) -> Self {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.subject_id.clone(), profile);
        self
    }
}

#[async_trait]
impl ProfileReader for InMemoryStore {
    async fn get_profile(&self, subject_id: &str) -> Result<Option<Profile>> {
        if self.fail_profile_reads.load(Ordering::SeqCst) {
            return Err(AppError::Store("store outage".to_string()));
        }
        Ok(self.profiles.lock().unwrap().get(subject_id).cloned())
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn put_profile(&self, profile: &Profile) -> Result<()> {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.subject_id.clone(), profile.clone());
        Ok(())
    }

    async fn delete_profile(&self, subject_id: &str) -> Result<()> {
        self.profiles.lock().unwrap().remove(subject_id);
        Ok(())
    }

    async fn list_profiles_by_role(&self, role: Role) -> Result<Vec<Profile>> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.role == Some(role))
            .cloned()
            .collect())
    }

    async fn insert_announcement(&self, announcement: &Announcement) -> Result<()> {
        self.announcements.lock().unwrap().push(announcement.clone());
        Ok(())
    }

    async fn list_announcements(&self) -> Result<Vec<Announcement>> {
        let mut list = self.announcements.lock().unwrap().clone();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn delete_announcement(&self, id: &str) -> Result<()> {
        self.announcements.lock().unwrap().retain(|a| a.id != id);
        Ok(())
    }

    async fn insert_homework(&self, homework: &Homework) -> Result<()> {
        self.homework.lock().unwrap().push(homework.clone());
        Ok(())
    }

    async fn list_homework(&self, class_name: Option<&str>) -> Result<Vec<Homework>> {
        let mut list: Vec<Homework> = self
            .homework
            .lock()
            .unwrap()
            .iter()
            .filter(|h| class_name.map_or(true, |c| h.class_name == c))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn delete_homework(&self, id: &str) -> Result<()> {
        self.homework.lock().unwrap().retain(|h| h.id != id);
        Ok(())
    }

    async fn put_schedule(&self, schedule: &ClassSchedule) -> Result<()> {
        self.schedules
            .lock()
            .unwrap()
            .insert(schedule.class_name.clone(), schedule.clone());
        Ok(())
    }

    async fn get_schedule(&self, class_name: &str) -> Result<Option<ClassSchedule>> {
        Ok(self.schedules.lock().unwrap().get(class_name).cloned())
    }

    async fn list_schedules(&self) -> Result<Vec<ClassSchedule>> {
        Ok(self.schedules.lock().unwrap().values().cloned().collect())
    }

    async fn put_exam_timetable(&self, timetable: &ExamTimetable) -> Result<()> {
        self.exams
            .lock()
            .unwrap()
            .insert(timetable.class_name.clone(), timetable.clone());
        Ok(())
    }

    async fn get_exam_timetable(&self, class_name: &str) -> Result<Option<ExamTimetable>> {
        Ok(self.exams.lock().unwrap().get(class_name).cloned())
    }

    async fn list_exam_timetables(&self) -> Result<Vec<ExamTimetable>> {
        Ok(self.exams.lock().unwrap().values().cloned().collect())
    }
}

pub fn test_config(webhook_secret: Option<String>) -> Config {
    Config {
        http_host: "127.0.0.1".to_string(),
        http_port: 0,
        provider: ProviderConfig {
            url: "http://provider.test".to_string(),
            api_key: "test-key".to_string(),
            webhook_secret,
        },
        store: StoreConfig {
            url: "http://store.test".to_string(),
            api_key: "test-key".to_string(),
        },
    }
}

/// Everything a router test needs, with the fakes still reachable
pub struct TestContext {
    pub state: AppState,
    pub app: Router,
    pub provider: Arc<FakeProvider>,
    pub store: Arc<InMemoryStore>,
    pub events_rx: mpsc::Receiver<SessionEvent>,
}

pub fn test_context() -> TestContext {
    test_context_with(FakeProvider::default(), InMemoryStore::default(), None)
}

pub fn test_context_with(
    provider: FakeProvider,
    store: InMemoryStore,
    webhook_secret: Option<String>,
) -> TestContext {
    let provider = Arc::new(provider);
    let store = Arc::new(store);
    let gate = SessionGate::new(store.clone());
    let (events_tx, events_rx) = mpsc::channel(16);

    let state = AppState {
        config: Arc::new(test_config(webhook_secret)),
        provider: provider.clone(),
        store: store.clone(),
        gate,
        events: events_tx,
    };
    let app = build_router(state.clone());

    TestContext {
        state,
        app,
        provider,
        store,
        events_rx,
    }
}

pub fn profile(subject_id: &str, role: Option<Role>) -> Profile {
    Profile {
        subject_id: subject_id.to_string(),
        email: format!("{subject_id}@school.example"),
        role,
        display_name: None,
        class_name: None,
        created_at: Utc::now(),
        extra: serde_json::Map::new(),
    }
}

/// Commit a session for `subject_id` by running a sign-in notification
/// through the gate.
pub async fn sign_in(ctx: &TestContext, subject_id: &str) {
    ctx.state
        .gate
        .handle_event(SessionEvent::SignedIn {
            subject_id: subject_id.to_string(),
            email: format!("{subject_id}@school.example"),
        })
        .await;
}

pub fn get(path: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("GET")
        .uri(path)
        .body(axum::body::Body::empty())
        .unwrap()
}

pub fn delete(path: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("DELETE")
        .uri(path)
        .body(axum::body::Body::empty())
        .unwrap()
}

pub fn post_json(path: &str, body: &serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn session(subject_id: &str, role: Option<Role>) -> Session {
    match role {
        Some(_) => Session::from_profile(profile(subject_id, role)),
        None => Session::without_profile(
            subject_id.to_string(),
            format!("{subject_id}@school.example"),
        ),
    }
}
