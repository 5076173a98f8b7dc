//! Session/Role Gate
//!
//! Reflects the external identity provider's session into a typed,
//! role-annotated [`Session`], held in a watch channel so middleware and
//! handlers can read it without locking. The gate owns the single persistent
//! subscription to the provider's session-change notifications; it is
//! constructed explicitly at startup and torn down by closing the event
//! channel.
//!
//! Each notification triggers at most one point read of the subject's profile
//! document. Fetches are sequence-stamped at arrival and a result is committed
//! only while its stamp is still the latest, so a superseded fetch can never
//! overwrite a newer session.

use crate::domain::{Role, Session};
use crate::store::ProfileReader;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

/// Login entry point unauthorized visitors are redirected to
pub const LOGIN_PATH: &str = "/login";

/// Session-change notification from the identity provider
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn { subject_id: String, email: String },
    SignedOut,
}

/// Current gate state, readable by every protected view.
///
/// `loading` is true until the first provider notification has been processed,
/// letting consumers distinguish "not yet known" from "known unauthenticated".
#[derive(Debug, Clone, PartialEq)]
pub struct GateSnapshot {
    pub loading: bool,
    pub session: Option<Session>,
}

impl GateSnapshot {
    fn initial() -> Self {
        Self {
            loading: true,
            session: None,
        }
    }
}

/// Classify a request path against the fixed role-scoped prefixes.
///
/// Matches on segment boundaries (`/admins` is not admin-scoped). Callers
/// must reject `.`/`..` segments before classification; the role gate
/// middleware does.
pub fn role_scope(path: &str) -> Option<Role> {
    let first = path.split('/').find(|seg| !seg.is_empty())?;
    first.parse().ok()
}

struct GateInner {
    profiles: Arc<dyn ProfileReader>,
    state: watch::Sender<GateSnapshot>,
    seq: AtomicU64,
}

/// The session/role gate
#[derive(Clone)]
pub struct SessionGate {
    inner: Arc<GateInner>,
}

impl SessionGate {
    pub fn new(profiles: Arc<dyn ProfileReader>) -> Self {
        let (state, _) = watch::channel(GateSnapshot::initial());
        Self {
            inner: Arc::new(GateInner {
                profiles,
                state,
                seq: AtomicU64::new(0),
            }),
        }
    }

    /// Current gate state
    pub fn snapshot(&self) -> GateSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Watch the gate state; used by tests and anything that needs to react
    /// to session changes
    pub fn subscribe(&self) -> watch::Receiver<GateSnapshot> {
        self.inner.state.subscribe()
    }

    /// Optimistically set the session, e.g. right after interactive login,
    /// without waiting for the next provider notification
    pub fn set_session(&self, session: Option<Session>) {
        self.inner.state.send_replace(GateSnapshot {
            loading: false,
            session,
        });
    }

    /// The persistent subscription loop. Runs until the event channel closes
    /// (application teardown). Each event is stamped with its sequence number
    /// here, in arrival order, then handled on its own task so a slow profile
    /// fetch never delays newer notifications. Stamping must not move into
    /// the spawned task: task start order is up to the scheduler, and a later
    /// event taking a lower stamp would let a stale fetch commit over it.
    pub async fn run(self, mut events: mpsc::Receiver<SessionEvent>) {
        while let Some(event) = events.recv().await {
            let seq = self.next_seq();
            let gate = self.clone();
            tokio::spawn(async move { gate.process(seq, event).await });
        }
        debug!("session event channel closed, gate subscription ended");
    }

    /// Process one provider notification, stamped at the point of call
    pub async fn handle_event(&self, event: SessionEvent) {
        let seq = self.next_seq();
        self.process(seq, event).await;
    }

    fn next_seq(&self) -> u64 {
        self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn process(&self, seq: u64, event: SessionEvent) {
        let session = match event {
            SessionEvent::SignedOut => None,
            SessionEvent::SignedIn { subject_id, email } => {
                Some(self.resolve_session(subject_id, email).await)
            }
        };

        // Commit only while this is still the latest notification
        if self.inner.seq.load(Ordering::SeqCst) == seq {
            self.set_session(session);
        } else {
            debug!(seq, "discarding superseded session event result");
        }
    }

    /// One point read of the profile document. Never fails: fetch errors and
    /// missing documents degrade to an authenticated, role-less session.
    async fn resolve_session(&self, subject_id: String, email: String) -> Session {
        match self.inner.profiles.get_profile(&subject_id).await {
            Ok(Some(profile)) => Session::from_profile(profile),
            Ok(None) => {
                debug!(subject_id, "no profile document for subject");
                Session::without_profile(subject_id, email)
            }
            Err(err) => {
                warn!(subject_id, %err, "profile fetch failed, degrading to role-less session");
                Session::without_profile(subject_id, email)
            }
        }
    }
}
