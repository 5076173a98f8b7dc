//! Typed session derived from the identity provider's session

use super::profile::Profile;
use super::role::Role;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Local session for the currently signed-in subject.
///
/// Invariant: `role` is authoritative only when a profile document exists;
/// a session built with [`Session::without_profile`] carries no role and is
/// unauthorized for every role-scoped area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub subject_id: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Extension fields carried over from the profile document
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    /// Session for a subject whose profile document was found
    pub fn from_profile(profile: Profile) -> Self {
        Self {
            subject_id: profile.subject_id,
            email: profile.email,
            role: profile.role,
            display_name: profile.display_name,
            extra: profile.extra,
        }
    }

    /// Session for an authenticated subject with no profile document.
    /// Fails open to "authenticated, no role" rather than discarding the
    /// sign-in.
    pub fn without_profile(subject_id: String, email: String) -> Self {
        Self {
            subject_id,
            email,
            role: None,
            display_name: None,
            extra: Map::new(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }
}
