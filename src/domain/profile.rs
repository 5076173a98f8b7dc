//! Profile document model
//!
//! The profile document lives in the external document store's `users`
//! collection, keyed by subject id. Known fields are typed and closed; any
//! other field the document carries lands in the `extra` extension map instead
//! of being silently merged into the session untyped.

use super::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Profile document for a subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub subject_id: String,
    pub email: String,
    /// Absent or unknown role means the subject is unauthorized for every
    /// role-scoped area.
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Class the subject belongs to (students) or teaches (teachers)
    #[serde(default)]
    pub class_name: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Extension map for fields outside the closed schema
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

/// Input for creating a profile document (registration)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub role: Role,
    #[validate(length(max = 255))]
    pub display_name: Option<String>,
    #[validate(length(max = 64))]
    pub class_name: Option<String>,
}
