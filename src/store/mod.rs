//! Document store access
//!
//! The document store is an external hosted collaborator. This module defines
//! the typed boundary the rest of the service talks through: a narrow
//! [`ProfileReader`] used by the session gate (one point read per session
//! event), and the full [`DocumentStore`] used by the portal handlers.

pub mod client;

use crate::domain::{Announcement, ClassSchedule, ExamTimetable, Homework, Profile, Role};
use crate::error::Result;
use async_trait::async_trait;

pub use client::HttpDocumentStore;

/// Collection names in the external document store
pub mod collections {
    pub const USERS: &str = "users";
    pub const ANNOUNCEMENTS: &str = "announcements";
    pub const HOMEWORK: &str = "homework";
    pub const SCHEDULES: &str = "schedules";
    pub const EXAM_TIMETABLES: &str = "examTimetables";
}

/// Point read of a subject's profile document.
///
/// Split out from [`DocumentStore`] so the session gate depends on exactly the
/// one operation it performs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileReader: Send + Sync {
    /// Fetch the profile document for a subject id. `Ok(None)` means the
    /// subject has no profile document.
    async fn get_profile(&self, subject_id: &str) -> Result<Option<Profile>>;
}

/// Full typed surface over the document store collections
#[async_trait]
pub trait DocumentStore: ProfileReader {
    async fn put_profile(&self, profile: &Profile) -> Result<()>;
    async fn delete_profile(&self, subject_id: &str) -> Result<()>;
    /// `where role == X` over the users collection
    async fn list_profiles_by_role(&self, role: Role) -> Result<Vec<Profile>>;

    async fn insert_announcement(&self, announcement: &Announcement) -> Result<()>;
    /// Ordered `createdAt desc`
    async fn list_announcements(&self) -> Result<Vec<Announcement>>;
    async fn delete_announcement(&self, id: &str) -> Result<()>;

    async fn insert_homework(&self, homework: &Homework) -> Result<()>;
    /// Optionally filtered by class, ordered `createdAt desc`
    async fn list_homework(&self, class_name: Option<&str>) -> Result<Vec<Homework>>;
    async fn delete_homework(&self, id: &str) -> Result<()>;

    async fn put_schedule(&self, schedule: &ClassSchedule) -> Result<()>;
    async fn get_schedule(&self, class_name: &str) -> Result<Option<ClassSchedule>>;
    async fn list_schedules(&self) -> Result<Vec<ClassSchedule>>;

    async fn put_exam_timetable(&self, timetable: &ExamTimetable) -> Result<()>;
    async fn get_exam_timetable(&self, class_name: &str) -> Result<Option<ExamTimetable>>;
    async fn list_exam_timetables(&self) -> Result<Vec<ExamTimetable>>;
}
