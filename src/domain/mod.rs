//! Domain models for Campus Core

pub mod profile;
pub mod role;
pub mod school;
pub mod session;

pub use profile::{CreateProfileInput, Profile};
pub use role::Role;
pub use school::{
    Announcement, ClassSchedule, CreateAnnouncementInput, CreateHomeworkInput, ExamEntry,
    ExamTimetable, Homework, PutExamTimetableInput, PutScheduleInput, SchedulePeriod,
};
pub use session::Session;
