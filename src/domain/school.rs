//! School records stored in the external document store

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Announcement visible to the portals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub body: String,
    /// Subject id of the author
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

/// Input for posting an announcement
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub body: String,
}

impl Announcement {
    pub fn new(input: CreateAnnouncementInput, author_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            body: input.body,
            author_id,
            created_at: Utc::now(),
        }
    }
}

/// Homework assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Homework {
    pub id: String,
    pub class_name: String,
    pub subject: String,
    pub description: String,
    pub due_date: NaiveDate,
    /// Subject id of the assigning teacher
    pub teacher_id: String,
    pub created_at: DateTime<Utc>,
}

/// Input for assigning homework
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHomeworkInput {
    #[validate(length(min = 1, max = 64))]
    pub class_name: String,
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    pub due_date: NaiveDate,
}

impl Homework {
    pub fn new(input: CreateHomeworkInput, teacher_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            class_name: input.class_name,
            subject: input.subject,
            description: input.description,
            due_date: input.due_date,
            teacher_id,
            created_at: Utc::now(),
        }
    }
}

/// One period in a class schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePeriod {
    /// Weekday name, as the portals display it
    #[validate(length(min = 1, max = 16))]
    pub day: String,
    pub period: u8,
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
}

/// Weekly schedule for a class, keyed by class name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSchedule {
    pub class_name: String,
    pub periods: Vec<SchedulePeriod>,
    pub created_at: DateTime<Utc>,
}

/// Input for publishing a class schedule
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PutScheduleInput {
    #[validate(length(min = 1, max = 64))]
    pub class_name: String,
    #[validate(nested)]
    pub periods: Vec<SchedulePeriod>,
}

impl ClassSchedule {
    pub fn new(input: PutScheduleInput) -> Self {
        Self {
            class_name: input.class_name,
            periods: input.periods,
            created_at: Utc::now(),
        }
    }
}

/// One exam slot in a timetable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExamEntry {
    pub date: NaiveDate,
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    /// Start time as displayed, e.g. "09:00"
    #[validate(length(min = 1, max = 16))]
    pub start_time: String,
}

/// Exam timetable for a class, keyed by class name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamTimetable {
    pub class_name: String,
    pub exam_name: String,
    pub entries: Vec<ExamEntry>,
    pub created_at: DateTime<Utc>,
}

/// Input for publishing an exam timetable
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PutExamTimetableInput {
    #[validate(length(min = 1, max = 64))]
    pub class_name: String,
    #[validate(length(min = 1, max = 100))]
    pub exam_name: String,
    #[validate(nested)]
    pub entries: Vec<ExamEntry>,
}

impl ExamTimetable {
    pub fn new(input: PutExamTimetableInput) -> Self {
        Self {
            class_name: input.class_name,
            exam_name: input.exam_name,
            entries: input.entries,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_announcement_input_validation() {
        let input = CreateAnnouncementInput {
            title: String::new(),
            body: "hello".to_string(),
        };
        assert!(input.validate().is_err());

        let valid = CreateAnnouncementInput {
            title: "Sports day".to_string(),
            body: "Friday on the main field".to_string(),
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_announcement_new_assigns_id_and_author() {
        let input = CreateAnnouncementInput {
            title: "Sports day".to_string(),
            body: "Friday".to_string(),
        };
        let announcement = Announcement::new(input, "u1".to_string());
        assert!(!announcement.id.is_empty());
        assert_eq!(announcement.author_id, "u1");
    }

    #[test]
    fn test_schedule_input_validates_nested_periods() {
        let input = PutScheduleInput {
            class_name: "5B".to_string(),
            periods: vec![SchedulePeriod {
                day: String::new(),
                period: 1,
                subject: "Maths".to_string(),
            }],
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_school_records_use_camel_case_wire_names() {
        let homework = Homework::new(
            CreateHomeworkInput {
                class_name: "5B".to_string(),
                subject: "Maths".to_string(),
                description: "p. 42".to_string(),
                due_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            },
            "t1".to_string(),
        );
        let json = serde_json::to_value(&homework).unwrap();
        assert!(json.get("className").is_some());
        assert!(json.get("dueDate").is_some());
        assert!(json.get("teacherId").is_some());
    }
}
