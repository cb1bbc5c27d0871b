//! Wire types for the school-management REST backend.
//!
//! Every endpoint answers with the same envelope:
//! `{ "success": bool, "data": ..., "message": "..." }`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response envelope shared by all backend endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Absent on some endpoints; only an explicit `false` is a failure.
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}

// ─── Listings ────────────────────────────────────────────────────────────────

/// Row of `GET /api/class/all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub class_text: String,
}

/// Row of `GET /api/subject/all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub subject_name: String,
}

/// Row of `GET /api/teacher/all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Bare `{ _id }` reference, as the class is returned unpopulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    #[serde(rename = "_id")]
    pub id: String,
}

/// `{id, label}` option shown in a select box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

/// A class the user can pick in the class selector.
pub type ClassOption = SelectOption;

impl From<ClassRecord> for SelectOption {
    fn from(r: ClassRecord) -> Self {
        Self { id: r.id, label: r.class_text }
    }
}

impl From<SubjectRecord> for SelectOption {
    fn from(r: SubjectRecord) -> Self {
        Self { id: r.id, label: r.subject_name }
    }
}

impl From<TeacherRecord> for SelectOption {
    fn from(r: TeacherRecord) -> Self {
        Self { id: r.id, label: r.name }
    }
}

// ─── Schedule ────────────────────────────────────────────────────────────────

/// One timetable entry of `GET /api/schedule/fetch-with-class/:classId`.
///
/// Bound to one concrete start/end instant; there are no recurrence rules,
/// every lesson is its own entry.  Subject and teacher come back populated
/// but may be `null` when the referenced document was deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub subject: Option<SubjectRecordRef>,
    #[serde(default)]
    pub teacher: Option<TeacherRecordRef>,
    #[serde(default)]
    pub class: Option<IdRef>,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
}

/// Populated subject inside a [`ScheduleEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRecordRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub subject_name: String,
}

/// Populated teacher inside a [`ScheduleEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRecordRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Body of `POST /api/schedule/create` and `PATCH /api/schedule/update/:id`.
///
/// `date`, `startTime` and `endTime` are the wall-clock values the user
/// picked (`YYYY-MM-DD`, `HH:MM`); the `*ISO` fields are the same instants
/// in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub teacher: String,
    pub subject: String,
    pub class: String,
    pub date: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    #[serde(rename = "startTimeISO")]
    pub start_time_iso: String,
    #[serde(rename = "endTimeISO")]
    pub end_time_iso: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_schedule_envelope() {
        let body = r#"{
            "success": true,
            "data": [{
                "_id": "e1",
                "subject": {"_id": "s1", "subject_name": "Math"},
                "teacher": {"_id": "t1", "name": "Alice"},
                "class": {"_id": "c5a"},
                "startTime": "2026-10-19T09:00:00.000Z",
                "endTime": "2026-10-19T10:00:00.000Z"
            }]
        }"#;
        let env: ApiEnvelope<Vec<ScheduleEntry>> = serde_json::from_str(body).unwrap();
        assert!(env.success);
        let data = env.data.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].subject.as_ref().unwrap().subject_name, "Math");
        assert_eq!(data[0].class, Some(IdRef { id: "c5a".into() }));
        assert_eq!(
            (data[0].end_time - data[0].start_time).num_minutes(),
            60
        );
    }

    #[test]
    fn test_decode_null_teacher() {
        let body = r#"{"_id":"e2","subject":null,"teacher":null,
            "startTime":"2026-10-19T09:00:00Z","endTime":"2026-10-19T09:45:00Z"}"#;
        let e: ScheduleEntry = serde_json::from_str(body).unwrap();
        assert!(e.subject.is_none());
        assert!(e.teacher.is_none());
        assert!(e.class.is_none());
    }

    #[test]
    fn test_request_field_names() {
        let req = ScheduleRequest {
            teacher: "t1".into(),
            subject: "s1".into(),
            class: "c1".into(),
            date: "2026-10-19".into(),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            start_time_iso: "2026-10-19T09:00:00.000Z".into(),
            end_time_iso: "2026-10-19T10:00:00.000Z".into(),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["startTime"], "09:00");
        assert_eq!(v["endTimeISO"], "2026-10-19T10:00:00.000Z");
        assert_eq!(v["class"], "c1");
    }
}
