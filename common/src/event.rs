//! Calendar events derived from backend schedule entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::color;
use crate::protocol::ScheduleEntry;

/// Shown when an entry's subject was not populated.
pub const UNKNOWN_SUBJECT: &str = "Unknown subject";
/// Shown when an entry's teacher was not populated.
pub const UNASSIGNED_TEACHER: &str = "Unassigned";

/// A schedule entry ready to be placed on the calendar grid.
///
/// Subject and teacher are carried as separate fields; [`title`](Self::title)
/// joins them for display only.  Never persisted: the whole set is rebuilt
/// from a fresh fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub subject: String,
    pub teacher: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// The originating entry, for the detail view and the edit dialog.
    pub resource: ScheduleEntry,
}

impl CalendarEvent {
    pub fn from_entry(entry: ScheduleEntry) -> Self {
        let subject = entry
            .subject
            .as_ref()
            .map(|s| s.subject_name.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_SUBJECT.to_string());
        let teacher = entry
            .teacher
            .as_ref()
            .map(|t| t.name.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNASSIGNED_TEACHER.to_string());

        CalendarEvent {
            id: entry.id.clone(),
            subject,
            teacher,
            start: entry.start_time,
            end: entry.end_time,
            resource: entry,
        }
    }

    /// `"<subject> - <teacher>"`.
    pub fn title(&self) -> String {
        format!("{} - {}", self.subject, self.teacher)
    }

    /// Block background colour, keyed on the subject.
    pub fn color(&self) -> String {
        color::color_for(&self.subject)
    }

    /// Length in hours; zero when the server sent an inverted range.
    pub fn duration_hours(&self) -> f64 {
        let secs = (self.end - self.start).num_seconds().max(0);
        secs as f64 / 3600.0
    }
}

/// Convert a fetched batch, preserving server order.
pub fn events_from_entries(entries: Vec<ScheduleEntry>) -> Vec<CalendarEvent> {
    entries.into_iter().map(CalendarEvent::from_entry).collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone, Utc};

    use crate::protocol::{IdRef, ScheduleEntry, SubjectRecordRef, TeacherRecordRef};

    /// Entry on 2026-10-19 (a Monday) unless `day` says otherwise.
    pub fn entry(id: &str, subject: &str, teacher: &str, day: u32, from: u32, to: u32) -> ScheduleEntry {
        ScheduleEntry {
            id: id.to_string(),
            subject: Some(SubjectRecordRef {
                id: format!("s-{subject}"),
                subject_name: subject.to_string(),
            }),
            teacher: Some(TeacherRecordRef {
                id: format!("t-{teacher}"),
                name: teacher.to_string(),
            }),
            class: Some(IdRef { id: "c5a".into() }),
            start_time: Utc.with_ymd_and_hms(2026, 10, day, from, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2026, 10, day, to, 0, 0).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::entry;
    use super::*;

    #[test]
    fn test_title_and_fields() {
        let ev = CalendarEvent::from_entry(entry("e1", "Math", "Alice", 19, 9, 10));
        assert_eq!(ev.title(), "Math - Alice");
        assert_eq!(ev.subject, "Math");
        assert_eq!(ev.teacher, "Alice");
        assert_eq!(ev.start, ev.resource.start_time);
        assert_eq!(ev.end, ev.resource.end_time);
        assert_eq!(ev.color(), "#287b24");
    }

    #[test]
    fn test_delimiter_in_names_does_not_confuse_fields() {
        let ev = CalendarEvent::from_entry(entry("e1", "Art - Drawing", "Ann - Marie", 19, 9, 10));
        assert_eq!(ev.subject, "Art - Drawing");
        assert_eq!(ev.teacher, "Ann - Marie");
    }

    #[test]
    fn test_missing_refs_fall_back() {
        let mut e = entry("e1", "Math", "Alice", 19, 9, 10);
        e.subject = None;
        e.teacher = None;
        let ev = CalendarEvent::from_entry(e);
        assert_eq!(ev.subject, UNKNOWN_SUBJECT);
        assert_eq!(ev.teacher, UNASSIGNED_TEACHER);
    }

    #[test]
    fn test_inverted_range_counts_zero_hours() {
        let ev = CalendarEvent::from_entry(entry("e1", "Math", "Alice", 19, 10, 9));
        assert_eq!(ev.duration_hours(), 0.0);
    }
}
