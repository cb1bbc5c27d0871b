//! The create/edit dialog: field state, per-field validation, and the
//! request body it produces.
//!
//! Validation runs entirely locally.  A form with any field error never
//! reaches the network.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::event::CalendarEvent;
use crate::periods::{self, Period};
use crate::protocol::ScheduleRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FormField {
    Class,
    Teacher,
    Subject,
    Date,
    Period,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormField::Class => "class",
            FormField::Teacher => "teacher",
            FormField::Subject => "subject",
            FormField::Date => "date",
            FormField::Period => "period",
        })
    }
}

/// Inline messages keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FormField, String>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }

    fn insert(&mut self, field: FormField, msg: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| msg.into());
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for FormErrors {}

/// Raw field values as typed into the dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventForm {
    pub teacher_id: String,
    pub subject_id: String,
    /// `YYYY-MM-DD`, as a date input yields it.
    pub date: String,
    /// Index into [`periods::PERIODS`].
    pub period: Option<usize>,
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidForm {
    pub teacher_id: String,
    pub subject_id: String,
    pub date: NaiveDate,
    pub period: &'static Period,
}

impl EventForm {
    /// Pre-fill the edit dialog from an existing event.  The period is only
    /// selected when the event's local start/end match one exactly.
    pub fn from_event<Tz: TimeZone>(event: &CalendarEvent, tz: &Tz) -> Self {
        let start = event.start.with_timezone(tz);
        let end = event.end.with_timezone(tz);
        EventForm {
            teacher_id: event
                .resource
                .teacher
                .as_ref()
                .map(|t| t.id.clone())
                .unwrap_or_default(),
            subject_id: event
                .resource
                .subject
                .as_ref()
                .map(|s| s.id.clone())
                .unwrap_or_default(),
            date: start.date_naive().format("%Y-%m-%d").to_string(),
            period: periods::find_period(start.time(), end.time()),
        }
    }

    pub fn validate(&self) -> Result<ValidForm, FormErrors> {
        let mut errors = FormErrors::default();

        if self.teacher_id.trim().is_empty() {
            errors.insert(FormField::Teacher, "Teacher is required");
        }
        if self.subject_id.trim().is_empty() {
            errors.insert(FormField::Subject, "Subject is required");
        }

        let date = if self.date.trim().is_empty() {
            errors.insert(FormField::Date, "Date is required");
            None
        } else {
            match NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    errors.insert(FormField::Date, "Date must be YYYY-MM-DD");
                    None
                }
            }
        };

        let period = match self.period {
            None => {
                errors.insert(FormField::Period, "Period is required");
                None
            }
            Some(i) => match periods::period(i) {
                Some(p) => Some(p),
                None => {
                    errors.insert(FormField::Period, "Unknown period");
                    None
                }
            },
        };

        match (date, period) {
            (Some(date), Some(period)) if errors.is_empty() => Ok(ValidForm {
                teacher_id: self.teacher_id.trim().to_string(),
                subject_id: self.subject_id.trim().to_string(),
                date,
                period,
            }),
            _ => Err(errors),
        }
    }

    /// Validate and build the request body for `class_id`, resolving the
    /// period's wall-clock times in `tz`.
    pub fn to_request<Tz: TimeZone>(&self, class_id: &str, tz: &Tz) -> Result<ScheduleRequest, FormErrors> {
        let valid = self.validate();
        let mut errors = valid.clone().err().unwrap_or_default();
        if class_id.trim().is_empty() {
            errors.insert(FormField::Class, "Select a class first");
        }
        let valid = match valid {
            Ok(v) if errors.is_empty() => v,
            _ => return Err(errors),
        };

        let start = NaiveDateTime::new(valid.date, valid.period.start_time());
        let end = NaiveDateTime::new(valid.date, valid.period.end_time());
        let (Some(start_iso), Some(end_iso)) = (to_utc_iso(start, tz), to_utc_iso(end, tz)) else {
            errors.insert(FormField::Period, "This period does not exist on that date");
            return Err(errors);
        };

        Ok(ScheduleRequest {
            teacher: valid.teacher_id,
            subject: valid.subject_id,
            class: class_id.trim().to_string(),
            date: valid.date.format("%Y-%m-%d").to_string(),
            start_time: valid.period.start.to_string(),
            end_time: valid.period.end.to_string(),
            start_time_iso: start_iso,
            end_time_iso: end_iso,
        })
    }
}

/// Local wall-clock time as a UTC ISO-8601 string with milliseconds,
/// e.g. `2026-10-19T07:00:00.000Z`.  `None` inside a DST gap.
fn to_utc_iso<Tz: TimeZone>(local: NaiveDateTime, tz: &Tz) -> Option<String> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::*;
    use crate::event::fixtures::entry;

    fn filled() -> EventForm {
        EventForm {
            teacher_id: "t1".into(),
            subject_id: "s1".into(),
            date: "2026-10-19".into(),
            period: Some(0),
        }
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = EventForm::default().validate().unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(
            fields,
            [FormField::Teacher, FormField::Subject, FormField::Date, FormField::Period]
        );
        assert_eq!(errors.get(FormField::Teacher), Some("Teacher is required"));
    }

    #[test]
    fn test_bad_date_and_period() {
        let form = EventForm {
            date: "19/10/2026".into(),
            period: Some(99),
            ..filled()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FormField::Date), Some("Date must be YYYY-MM-DD"));
        assert_eq!(errors.get(FormField::Period), Some("Unknown period"));
        assert_eq!(errors.get(FormField::Teacher), None);
    }

    #[test]
    fn test_request_in_utc() {
        let req = filled().to_request("c5a", &Utc).unwrap();
        assert_eq!(req.class, "c5a");
        assert_eq!(req.date, "2026-10-19");
        assert_eq!(req.start_time, "08:00");
        assert_eq!(req.end_time, "08:45");
        assert_eq!(req.start_time_iso, "2026-10-19T08:00:00.000Z");
        assert_eq!(req.end_time_iso, "2026-10-19T08:45:00.000Z");
    }

    #[test]
    fn test_request_converts_local_time() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let req = filled().to_request("c5a", &plus_two).unwrap();
        assert_eq!(req.start_time, "08:00");
        assert_eq!(req.start_time_iso, "2026-10-19T06:00:00.000Z");
    }

    #[test]
    fn test_missing_class_is_a_field_error() {
        let errors = filled().to_request(" ", &Utc).unwrap_err();
        assert_eq!(errors.get(FormField::Class), Some("Select a class first"));
    }

    #[test]
    fn test_prefill_from_event() {
        let mut e = entry("e1", "Math", "Alice", 19, 8, 8);
        e.end_time = e.start_time + chrono::Duration::minutes(45);
        let ev = CalendarEvent::from_entry(e);
        let form = EventForm::from_event(&ev, &Utc);
        assert_eq!(form.teacher_id, "t-Alice");
        assert_eq!(form.subject_id, "s-Math");
        assert_eq!(form.date, "2026-10-19");
        assert_eq!(form.period, Some(0));

        let odd = CalendarEvent::from_entry(entry("e2", "Math", "Alice", 19, 9, 10));
        assert_eq!(EventForm::from_event(&odd, &Utc).period, None);
    }
}
