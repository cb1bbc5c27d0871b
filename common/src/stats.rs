//! Summary statistics over the loaded event set.
//!
//! Always computed from the full set of loaded events, never from the
//! weekend-filtered view: the summary describes what is scheduled, not what
//! happens to be on screen.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::event::CalendarEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStats {
    pub total_events: usize,
    pub total_hours: f64,
    pub subject_counts: BTreeMap<String, usize>,
    pub teacher_counts: BTreeMap<String, usize>,
}

impl ScheduleStats {
    /// `None` for an empty set, so callers show a placeholder instead of zeros.
    pub fn from_events(events: &[CalendarEvent]) -> Option<Self> {
        if events.is_empty() {
            return None;
        }

        let mut subject_counts = BTreeMap::new();
        let mut teacher_counts = BTreeMap::new();
        let mut total_hours = 0.0;
        for ev in events {
            *subject_counts.entry(ev.subject.clone()).or_insert(0) += 1;
            *teacher_counts.entry(ev.teacher.clone()).or_insert(0) += 1;
            total_hours += ev.duration_hours();
        }

        Some(ScheduleStats {
            total_events: events.len(),
            total_hours,
            subject_counts,
            teacher_counts,
        })
    }

    /// Total hours with one decimal, e.g. `"2.0"`.
    pub fn total_hours_display(&self) -> String {
        format!("{:.1}", self.total_hours)
    }

    pub fn busiest_subject(&self) -> Option<(&str, usize)> {
        busiest(&self.subject_counts)
    }

    pub fn busiest_teacher(&self) -> Option<(&str, usize)> {
        busiest(&self.teacher_counts)
    }
}

/// Highest count; ties go to the alphabetically first name.
fn busiest(counts: &BTreeMap<String, usize>) -> Option<(&str, usize)> {
    counts
        .iter()
        .fold(None, |best: Option<(&str, usize)>, (name, &n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((name.as_str(), n)),
        })
}
