//! The fixed bell schedule lessons are booked into.

use chrono::NaiveTime;
use serde::Serialize;

/// One lesson slot.  Times are `HH:MM`, local to the school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    pub label: &'static str,
    pub start: &'static str,
    pub end: &'static str,
}

pub const PERIODS: &[Period] = &[
    Period { label: "Period 1", start: "08:00", end: "08:45" },
    Period { label: "Period 2", start: "08:50", end: "09:35" },
    Period { label: "Period 3", start: "09:40", end: "10:25" },
    Period { label: "Period 4", start: "10:45", end: "11:30" },
    Period { label: "Period 5", start: "11:35", end: "12:20" },
    Period { label: "Period 6", start: "13:05", end: "13:50" },
    Period { label: "Period 7", start: "13:55", end: "14:40" },
    Period { label: "Period 8", start: "14:45", end: "15:30" },
];

impl Period {
    pub fn start_time(&self) -> NaiveTime {
        parse_hhmm(self.start)
    }

    pub fn end_time(&self) -> NaiveTime {
        parse_hhmm(self.end)
    }

    /// `"Period 1 (08:00 – 08:45)"`.
    pub fn display(&self) -> String {
        format!("{} ({} – {})", self.label, self.start, self.end)
    }
}

/// Period at `index` in [`PERIODS`].
pub fn period(index: usize) -> Option<&'static Period> {
    PERIODS.get(index)
}

/// Index of the period spanning exactly `start`..`end`, if any.
pub fn find_period(start: NaiveTime, end: NaiveTime) -> Option<usize> {
    PERIODS
        .iter()
        .position(|p| p.start_time() == start && p.end_time() == end)
}

fn parse_hhmm(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap_or(NaiveTime::MIN)
}
