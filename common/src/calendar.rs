//! View state of the schedule calendar: view mode, anchor date, weekend
//! filter, and the day/agenda slicing built on top of them.
//!
//! The view mode and the anchor date are independent axes.  Both are owned
//! by the page hosting the calendar; the calendar surface only reads them
//! and asks for changes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Weekday};
use serde::{Deserialize, Serialize};

use crate::event::CalendarEvent;

/// Length of the agenda window, in days.
pub const AGENDA_LENGTH_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Week,
    Day,
    Agenda,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Week, ViewMode::Day, ViewMode::Agenda];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Week => "Week",
            ViewMode::Day => "Day",
            ViewMode::Agenda => "Agenda",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(ViewMode::Week),
            "day" => Ok(ViewMode::Day),
            "agenda" => Ok(ViewMode::Agenda),
            other => Err(format!("unknown view mode: {other}")),
        }
    }
}

/// Toolbar navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigate {
    Prev,
    Next,
    /// Jump to the given current date.
    Today(NaiveDate),
}

/// Anchor date after applying `nav` in `mode`.
pub fn navigate(mode: ViewMode, anchor: NaiveDate, nav: Navigate) -> NaiveDate {
    let step = match mode {
        ViewMode::Week => Duration::days(7),
        ViewMode::Day => Duration::days(1),
        ViewMode::Agenda => Duration::days(AGENDA_LENGTH_DAYS),
    };
    match nav {
        Navigate::Prev => anchor - step,
        Navigate::Next => anchor + step,
        Navigate::Today(today) => today,
    }
}

/// Half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d < end)
    }
}

/// Dates covered by `mode` around `anchor`.  Weeks start on Monday.
pub fn visible_range(mode: ViewMode, anchor: NaiveDate) -> DateRange {
    match mode {
        ViewMode::Week => {
            let start = week_start(anchor);
            DateRange { start, end: start + Duration::days(7) }
        }
        ViewMode::Day => DateRange { start: anchor, end: anchor + Duration::days(1) },
        ViewMode::Agenda => DateRange {
            start: anchor,
            end: anchor + Duration::days(AGENDA_LENGTH_DAYS),
        },
    }
}

/// Grid columns for the week or day view.
pub fn grid_days(mode: ViewMode, anchor: NaiveDate, show_weekends: bool) -> Vec<NaiveDate> {
    visible_range(mode, anchor)
        .days()
        .filter(|d| show_weekends || mode == ViewMode::Day || !is_weekend(*d))
        .collect()
}

/// Toolbar caption, e.g. `Oct 12 – 18, 2026`.
pub fn range_label(mode: ViewMode, anchor: NaiveDate) -> String {
    let range = visible_range(mode, anchor);
    let last = range.end - Duration::days(1);
    match mode {
        ViewMode::Day => anchor.format("%A, %b %-d, %Y").to_string(),
        _ if range.start.year() != last.year() => format!(
            "{} – {}",
            range.start.format("%b %-d, %Y"),
            last.format("%b %-d, %Y")
        ),
        _ if range.start.month() != last.month() => format!(
            "{} – {}",
            range.start.format("%b %-d"),
            last.format("%b %-d, %Y")
        ),
        _ => format!(
            "{} – {}",
            range.start.format("%b %-d"),
            last.format("%-d, %Y")
        ),
    }
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Calendar date of `instant` in the display time zone.
pub fn local_date<Tz: TimeZone>(instant: DateTime<chrono::Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Events to draw: with `show_weekends` off, drops those starting on a
/// Saturday or Sunday.  The input set is never modified.
pub fn filter_weekends<'a, Tz: TimeZone>(
    events: &'a [CalendarEvent],
    tz: &Tz,
    show_weekends: bool,
) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|ev| show_weekends || !is_weekend(local_date(ev.start, tz)))
        .collect()
}

/// Events starting inside `range`, ordered by start then end.
pub fn events_in_range<'a, Tz: TimeZone>(
    events: &[&'a CalendarEvent],
    range: DateRange,
    tz: &Tz,
) -> Vec<&'a CalendarEvent> {
    let mut out: Vec<&CalendarEvent> = events
        .iter()
        .copied()
        .filter(|ev| range.contains(local_date(ev.start, tz)))
        .collect();
    out.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
    out
}

/// One day of the agenda list.
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaDay<'a> {
    pub date: NaiveDate,
    pub events: Vec<&'a CalendarEvent>,
}

/// Agenda rows for `range`: only days that have events, in date order.
pub fn agenda<'a, Tz: TimeZone>(
    events: &[&'a CalendarEvent],
    range: DateRange,
    tz: &Tz,
) -> Vec<AgendaDay<'a>> {
    let mut days: Vec<AgendaDay<'a>> = Vec::new();
    for ev in events_in_range(events, range, tz) {
        let date = local_date(ev.start, tz);
        match days.last_mut() {
            Some(day) if day.date == date => day.events.push(ev),
            _ => days.push(AgendaDay { date, events: vec![ev] }),
        }
    }
    days
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::event::events_from_entries;
    use crate::event::fixtures::entry;
    use crate::stats::ScheduleStats;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_navigation_steps() {
        let anchor = date(2026, 10, 19);
        assert_eq!(navigate(ViewMode::Week, anchor, Navigate::Next), date(2026, 10, 26));
        assert_eq!(navigate(ViewMode::Week, anchor, Navigate::Prev), date(2026, 10, 12));
        assert_eq!(navigate(ViewMode::Day, anchor, Navigate::Prev), date(2026, 10, 18));
        assert_eq!(navigate(ViewMode::Agenda, anchor, Navigate::Next), date(2026, 11, 18));
        assert_eq!(
            navigate(ViewMode::Day, anchor, Navigate::Today(date(2027, 1, 1))),
            date(2027, 1, 1)
        );
    }

    #[test]
    fn test_week_range_starts_monday() {
        // 2026-10-22 is a Thursday
        let range = visible_range(ViewMode::Week, date(2026, 10, 22));
        assert_eq!(range.start, date(2026, 10, 19));
        assert_eq!(range.end, date(2026, 10, 26));
        assert_eq!(range.days().count(), 7);
        assert_eq!(grid_days(ViewMode::Week, date(2026, 10, 22), false).len(), 5);
        // A weekend day view still shows its own day.
        assert_eq!(grid_days(ViewMode::Day, date(2026, 10, 24), false).len(), 1);
    }

    #[test]
    fn test_range_labels() {
        assert_eq!(range_label(ViewMode::Week, date(2026, 10, 14)), "Oct 12 – 18, 2026");
        assert_eq!(range_label(ViewMode::Week, date(2026, 10, 28)), "Oct 26 – Nov 1, 2026");
        assert_eq!(range_label(ViewMode::Week, date(2026, 12, 30)), "Dec 28, 2026 – Jan 3, 2027");
        assert_eq!(range_label(ViewMode::Day, date(2026, 10, 19)), "Monday, Oct 19, 2026");
    }

    #[test]
    fn test_view_mode_parse() {
        assert_eq!("Agenda".parse::<ViewMode>(), Ok(ViewMode::Agenda));
        assert!("month".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::default(), ViewMode::Week);
    }

    #[test]
    fn test_weekend_filter_is_view_only() {
        // 19 = Monday, 24 = Saturday, 25 = Sunday
        let events = events_from_entries(vec![
            entry("e1", "Math", "Alice", 19, 9, 10),
            entry("e2", "Science", "Bob", 24, 9, 10),
            entry("e3", "Art", "Carol", 25, 9, 10),
        ]);
        let before = ScheduleStats::from_events(&events);

        assert_eq!(filter_weekends(&events, &Utc, true).len(), 3);
        let weekdays = filter_weekends(&events, &Utc, false);
        assert_eq!(weekdays.len(), 1);
        assert_eq!(weekdays[0].id, "e1");

        assert_eq!(events.len(), 3);
        assert_eq!(ScheduleStats::from_events(&events), before);
    }

    #[test]
    fn test_agenda_groups_by_day() {
        let events = events_from_entries(vec![
            entry("e3", "Art", "Carol", 21, 9, 10),
            entry("e2", "Science", "Bob", 19, 10, 11),
            entry("e1", "Math", "Alice", 19, 9, 10),
            entry("e4", "Music", "Dan", 30, 9, 10),
        ]);
        let all = filter_weekends(&events, &Utc, true);
        let range = visible_range(ViewMode::Week, date(2026, 10, 19));
        let rows = agenda(&all, range, &Utc);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, date(2026, 10, 19));
        let ids: Vec<_> = rows[0].events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["e1", "e2"]);
        assert_eq!(rows[1].events[0].id, "e3");
    }
}
