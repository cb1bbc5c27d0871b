//! Plain-text rendering of the calendar views and statistics.

use std::fmt::Write;

use chrono::{NaiveDate, TimeZone};

use timetable_common::calendar::{self, ViewMode};
use timetable_common::layout;
use timetable_common::periods::PERIODS;
use timetable_common::protocol::SelectOption;
use timetable_common::stats::ScheduleStats;
use timetable_common::CalendarEvent;

/// Week/day: one block per day, lessons in start order with their overlap
/// column.  Agenda: one line per lesson, grouped by date.
pub fn schedule<Tz: TimeZone>(
    events: &[CalendarEvent],
    mode: ViewMode,
    anchor: NaiveDate,
    show_weekends: bool,
    tz: &Tz,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    let visible = calendar::filter_weekends(events, tz, show_weekends || mode == ViewMode::Day);
    let _ = writeln!(out, "{} · {}", mode, calendar::range_label(mode, anchor));

    match mode {
        ViewMode::Agenda => {
            let range = calendar::visible_range(mode, anchor);
            let days = calendar::agenda(&visible, range, tz);
            if days.is_empty() {
                let _ = writeln!(out, "  (no lessons in this range)");
            }
            for day in days {
                let _ = writeln!(out, "\n{}", day.date.format("%a %d %b"));
                for ev in day.events {
                    let _ = writeln!(out, "  {}  {}", time_span(ev, tz), ev.title());
                }
            }
        }
        ViewMode::Week | ViewMode::Day => {
            for day in calendar::grid_days(mode, anchor, show_weekends) {
                let _ = writeln!(out, "\n{}", day.format("%A %d %b"));
                let placed = layout::layout_day(&visible, day, tz);
                if placed.is_empty() {
                    let _ = writeln!(out, "  –");
                }
                for p in placed {
                    let lane = if p.columns > 1 {
                        format!(" [{}/{}]", p.column + 1, p.columns)
                    } else {
                        String::new()
                    };
                    let _ = writeln!(
                        out,
                        "  {}  {}  {}{}",
                        time_span(p.event, tz),
                        p.event.color(),
                        p.event.title(),
                        lane
                    );
                }
            }
        }
    }
    out
}

fn time_span<Tz: TimeZone>(ev: &CalendarEvent, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}–{}",
        ev.start.with_timezone(tz).format("%H:%M"),
        ev.end.with_timezone(tz).format("%H:%M")
    )
}

pub fn stats(stats: Option<&ScheduleStats>) -> String {
    let Some(s) = stats else {
        return "No statistics – no lessons loaded.\n".to_string();
    };
    let mut out = String::new();
    let _ = writeln!(out, "Lessons:     {}", s.total_events);
    let _ = writeln!(out, "Total hours: {}", s.total_hours_display());
    if let Some((name, n)) = s.busiest_subject() {
        let _ = writeln!(out, "Top subject: {name} ({n})");
    }
    let _ = writeln!(out, "\nBy subject:");
    for (name, n) in &s.subject_counts {
        let _ = writeln!(out, "  {name:<24} {n}");
    }
    let _ = writeln!(out, "\nBy teacher:");
    for (name, n) in &s.teacher_counts {
        let _ = writeln!(out, "  {name:<24} {n}");
    }
    out
}

pub fn options(options: &[SelectOption]) -> String {
    let mut out = String::new();
    for o in options {
        let _ = writeln!(out, "{:<26} {}", o.id, o.label);
    }
    out
}

pub fn periods() -> String {
    let mut out = String::new();
    for (i, p) in PERIODS.iter().enumerate() {
        let _ = writeln!(out, "{:>2}  {}", i + 1, p.display());
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use timetable_common::protocol::{ScheduleEntry, SubjectRecordRef, TeacherRecordRef};

    use super::*;

    fn ev(id: &str, subject: &str, teacher: &str, day: u32, from: u32, to: u32) -> CalendarEvent {
        CalendarEvent::from_entry(ScheduleEntry {
            id: id.into(),
            subject: Some(SubjectRecordRef { id: "s".into(), subject_name: subject.into() }),
            teacher: Some(TeacherRecordRef { id: "t".into(), name: teacher.into() }),
            class: None,
            start_time: Utc.with_ymd_and_hms(2026, 10, day, from, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2026, 10, day, to, 0, 0).unwrap(),
        })
    }

    #[test]
    fn test_week_text_hides_weekend() {
        let events = vec![
            ev("e1", "Math", "Alice", 19, 9, 10),
            ev("e2", "Science", "Bob", 19, 9, 11),
            ev("e3", "Art", "Carol", 24, 9, 10),
        ];
        let anchor = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let text = schedule(&events, ViewMode::Week, anchor, false, &Utc);
        assert!(text.starts_with("Week · Oct 19 – 25, 2026"));
        assert!(text.contains("09:00–11:00  #44328c  Science - Bob [1/2]"));
        assert!(text.contains("09:00–10:00  #287b24  Math - Alice [2/2]"));
        assert!(!text.contains("Art - Carol"));
        assert!(!text.contains("Saturday"));
    }

    #[test]
    fn test_agenda_text() {
        let events = vec![ev("e1", "Math", "Alice", 20, 9, 10)];
        let anchor = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let text = schedule(&events, ViewMode::Agenda, anchor, true, &Utc);
        assert!(text.contains("Tue 20 Oct"));
        assert!(text.contains("09:00–10:00  Math - Alice"));
    }

    #[test]
    fn test_stats_placeholder() {
        assert!(stats(None).starts_with("No statistics"));
    }
}
