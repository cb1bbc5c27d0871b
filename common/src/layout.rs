//! Time-grid layout: packs concurrent events of one day into side-by-side
//! columns.
//!
//! Events are sorted by start, split into clusters of transitively
//! overlapping intervals, and each event takes the leftmost column that is
//! free at its start.  Every event in a cluster shares the cluster's column
//! count, so blocks in the same cluster have equal width.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike, Utc};

use crate::calendar::local_date;
use crate::event::CalendarEvent;

pub const MINUTES_PER_DAY: u32 = 24 * 60;
/// Blocks shorter than this are stretched so they stay clickable.
pub const MIN_BLOCK_MINUTES: u32 = 15;

/// Where one event is drawn inside a day column.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<'a> {
    pub event: &'a CalendarEvent,
    /// Zero-based column inside the cluster.
    pub column: usize,
    /// Number of columns in the cluster.
    pub columns: usize,
    /// Minutes after local midnight.
    pub top_minutes: u32,
    pub height_minutes: u32,
}

impl Placement<'_> {
    /// Left offset as a percentage of the day column width.
    pub fn left_pct(&self) -> f64 {
        self.column as f64 * self.width_pct()
    }

    pub fn width_pct(&self) -> f64 {
        100.0 / self.columns.max(1) as f64
    }
}

/// Lay out the events starting on `day` (in `tz`).
///
/// Events that run past midnight are clipped to the end of `day`.
pub fn layout_day<'a, Tz: TimeZone>(
    events: &[&'a CalendarEvent],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<Placement<'a>> {
    let mut todays: Vec<&CalendarEvent> = events
        .iter()
        .copied()
        .filter(|ev| local_date(ev.start, tz) == day)
        .collect();
    todays.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut placements: Vec<Placement<'a>> = Vec::with_capacity(todays.len());
    // End instant of the last event in each column of the open cluster.
    let mut column_ends: Vec<DateTime<Utc>> = Vec::new();
    let mut cluster_start = 0;
    let mut cluster_end: Option<DateTime<Utc>> = None;

    for ev in todays {
        // Packed on the drawn extent, so a stretched short block still
        // claims the rows it covers.
        let end = ev
            .end
            .max(ev.start + Duration::minutes(i64::from(MIN_BLOCK_MINUTES)));

        if cluster_end.is_some_and(|ce| ev.start >= ce) {
            close_cluster(&mut placements[cluster_start..], column_ends.len());
            cluster_start = placements.len();
            column_ends.clear();
            cluster_end = None;
        }

        let column = match column_ends.iter().position(|&ce| ce <= ev.start) {
            Some(free) => {
                column_ends[free] = end;
                free
            }
            None => {
                column_ends.push(end);
                column_ends.len() - 1
            }
        };
        cluster_end = Some(cluster_end.map_or(end, |ce| ce.max(end)));

        let top = minute_of_day(ev.start, tz);
        let bottom = if local_date(end, tz) == day {
            minute_of_day(end, tz)
        } else {
            MINUTES_PER_DAY
        };
        let height = bottom
            .saturating_sub(top)
            .max(MIN_BLOCK_MINUTES)
            .min(MINUTES_PER_DAY - top);

        placements.push(Placement {
            event: ev,
            column,
            columns: 0,
            top_minutes: top,
            height_minutes: height,
        });
    }
    close_cluster(&mut placements[cluster_start..], column_ends.len());

    placements
}

fn close_cluster(cluster: &mut [Placement<'_>], columns: usize) {
    for p in cluster {
        p.columns = columns.max(1);
    }
}

fn minute_of_day<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> u32 {
    let local = instant.with_timezone(tz);
    local.hour() * 60 + local.minute()
}

/// Earliest and latest hour worth showing for `events`, padded to whole
/// hours and never narrower than `default`.
pub fn visible_hours<Tz: TimeZone>(
    events: &[&CalendarEvent],
    tz: &Tz,
    default: (u32, u32),
) -> (u32, u32) {
    events.iter().fold(default, |(lo, hi), ev| {
        let start = ev.start.with_timezone(tz).hour();
        let end_local = ev.end.with_timezone(tz);
        let end = if end_local.minute() > 0 {
            end_local.hour() + 1
        } else {
            end_local.hour()
        };
        let end = if local_date(ev.end, tz) != local_date(ev.start, tz) { 24 } else { end };
        (lo.min(start), hi.max(end.min(24)))
    })
}
