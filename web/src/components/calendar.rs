//! Calendar surface: toolbar, week/day time grid and agenda list.
//!
//! The surface is controlled.  View mode and anchor date belong to the
//! caller, which hears about every change through the callbacks and feeds
//! the new values back in.

use chrono::{Local, NaiveDate};
use leptos::prelude::*;

use timetable_common::calendar::{self, Navigate, ViewMode};
use timetable_common::color::text_color_for;
use timetable_common::layout::{self, Placement};
use timetable_common::CalendarEvent;

use crate::browser;

/// Pixel height of one hour row.
const HOUR_PX: f64 = 48.0;
/// School-day hours shown even when the loaded lessons span less.
const DEFAULT_HOURS: (u32, u32) = (8, 16);

#[component]
pub fn CalendarSurface(
    /// Events to draw, already weekend-filtered.
    #[prop(into)]
    events: Signal<Vec<CalendarEvent>>,
    #[prop(into)] view_mode: Signal<ViewMode>,
    #[prop(into)] anchor: Signal<NaiveDate>,
    #[prop(into)] show_weekends: Signal<bool>,
    on_view_change: Callback<ViewMode>,
    on_navigate: Callback<Navigate>,
    on_select: Callback<CalendarEvent>,
) -> impl IntoView {
    let label = move || calendar::range_label(view_mode.get(), anchor.get());

    let body = move || {
        let mode = view_mode.get();
        let anchor = anchor.get();
        let events = events.get();
        match mode {
            ViewMode::Agenda => view! { <AgendaList events anchor on_select/> }.into_any(),
            ViewMode::Week | ViewMode::Day => {
                let days = calendar::grid_days(mode, anchor, show_weekends.get());
                view! { <TimeGrid events days on_select/> }.into_any()
            }
        }
    };

    let tabs = ViewMode::ALL
        .into_iter()
        .map(|mode| {
            view! {
                <button
                    class="cal-view-btn"
                    class:active=move || view_mode.get() == mode
                    on:click=move |_| on_view_change.run(mode)
                >
                    {mode.label()}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="calendar-surface">
            <div class="cal-toolbar">
                <div class="cal-nav">
                    <button class="cal-nav-btn" on:click=move |_| on_navigate.run(Navigate::Prev)>
                        "← Prev"
                    </button>
                    <button
                        class="cal-nav-btn"
                        on:click=move |_| on_navigate.run(Navigate::Today(browser::today()))
                    >
                        "Today"
                    </button>
                    <button class="cal-nav-btn" on:click=move |_| on_navigate.run(Navigate::Next)>
                        "Next →"
                    </button>
                </div>
                <h2 class="cal-range">{label}</h2>
                <div class="cal-views">{tabs}</div>
            </div>
            {body}
        </div>
    }
}

// ─── Week / day grid ─────────────────────────────────────────────────────────

#[component]
fn TimeGrid(
    events: Vec<CalendarEvent>,
    days: Vec<NaiveDate>,
    on_select: Callback<CalendarEvent>,
) -> impl IntoView {
    let refs: Vec<&CalendarEvent> = events.iter().collect();
    let (first_hour, last_hour) = layout::visible_hours(&refs, &Local, DEFAULT_HOURS);
    let body_px = f64::from(last_hour - first_hour) * HOUR_PX;
    let offset_minutes = first_hour * 60;

    let gutter = (first_hour..last_hour)
        .map(|h| {
            view! {
                <div class="cal-hour" style=format!("height: {HOUR_PX}px")>
                    {format!("{h:02}:00")}
                </div>
            }
        })
        .collect_view();

    let columns = days
        .iter()
        .map(|&day| {
            let blocks = layout::layout_day(&refs, day, &Local)
                .iter()
                .map(|p| event_block(p, offset_minutes, on_select))
                .collect_view();
            view! {
                <div class="cal-day" class:weekend=calendar::is_weekend(day)>
                    <div class="cal-day-head">{day.format("%a %d").to_string()}</div>
                    <div class="cal-day-body" style=format!("height: {body_px}px")>
                        {blocks}
                    </div>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="cal-grid">
            <div class="cal-gutter">
                <div class="cal-day-head"></div>
                {gutter}
            </div>
            {columns}
        </div>
    }
}

fn event_block(
    p: &Placement<'_>,
    offset_minutes: u32,
    on_select: Callback<CalendarEvent>,
) -> impl IntoView {
    let event = p.event.clone();
    let background = event.color();
    let foreground = text_color_for(&background);
    let top = f64::from(p.top_minutes.saturating_sub(offset_minutes)) * HOUR_PX / 60.0;
    let height = f64::from(p.height_minutes) * HOUR_PX / 60.0;
    let style = format!(
        "top: {top:.1}px; height: {height:.1}px; left: {:.3}%; width: {:.3}%; \
         background: {background}; color: {foreground};",
        p.left_pct(),
        p.width_pct()
    );
    let title = event.title();
    let title_attr = title.clone();
    let span = time_span(&event);

    view! {
        <button
            class="cal-event"
            style=style
            title=title_attr
            on:click=move |_| on_select.run(event.clone())
        >
            <span class="cal-event-title">{title}</span>
            <span class="cal-event-time">{span}</span>
        </button>
    }
}

// ─── Agenda ──────────────────────────────────────────────────────────────────

#[component]
fn AgendaList(
    events: Vec<CalendarEvent>,
    anchor: NaiveDate,
    on_select: Callback<CalendarEvent>,
) -> impl IntoView {
    let refs: Vec<&CalendarEvent> = events.iter().collect();
    let range = calendar::visible_range(ViewMode::Agenda, anchor);
    let days = calendar::agenda(&refs, range, &Local);

    if days.is_empty() {
        return view! { <p class="cal-empty">"No lessons in this period."</p> }.into_any();
    }

    days.into_iter()
        .map(|day| {
            let rows = day
                .events
                .into_iter()
                .map(|ev| agenda_row(ev.clone(), on_select))
                .collect_view();
            view! {
                <section class="agenda-day">
                    <h3>{day.date.format("%A %d %B").to_string()}</h3>
                    {rows}
                </section>
            }
        })
        .collect_view()
        .into_any()
}

fn agenda_row(event: CalendarEvent, on_select: Callback<CalendarEvent>) -> impl IntoView {
    let color = event.color();
    let span = time_span(&event);
    let title = event.title();
    view! {
        <button class="agenda-row" on:click=move |_| on_select.run(event.clone())>
            <span class="agenda-swatch" style=format!("background: {color}")></span>
            <span class="agenda-time">{span}</span>
            <span class="agenda-title">{title}</span>
        </button>
    }
}

fn time_span(event: &CalendarEvent) -> String {
    format!(
        "{}–{}",
        event.start.with_timezone(&Local).format("%H:%M"),
        event.end.with_timezone(&Local).format("%H:%M")
    )
}
