//! Read-only lesson details, shown to users who cannot edit.

use chrono::Local;
use leptos::prelude::*;

use timetable_common::color::text_color_for;
use timetable_common::CalendarEvent;

#[component]
pub fn EventDetailDialog(event: CalendarEvent, on_close: Callback<()>) -> impl IntoView {
    let background = event.color();
    let foreground = text_color_for(&background);
    let start = event.start.with_timezone(&Local);
    let end = event.end.with_timezone(&Local);

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog event-detail" on:click=|ev| ev.stop_propagation()>
                <h2
                    class="event-detail-title"
                    style=format!("background: {background}; color: {foreground}")
                >
                    {event.subject.clone()}
                </h2>
                <dl>
                    <dt>"Teacher"</dt>
                    <dd>{event.teacher.clone()}</dd>
                    <dt>"Date"</dt>
                    <dd>{start.format("%A %d %B %Y").to_string()}</dd>
                    <dt>"Time"</dt>
                    <dd>{format!("{} – {}", start.format("%H:%M"), end.format("%H:%M"))}</dd>
                </dl>
                <div class="dialog-actions">
                    <button class="btn" on:click=move |_| on_close.run(())>"Close"</button>
                </div>
            </div>
        </div>
    }
}
