//! Summary statistics for the loaded class.

use leptos::prelude::*;

use timetable_common::stats::ScheduleStats;

#[component]
pub fn StatsPanel(#[prop(into)] stats: Signal<Option<ScheduleStats>>) -> impl IntoView {
    move || match stats.get() {
        None => view! { <p class="stats-empty">"No lessons loaded yet."</p> }.into_any(),
        Some(s) => {
            let top_subject = s
                .busiest_subject()
                .map(|(name, n)| format!("{name} ({n})"))
                .unwrap_or_default();
            let top_teacher = s
                .busiest_teacher()
                .map(|(name, n)| format!("{name} ({n})"))
                .unwrap_or_default();
            let total = s.total_events;
            let hours = s.total_hours_display();
            let by_subject: Vec<(String, usize)> = s.subject_counts.into_iter().collect();
            let by_teacher: Vec<(String, usize)> = s.teacher_counts.into_iter().collect();
            view! {
                <div class="stats-panel">
                    <div class="stats-cards">
                        <div class="stat-card">
                            <span class="stat-value">{total}</span>
                            <span class="stat-label">"Lessons"</span>
                        </div>
                        <div class="stat-card">
                            <span class="stat-value">{hours}</span>
                            <span class="stat-label">"Hours"</span>
                        </div>
                        <div class="stat-card">
                            <span class="stat-value">{top_subject}</span>
                            <span class="stat-label">"Most frequent subject"</span>
                        </div>
                        <div class="stat-card">
                            <span class="stat-value">{top_teacher}</span>
                            <span class="stat-label">"Busiest teacher"</span>
                        </div>
                    </div>
                    <CountTable heading="By subject" counts=by_subject/>
                    <CountTable heading="By teacher" counts=by_teacher/>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn CountTable(heading: &'static str, counts: Vec<(String, usize)>) -> impl IntoView {
    view! {
        <table class="stats-table">
            <thead>
                <tr><th>{heading}</th><th>"Lessons"</th></tr>
            </thead>
            <tbody>
                {counts
                    .into_iter()
                    .map(|(name, n)| view! { <tr><td>{name}</td><td>{n}</td></tr> })
                    .collect_view()}
            </tbody>
        </table>
    }
}
