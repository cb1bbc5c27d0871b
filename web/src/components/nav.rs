//! Top navigation bar component.

use leptos::prelude::*;

/// Site-wide navigation bar: one link per role portal.
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="nav-bar">
            <div class="nav-brand">
                <a href="/" class="nav-logo">"🗓 Timetable"</a>
            </div>
            <div class="nav-links">
                <a href="/school/schedule" class="nav-link">"School"</a>
                <a href="/teacher/schedule" class="nav-link">"Teacher"</a>
                <a href="/student/schedule" class="nav-link">"Student"</a>
            </div>
        </nav>
    }
}
