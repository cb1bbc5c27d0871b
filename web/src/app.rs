//! Root Leptos application component with routing.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use timetable_common::permissions::Role;

use crate::components::nav::Nav;
use crate::pages::schedule::{ConfiguredSchedulePage, SchedulePage};

/// Server-side application state, provided as Leptos context for server functions.
#[derive(Clone, Debug)]
#[cfg(feature = "ssr")]
pub struct AppState {
    pub config: timetable_common::config::Config,
    pub leptos_options: LeptosOptions,
}

/// HTML document wrapping `<App/>` for server rendering.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// The root `<App/>` component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/timetable-web.css"/>
        <Title text="Timetable – Class Schedule"/>
        <Meta name="description" content="Weekly class schedules for administrators, teachers and students"/>

        <Router>
            <Nav/>
            <main class="main-content">
                <Routes fallback=|| view! { <p class="error">"Page not found."</p> }>
                    <Route path=path!("/") view=ConfiguredSchedulePage/>
                    <Route
                        path=path!("/school/schedule")
                        view=|| view! { <SchedulePage role=Role::Administrator/> }
                    />
                    <Route
                        path=path!("/teacher/schedule")
                        view=|| view! { <SchedulePage role=Role::Teacher/> }
                    />
                    <Route
                        path=path!("/student/schedule")
                        view=|| view! { <SchedulePage role=Role::Student/> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
