//! Schedule page – class picker, calendar, statistics and the lesson dialogs
//! for one role portal.
//!
//! The page owns every piece of calendar state.  Fetches go through
//! [`ScheduleState::begin`]/[`ScheduleState::finish`] so that a response for
//! a class the user has already switched away from is dropped.  Writes go
//! through [`MutationFlow::send`] and end with one reload of whatever class
//! is selected when they complete.

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;

use timetable_common::api::{HttpScheduleApi, ScheduleApi};
use timetable_common::calendar::{self, Navigate, ViewMode};
use timetable_common::config::ClientSettings;
use timetable_common::form::{EventForm, FormErrors};
use timetable_common::loader::{FetchOutcome, ScheduleState, LOAD_FAILED};
use timetable_common::mutation::{MutationError, MutationFlow, Write};
use timetable_common::permissions::{Role, SelectAction};
use timetable_common::protocol::{ClassOption, SelectOption};
use timetable_common::stats::ScheduleStats;
use timetable_common::CalendarEvent;

use crate::browser;
use crate::components::calendar::CalendarSurface;
use crate::components::class_picker::ClassPicker;
use crate::components::event_detail::EventDetailDialog;
use crate::components::event_form::EventFormDialog;
use crate::components::notice::{notify, Notice, NoticeKind, NoticeStack};
use crate::components::stats_panel::StatsPanel;

// ─── Server function ─────────────────────────────────────────────────────────

#[server(GetClientSettings, "/app")]
pub async fn get_client_settings() -> Result<ClientSettings, ServerFnError> {
    let state = use_context::<crate::app::AppState>()
        .ok_or_else(|| ServerFnError::new("Missing AppState"))?;
    Ok(state.config.client_settings())
}

// ─── Page components ─────────────────────────────────────────────────────────

/// Portal for the role named in the server config.
#[component]
pub fn ConfiguredSchedulePage() -> impl IntoView {
    with_settings(None)
}

/// Portal for a fixed role.
#[component]
pub fn SchedulePage(role: Role) -> impl IntoView {
    with_settings(Some(role))
}

fn with_settings(role: Option<Role>) -> impl IntoView {
    let settings = Resource::new(|| (), |_| get_client_settings());

    view! {
        <Suspense fallback=move || view! { <p class="loading">"Loading…"</p> }>
            {move || settings.get().map(|res| match res {
                Ok(settings) => {
                    let role = role.unwrap_or(settings.role);
                    view! { <ScheduleWorkspace role settings/> }.into_any()
                }
                Err(e) => view! {
                    <p class="error">"Error: " {e.to_string()}</p>
                }.into_any(),
            })}
        </Suspense>
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Dialog {
    Closed,
    Create,
    Edit(CalendarEvent),
    Detail(CalendarEvent),
    Stats,
}

#[component]
fn ScheduleWorkspace(role: Role, settings: ClientSettings) -> impl IntoView {
    let capabilities = role.capabilities();
    let flow = MutationFlow::new(capabilities);
    let base_url = StoredValue::new(settings.api_base_url);

    let classes = RwSignal::new(Vec::<ClassOption>::new());
    let teachers = RwSignal::new(Vec::<SelectOption>::new());
    let subjects = RwSignal::new(Vec::<SelectOption>::new());
    let selected_class = RwSignal::new(String::new());
    let view_mode = RwSignal::new(settings.default_view);
    let anchor = RwSignal::new(browser::today());
    let show_weekends = RwSignal::new(settings.show_weekends);
    let schedule = RwSignal::new(ScheduleState::new());
    let dialog = RwSignal::new(Dialog::Closed);
    let form_errors = RwSignal::new(FormErrors::default());
    let saving = RwSignal::new(false);
    let notices = RwSignal::new(Vec::<Notice>::new());

    // ── derived ──────────────────────────────────────────────────────────
    let events = Memo::new(move |_| schedule.with(|s| s.events().to_vec()));
    let visible = Memo::new(move |_| {
        let show = show_weekends.get() || view_mode.get() == ViewMode::Day;
        events.with(|evs| {
            calendar::filter_weekends(evs, &Local, show)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    });
    // Keyed on the loaded set only, so toggling weekends does not recompute.
    let stats = Memo::new(move |_| events.with(|evs| ScheduleStats::from_events(evs)));
    let loading = Memo::new(move |_| schedule.with(|s| s.is_loading()));
    let busy = Signal::derive(move || loading.get() || saving.get());
    let no_class = move || selected_class.with(String::is_empty);

    // ── loading ──────────────────────────────────────────────────────────
    // `None` re-fetches the class of the most recent request.
    let start = move |class_id: Option<String>| {
        let session = browser::session();
        if let Err(e) = session.bearer() {
            schedule.update(|s| s.reject(&e));
            notify(notices, NoticeKind::Error, e.user_message(LOAD_FAILED));
            return;
        }
        let ticket = schedule
            .try_update(|s| match &class_id {
                Some(id) => s.begin(id),
                None => s.begin_refresh(),
            })
            .flatten();
        let Some(ticket) = ticket else {
            return;
        };
        let base = base_url.get_value();
        spawn_local(async move {
            let result = match HttpScheduleApi::new(base) {
                Ok(api) => api.list_schedule(&session, ticket.class_id()).await,
                Err(e) => Err(e),
            };
            if let Some(FetchOutcome::Failed(msg)) =
                schedule.try_update(|s| s.finish(ticket, result))
            {
                notify(notices, NoticeKind::Error, msg);
            }
        });
    };
    let load = move |class_id: String| {
        if !class_id.trim().is_empty() {
            start(Some(class_id));
        }
    };
    let reload = move || {
        if !selected_class.with_untracked(String::is_empty) {
            start(None);
        }
    };

    // Option lists, once per mount.
    Effect::new(move |_| {
        let session = browser::session();
        let base = base_url.get_value();
        spawn_local(async move {
            let api = match HttpScheduleApi::new(base) {
                Ok(api) => api,
                Err(e) => {
                    notify(notices, NoticeKind::Error, e.user_message("Cannot reach the school service"));
                    return;
                }
            };
            match api.list_classes(&session).await {
                Ok(list) => classes.set(list),
                Err(e) => notify(notices, NoticeKind::Error, e.user_message("Failed to load classes")),
            }
            if capabilities.is_read_only() {
                return;
            }
            match api.list_teachers(&session).await {
                Ok(list) => teachers.set(list),
                Err(e) => notify(notices, NoticeKind::Error, e.user_message("Failed to load teachers")),
            }
            match api.list_subjects(&session).await {
                Ok(list) => subjects.set(list),
                Err(e) => notify(notices, NoticeKind::Error, e.user_message("Failed to load subjects")),
            }
        });
    });

    // Reload whenever the selected class changes.
    Effect::new(move |_| load(selected_class.get()));

    // ── calendar callbacks ───────────────────────────────────────────────
    let on_navigate = Callback::new(move |nav: Navigate| {
        let mode = view_mode.get_untracked();
        anchor.update(|a| *a = calendar::navigate(mode, *a, nav));
    });
    let on_view_change = Callback::new(move |mode: ViewMode| view_mode.set(mode));
    let on_select = Callback::new(move |event: CalendarEvent| {
        form_errors.set(FormErrors::default());
        dialog.set(match capabilities.on_select() {
            SelectAction::EditDialog => Dialog::Edit(event),
            SelectAction::DetailView => Dialog::Detail(event),
        });
    });
    let on_class_change = Callback::new(move |id: String| selected_class.set(id));

    // ── mutations ────────────────────────────────────────────────────────
    let on_close = Callback::new(move |()| {
        form_errors.set(FormErrors::default());
        dialog.set(Dialog::Closed);
    });

    let run_write = move |write: Write| {
        let api = match HttpScheduleApi::new(base_url.get_value()) {
            Ok(api) => api,
            Err(e) => {
                notify(notices, NoticeKind::Error, e.user_message(write.fallback()));
                return;
            }
        };
        saving.set(true);
        let session = browser::session();
        spawn_local(async move {
            let result = flow.send(&api, &session, &write).await;
            saving.set(false);
            match result {
                Ok(()) => {
                    notify(notices, NoticeKind::Success, write.done_message());
                    dialog.set(Dialog::Closed);
                    reload();
                }
                Err(e) => notify(notices, NoticeKind::Error, e.to_string()),
            }
        });
    };

    let on_submit = Callback::new(move |form: EventForm| {
        let class_id = selected_class.get_untracked();
        let editing = match dialog.get_untracked() {
            Dialog::Edit(event) => Some(event.id),
            _ => None,
        };
        let prepared = match &editing {
            Some(id) => flow.prepare_update(id, &form, &class_id, &Local),
            None => flow.prepare_create(&form, &class_id, &Local),
        };
        let request = match prepared {
            Ok(request) => request,
            Err(MutationError::Invalid(errors)) => {
                form_errors.set(errors);
                return;
            }
            Err(MutationError::Rejected(msg)) => {
                notify(notices, NoticeKind::Error, msg);
                return;
            }
        };
        form_errors.set(FormErrors::default());
        run_write(match editing {
            Some(id) => Write::Update { id, request },
            None => Write::Create(request),
        });
    });

    let on_delete = Callback::new(move |()| {
        let Dialog::Edit(event) = dialog.get_untracked() else {
            return;
        };
        match flow.check_delete(&event.id) {
            Ok(()) => run_write(Write::Delete { id: event.id }),
            Err(e) => notify(notices, NoticeKind::Error, e.to_string()),
        }
    });

    let open_create = move |_| {
        form_errors.set(FormErrors::default());
        dialog.set(Dialog::Create);
    };

    // ── dialogs ──────────────────────────────────────────────────────────
    let dialog_view = move || match dialog.get() {
        Dialog::Closed => None,
        Dialog::Create => {
            let initial = EventForm {
                date: anchor.get_untracked().format("%Y-%m-%d").to_string(),
                ..EventForm::default()
            };
            Some(
                view! {
                    <EventFormDialog
                        heading="New lesson"
                        initial
                        teachers
                        subjects
                        errors=form_errors
                        busy
                        on_submit
                        on_close
                        on_delete=None
                    />
                }
                .into_any(),
            )
        }
        Dialog::Edit(event) => {
            let delete = capabilities.can_delete.then_some(on_delete);
            Some(
                view! {
                    <EventFormDialog
                        heading="Edit lesson"
                        initial=EventForm::from_event(&event, &Local)
                        teachers
                        subjects
                        errors=form_errors
                        busy
                        on_submit
                        on_close
                        on_delete=delete
                    />
                }
                .into_any(),
            )
        }
        Dialog::Detail(event) => Some(view! { <EventDetailDialog event on_close/> }.into_any()),
        Dialog::Stats => Some(
            view! {
                <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
                    <div class="dialog" on:click=|ev| ev.stop_propagation()>
                        <h2>"Schedule statistics"</h2>
                        <StatsPanel stats/>
                        <div class="dialog-actions">
                            <button class="btn" on:click=move |_| on_close.run(())>"Close"</button>
                        </div>
                    </div>
                </div>
            }
            .into_any(),
        ),
    };

    view! {
        <div class="schedule-page">
            <NoticeStack notices/>

            <header class="schedule-header">
                <h1>"Class schedule"</h1>
                <span class="role-badge">{role.label()}</span>
                {capabilities
                    .is_read_only()
                    .then(|| view! { <span class="read-only-hint">"View only"</span> })}
            </header>

            <div class="schedule-controls">
                <ClassPicker classes selected=selected_class on_change=on_class_change/>
                <label class="weekend-toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || show_weekends.get()
                        on:change=move |ev| show_weekends.set(event_target_checked(&ev))
                    />
                    " Show weekends"
                </label>
                <button
                    class="btn"
                    disabled=move || busy.get() || no_class()
                    on:click=move |_| load(selected_class.get_untracked())
                >
                    "Refresh"
                </button>
                <button
                    class="btn"
                    disabled=move || stats.with(Option::is_none)
                    on:click=move |_| dialog.set(Dialog::Stats)
                >
                    "Statistics"
                </button>
                {capabilities.can_create.then(|| view! {
                    <button
                        class="btn btn-primary"
                        disabled=move || busy.get() || no_class()
                        on:click=open_create
                    >
                        "New lesson"
                    </button>
                })}
            </div>

            {move || {
                schedule
                    .with(|s| s.error().map(str::to_string))
                    .map(|msg| view! {
                        <p class="error">
                            {msg}
                            <button
                                class="btn-dismiss"
                                title="Dismiss"
                                on:click=move |_| schedule.update(|s| s.clear_error())
                            >
                                "×"
                            </button>
                        </p>
                    })
            }}
            {move || loading.get().then(|| view! { <p class="loading">"Loading schedule…"</p> })}
            {move || no_class().then(|| view! {
                <p class="hint">"Choose a class to see its timetable."</p>
            })}

            <CalendarSurface
                events=visible
                view_mode
                anchor
                show_weekends
                on_view_change
                on_navigate
                on_select
            />

            {dialog_view}
        </div>
    }
}
