//! Create / edit dialog for a lesson.

use leptos::prelude::*;

use timetable_common::form::{EventForm, FormErrors, FormField};
use timetable_common::periods::PERIODS;
use timetable_common::protocol::SelectOption;

/// Modal form.  Field errors come back from the caller through `errors`
/// and are shown next to the offending input.
#[component]
pub fn EventFormDialog(
    heading: &'static str,
    initial: EventForm,
    #[prop(into)] teachers: Signal<Vec<SelectOption>>,
    #[prop(into)] subjects: Signal<Vec<SelectOption>>,
    #[prop(into)] errors: Signal<FormErrors>,
    /// A write is in flight; every action button is disabled.
    #[prop(into)]
    busy: Signal<bool>,
    on_submit: Callback<EventForm>,
    on_close: Callback<()>,
    /// Present only when the user may delete this entry.
    on_delete: Option<Callback<()>>,
) -> impl IntoView {
    let form = RwSignal::new(initial);

    let field_error = move |field: FormField| {
        move || {
            errors
                .with(|e| e.get(field).map(str::to_string))
                .map(|msg| view! { <span class="field-error">{msg}</span> })
        }
    };

    let teacher_options = move || {
        teachers
            .get()
            .into_iter()
            .map(|o| {
                let id = o.id.clone();
                view! {
                    <option value=o.id selected=move || form.with(|f| f.teacher_id == id)>
                        {o.label}
                    </option>
                }
            })
            .collect_view()
    };

    let subject_options = move || {
        subjects
            .get()
            .into_iter()
            .map(|o| {
                let id = o.id.clone();
                view! {
                    <option value=o.id selected=move || form.with(|f| f.subject_id == id)>
                        {o.label}
                    </option>
                }
            })
            .collect_view()
    };

    let period_options = PERIODS
        .iter()
        .enumerate()
        .map(|(i, p)| {
            view! {
                <option value=i.to_string() selected=move || form.with(|f| f.period == Some(i))>
                    {p.display()}
                </option>
            }
        })
        .collect_view();

    let delete_button = on_delete.map(|cb| {
        view! {
            <button
                type="button"
                class="btn btn-danger"
                disabled=move || busy.get()
                on:click=move |_| cb.run(())
            >
                "Delete"
            </button>
        }
    });

    view! {
        <div class="dialog-backdrop">
            <form
                class="dialog event-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    on_submit.run(form.get());
                }
            >
                <h2>{heading}</h2>
                {field_error(FormField::Class)}

                <label>
                    "Teacher"
                    <select on:change=move |ev| {
                        form.update(|f| f.teacher_id = event_target_value(&ev))
                    }>
                        <option value="">"Select a teacher"</option>
                        {teacher_options}
                    </select>
                    {field_error(FormField::Teacher)}
                </label>

                <label>
                    "Subject"
                    <select on:change=move |ev| {
                        form.update(|f| f.subject_id = event_target_value(&ev))
                    }>
                        <option value="">"Select a subject"</option>
                        {subject_options}
                    </select>
                    {field_error(FormField::Subject)}
                </label>

                <label>
                    "Date"
                    <input
                        type="date"
                        prop:value=move || form.with(|f| f.date.clone())
                        on:input=move |ev| form.update(|f| f.date = event_target_value(&ev))
                    />
                    {field_error(FormField::Date)}
                </label>

                <label>
                    "Period"
                    <select on:change=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.period = value.parse().ok())
                    }>
                        <option value="">"Select a period"</option>
                        {period_options}
                    </select>
                    {field_error(FormField::Period)}
                </label>

                <div class="dialog-actions">
                    {delete_button}
                    <button
                        type="button"
                        class="btn"
                        disabled=move || busy.get()
                        on:click=move |_| on_close.run(())
                    >
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                        {move || if busy.get() { "Saving…" } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
