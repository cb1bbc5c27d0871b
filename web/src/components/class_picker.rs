//! Class selector.

use leptos::prelude::*;

use timetable_common::protocol::ClassOption;

/// Drop-down of classes.  Choosing one reports its id; the empty entry
/// reports `""`.
#[component]
pub fn ClassPicker(
    #[prop(into)] classes: Signal<Vec<ClassOption>>,
    #[prop(into)] selected: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    let options = move || {
        classes
            .get()
            .into_iter()
            .map(|c| {
                let id = c.id.clone();
                view! {
                    <option value=c.id selected=move || selected.with(|s| *s == id)>
                        {c.label}
                    </option>
                }
            })
            .collect_view()
    };

    view! {
        <label class="class-picker">
            "Class "
            <select on:change=move |ev| on_change.run(event_target_value(&ev))>
                <option value="">"Select a class"</option>
                {options}
            </select>
        </label>
    }
}
