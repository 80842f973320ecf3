//! Value-column controls
//!
//! `BaseInputField` renders one of the five base inputs and reports every
//! accepted change through `on_change`; the Enter key reports the current
//! value through `on_confirm`. Rejected number text keeps the input red and
//! reports nothing.

use flowfm_inspector_core::{
    BaseInput, FieldValue, RowDescriptor, ScalarValue, TypedInput, ValueChanged,
};
use leptos::ev::KeyboardEvent;
use leptos::prelude::*;

use super::array_input::ArrayInput;
use crate::propagator::Propagator;

const INPUT_CLASS: &str =
    "w-full px-2 py-1 border rounded text-sm focus:outline-none focus:ring-2 focus:ring-blue-500";

fn is_enter(ev: &KeyboardEvent) -> bool {
    ev.key() == "Enter"
}

/// Control for one row's value, wired to the propagator
#[component]
pub fn TypedInputView(
    section: String,
    descriptor: RowDescriptor,
    input: TypedInput,
    propagator: Propagator,
) -> impl IntoView {
    let field = descriptor.row_key.clone();
    let value_type = descriptor.value_type;

    match input {
        TypedInput::Base(base) => {
            let slot = StoredValue::new((section, field));
            let on_change = Callback::new(move |value: ScalarValue| {
                slot.with_value(|(section, field)| {
                    propagator.submit(section, field, &FieldValue::Scalar(value), value_type)
                })
            });
            let on_confirm = Callback::new(move |value: ScalarValue| {
                slot.with_value(|(section, field)| {
                    propagator.confirm(section, field, &FieldValue::Scalar(value), value_type)
                })
            });
            view! { <BaseInputField input=base on_change=on_change on_confirm=on_confirm/> }
                .into_any()
        }
        TypedInput::Array(controller) => view! {
            <ArrayInput section=section field=field controller=controller propagator=propagator/>
        }
        .into_any(),
    }
}

/// One base input with local editing state
#[component]
pub fn BaseInputField(
    input: BaseInput,
    on_change: Callback<ScalarValue>,
    on_confirm: Callback<ScalarValue>,
) -> impl IntoView {
    match input {
        BaseInput::Number(number) => {
            let state = RwSignal::new(number);
            let invalid = RwSignal::new(false);
            let commit = move || -> Option<ValueChanged> {
                let result = state.try_update(|n| n.commit())?;
                invalid.set(result.is_err());
                result.ok()
            };
            view! {
                <input
                    type="text"
                    inputmode="decimal"
                    class=move || format!(
                        "{} {}",
                        INPUT_CLASS,
                        if invalid.get() { "border-red-500 bg-red-50" } else { "border-gray-300" }
                    )
                    prop:value=move || state.with(|n| n.text().to_string())
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        state.update(|n| n.set_text(text));
                        if let Some(changed) = commit() {
                            on_change.run(changed.value);
                        }
                    }
                    on:keydown=move |ev| {
                        if is_enter(&ev) {
                            if let Some(changed) = commit() {
                                on_confirm.run(changed.value);
                            }
                        }
                    }
                />
            }
            .into_any()
        }
        BaseInput::Boolean(boolean) => {
            let state = RwSignal::new(boolean);
            view! {
                <select
                    class=format!("{} border-gray-300", INPUT_CLASS)
                    on:change=move |ev| {
                        let selected = event_target_value(&ev) == "true";
                        if let Some(changed) = state.try_update(|b| b.select(selected)).flatten() {
                            on_change.run(changed.value);
                        }
                    }
                    on:keydown=move |ev| {
                        if is_enter(&ev) {
                            on_confirm.run(ScalarValue::Boolean(state.get_untracked().value));
                        }
                    }
                >
                    <option value="true" selected=move || state.get().value>"True"</option>
                    <option value="false" selected=move || !state.get().value>"False"</option>
                </select>
            }
            .into_any()
        }
        BaseInput::Enum(choice) => {
            let options = choice.enum_values.clone();
            let state = RwSignal::new(choice);
            view! {
                <select
                    class=format!("{} border-gray-300", INPUT_CLASS)
                    on:change=move |ev| {
                        let selected = event_target_value(&ev);
                        match state.try_update(|e| e.select(&selected)) {
                            Some(Ok(Some(changed))) => on_change.run(changed.value),
                            Some(Err(e)) => log::warn!("Rejected enum value: {}", e),
                            _ => {}
                        }
                    }
                    on:keydown=move |ev| {
                        if is_enter(&ev) {
                            on_confirm.run(ScalarValue::Enum(state.with_untracked(|e| e.value.clone())));
                        }
                    }
                >
                    {options
                        .into_iter()
                        .map(|option| {
                            let current = option.clone();
                            view! {
                                <option
                                    value=option.clone()
                                    selected=move || state.with(|e| e.value == current)
                                >
                                    {option.clone()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            }
            .into_any()
        }
        BaseInput::Path(path) => {
            let state = RwSignal::new(path);
            let browse = move |_| {
                let current = state.with_untracked(|p| p.display().to_string());
                match window().prompt_with_message_and_default("File path", &current) {
                    Ok(Some(filepath)) => {
                        if let Some(changed) = state.try_update(|p| p.select(filepath)) {
                            on_change.run(changed.value);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => log::warn!("File prompt failed: {:?}", e),
                }
            };
            view! {
                <div class="flex gap-2">
                    <input
                        type="text"
                        readonly
                        class=format!("{} border-gray-300 bg-gray-50", INPUT_CLASS)
                        prop:value=move || state.with(|p| p.display().to_string())
                        on:keydown=move |ev| {
                            if is_enter(&ev) {
                                on_confirm.run(ScalarValue::Path(state.with_untracked(|p| p.value.clone())));
                            }
                        }
                    />
                    <button
                        type="button"
                        class="px-2 py-1 bg-gray-200 rounded hover:bg-gray-300 text-sm"
                        on:click=browse
                    >
                        "..."
                    </button>
                </div>
            }
            .into_any()
        }
        BaseInput::String(text) => {
            let state = RwSignal::new(text);
            view! {
                <input
                    type="text"
                    class=format!("{} border-gray-300", INPUT_CLASS)
                    prop:value=move || state.with(|s| s.text.clone())
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        if let Some(changed) = state.try_update(|s| s.set_text(text)) {
                            on_change.run(changed.value);
                        }
                    }
                    on:keydown=move |ev| {
                        if is_enter(&ev) {
                            on_confirm.run(ScalarValue::String(state.with_untracked(|s| s.text.clone())));
                        }
                    }
                />
            }
            .into_any()
        }
    }
}

/// Free-text comment for a row
#[component]
pub fn CommentInput(
    section: String,
    field: String,
    comment: String,
    propagator: Propagator,
) -> impl IntoView {
    let slot = StoredValue::new((section, field));

    view! {
        <input
            type="text"
            class=format!("{} border-gray-300 text-gray-600", INPUT_CLASS)
            prop:value=comment
            on:input=move |ev| {
                let text = event_target_value(&ev);
                slot.with_value(|(section, field)| propagator.submit_comment(section, field, &text));
            }
            on:keydown=move |ev| {
                if is_enter(&ev) {
                    let text = event_target_value(&ev);
                    slot.with_value(|(section, field)| propagator.confirm_comment(section, field, &text));
                }
            }
        />
    }
}
