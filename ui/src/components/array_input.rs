//! Array field: a list of base inputs with add, remove and drag-to-reorder.
//!
//! Every structural change or element edit submits the whole list.

use flowfm_inspector_core::{ArrayController, ArrayElement, ElementId, FieldValue, ScalarValue};
use leptos::prelude::*;

use super::inputs::BaseInputField;
use crate::propagator::Propagator;

#[component]
pub fn ArrayInput(
    section: String,
    field: String,
    controller: ArrayController,
    propagator: Propagator,
) -> impl IntoView {
    let value_type = controller.element_type();
    let controller = RwSignal::new(controller);
    let dragging = RwSignal::new(None::<ElementId>);
    let slot = StoredValue::new((section, field));

    let submit = move |value: FieldValue| {
        slot.with_value(|(section, field)| propagator.submit(section, field, &value, value_type))
    };
    let confirm = move || {
        let value = controller.with_untracked(|c| c.field_value());
        slot.with_value(|(section, field)| propagator.confirm(section, field, &value, value_type))
    };

    let add = move |_| {
        if let Some(value) = controller.try_update(|c| c.add()) {
            submit(value);
        }
    };

    let remove = move |id: ElementId| {
        let result = controller
            .try_update(|c| c.position(id).map(|index| c.remove(index)))
            .flatten();
        match result {
            Some(Ok(value)) => submit(value),
            Some(Err(e)) => log::warn!("Cannot remove element: {}", e),
            None => {}
        }
    };

    let drop_on = move |target: ElementId| {
        let Some(source) = dragging.get_untracked() else {
            return;
        };
        dragging.set(None);
        let result = controller
            .try_update(|c| match (c.position(source), c.position(target)) {
                (Some(from), Some(to)) => Some(c.reorder(from, Some(to))),
                _ => None,
            })
            .flatten();
        match result {
            Some(Ok(Some(value))) => submit(value),
            Some(Err(e)) => log::warn!("Cannot reorder elements: {}", e),
            _ => {}
        }
    };

    let element_view = move |element: ArrayElement| {
        let id = element.id();
        let on_change = Callback::new(move |value: ScalarValue| {
            match controller.try_update(|c| c.edit(id, value)) {
                Some(Ok(value)) => submit(value),
                Some(Err(e)) => log::warn!("Rejected element edit: {}", e),
                None => {}
            }
        });
        let on_confirm = Callback::new(move |value: ScalarValue| {
            if let Some(Ok(_)) = controller.try_update(|c| c.edit(id, value)) {
                confirm();
            }
        });
        let row_class = if element.animate_entrance {
            "flex items-center gap-2 animate-fade-in"
        } else {
            "flex items-center gap-2"
        };

        view! {
            <li
                class=row_class
                draggable="true"
                on:dragstart=move |_| dragging.set(Some(id))
                on:dragover=move |ev| ev.prevent_default()
                on:drop=move |ev| {
                    ev.prevent_default();
                    drop_on(id);
                }
            >
                <span class="cursor-move text-gray-400 select-none">"⋮⋮"</span>
                <div class="flex-1">
                    <BaseInputField input=element.input on_change=on_change on_confirm=on_confirm/>
                </div>
                <button
                    type="button"
                    class="px-2 text-red-500 hover:bg-red-50 rounded"
                    title="Remove"
                    on:click=move |_| remove(id)
                >
                    "×"
                </button>
            </li>
        }
    };

    view! {
        <div class="space-y-1">
            <ul class="space-y-1">
                <For
                    each=move || controller.with(|c| c.elements().to_vec())
                    key=|element| element.id()
                    children=element_view
                />
            </ul>
            <button
                type="button"
                class="px-2 py-1 text-sm bg-blue-50 text-blue-700 rounded hover:bg-blue-100"
                on:click=add
            >
                "+ Add"
            </button>
        </div>
    }
}
