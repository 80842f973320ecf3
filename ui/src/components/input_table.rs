use flowfm_inspector_core::SectionForm;
use leptos::prelude::*;

use super::inputs::{CommentInput, TypedInputView};
use crate::propagator::Propagator;

/// Key | Value | Comment table for one section
#[component]
pub fn InputTable(form: SectionForm, propagator: Propagator) -> impl IntoView {
    let section = form.section.clone();

    view! {
        <table class="min-w-full divide-y divide-gray-200">
            <thead class="bg-gray-50">
                <tr>
                    <th class="px-3 py-2 text-left text-xs font-medium text-gray-500 uppercase w-1/4">"Key"</th>
                    <th class="px-3 py-2 text-left text-xs font-medium text-gray-500 uppercase w-1/2">"Value"</th>
                    <th class="px-3 py-2 text-left text-xs font-medium text-gray-500 uppercase w-1/4">"Comment"</th>
                </tr>
            </thead>
            <tbody class="bg-white divide-y divide-gray-200">
                {form
                    .rows
                    .into_iter()
                    .map(|row| {
                        let key = row.key().to_string();
                        let hint = row.descriptor.description.clone().unwrap_or_default();
                        view! {
                            <tr>
                                <td class="px-3 py-2 text-sm font-mono text-gray-800 align-top" title=hint>
                                    {key.clone()}
                                </td>
                                <td class="px-3 py-2 align-top">
                                    <TypedInputView
                                        section=section.clone()
                                        descriptor=row.descriptor
                                        input=row.input
                                        propagator=propagator
                                    />
                                </td>
                                <td class="px-3 py-2 align-top">
                                    <CommentInput
                                        section=section.clone()
                                        field=key
                                        comment=row.comment
                                        propagator=propagator
                                    />
                                </td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
