use flowfm_inspector_core::PanelState;
use leptos::prelude::*;

/// Section container with a clickable header; starts collapsed
#[component]
pub fn CollapsiblePanel(
    title: String,
    #[prop(default = PanelState::new())] initial: PanelState,
    children: Children,
) -> impl IntoView {
    let state = RwSignal::new(initial);

    view! {
        <div class="bg-white rounded-lg shadow mb-4">
            <button
                type="button"
                class="w-full flex items-center justify-between px-4 py-3 text-left hover:bg-gray-50"
                on:click=move |_| state.update(|s| s.toggle())
            >
                <span class="text-lg font-semibold text-gray-800">{title}</span>
                <svg
                    class=move || format!(
                        "w-5 h-5 text-gray-500 transition-transform {}",
                        if state.get().is_collapsed() { "" } else { "rotate-180" }
                    )
                    fill="none"
                    stroke="currentColor"
                    viewBox="0 0 24 24"
                >
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M19 9l-7 7-7-7"/>
                </svg>
            </button>
            <div class=move || if state.get().is_collapsed() { "hidden" } else { "px-4 pb-4" }>
                {children()}
            </div>
        </div>
    }
}
