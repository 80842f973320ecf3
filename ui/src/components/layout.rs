use leptos::prelude::*;

/// Page shell: header bar and scrollable content
#[component]
pub fn Layout(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <div class="flex flex-col h-screen bg-gray-100">
            <header class="bg-gray-800 text-white px-6 py-3 flex items-center justify-between">
                <h1 class="text-xl font-bold">{title}</h1>
                <span class="text-xs text-gray-400">"FlowFM Inspector"</span>
            </header>
            <main class="flex-1 overflow-y-auto p-6">
                {children()}
            </main>
        </div>
    }
}

/// Dismissable banner for the last failed save
#[component]
pub fn ErrorBanner(
    message: ReadSignal<Option<String>>,
    on_dismiss: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="mb-4 p-3 bg-red-50 border border-red-200 text-red-700 rounded flex justify-between items-center">
                <span class="text-sm">{move || message.get().unwrap_or_default()}</span>
                <button
                    type="button"
                    class="text-red-500 hover:bg-red-100 px-2 rounded"
                    on:click=move |_| on_dismiss.run(())
                >
                    "Dismiss"
                </button>
            </div>
        </Show>
    }
}
