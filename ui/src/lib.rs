use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

mod api;
mod components;
mod propagator;

use components::inspector::InspectorPage;
use components::layout::Layout;
use components::recent_projects::RecentProjects;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| "Not found.">
                <Route path=path!("/") view=StartPage/>
                <Route path=path!("/inspector") view=InspectorPage/>
            </Routes>
        </Router>
    }
}

#[component]
fn StartPage() -> impl IntoView {
    view! {
        <Layout title="FlowFM">
            <div class="max-w-3xl mx-auto space-y-4">
                <div class="flex items-center justify-between">
                    <h2 class="text-lg font-semibold text-gray-800">"Recent projects"</h2>
                    <A href="/inspector" attr:class="text-sm text-blue-600 hover:underline">
                        "Open inspector"
                    </A>
                </div>
                <RecentProjects/>
            </div>
        </Layout>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(App);
}
