use flowfm_inspector_core::api::RecentProject;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::api;

async fn load_recent() -> Result<Vec<RecentProject>, String> {
    let mut projects = api::recent_projects().await?;
    projects.sort_by(|a, b| b.last_opened.cmp(&a.last_opened));
    Ok(projects)
}

fn touch(path: String) {
    spawn_local(async move {
        if let Err(e) = api::touch_recent_project(&path).await {
            log::warn!("Failed to update recent projects: {}", e);
        }
    });
}

/// Recently opened projects, newest first
#[component]
pub fn RecentProjects() -> impl IntoView {
    let projects = LocalResource::new(load_recent);

    view! {
        <Suspense fallback=move || view! { <p class="text-gray-500">"Loading..."</p> }>
            {move || {
                projects
                    .get()
                    .map(|result| match result {
                        Ok(list) if list.is_empty() => view! {
                            <p class="text-gray-500">"No recent projects"</p>
                        }
                        .into_any(),
                        Ok(list) => view! {
                            <ul class="divide-y divide-gray-200 bg-white rounded-lg shadow">
                                {list.into_iter().map(|project| view! { <RecentProjectItem project=project/> }).collect_view()}
                            </ul>
                        }
                        .into_any(),
                        Err(e) => view! { <p class="text-red-600">{e}</p> }.into_any(),
                    })
            }}
        </Suspense>
    }
}

#[component]
fn RecentProjectItem(project: RecentProject) -> impl IntoView {
    let path = project.project_path.clone();
    let opened = project.last_opened.format("%-d-%-m-%Y %H:%M").to_string();

    view! {
        <li>
            <A href="/inspector" on:click=move |_| touch(path.clone())>
                <div class="px-4 py-3 hover:bg-gray-50 flex justify-between items-center">
                    <div>
                        <div class="font-medium text-gray-900">{project.file_name().to_string()}</div>
                        <div class="text-xs text-gray-500">{project.directory().to_string()}</div>
                    </div>
                    <span class="text-xs text-gray-400">{opened}</span>
                </div>
            </A>
        </li>
    }
}
