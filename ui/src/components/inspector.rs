//! Model inspector page: one collapsible panel per MDU section.

use flowfm_inspector_core::{build_forms, ProjectModel, Schema, SectionForm, MDU_SECTIONS};
use futures::future::join_all;
use indexmap::IndexMap;
use leptos::prelude::*;

use super::input_table::InputTable;
use super::layout::{ErrorBanner, Layout};
use super::panel::CollapsiblePanel;
use crate::api;
use crate::propagator::Propagator;

#[derive(Clone, Debug)]
pub struct LoadedProject {
    model: ProjectModel,
    forms: Vec<SectionForm>,
}

/// Fetch the first loaded model together with every section schema.
///
/// A section whose schema cannot be fetched is left out.
async fn load_project() -> Result<LoadedProject, String> {
    let models = api::list_models().await?;
    let model_id = models
        .into_iter()
        .next()
        .ok_or_else(|| "No model is loaded".to_string())?;

    let schema_requests = MDU_SECTIONS.iter().map(|section| async move {
        (section.to_string(), api::get_schema(section).await)
    });
    let (model, schemas) = futures::join!(api::get_model(&model_id), join_all(schema_requests));
    let model = model?;

    let schemas: IndexMap<String, Schema> = schemas
        .into_iter()
        .filter_map(|(section, result)| match result {
            Ok(schema) => Some((section, schema)),
            Err(e) => {
                log::warn!("No schema for section {}: {}", section, e);
                None
            }
        })
        .collect();

    let forms = build_forms(&MDU_SECTIONS[..], &schemas, &model);
    log::info!("Loaded model {} with {} sections", model.id, forms.len());
    Ok(LoadedProject { model, forms })
}

#[component]
pub fn InspectorPage() -> impl IntoView {
    let project = LocalResource::new(load_project);

    view! {
        <Layout title="Model inspector">
            <Suspense fallback=move || view! { <p class="text-gray-500">"Loading model..."</p> }>
                {move || {
                    project
                        .get()
                        .map(|result| match result {
                            Ok(loaded) => view! { <ProjectView loaded=loaded/> }.into_any(),
                            Err(e) => view! {
                                <div class="p-4 bg-red-50 text-red-700 rounded">
                                    "Failed to load model: " {e}
                                </div>
                            }
                            .into_any(),
                        })
                }}
            </Suspense>
        </Layout>
    }
}

#[component]
fn ProjectView(loaded: LoadedProject) -> impl IntoView {
    let propagator = Propagator::new(RwSignal::new(loaded.model));
    on_cleanup(move || propagator.shutdown());

    view! {
        <ErrorBanner
            message=propagator.last_error()
            on_dismiss=Callback::new(move |_| propagator.dismiss_error())
        />
        {loaded
            .forms
            .into_iter()
            .map(|form| {
                let title = form.title.clone();
                view! {
                    <CollapsiblePanel title=title>
                        <InputTable form=form propagator=propagator/>
                    </CollapsiblePanel>
                }
            })
            .collect_view()}
    }
}
