//! CLI command execution
//!
//! Every command returns the text to print so it can be driven from tests
//! against any [`ModelPort`].

use anyhow::Context;
use flowfm_inspector_core::{PanelState, TypedInput};
use std::sync::Arc;
use tracing::info;

use crate::adapters::change_propagator::ChangePropagator;
use crate::adapters::inspector::Inspector;
use crate::adapters::project_state::ProjectState;
use crate::adapters::table_view::{render_panel, render_recent_projects};
use crate::cli::{Command, RecentAction};
use crate::config::Settings;
use crate::domain::ModelPort;

pub async fn execute(
    command: &Command,
    settings: &Settings,
    port: Arc<dyn ModelPort>,
) -> anyhow::Result<String> {
    let inspector = Inspector::new(port.clone(), settings.editor.sections.clone());

    match command {
        Command::Models => {
            let models = port.list_models().await?;
            Ok(models.iter().map(|m| format!("{}\n", m)).collect())
        }
        Command::Recent { action: None } => {
            let mut projects = port.recent_projects().await?;
            projects.sort_by(|a, b| b.last_opened.cmp(&a.last_opened));
            Ok(render_recent_projects(&projects))
        }
        Command::Recent {
            action: Some(RecentAction::Touch { path }),
        } => {
            port.touch_recent_project(path).await?;
            info!(path = %path, "Marked project as opened");
            Ok(String::new())
        }
        Command::Show { model, sections } => {
            let model_id = inspector.resolve_model(model.as_deref()).await?;
            let project = if sections.is_empty() {
                inspector.load(&model_id).await?
            } else {
                inspector.load_sections(&model_id, sections).await?
            };
            let panel = PanelState::expanded();
            Ok(project
                .forms()
                .iter()
                .map(|form| render_panel(form, &panel))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        Command::Set {
            section,
            field,
            values,
            model,
        } => {
            let model_id = inspector.resolve_model(model.as_deref()).await?;
            let project = inspector
                .load_sections(&model_id, std::slice::from_ref(section))
                .await?;
            let mut form = project
                .form(section)
                .with_context(|| format!("Section '{}' is not available", section))?;
            let row = form
                .row_mut(field)
                .with_context(|| format!("Section '{}' has no field '{}'", section, field))?;

            let value = row
                .input
                .apply_texts(values)
                .with_context(|| format!("Invalid value for {}.{}", section, field))?;
            let value_type = row.descriptor.value_type;

            let propagator = ChangePropagator::new(port, ProjectState::new(project.model), settings.debounce());
            let result = propagator.confirm(section, field, &value, value_type).await?;

            let stored = TypedInput::for_row(&row.descriptor, Some(&result));
            Ok(format!("{}.{} = {}\n", section, field, stored.display()))
        }
        Command::Comment {
            section,
            field,
            text,
            model,
        } => {
            let model_id = inspector.resolve_model(model.as_deref()).await?;
            let project = inspector
                .load_sections(&model_id, std::slice::from_ref(section))
                .await?;
            let form = project
                .form(section)
                .with_context(|| format!("Section '{}' is not available", section))?;
            // Comment keys are case-insensitive
            if !form.rows.iter().any(|row| row.key().eq_ignore_ascii_case(field)) {
                anyhow::bail!("Section '{}' has no field '{}'", section, field);
            }

            let propagator = ChangePropagator::new(port, ProjectState::new(project.model), settings.debounce());
            let result = propagator.confirm_comment(section, field, text).await?;

            let stored = result.as_str().map(str::to_string).unwrap_or_else(|| result.to_string());
            Ok(format!("{}.{} # {}\n", section, field.to_lowercase(), stored))
        }
    }
}
