//! # FlowFM Inspector
//!
//! Native client for the FlowFM inspector's local model API. It renders the
//! MDU sections of a model as Key / Value / Comment panels and pushes edits
//! back through a debounced, optimistic change propagator.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowfm_inspector::adapters::http_client::HttpModelClient;
//! use flowfm_inspector::adapters::inspector::Inspector;
//! use flowfm_inspector::config::Settings;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::default();
//!     let client = Arc::new(HttpModelClient::from_settings(&settings)?);
//!     let inspector = Inspector::new(client, settings.editor.sections.clone());
//!
//!     let model_id = inspector.resolve_model(None).await?;
//!     for form in inspector.load(&model_id).await?.forms() {
//!         println!("{}: {} rows", form.title, form.rows.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: the [`ModelPort`](domain::ModelPort) trait and propagation events
//! - **Adapters**: reqwest API client, project state, change propagator, text views
//! - **Config**: file + CLI settings with validation
//! - Schema handling, typed inputs and the debounce state machine live in
//!   `flowfm-inspector-core`, shared with the browser UI.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
