use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// FlowFM Inspector - inspect and edit D-Flow FM models through the local API
#[derive(Parser, Debug, Clone)]
#[command(name = "flowfm-inspector", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "FLOWFM_CONFIG", default_value = "flowfm-inspector.toml")]
    pub config: PathBuf,

    /// Base URL of the local API
    #[arg(long, env = "FLOWFM_API_URL")]
    pub api_url: Option<String>,

    /// Quiet period before an edit is submitted, in milliseconds
    #[arg(long, env = "FLOWFM_DEBOUNCE_MS")]
    pub debounce_ms: Option<u64>,

    /// Log filter (e.g. "info", "flowfm_inspector=debug")
    #[arg(long, env = "FLOWFM_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List model identifiers
    Models,

    /// List recently opened projects, newest first
    Recent {
        #[command(subcommand)]
        action: Option<RecentAction>,
    },

    /// Print section panels as Key / Value / Comment tables
    Show {
        /// Model identifier (defaults to the first model)
        #[arg(long)]
        model: Option<String>,

        /// Only show these sections
        #[arg(short, long = "section")]
        sections: Vec<String>,
    },

    /// Set a field value
    Set {
        section: String,
        field: String,

        /// New value; array fields take one value per element
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        values: Vec<String>,

        #[arg(long)]
        model: Option<String>,
    },

    /// Set a field comment
    Comment {
        section: String,
        field: String,
        text: String,

        #[arg(long)]
        model: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum RecentAction {
    /// Mark a project as just opened
    Touch { path: String },
}
