use config::{Config, File};
use flowfm_inspector_core::api::DEFAULT_BASE_URL;
use flowfm_inspector_core::{Endpoints, MDU_SECTIONS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub mod validator;

use crate::cli::Cli;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub editor: EditorSettings,
}

/// Where the local model API lives
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EditorSettings {
    /// Quiet period before an edit is sent
    pub debounce_ms: u64,
    /// MDU sections shown, in display order
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
}

fn default_sections() -> Vec<String> {
    MDU_SECTIONS.iter().map(|s| s.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            },
            editor: EditorSettings {
                debounce_ms: DEFAULT_DEBOUNCE_MS,
                sections: default_sections(),
            },
        }
    }
}

impl Settings {
    /// Create settings from CLI arguments (config file plus CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate the file at `path`; a missing file yields the defaults
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let settings = Self::load(path)?;
        settings.validate()?;
        Ok(settings)
    }

    fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.timeout_seconds", DEFAULT_TIMEOUT_SECONDS)?
            .set_default("editor.debounce_ms", DEFAULT_DEBOUNCE_MS)?
            .build()?;

        Ok(s.try_deserialize()?)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(api_url) = &cli.api_url {
            self.api.base_url = api_url.clone();
        }
        if let Some(debounce_ms) = cli.debounce_ms {
            self.editor.debounce_ms = debounce_ms;
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.api.base_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.editor.debounce_ms)
    }
}
