use clap::Parser;
use flowfm_inspector::adapters::http_client::HttpModelClient;
use flowfm_inspector::cli::Cli;
use flowfm_inspector::commands;
use flowfm_inspector::config::Settings;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays clean
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::new_with_cli(&cli)?;
    debug!("Using API at {}", settings.api.base_url);

    let client = Arc::new(HttpModelClient::from_settings(&settings)?);
    let output = commands::execute(&cli.command, &settings, client).await?;
    print!("{}", output);

    Ok(())
}
