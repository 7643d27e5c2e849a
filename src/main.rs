#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names
)]

use anyhow::{Context, Result};
use archivist::config::Config;
use clap::Parser;
use std::str::FromStr;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod app;
mod cli;

use cli::commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let created = !config_path.exists();
    let config = Config::load_or_init(Some(&config_path))?;

    // Initialize logging
    let requested = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let level = Level::from_str(requested.trim()).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;
    if !requested.trim().eq_ignore_ascii_case(level.as_str()) {
        tracing::warn!("unknown log level '{requested}', using info");
    }
    if created {
        tracing::info!(path = %config_path.display(), "created empty config");
    }

    app::dispatch::dispatch(cli, Arc::new(config)).await
}
