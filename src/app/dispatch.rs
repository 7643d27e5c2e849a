use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result, bail};
use archivist::config::{ArchiveSettings, Config};
use archivist::engine::{self, EntryOutcome, PlannedWindow};
use archivist::plugins::PluginRegistry;
use archivist::{daemon, dates};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Serialize)]
struct EntryPlan<'a> {
    name: &'a str,
    windows: Vec<PlannedWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn dispatch(cli: Cli, config: Arc<Config>) -> Result<()> {
    let registry = Arc::new(PluginRegistry::builtin());

    match cli.command {
        Commands::Run { entry } => run(config, registry, entry).await,
        Commands::Plan { entry, limit, json } => plan(&config, entry.as_deref(), limit, json),
        Commands::Check => check(&config, &registry),
        Commands::Daemon => {
            info!("Starting Archivist daemon ({})", config.daemon.schedule);
            daemon::run(config, registry).await
        }
    }
}

async fn run(
    config: Arc<Config>,
    registry: Arc<PluginRegistry>,
    entry: Option<String>,
) -> Result<()> {
    if let Some(name) = entry.as_deref()
        && config.archive(name).is_none()
    {
        bail!(
            "No archive entry named '{name}' in {}",
            config.config_path.display()
        );
    }
    if config.archives.is_empty() {
        println!(
            "No archive entries configured in {}",
            config.config_path.display()
        );
        return Ok(());
    }

    let outcomes = tokio::task::spawn_blocking(move || {
        let now = dates::now();
        match entry {
            Some(name) => {
                let result = engine::run_entry(&config, &registry, &name, now);
                if let Err(e) = &result {
                    tracing::error!(
                        entry = %name,
                        error = %format!("{e:#}"),
                        "archive entry failed"
                    );
                }
                vec![EntryOutcome { name, result }]
            }
            None => engine::run_all(&config, &registry, now),
        }
    })
    .await
    .context("archive pass panicked")?;

    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => {
                println!(
                    "✅ {}: {} window(s) archived, {} file(s), {} deleted, {} failure(s)",
                    outcome.name,
                    report.windows_archived,
                    report.files_archived,
                    report.files_deleted,
                    report.failures
                );
                for stored in &report.stored {
                    println!("   → {}", stored.display());
                }
            }
            Err(e) => println!("❌ {}: {e:#}", outcome.name),
        }
    }
    Ok(())
}

fn plan(config: &Config, entry: Option<&str>, limit: usize, json: bool) -> Result<()> {
    let entries = select_entries(config, entry)?;
    let now = dates::now();

    let plans: Vec<EntryPlan<'_>> = entries
        .iter()
        .map(|settings| match engine::plan(settings, now, limit) {
            Ok(windows) => EntryPlan {
                name: &settings.name,
                windows,
                error: None,
            },
            Err(e) => {
                tracing::warn!(entry = %settings.name, error = %e, "cannot plan entry");
                EntryPlan {
                    name: &settings.name,
                    windows: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&plans)?);
        return Ok(());
    }

    for entry_plan in &plans {
        println!("◆ {}", entry_plan.name);
        if let Some(error) = &entry_plan.error {
            println!("   ❌ {error}");
            continue;
        }
        if entry_plan.windows.is_empty() {
            println!("   nothing to archive");
        }
        for planned in &entry_plan.windows {
            println!("   {}  {} file(s)", planned.window, planned.file_count);
        }
    }
    Ok(())
}

fn check(config: &Config, registry: &PluginRegistry) -> Result<()> {
    println!("Config: {}", config.config_path.display());

    let mut invalid = 0_usize;
    match daemon::schedule::parse(&config.daemon.schedule) {
        Ok(_) => println!("✅ daemon schedule '{}'", config.daemon.schedule),
        Err(e) => {
            invalid += 1;
            println!("❌ daemon schedule: {e:#}");
        }
    }

    for settings in &config.archives {
        match settings.validate(registry) {
            Ok(()) => println!(
                "✅ {} ({}, {})",
                settings.name,
                settings.strategy,
                settings.root().display()
            ),
            Err(e) => {
                invalid += 1;
                println!("❌ {}: {e}", settings.name);
            }
        }
    }

    if invalid > 0 {
        bail!("{invalid} problem(s) found");
    }
    println!("All {} entries valid", config.archives.len());
    Ok(())
}

fn select_entries<'a>(
    config: &'a Config,
    entry: Option<&str>,
) -> Result<Vec<&'a ArchiveSettings>> {
    match entry {
        Some(name) => config
            .archive(name)
            .map(|settings| vec![settings])
            .with_context(|| format!("No archive entry named '{name}'")),
        None => Ok(config.archives.iter().collect()),
    }
}
