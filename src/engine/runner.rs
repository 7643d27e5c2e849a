use super::cycle::{ArchiveCycle, CycleReport};
use crate::config::Config;
use crate::plugins::PluginRegistry;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;

/// Result of running one configured entry.
#[derive(Debug)]
pub struct EntryOutcome {
    pub name: String,
    pub result: Result<CycleReport>,
}

impl EntryOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run one entry: validate, build plugins, archive until exhausted.
pub fn run_entry(
    config: &Config,
    registry: &PluginRegistry,
    name: &str,
    now: NaiveDateTime,
) -> Result<CycleReport> {
    let settings = config
        .archive(name)
        .with_context(|| format!("No archive entry named '{name}'"))?;
    let cycle = ArchiveCycle::prepare(settings, registry)
        .with_context(|| format!("[{}] invalid archive entry", settings.name))?;
    cycle.run(now)
}

/// Run every configured entry in order. A failing entry is logged and the
/// remaining entries still run.
pub fn run_all(
    config: &Config,
    registry: &PluginRegistry,
    now: NaiveDateTime,
) -> Vec<EntryOutcome> {
    config
        .archives
        .iter()
        .map(|settings| {
            let result = ArchiveCycle::prepare(settings, registry)
                .with_context(|| format!("[{}] invalid archive entry", settings.name))
                .and_then(|cycle| cycle.run(now));
            if let Err(e) = &result {
                tracing::error!(
                    entry = %settings.name,
                    error = %format!("{e:#}"),
                    "archive entry failed"
                );
            }
            EntryOutcome {
                name: settings.name.clone(),
                result,
            }
        })
        .collect()
}
