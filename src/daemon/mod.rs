//! Periodic mode: one archive pass per cron fire time until Ctrl-C.

pub mod schedule;

use crate::config::Config;
use crate::dates;
use crate::engine;
use crate::plugins::PluginRegistry;
use anyhow::Result;
use chrono::Local;
use std::sync::Arc;
use tokio::time::{self, Duration};

pub async fn run(config: Arc<Config>, registry: Arc<PluginRegistry>) -> Result<()> {
    // Fail fast on a bad expression instead of on the first tick.
    schedule::parse(&config.daemon.schedule)?;

    println!("◆ Archivist daemon started");
    println!("   schedule: {}", config.daemon.schedule);
    println!("   entries:  {}", config.archives.len());
    println!("   Ctrl+C to stop");

    loop {
        let now = Local::now();
        let next = schedule::next_run_for(&config.daemon.schedule, &now)?;
        let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
        tracing::info!(next = %next.format("%Y-%m-%d %H:%M:%S"), "next archive pass scheduled");

        tokio::select! {
            () = time::sleep(wait) => {}
            signal = tokio::signal::ctrl_c() => {
                signal?;
                tracing::info!("shutdown requested");
                return Ok(());
            }
        }

        let pass_config = Arc::clone(&config);
        let pass_registry = Arc::clone(&registry);
        let outcomes = tokio::task::spawn_blocking(move || {
            engine::run_all(&pass_config, &pass_registry, dates::now())
        })
        .await;

        match outcomes {
            Ok(outcomes) => {
                let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
                tracing::info!(entries = outcomes.len(), failed, "archive pass complete");
            }
            Err(e) => tracing::error!("archive pass panicked: {e}"),
        }
    }
}
