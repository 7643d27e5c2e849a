use super::scan::WindowScan;
use crate::config::ArchiveSettings;
use crate::error::Result;
use crate::retention::{DateWindow, WindowGenerator};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PlannedWindow {
    pub window: DateWindow,
    pub file_count: usize,
    pub files: Vec<String>,
}

/// Windows a pass over `settings` would visit, without touching any file.
///
/// Stops at exhaustion or after `limit` windows, whichever comes first.
pub fn plan(
    settings: &ArchiveSettings,
    now: NaiveDateTime,
    limit: usize,
) -> Result<Vec<PlannedWindow>> {
    let selector = settings.selector()?;
    let generator = WindowGenerator::new(settings.strategy, settings.first_day_of_week);
    let cursor = settings.retention_parameters().initial_cursor(now)?;

    WindowScan::new(&selector, generator, cursor)
        .take(limit)
        .map(|scanned| {
            let scanned = scanned?;
            Ok(PlannedWindow {
                window: scanned.window,
                file_count: scanned.files.len(),
                files: scanned.files.into_keys().collect(),
            })
        })
        .collect()
}
