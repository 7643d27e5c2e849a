use super::cleanup;
use super::scan::WindowScan;
use crate::config::ArchiveSettings;
use crate::error::{ArchivistError, PluginError};
use crate::plugins::{Archiver, PluginRegistry, Storage};
use crate::retention::{DateWindow, RetentionDateParameters, WindowGenerator};
use crate::selector::{EntryMap, FileSelector};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::io::{Seek, SeekFrom};
use std::path::PathBuf;

/// What one pass over a single archive entry did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub windows_scanned: usize,
    pub windows_archived: usize,
    pub files_archived: usize,
    pub files_deleted: usize,
    pub directories_removed: usize,
    pub probes: usize,
    pub failures: usize,
    pub stored: Vec<PathBuf>,
}

/// Drives one configured entry from its initial cursor back to exhaustion.
pub struct ArchiveCycle {
    name: String,
    selector: FileSelector,
    generator: WindowGenerator,
    retention: RetentionDateParameters,
    archiver: Box<dyn Archiver>,
    storage: Box<dyn Storage>,
    delete_archived_files: bool,
    delete_empty_subfolders: bool,
}

impl ArchiveCycle {
    /// Validate `settings` and instantiate its plugins from `registry`.
    pub fn prepare(
        settings: &ArchiveSettings,
        registry: &PluginRegistry,
    ) -> Result<Self, ArchivistError> {
        settings.validate(registry)?;
        let archiver =
            registry.create_archiver(&settings.archiver.name, &settings.archiver.settings)?;
        let storage =
            registry.create_storage(&settings.storage.name, &settings.storage.settings)?;
        Self::with_plugins(settings, archiver, storage)
    }

    /// Build a cycle around already constructed plugins. Skips registry checks.
    pub fn with_plugins(
        settings: &ArchiveSettings,
        archiver: Box<dyn Archiver>,
        storage: Box<dyn Storage>,
    ) -> Result<Self, ArchivistError> {
        Ok(Self {
            name: settings.name.clone(),
            selector: settings.selector()?,
            generator: WindowGenerator::new(settings.strategy, settings.first_day_of_week),
            retention: settings.retention_parameters(),
            archiver,
            storage,
            delete_archived_files: settings.delete_archived_files,
            delete_empty_subfolders: settings.delete_empty_subfolders,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Archive every non-empty window, newest first, until no older file is left.
    ///
    /// Plugin and cleanup failures are logged and counted; selection and date
    /// errors end the pass.
    pub fn run(&self, now: NaiveDateTime) -> Result<CycleReport> {
        let cursor = self
            .retention
            .initial_cursor(now)
            .with_context(|| format!("[{}] cannot compute initial cursor", self.name))?;
        tracing::info!(
            entry = %self.name,
            cursor = %cursor,
            strategy = %self.generator.strategy(),
            "archive pass started"
        );

        let mut report = CycleReport::default();
        let mut scan = WindowScan::new(&self.selector, self.generator, cursor);

        for scanned in scan.by_ref() {
            let scanned = scanned.with_context(|| format!("[{}] window scan failed", self.name))?;
            if scanned.files.is_empty() {
                tracing::debug!(entry = %self.name, window = %scanned.window, "empty window");
                continue;
            }
            self.process_window(&scanned.window, &scanned.files, &mut report);
        }

        report.windows_scanned = scan.visited();
        report.probes = scan.probes();
        tracing::info!(
            entry = %self.name,
            windows = report.windows_scanned,
            archived = report.windows_archived,
            files = report.files_archived,
            failures = report.failures,
            "archive pass finished"
        );
        Ok(report)
    }

    fn process_window(&self, window: &DateWindow, files: &EntryMap, report: &mut CycleReport) {
        tracing::info!(
            entry = %self.name,
            window = %window,
            files = files.len(),
            "archiving window"
        );

        let stored = match self.archive_and_store(window, files) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!(
                    entry = %self.name,
                    window = %window,
                    error = %e,
                    "window not archived, files left in place"
                );
                report.failures += 1;
                return;
            }
        };

        report.windows_archived += 1;
        report.files_archived += files.len();
        report.stored.push(stored);

        if self.delete_archived_files {
            report.files_deleted += cleanup::delete_files(files);
            if self.delete_empty_subfolders {
                report.directories_removed +=
                    cleanup::remove_empty_dirs(self.selector.root(), files);
            }
        }
    }

    fn archive_and_store(
        &self,
        window: &DateWindow,
        files: &EntryMap,
    ) -> Result<PathBuf, PluginError> {
        let mut stream = self.archiver.archive(files)?;
        stream
            .seek(SeekFrom::Start(0))
            .map_err(|e| PluginError::Archive {
                plugin: self.archiver.name().to_string(),
                message: format!("archive stream is not rewindable: {e}"),
            })?;
        self.storage.store(stream.as_mut(), window)
    }
}
