use crate::dates::DateParameters;
use crate::retention::{ArchiveStrategy, RetentionDateParameters};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub daemon: DaemonConfig,

    #[serde(default)]
    pub archives: Vec<ArchiveSettings>,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            log_level: default_log_level(),
            daemon: DaemonConfig::default(),
            archives: Vec::new(),
        }
    }
}

impl Config {
    /// Entry by name (case-insensitive).
    pub fn archive(&self, name: &str) -> Option<&ArchiveSettings> {
        self.archives
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Cron expression (5, 6 or 7 fields) for periodic runs.
    #[serde(default = "default_schedule")]
    pub schedule: String,
}

fn default_schedule() -> String {
    "0 0 2 * * *".into()
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            schedule: default_schedule(),
        }
    }
}

/// One archive job: where to look, how to slice history, what to do with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveSettings {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub strategy: ArchiveStrategy,
    #[serde(default = "default_first_day_of_week")]
    pub first_day_of_week: Weekday,
    #[serde(default)]
    pub retention: DateParameters,
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,
    #[serde(default)]
    pub file_regex: Option<String>,
    #[serde(default)]
    pub include_subfolders: bool,
    #[serde(default)]
    pub subfolder_pattern: Option<String>,
    #[serde(default)]
    pub delete_archived_files: bool,
    #[serde(default)]
    pub delete_empty_subfolders: bool,
    #[serde(default)]
    pub archiver: PluginRef,
    #[serde(default)]
    pub storage: PluginRef,
}

fn default_first_day_of_week() -> Weekday {
    Weekday::Mon
}

fn default_file_pattern() -> String {
    "*".into()
}

impl ArchiveSettings {
    /// Root directory with `~` expanded.
    pub fn root(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(self.path.trim()).into_owned())
    }

    pub fn retention_parameters(&self) -> RetentionDateParameters {
        RetentionDateParameters::new(self.retention.clone(), self.first_day_of_week)
    }
}

/// Named reference to a registered plugin plus its own settings block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub settings: toml::Table,
}
