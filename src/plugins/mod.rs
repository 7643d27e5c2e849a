//! Archiver and storage plugins.
//!
//! The cycle driver only sees the [`Archiver`] and [`Storage`] traits; concrete
//! implementations are created by name through the [`PluginRegistry`].

mod disk_storage;
mod registry;
mod zip_archiver;

pub use disk_storage::{DiskStorage, DiskStorageSettings, unique_target};
pub use registry::{ArchiverFactory, PluginRegistry, StorageFactory};
pub use zip_archiver::{ZipArchiver, ZipCompression, ZipSettings};

use crate::error::PluginError;
use crate::retention::DateWindow;
use crate::selector::EntryMap;
use serde::de::DeserializeOwned;
use std::io::{Read, Seek};
use std::path::PathBuf;

/// A produced archive: readable and rewindable before it is handed to storage.
pub trait ArchiveStream: Read + Seek + Send {}

impl<T: Read + Seek + Send> ArchiveStream for T {}

/// Packs a set of files into a single stream.
pub trait Archiver: Send + Sync {
    /// Registry name
    fn name(&self) -> &str;

    /// Pack `files` (entry name to full path). An empty map yields an empty
    /// archive.
    fn archive(&self, files: &EntryMap) -> Result<Box<dyn ArchiveStream>, PluginError>;
}

/// Persists an archive stream produced for one window.
pub trait Storage: Send + Sync {
    /// Registry name
    fn name(&self) -> &str;

    /// Store `stream`, returning where it ended up.
    fn store(
        &self,
        stream: &mut dyn ArchiveStream,
        window: &DateWindow,
    ) -> Result<PathBuf, PluginError>;
}

/// Deserialize a plugin's `settings` table into its typed settings.
pub(crate) fn parse_settings<T: DeserializeOwned>(
    plugin: &str,
    settings: &toml::Table,
) -> Result<T, PluginError> {
    toml::Value::Table(settings.clone())
        .try_into()
        .map_err(|e| PluginError::Settings {
            plugin: plugin.to_string(),
            message: e.to_string(),
        })
}
