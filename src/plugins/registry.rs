use super::{Archiver, DiskStorage, Storage, ZipArchiver};
use crate::error::PluginError;
use std::collections::HashMap;

/// Builds an archiver from its `settings` table.
pub type ArchiverFactory = fn(&toml::Table) -> Result<Box<dyn Archiver>, PluginError>;

/// Builds a storage backend from its `settings` table.
pub type StorageFactory = fn(&toml::Table) -> Result<Box<dyn Storage>, PluginError>;

/// Name-keyed plugin factories, populated by explicit registration.
#[derive(Default)]
pub struct PluginRegistry {
    archivers: HashMap<String, ArchiverFactory>,
    storages: HashMap<String, StorageFactory>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `zip` archiver and `disk` storage.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register_archiver(ZipArchiver::NAME, ZipArchiver::from_settings);
        registry.register_storage(DiskStorage::NAME, DiskStorage::from_settings);
        registry
    }

    /// Register an archiver. Replaces any existing archiver with the same name.
    pub fn register_archiver(&mut self, name: &str, factory: ArchiverFactory) {
        self.archivers.insert(key(name), factory);
    }

    /// Register a storage backend. Replaces any existing one with the same name.
    pub fn register_storage(&mut self, name: &str, factory: StorageFactory) {
        self.storages.insert(key(name), factory);
    }

    pub fn has_archiver(&self, name: &str) -> bool {
        self.archivers.contains_key(&key(name))
    }

    pub fn has_storage(&self, name: &str) -> bool {
        self.storages.contains_key(&key(name))
    }

    pub fn create_archiver(
        &self,
        name: &str,
        settings: &toml::Table,
    ) -> Result<Box<dyn Archiver>, PluginError> {
        let factory = self
            .archivers
            .get(&key(name))
            .ok_or_else(|| PluginError::UnknownArchiver(name.to_string()))?;
        factory(settings)
    }

    pub fn create_storage(
        &self,
        name: &str,
        settings: &toml::Table,
    ) -> Result<Box<dyn Storage>, PluginError> {
        let factory = self
            .storages
            .get(&key(name))
            .ok_or_else(|| PluginError::UnknownStorage(name.to_string()))?;
        factory(settings)
    }

    /// Sorted archiver names.
    pub fn archiver_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.archivers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Sorted storage names.
    pub fn storage_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.storages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}
