use super::ArchiveSettings;
use crate::dates;
use crate::error::{ArchivistError, ConfigError, Result};
use crate::plugins::PluginRegistry;
use crate::selector::FileSelector;

impl ArchiveSettings {
    /// Check everything the cycle driver relies on before any file is touched.
    pub fn validate(&self, registry: &PluginRegistry) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid("archive entry name must not be empty"));
        }
        if self.path.trim().is_empty() {
            return Err(invalid(format!("[{}] path is required", self.name)));
        }
        let root = self.root();
        if !root.is_dir() {
            return Err(invalid(format!(
                "[{}] path '{}' does not exist or is not a directory",
                self.name,
                root.display()
            )));
        }
        if !self.strategy.is_known() {
            return Err(invalid(format!(
                "[{}] strategy must be one of daily, weekly, monthly, yearly",
                self.name
            )));
        }

        if self.archiver.name.trim().is_empty() {
            return Err(invalid(format!("[{}] archiver name is required", self.name)));
        }
        if self.storage.name.trim().is_empty() {
            return Err(invalid(format!("[{}] storage name is required", self.name)));
        }
        registry.create_archiver(&self.archiver.name, &self.archiver.settings)?;
        registry.create_storage(&self.storage.name, &self.storage.settings)?;

        self.selector()?;
        self.retention_parameters().initial_cursor(dates::now())?;
        Ok(())
    }

    pub fn selector(&self) -> Result<FileSelector> {
        Ok(FileSelector::new(
            self.root(),
            Some(self.file_pattern.as_str()),
            self.file_regex.as_deref(),
            self.include_subfolders,
            self.subfolder_pattern.as_deref(),
        )?)
    }
}

fn invalid(message: impl Into<String>) -> ArchivistError {
    ConfigError::Validation(message.into()).into()
}
