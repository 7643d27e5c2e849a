use crate::dates::DateTimeScope;
use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `archivist`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; the driver and the binary continue to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum ArchivistError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Date arithmetic ─────────────────────────────────────────────────
    #[error("date: {0}")]
    Date(#[from] DateError),

    // ── File selection ──────────────────────────────────────────────────
    #[error("select: {0}")]
    Select(#[from] SelectError),

    // ── Plugins ─────────────────────────────────────────────────────────
    #[error("plugin: {0}")]
    Plugin(#[from] PluginError),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Date arithmetic errors ─────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DateError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unsupported {scope} parameter '{parameter}'")]
    UnsupportedOperation {
        scope: DateTimeScope,
        parameter: String,
    },

    #[error("{scope} value {value} is out of range")]
    OutOfRange { scope: DateTimeScope, value: i64 },
}

// ─── File selection errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("invalid glob '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("invalid regex '{pattern}': {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Plugin errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("archiver '{0}' is not registered")]
    UnknownArchiver(String),

    #[error("storage '{0}' is not registered")]
    UnknownStorage(String),

    #[error("plugin {plugin} settings invalid: {message}")]
    Settings { plugin: String, message: String },

    #[error("archiver {plugin} failed: {message}")]
    Archive { plugin: String, message: String },

    #[error("storage {plugin} failed: {message}")]
    Store { plugin: String, message: String },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ArchivistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = ArchivistError::Config(ConfigError::Validation("path is empty".into()));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn unsupported_operation_names_scope_and_parameter() {
        let err = ArchivistError::Date(DateError::UnsupportedOperation {
            scope: DateTimeScope::Month,
            parameter: "Smarch".into(),
        });
        let text = err.to_string();
        assert!(text.contains("month"));
        assert!(text.contains("Smarch"));
    }

    #[test]
    fn plugin_error_displays_name() {
        let err = ArchivistError::Plugin(PluginError::UnknownStorage("s3".into()));
        assert!(err.to_string().contains("s3"));
    }
}
