use super::Config;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_ENV: &str = "ARCHIVIST_CONFIG";

impl Config {
    /// Default location: `~/.archivist/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Ok(home.join(".archivist").join("config.toml"))
    }

    /// Explicit path, then `ARCHIVIST_CONFIG`, then the default location.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(CONFIG_ENV)
            && !path.is_empty()
        {
            return Ok(PathBuf::from(path));
        }
        Self::default_path()
    }

    /// Load the config at `explicit` (or the resolved default), creating an
    /// empty one if the file does not exist yet.
    pub fn load_or_init(explicit: Option<&Path>) -> Result<Self> {
        let config_path = Self::resolve_path(explicit)?;

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            if let Some(parent) = config_path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let config = Self {
                config_path: config_path.clone(),
                ..Self::default()
            };
            config.save()?;
            config
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(ConfigError::Io)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::Load(e.to_string()))
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str)
            .map_err(ConfigError::Io)
            .with_context(|| format!("Failed to write {}", self.config_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_or_init_creates_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        let config = Config::load_or_init(Some(&path)).unwrap();

        assert!(path.exists());
        assert!(config.archives.is_empty());
        assert_eq!(config.config_path, path);
    }

    #[test]
    fn save_then_load_keeps_entries() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[[archives]]
name = "logs"
path = "/var/log/app"
strategy = "Weekly"
first_day_of_week = "Sunday"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        config.save().unwrap();
        let reloaded = Config::load_from(&path).unwrap();

        let entry = reloaded.archive("LOGS").unwrap();
        assert_eq!(entry.path, "/var/log/app");
        assert_eq!(entry.first_day_of_week, chrono::Weekday::Sun);
        assert_eq!(entry.strategy, crate::retention::ArchiveStrategy::Weekly);
    }

    #[test]
    fn parse_error_names_the_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "archives = 5").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Load(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = Config::load_from(&tmp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Io(_))
        ));
    }
}
