use super::{ArchiveStream, Storage, parse_settings};
use crate::dates::{self, DateParameters, format_date};
use crate::error::{DateError, PluginError};
use crate::retention::DateWindow;
use crate::template;
use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const DEFAULT_FILE_NAME: &str = "{StartDate:yyyyMMdd}-{EndDate:yyyyMMdd}.zip";
const DEFAULT_DATE_FORMAT: &str = "yyyyMMdd";
const DEFAULT_TIMESTAMP_FORMAT: &str = "yyyyMMddHHmmss";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiskStorageSettings {
    /// Destination directory; may contain placeholders and a leading `~`.
    pub path: String,
    /// Output file name template.
    pub file_name: String,
    pub first_day_of_week: Weekday,
    /// Adjustments applied to "now" before rendering `{Date:...}`.
    pub date: DateParameters,
}

impl Default for DiskStorageSettings {
    fn default() -> Self {
        Self {
            path: String::new(),
            file_name: DEFAULT_FILE_NAME.into(),
            first_day_of_week: Weekday::Mon,
            date: DateParameters::default(),
        }
    }
}

/// Writes archives into a local directory.
///
/// Placeholders available in `path` and `file_name`:
/// - `{StartDate:fmt}` / `{EndDate:fmt}`: window bounds
/// - `{Date:fmt}`: now, adjusted by the `date` parameters
/// - `{Timestamp:fmt}`: now, unadjusted
///
/// Unknown placeholders render as the empty string.
pub struct DiskStorage {
    settings: DiskStorageSettings,
}

impl DiskStorage {
    pub const NAME: &'static str = "disk";

    pub fn new(settings: DiskStorageSettings) -> Result<Self, PluginError> {
        if settings.path.trim().is_empty() {
            return Err(PluginError::Settings {
                plugin: Self::NAME.into(),
                message: "path is required".into(),
            });
        }
        if settings.file_name.trim().is_empty() {
            return Err(PluginError::Settings {
                plugin: Self::NAME.into(),
                message: "file_name must not be empty".into(),
            });
        }
        Ok(Self { settings })
    }

    pub fn from_settings(settings: &toml::Table) -> Result<Box<dyn Storage>, PluginError> {
        let settings: DiskStorageSettings = parse_settings(Self::NAME, settings)?;
        Ok(Box::new(Self::new(settings)?))
    }

    /// Render `template` for `window` as of `now`.
    pub fn render(
        &self,
        template: &str,
        window: &DateWindow,
        now: NaiveDateTime,
    ) -> Result<String, DateError> {
        let mut adjusted_now = None;
        template::try_evaluate(template, |token| {
            let format = token.format.as_deref().filter(|f| !f.is_empty());
            let rendered = match token.name.as_str() {
                "StartDate" => format_date(window.start, format.unwrap_or(DEFAULT_DATE_FORMAT)),
                "EndDate" => format_date(window.end, format.unwrap_or(DEFAULT_DATE_FORMAT)),
                "Date" => {
                    let date = match adjusted_now {
                        Some(date) => date,
                        None => {
                            let date = self
                                .settings
                                .date
                                .apply(now, self.settings.first_day_of_week)?;
                            adjusted_now = Some(date);
                            date
                        }
                    };
                    format_date(date, format.unwrap_or(DEFAULT_DATE_FORMAT))
                }
                "Timestamp" => format_date(now, format.unwrap_or(DEFAULT_TIMESTAMP_FORMAT)),
                _ => String::new(),
            };
            Ok(rendered)
        })
    }

    /// Final target path for `window` as of `now`, before collision handling.
    pub fn destination(
        &self,
        window: &DateWindow,
        now: NaiveDateTime,
    ) -> Result<PathBuf, DateError> {
        let dir = self.render(&self.settings.path, window, now)?;
        let dir = shellexpand::tilde(&dir).into_owned();
        let file_name = self.render(&self.settings.file_name, window, now)?;
        Ok(Path::new(&dir).join(file_name))
    }

    fn write(
        &self,
        stream: &mut dyn ArchiveStream,
        window: &DateWindow,
    ) -> Result<PathBuf, String> {
        let planned = self
            .destination(window, dates::now())
            .map_err(|e| e.to_string())?;
        let dir = planned
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| format!("{}: {e}", dir.display()))?;

        // Only a complete copy is given the final name.
        let mut spool =
            NamedTempFile::new_in(dir).map_err(|e| format!("{}: {e}", dir.display()))?;
        io::copy(stream, &mut spool).map_err(|e| format!("{}: {e}", planned.display()))?;
        spool
            .as_file()
            .sync_all()
            .map_err(|e| format!("{}: {e}", planned.display()))?;

        let target = unique_target(&planned);
        spool
            .persist_noclobber(&target)
            .map_err(|e| format!("{}: {}", target.display(), e.error))?;
        Ok(target)
    }
}

impl Storage for DiskStorage {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn store(
        &self,
        stream: &mut dyn ArchiveStream,
        window: &DateWindow,
    ) -> Result<PathBuf, PluginError> {
        let target = self.write(stream, window).map_err(|message| PluginError::Store {
            plugin: Self::NAME.to_string(),
            message,
        })?;
        tracing::info!(target = %target.display(), window = %window, "archive stored");
        Ok(target)
    }
}

/// `path` if free, otherwise the first free `name (N).ext`, counting from 1.
pub fn unique_target(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (stem, ext) = split_name(&filename);

    (1_u64..)
        .map(|i| {
            if ext.is_empty() {
                dir.join(format!("{stem} ({i})"))
            } else {
                dir.join(format!("{stem} ({i}).{ext}"))
            }
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

fn split_name(filename: &str) -> (&str, &str) {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, ext),
        _ => (filename, ""),
    }
}
