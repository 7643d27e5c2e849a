use super::{ArchiveStream, Archiver, parse_settings};
use crate::error::PluginError;
use crate::selector::{EntryMap, last_write_time};
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Seek, SeekFrom};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Entries at or above this size need zip64 headers.
const ZIP64_THRESHOLD: u64 = 0xFFFF_FFFF;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZipCompression {
    #[default]
    Deflated,
    Stored,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZipSettings {
    pub compression: ZipCompression,
}

/// Packs files into a zip archive spooled to an anonymous temporary file.
pub struct ZipArchiver {
    settings: ZipSettings,
}

impl ZipArchiver {
    pub const NAME: &'static str = "zip";

    pub fn new(settings: ZipSettings) -> Self {
        Self { settings }
    }

    pub fn from_settings(settings: &toml::Table) -> Result<Box<dyn Archiver>, PluginError> {
        let settings: ZipSettings = parse_settings(Self::NAME, settings)?;
        Ok(Box::new(Self::new(settings)))
    }

    fn options_for(&self, path: &Path) -> io::Result<SimpleFileOptions> {
        let method = match self.settings.compression {
            ZipCompression::Deflated => CompressionMethod::Deflated,
            ZipCompression::Stored => CompressionMethod::Stored,
        };
        let size = std::fs::metadata(path)?.len();
        let mut options = SimpleFileOptions::default()
            .compression_method(method)
            .large_file(size >= ZIP64_THRESHOLD);
        if let Some(stamp) = last_write_time(path).and_then(zip_timestamp) {
            options = options.last_modified_time(stamp);
        }
        Ok(options)
    }

    fn write_archive(&self, files: &EntryMap) -> Result<File, String> {
        let spool = tempfile::tempfile().map_err(|e| format!("cannot create spool file: {e}"))?;
        let mut writer = ZipWriter::new(spool);

        for (entry_name, path) in files {
            let options = self
                .options_for(path)
                .map_err(|e| format!("{}: {e}", path.display()))?;
            writer
                .start_file(entry_name.as_str(), options)
                .map_err(|e| format!("{entry_name}: {e}"))?;
            let mut source = File::open(path).map_err(|e| format!("{}: {e}", path.display()))?;
            io::copy(&mut source, &mut writer).map_err(|e| format!("{entry_name}: {e}"))?;
        }

        let mut spool = writer.finish().map_err(|e| e.to_string())?;
        spool.seek(SeekFrom::Start(0)).map_err(|e| e.to_string())?;
        Ok(spool)
    }
}

impl Archiver for ZipArchiver {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn archive(&self, files: &EntryMap) -> Result<Box<dyn ArchiveStream>, PluginError> {
        let spool = self
            .write_archive(files)
            .map_err(|message| PluginError::Archive {
                plugin: Self::NAME.to_string(),
                message,
            })?;
        tracing::debug!(entries = files.len(), "zip archive written");
        Ok(Box::new(spool))
    }
}

fn zip_timestamp(instant: NaiveDateTime) -> Option<zip::DateTime> {
    zip::DateTime::from_date_and_time(
        u16::try_from(instant.year()).ok()?,
        u8::try_from(instant.month()).ok()?,
        u8::try_from(instant.day()).ok()?,
        u8::try_from(instant.hour()).ok()?,
        u8::try_from(instant.minute()).ok()?,
        u8::try_from(instant.second()).ok()?,
    )
    .ok()
}
