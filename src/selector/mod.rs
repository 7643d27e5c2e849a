//! Candidate file discovery: glob on the file name, optional regex on the full
//! path, optional recursion, and last-write-time membership in a window.

use crate::error::SelectError;
use crate::retention::DateWindow;
use chrono::{DateTime, Local, NaiveDateTime, SubsecRound};
use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::ops::ControlFlow;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

/// Entry name (path relative to the root, `/`-separated) to full path.
pub type EntryMap = BTreeMap<String, PathBuf>;

const DEFAULT_FILE_PATTERN: &str = "*";

#[derive(Debug, Clone)]
pub struct FileSelector {
    root: PathBuf,
    file_glob: GlobMatcher,
    file_regex: Option<Regex>,
    include_subfolders: bool,
    subfolder_glob: Option<GlobMatcher>,
}

impl FileSelector {
    pub fn new(
        root: impl Into<PathBuf>,
        file_pattern: Option<&str>,
        file_regex: Option<&str>,
        include_subfolders: bool,
        subfolder_pattern: Option<&str>,
    ) -> Result<Self, SelectError> {
        let file_pattern = file_pattern
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_FILE_PATTERN);

        let file_regex = file_regex
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| SelectError::Regex {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .transpose()?;

        let subfolder_glob = subfolder_pattern
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(compile_glob)
            .transpose()?;

        Ok(Self {
            root: normalize_root(root.into()),
            file_glob: compile_glob(file_pattern)?,
            file_regex,
            include_subfolders,
            subfolder_glob,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files whose last-write time falls inside `window`, keyed by entry name.
    pub fn select(&self, window: &DateWindow) -> Result<EntryMap, SelectError> {
        let mut selected = EntryMap::new();
        self.walk(|path, modified| {
            if window.contains(modified) {
                selected.insert(self.entry_name(path), path.to_path_buf());
            }
            ControlFlow::Continue(())
        })?;
        Ok(selected)
    }

    /// Whether any matching file was last written at or before `end`.
    pub fn has_files_until(&self, end: NaiveDateTime) -> Result<bool, SelectError> {
        let mut found = false;
        self.walk(|_, modified| {
            if modified <= end {
                found = true;
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })?;
        Ok(found)
    }

    /// Path of `path` relative to the root with `/` separators.
    pub fn entry_name(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Depth-first walk over matching files. Unreadable subdirectories and
    /// entries below the root are logged and skipped; failures in the root
    /// itself are errors.
    fn walk<F>(&self, mut visit: F) -> Result<(), SelectError>
    where
        F: FnMut(&Path, NaiveDateTime) -> ControlFlow<()>,
    {
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) => {
                    self.skip_unreadable(&dir, e)?;
                    continue;
                }
            };

            for entry in entries {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        self.skip_unreadable(&dir, e)?;
                        continue;
                    }
                };
                let path = entry.path();
                let file_type = match entry.file_type() {
                    Ok(file_type) => file_type,
                    Err(e) => {
                        self.skip_unreadable(&path, e)?;
                        continue;
                    }
                };

                if file_type.is_dir() {
                    if self.include_subfolders && self.subfolder_matches(&entry.file_name()) {
                        pending.push(path);
                    }
                    continue;
                }
                if !file_type.is_file() || !self.file_matches(&path) {
                    continue;
                }

                let Some(modified) = last_write_time(&path) else {
                    tracing::debug!(file = %path.display(), "no modification time, skipping");
                    continue;
                };

                if visit(&path, modified).is_break() {
                    return Ok(());
                }
            }
        }

        Ok(())
    }

    /// Errors under the root are logged; an error about the root is returned.
    fn skip_unreadable(&self, path: &Path, error: io::Error) -> Result<(), SelectError> {
        if path == self.root {
            return Err(error.into());
        }
        tracing::warn!(path = %path.display(), error = %error, "skipping unreadable entry");
        Ok(())
    }

    fn file_matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        if !self.file_glob.is_match(Path::new(name)) {
            return false;
        }
        self.file_regex
            .as_ref()
            .is_none_or(|regex| regex.is_match(&path.to_string_lossy()))
    }

    fn subfolder_matches(&self, name: &std::ffi::OsStr) -> bool {
        self.subfolder_glob
            .as_ref()
            .is_none_or(|glob| glob.is_match(Path::new(name)))
    }
}

/// Local wall-clock last-write time of `path`, truncated to milliseconds so it
/// always falls inside some window.
pub fn last_write_time(path: &Path) -> Option<NaiveDateTime> {
    let modified: SystemTime = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Local>::from(modified).naive_local().trunc_subsecs(3))
}

fn compile_glob(pattern: &str) -> Result<GlobMatcher, SelectError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| SelectError::Glob {
            pattern: pattern.to_string(),
            source,
        })
}

fn normalize_root(root: PathBuf) -> PathBuf {
    root.components().collect()
}
