use crate::error::ArchivistError;
use crate::retention::{DateWindow, WindowGenerator};
use crate::selector::{EntryMap, FileSelector};
use chrono::NaiveDateTime;

/// One visited window and the files that fell into it (possibly none).
#[derive(Debug, Clone)]
pub struct ScannedWindow {
    pub window: DateWindow,
    pub files: EntryMap,
}

/// Walks windows backwards from an initial cursor until no matching file is
/// left at or before the current window's end.
///
/// An empty window is still yielded when older files remain; the scan stops
/// (without yielding) on the first empty window whose probe finds nothing.
pub struct WindowScan<'a> {
    selector: &'a FileSelector,
    generator: WindowGenerator,
    cursor: Option<NaiveDateTime>,
    visited: usize,
    probes: usize,
}

impl<'a> WindowScan<'a> {
    pub fn new(
        selector: &'a FileSelector,
        generator: WindowGenerator,
        cursor: NaiveDateTime,
    ) -> Self {
        Self {
            selector,
            generator,
            cursor: Some(cursor),
            visited: 0,
            probes: 0,
        }
    }

    /// Windows computed so far, including the one that ended the scan.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// "Any older file?" probes issued after empty windows.
    pub fn probes(&self) -> usize {
        self.probes
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_none()
    }

    fn step(&mut self, cursor: NaiveDateTime) -> Result<Option<ScannedWindow>, ArchivistError> {
        let window = self.generator.next_window(cursor)?;
        self.visited += 1;

        let files = self.selector.select(&window)?;
        if files.is_empty() {
            self.probes += 1;
            if !self.selector.has_files_until(window.end)? {
                tracing::debug!(window = %window, "no older files, scan exhausted");
                return Ok(None);
            }
        }

        self.cursor = Some(window.next_cursor()?);
        Ok(Some(ScannedWindow { window, files }))
    }
}

impl Iterator for WindowScan<'_> {
    type Item = Result<ScannedWindow, ArchivistError>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.take()?;
        match self.step(cursor) {
            Ok(Some(scanned)) => Some(Ok(scanned)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
