use crate::selector::EntryMap;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Delete every archived file. Failures are logged and skipped.
///
/// Returns the number of files removed.
pub fn delete_files(files: &EntryMap) -> usize {
    let mut deleted = 0;
    for path in files.values() {
        match fs::remove_file(path) {
            Ok(()) => deleted += 1,
            Err(e) => {
                tracing::warn!(
                    file = %path.display(),
                    error = %e,
                    "failed to delete archived file"
                );
            }
        }
    }
    deleted
}

/// Remove directories left empty by deleting `files`, deepest first.
///
/// Only the folders that held archived files and their ancestors below `root`
/// are considered; `root` itself is never removed.
pub fn remove_empty_dirs(root: &Path, files: &EntryMap) -> usize {
    let mut candidates: BTreeSet<PathBuf> = BTreeSet::new();
    for path in files.values() {
        let mut current = path.parent();
        while let Some(dir) = current {
            if dir == root || !dir.starts_with(root) {
                break;
            }
            candidates.insert(dir.to_path_buf());
            current = dir.parent();
        }
    }

    let mut ordered: Vec<PathBuf> = candidates.into_iter().collect();
    ordered.sort_by_key(|dir| std::cmp::Reverse(dir.components().count()));

    let mut removed = 0;
    for dir in ordered {
        if !is_empty_dir(&dir) {
            continue;
        }
        match fs::remove_dir(&dir) {
            Ok(()) => {
                tracing::debug!(dir = %dir.display(), "removed empty folder");
                removed += 1;
            }
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to remove empty folder");
            }
        }
    }
    removed
}

fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entries(root: &Path, names: &[&str]) -> EntryMap {
        names
            .iter()
            .map(|name| ((*name).to_string(), root.join(name)))
            .collect()
    }

    #[test]
    fn deletes_files_and_keeps_going_on_failure() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.log"), "a").unwrap();
        fs::write(tmp.path().join("c.log"), "c").unwrap();

        let files = entries(tmp.path(), &["a.log", "b.log", "c.log"]);
        assert_eq!(delete_files(&files), 2);
        assert!(!tmp.path().join("a.log").exists());
        assert!(!tmp.path().join("c.log").exists());
    }

    #[test]
    fn removes_emptied_folders_deepest_first_but_not_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("x/y")).unwrap();
        fs::create_dir_all(root.join("keep")).unwrap();
        fs::write(root.join("keep/other.txt"), "stay").unwrap();

        let files = entries(root, &["x/y/a.log", "keep/b.log", "top.log"]);
        let removed = remove_empty_dirs(root, &files);

        assert_eq!(removed, 2);
        assert!(!root.join("x").exists());
        assert!(root.join("keep").exists());
        assert!(root.exists());
    }
}
