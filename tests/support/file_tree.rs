#![allow(dead_code)]

use chrono::{Local, NaiveDate, NaiveDateTime};
use filetime::{FileTime, set_file_mtime};
use std::fs;
use std::path::Path;

pub fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(11, 0, 0)
        .expect("valid time")
}

/// Create `root/relative` with `contents` and back-date its mtime to `when`.
pub fn write_file(root: &Path, relative: &str, contents: &str, when: NaiveDateTime) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(&path, contents).expect("write file");
    let local = when
        .and_local_timezone(Local)
        .single()
        .expect("unambiguous local time");
    set_file_mtime(&path, FileTime::from_unix_time(local.timestamp(), 0)).expect("set mtime");
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
