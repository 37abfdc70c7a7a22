//! Collision-free destination naming
//!
//! The naming rules are pure functions of an injected existence
//! predicate, so they are testable without touching the filesystem.
//! The filesystem wrappers below plug in the real `exists` checks.
//! Check-then-act: safe only for a single process writing to the
//! destination roots.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Build the leaf name for an event folder: `YYYY_MM_DD`, with a
/// ` - NNN` counter inserted on collision and a ` (N files)` annotation
/// for large events. The annotation participates in the existence check,
/// so large and normal events on the same date never collide.
pub fn folder_leaf_name<F>(date: NaiveDate, large_count: Option<usize>, exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    let date_str = date.format("%Y_%m_%d").to_string();

    for counter in 0usize.. {
        let base = if counter == 0 {
            date_str.clone()
        } else {
            format!("{date_str} - {counter:03}")
        };
        let candidate = match large_count {
            Some(count) => format!("{base} ({count} files)"),
            None => base,
        };
        if !exists(&candidate) {
            return candidate;
        }
    }
    unreachable!("counter space exhausted");
}

/// Pick a free file name inside a folder: `name.ext`, then `name_1.ext`,
/// `name_2.ext`, ... until unused.
pub fn unique_file_name<F>(filename: &str, exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !exists(filename) {
        return filename.to_string();
    }

    let (stem, ext) = match filename.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{ext}")),
        None => (filename, String::new()),
    };

    for counter in 1usize.. {
        let candidate = format!("{stem}_{counter}{ext}");
        if !exists(&candidate) {
            return candidate;
        }
    }
    unreachable!("counter space exhausted");
}

/// Resolve and create the destination folder for an event:
/// `root/YYYY/<leaf>` with all directories created.
pub fn folder_for(
    root: &Path,
    date: NaiveDate,
    large_count: Option<usize>,
) -> std::io::Result<PathBuf> {
    let year_dir = root.join(date.format("%Y").to_string());
    let leaf = folder_leaf_name(date, large_count, |name| year_dir.join(name).exists());
    let folder = year_dir.join(&leaf);

    std::fs::create_dir_all(&folder)?;
    debug!(folder = %folder.display(), "Created event folder");
    Ok(folder)
}

/// Pick a free destination path for a source file inside a folder.
/// The caller performs the copy.
pub fn unique_destination(folder: &Path, source_filename: &str) -> PathBuf {
    let name = unique_file_name(source_filename, |candidate| folder.join(candidate).exists());
    folder.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_folder_leaf_basic() {
        let taken = set(&[]);
        let name = folder_leaf_name(date(2024, 3, 5), None, |n| taken.contains(n));
        assert_eq!(name, "2024_03_05");
    }

    #[test]
    fn test_folder_leaf_collision_counter() {
        let taken = set(&["2024_03_05"]);
        let name = folder_leaf_name(date(2024, 3, 5), None, |n| taken.contains(n));
        assert_eq!(name, "2024_03_05 - 001");

        let taken = set(&["2024_03_05", "2024_03_05 - 001", "2024_03_05 - 002"]);
        let name = folder_leaf_name(date(2024, 3, 5), None, |n| taken.contains(n));
        assert_eq!(name, "2024_03_05 - 003");
    }

    #[test]
    fn test_folder_leaf_large_annotation() {
        let taken = set(&[]);
        let name = folder_leaf_name(date(2024, 3, 5), Some(25), |n| taken.contains(n));
        assert_eq!(name, "2024_03_05 (25 files)");

        // Annotation is part of the checked name, so a plain folder of
        // the same date does not collide with a large one
        let taken = set(&["2024_03_05"]);
        let name = folder_leaf_name(date(2024, 3, 5), Some(25), |n| taken.contains(n));
        assert_eq!(name, "2024_03_05 (25 files)");

        let taken = set(&["2024_03_05 (25 files)"]);
        let name = folder_leaf_name(date(2024, 3, 5), Some(25), |n| taken.contains(n));
        assert_eq!(name, "2024_03_05 - 001 (25 files)");
    }

    #[test]
    fn test_unique_file_name() {
        let taken = set(&[]);
        assert_eq!(unique_file_name("IMG_0001.jpg", |n| taken.contains(n)), "IMG_0001.jpg");

        let taken = set(&["IMG_0001.jpg"]);
        assert_eq!(unique_file_name("IMG_0001.jpg", |n| taken.contains(n)), "IMG_0001_1.jpg");

        let taken = set(&["IMG_0001.jpg", "IMG_0001_1.jpg"]);
        assert_eq!(unique_file_name("IMG_0001.jpg", |n| taken.contains(n)), "IMG_0001_2.jpg");
    }

    #[test]
    fn test_unique_file_name_without_extension() {
        let taken = set(&["README"]);
        assert_eq!(unique_file_name("README", |n| taken.contains(n)), "README_1");
    }

    #[test]
    fn test_folder_for_creates_year_layout() {
        let root = tempfile::tempdir().unwrap();
        let folder = folder_for(root.path(), date(2024, 3, 5), None).unwrap();
        assert_eq!(folder, root.path().join("2024").join("2024_03_05"));
        assert!(folder.is_dir());
    }

    #[test]
    fn test_folder_for_never_reuses_existing() {
        let root = tempfile::tempdir().unwrap();
        let first = folder_for(root.path(), date(2024, 3, 5), None).unwrap();
        let second = folder_for(root.path(), date(2024, 3, 5), None).unwrap();
        assert_ne!(first, second);
        assert_eq!(
            second.file_name().unwrap().to_str().unwrap(),
            "2024_03_05 - 001"
        );
        assert!(second.is_dir());
    }

    #[test]
    fn test_unique_destination_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("IMG_0001.jpg"), b"x").unwrap();

        let dest = unique_destination(dir.path(), "IMG_0001.jpg");
        assert_eq!(dest, dir.path().join("IMG_0001_1.jpg"));

        let fresh = unique_destination(dir.path(), "IMG_0002.jpg");
        assert_eq!(fresh, dir.path().join("IMG_0002.jpg"));
    }
}
