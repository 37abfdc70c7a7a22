//! Input directory scanning
//!
//! Walks the configured input roots, classifies files by extension and
//! derives a capture timestamp for each supported file. Unsupported
//! files are excluded from the dataset and counted; files with no
//! derivable timestamp receive the unknown sentinel and stay in.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::time::{Extraction, extract_timestamp};
use crate::timeline::{MediaItem, MediaKind, unknown_timestamp};
use chrono::Datelike;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Tallies accumulated during the scan, returned instead of being kept
/// as shared mutable state
#[derive(Debug, Default, Clone)]
pub struct ScanReport {
    /// Total media files admitted to the dataset
    pub found: usize,
    /// Files excluded because their extension is unsupported
    pub skipped: usize,
    /// Images with a successfully derived timestamp
    pub images: usize,
    /// Videos with a successfully derived timestamp
    pub videos: usize,
    /// Media files carrying the unknown sentinel
    pub unknown: usize,
    /// Known-timestamp media per capture year
    pub per_year: BTreeMap<i32, usize>,
}

/// Scan all input folders and build the unordered media collection
pub fn scan_media(config: &Config) -> Result<(Vec<MediaItem>, ScanReport)> {
    let mut media = Vec::new();
    let mut report = ScanReport::default();

    for input_dir in &config.input_folders {
        if !input_dir.exists() {
            warn!(?input_dir, "Input directory does not exist, skipping");
            continue;
        }

        info!(folder = %input_dir.display(), "Scanning folder");

        for entry in WalkDir::new(input_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            scan_file(path, config, &mut media, &mut report);
        }
    }

    info!(
        found = report.found,
        skipped = report.skipped,
        images = report.images,
        videos = report.videos,
        unknown = report.unknown,
        "Scan complete"
    );

    Ok((media, report))
}

fn scan_file(path: &Path, config: &Config, media: &mut Vec<MediaItem>, report: &mut ScanReport) {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let kind = if config.is_image(ext) {
        MediaKind::Image
    } else if config.is_video(ext) {
        MediaKind::Video
    } else {
        let reason = Error::UnsupportedFormat {
            path: path.to_path_buf(),
        };
        debug!(%reason, "Excluding file");
        report.skipped += 1;
        return;
    };

    let timestamp = match extract_timestamp(kind, path) {
        Extraction::Known(ts) => {
            match kind {
                MediaKind::Image => report.images += 1,
                MediaKind::Video => report.videos += 1,
            }
            *report.per_year.entry(ts.year()).or_insert(0) += 1;
            ts
        }
        Extraction::Unknown(reason) => {
            debug!(?path, reason, "No capture time derived, using sentinel");
            report.unknown += 1;
            unknown_timestamp()
        }
    };

    report.found += 1;
    media.push(MediaItem::new(path.to_path_buf(), timestamp, kind));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn config_for(dir: &Path) -> Config {
        Config {
            input_folders: vec![dir.to_path_buf()],
            ..Config::default()
        }
    }

    #[test]
    fn test_scan_classifies_and_counts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("VID_20240115_090000.mp4"), b"v").unwrap();
        fs::write(dir.path().join("notes.txt"), b"t").unwrap();
        fs::write(dir.path().join("no_exif.jpg"), b"j").unwrap();

        let (media, report) = scan_media(&config_for(dir.path())).unwrap();

        assert_eq!(media.len(), 2);
        assert_eq!(report.found, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.videos, 1);
        assert_eq!(report.images, 0);
        // The jpg without EXIF stays in the dataset with the sentinel
        assert_eq!(report.unknown, 1);
        assert_eq!(report.per_year.get(&2024), Some(&1));
    }

    #[test]
    fn test_scan_recurses_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("Camera");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("20230601_110000.mkv"), b"v").unwrap();

        let (media, report) = scan_media(&config_for(dir.path())).unwrap();
        assert_eq!(media.len(), 1);
        assert_eq!(report.videos, 1);
        assert_eq!(media[0].kind, MediaKind::Video);
    }

    #[test]
    fn test_missing_input_dir_is_not_fatal() {
        let config = config_for(&PathBuf::from("/definitely/not/here"));
        let (media, report) = scan_media(&config).unwrap();
        assert!(media.is_empty());
        assert_eq!(report.found, 0);
    }
}
