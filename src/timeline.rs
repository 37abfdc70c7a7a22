//! Media items and the globally ordered timeline
//!
//! Items whose capture time could not be derived carry a sentinel
//! timestamp instead of an absent value, so the timeline stays totally
//! ordered and unknowns cluster together at the front.

use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;

/// Kind of a media file, decided by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// Sentinel timestamp for items with no derivable capture time.
/// Sorts before every real timestamp.
pub fn unknown_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1900, 1, 1)
        .expect("valid sentinel date")
        .and_hms_opt(0, 0, 0)
        .expect("valid sentinel time")
}

/// A single scanned media file with its derived capture timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub path: PathBuf,
    pub timestamp: NaiveDateTime,
    pub kind: MediaKind,
}

impl MediaItem {
    pub fn new(path: PathBuf, timestamp: NaiveDateTime, kind: MediaKind) -> Self {
        Self {
            path,
            timestamp,
            kind,
        }
    }

    /// Whether the timestamp is the unknown sentinel
    pub fn is_unknown(&self) -> bool {
        self.timestamp == unknown_timestamp()
    }
}

/// Sort items into a timeline: ascending by timestamp, stable for ties
/// so discovery order is preserved. No deduplication.
pub fn build_timeline(mut items: Vec<MediaItem>) -> Vec<MediaItem> {
    items.sort_by_key(|item| item.timestamp);
    items
}
