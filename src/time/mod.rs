//! Capture time extraction
//!
//! Images are read for EXIF metadata; videos are parsed from their
//! filename. A failure on either path is a normal outcome, reported as
//! [`Extraction::Unknown`] so the caller decides how to log and count it.

pub mod exif;
pub mod filename;

use crate::error::Error;
use crate::timeline::MediaKind;
use chrono::NaiveDateTime;
use std::path::Path;
use tracing::debug;

/// Outcome of a single timestamp extraction
#[derive(Debug, Clone)]
pub enum Extraction {
    /// A capture time was derived
    Known(NaiveDateTime),
    /// No capture time could be derived; carries the reason
    Unknown(String),
}

/// Derive a capture timestamp for a single media file.
///
/// Never fails: extraction problems are folded into `Unknown`.
pub fn extract_timestamp(kind: MediaKind, path: &Path) -> Extraction {
    match kind {
        MediaKind::Image => match exif::extract_exif_time(path) {
            Ok(time) => {
                debug!(?path, %time, "Extracted time from EXIF");
                Extraction::Known(time)
            }
            Err(e) => Extraction::Unknown(e.to_string()),
        },
        MediaKind::Video => {
            let name = path.file_name().and_then(|f| f.to_str()).unwrap_or("");
            match filename::parse_filename_time(name) {
                Some(time) => {
                    debug!(?path, %time, "Extracted time from filename");
                    Extraction::Known(time)
                }
                None => Extraction::Unknown(
                    Error::TimestampParse {
                        source_info: name.to_string(),
                        message: "no known filename pattern matched".to_string(),
                    }
                    .to_string(),
                ),
            }
        }
    }
}
