//! Organizer pipeline
//!
//! Ties the stages together: scan input folders, sort the timeline,
//! cluster into events, then materialize each event into a uniquely
//! named destination folder. Copy failures are per-file and never abort
//! the run.

use crate::cluster::{Event, cluster_events};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::naming::{folder_for, unique_destination};
use crate::scan::{ScanReport, scan_media};
use crate::timeline::build_timeline;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Tallies from the materialization stage
#[derive(Debug, Default, Clone)]
pub struct OrganizeReport {
    /// Events identified on the timeline
    pub events: usize,
    /// Events routed to the large output root
    pub large_events: usize,
    /// Files copied successfully
    pub copied: usize,
    /// Per-file copy failures
    pub copy_failures: usize,
}

/// Combined result of a full run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub scan: ScanReport,
    pub organize: OrganizeReport,
}

/// Main driver for organizing media files into event folders
pub struct Organizer {
    config: Config,
}

impl Organizer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the full pipeline: scan, sort, cluster, materialize
    pub fn run(&self) -> Result<RunSummary> {
        let (media, scan_report) = scan_media(&self.config)?;
        let timeline = build_timeline(media);
        let events = cluster_events(timeline, self.config.gap_threshold());

        info!(events = events.len(), "Identified events");

        let organize_report = self.materialize(&events)?;
        Ok(RunSummary {
            scan: scan_report,
            organize: organize_report,
        })
    }

    /// Copy every event's files into its destination folder
    fn materialize(&self, events: &[Event]) -> Result<OrganizeReport> {
        let mut report = OrganizeReport {
            events: events.len(),
            ..OrganizeReport::default()
        };

        for event in events {
            let is_large = event.len() > self.config.large_event_threshold;
            let root = if is_large {
                report.large_events += 1;
                self.config.large_output_root()
            } else {
                &self.config.event_output_folder
            };

            let folder = folder_for(root, event.anchor_date(), is_large.then_some(event.len()))?;

            if is_large {
                info!(
                    folder = %folder.display(),
                    files = event.len(),
                    "Created large event folder"
                );
            }

            for item in event.items() {
                match copy_into(&folder, &item.path) {
                    Ok(dest) => {
                        info!(source = %item.path.display(), dest = %dest.display(), "Copied");
                        report.copied += 1;
                    }
                    Err(e) => {
                        error!(
                            source = %item.path.display(),
                            folder = %folder.display(),
                            error = %e,
                            "Failed to copy file"
                        );
                        report.copy_failures += 1;
                    }
                }
            }
        }

        Ok(report)
    }
}

/// Copy a source file into a folder under a collision-free name,
/// preserving its modification time
fn copy_into(folder: &Path, source: &Path) -> Result<PathBuf> {
    let filename = source
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| Error::Copy {
            source_path: source.to_path_buf(),
            dest: folder.to_path_buf(),
            message: "invalid source filename".to_string(),
        })?;

    let dest = unique_destination(folder, filename);
    copy_file(source, &dest).map_err(|e| Error::Copy {
        source_path: source.to_path_buf(),
        dest: dest.clone(),
        message: e.to_string(),
    })?;

    // Preserve modification time
    if let Ok(metadata) = fs::metadata(source)
        && let Ok(mtime) = metadata.modified()
    {
        let _ = filetime::set_file_mtime(&dest, filetime::FileTime::from_system_time(mtime));
    }

    Ok(dest)
}

/// Copy file with buffered I/O for efficiency
fn copy_file(source: &Path, dest: &Path) -> std::io::Result<()> {
    let src_file = File::open(source)?;
    let dest_file = File::create(dest)?;

    let mut reader = BufReader::with_capacity(256 * 1024, src_file);
    let mut writer = BufWriter::with_capacity(256 * 1024, dest_file);

    let mut buffer = vec![0u8; 256 * 1024];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        writer.write_all(&buffer[..bytes_read])?;
    }

    writer.flush()?;
    Ok(())
}
