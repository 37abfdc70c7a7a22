//! Event Sorter - organize photos and videos into time-clustered events
//!
//! This library provides functionality for grouping media files into
//! "events" - bursts of photos and videos captured close together in
//! time - and copying each event into a uniquely named folder:
//! - EXIF metadata extraction for images
//! - Filename timestamp parsing for videos
//! - Same-day + gap-threshold event clustering
//! - Collision-free folder and file naming
//! - Large-event routing to a separate output root

pub mod cli;
pub mod cluster;
pub mod config;
pub mod error;
pub mod naming;
pub mod organize;
pub mod scan;
pub mod time;
pub mod timeline;

pub use cli::Cli;
pub use cluster::{Event, cluster_events};
pub use config::{Config, ConfigError};
pub use error::{Error, Result};
pub use organize::{Organizer, OrganizeReport, RunSummary};
pub use scan::ScanReport;
pub use timeline::{MediaItem, MediaKind, build_timeline, unknown_timestamp};
