//! CLI argument parsing with clap

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Event Sorter - photo and video organization by capture bursts
///
/// Scans input folders, derives a capture timestamp for every photo and
/// video (EXIF metadata for images, filename patterns for videos), groups
/// files captured close together on the same day into events, and copies
/// each event into a uniquely named destination folder.
#[derive(Parser, Debug)]
#[command(name = "event-sorter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file (TOML format)
    ///
    /// When specified, settings from the config file are used as defaults.
    /// CLI arguments will override config file settings.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Input directories to scan for media files
    #[arg(short, long, num_args = 1..)]
    pub input: Option<Vec<PathBuf>>,

    /// Output directory for event folders
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory for large events (defaults to the normal output)
    #[arg(short = 'L', long)]
    pub large_output: Option<PathBuf>,

    /// Events with more files than this go to the large output
    #[arg(long)]
    pub large_threshold: Option<usize>,

    /// Maximum gap between items of the same event, in minutes
    #[arg(short = 'g', long)]
    pub gap_minutes: Option<i64>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output log format as JSON
    #[arg(long)]
    pub json_log: bool,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub print_sample_config: bool,
}

impl Cli {
    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(ref inputs) = self.input {
            config.input_folders = inputs.clone();
        }
        if let Some(ref output) = self.output {
            config.event_output_folder = output.clone();
        }
        if let Some(ref large_output) = self.large_output {
            config.large_event_output_folder = Some(large_output.clone());
        }
        if let Some(threshold) = self.large_threshold {
            config.large_event_threshold = threshold;
        }
        if let Some(minutes) = self.gap_minutes {
            config.event_time_threshold_minutes = minutes;
        }
        if self.verbose {
            config.verbose = true;
        }

        config
    }

    /// Convert CLI arguments to Config (when no config file is used)
    pub fn to_config(&self) -> Config {
        self.merge_with_config(Config::default())
    }
}
