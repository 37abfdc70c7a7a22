//! Configuration types for the event sorter

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the event sorter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input directories to scan for media files
    pub input_folders: Vec<PathBuf>,

    /// Output directory for event folders
    pub event_output_folder: PathBuf,

    /// Output directory for large events (defaults to event_output_folder)
    #[serde(default)]
    pub large_event_output_folder: Option<PathBuf>,

    /// Events with more files than this are routed to the large output
    #[serde(default = "default_large_event_threshold")]
    pub large_event_threshold: usize,

    /// Maximum gap between consecutive items of the same event, in minutes
    #[serde(default = "default_event_time_threshold_minutes")]
    pub event_time_threshold_minutes: i64,

    /// Supported image extensions
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,

    /// Supported video extensions
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,

    /// Verbose output
    #[serde(default)]
    pub verbose: bool,
}

fn default_large_event_threshold() -> usize {
    20
}

fn default_event_time_threshold_minutes() -> i64 {
    45
}

fn default_image_extensions() -> Vec<String> {
    vec!["jpg".into(), "jpeg".into(), "png".into()]
}

fn default_video_extensions() -> Vec<String> {
    vec!["mp4".into(), "mov".into(), "avi".into(), "mkv".into()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_folders: vec![],
            event_output_folder: PathBuf::from("events"),
            large_event_output_folder: None,
            large_event_threshold: default_large_event_threshold(),
            event_time_threshold_minutes: default_event_time_threshold_minutes(),
            image_extensions: default_image_extensions(),
            video_extensions: default_video_extensions(),
            verbose: false,
        }
    }
}

impl Config {
    /// Check if a file extension is a supported image format
    pub fn is_image(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.image_extensions.iter().any(|e| e == &ext_lower)
    }

    /// Check if a file extension is a supported video format
    pub fn is_video(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.video_extensions.iter().any(|e| e == &ext_lower)
    }

    /// Check if a file extension is supported
    pub fn is_supported(&self, ext: &str) -> bool {
        self.is_image(ext) || self.is_video(ext)
    }

    /// Maximum gap between consecutive items of the same event
    pub fn gap_threshold(&self) -> Duration {
        Duration::minutes(self.event_time_threshold_minutes)
    }

    /// Output root for large events, falling back to the normal output root
    pub fn large_output_root(&self) -> &Path {
        self.large_event_output_folder
            .as_deref()
            .unwrap_or(&self.event_output_folder)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError { source: e })?;

        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# Event Sorter Configuration File
# This file uses TOML format (https://toml.io)

# Input directories to scan for media files
# Can specify multiple directories
input_folders = [
    "D:/Photos/Phone Backup",
    "D:/Photos/Camera Card",
]

# Output directory for event folders
event_output_folder = "D:/Photos/Sorted"

# Output directory for large events
# Defaults to event_output_folder when omitted
large_event_output_folder = "D:/Photos/Sorted_Large"

# Events with more files than this are routed to the large output
# and annotated with their file count
large_event_threshold = 20

# Maximum gap between consecutive items of the same event, in minutes
# Items further apart (or on different calendar days) start a new event
event_time_threshold_minutes = 45

# Verbose output - show detailed processing information
verbose = false

# Supported file extensions (customize as needed)
image_extensions = ["jpg", "jpeg", "png"]
video_extensions = ["mp4", "mov", "avi", "mkv"]
"#
        .to_string()
    }
}

/// Errors that can occur when loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to write configuration file
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to serialize configuration
    SerializeError { source: toml::ser::Error },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
            ConfigError::WriteError { path, source } => {
                write!(f, "Failed to write config file '{}': {}", path.display(), source)
            }
            ConfigError::SerializeError { source } => {
                write!(f, "Failed to serialize config: {}", source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::WriteError { source, .. } => Some(source),
            ConfigError::SerializeError { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.large_event_threshold, 20);
        assert_eq!(config.gap_threshold(), Duration::minutes(45));
        assert_eq!(config.large_output_root(), Path::new("events"));
    }

    #[test]
    fn test_extension_matching() {
        let config = Config::default();
        assert!(config.is_image("jpg"));
        assert!(config.is_image("JPG"));
        assert!(config.is_video("MP4"));
        assert!(!config.is_supported("txt"));
        assert!(!config.is_supported("gif"));
    }

    #[test]
    fn test_large_output_fallback() {
        let mut config = Config::default();
        config.large_event_output_folder = Some(PathBuf::from("big"));
        assert_eq!(config.large_output_root(), Path::new("big"));
    }

    #[test]
    fn test_sample_config_parses() {
        let config: Config = toml::from_str(&Config::sample_config()).unwrap();
        assert_eq!(config.input_folders.len(), 2);
        assert_eq!(config.event_time_threshold_minutes, 45);
        assert!(config.large_event_output_folder.is_some());
    }
}
