//! Event Sorter - photo and video organization by capture bursts
//!
//! A CLI tool that groups media files into events (bursts of photos and
//! videos captured close together in time) and copies each event into a
//! uniquely named folder, routing unusually large events to a separate
//! output location.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use event_sorter::{Cli, Config, Organizer, RunSummary};
use std::path::{Path, PathBuf};
use tracing::{Level, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    if cli.print_sample_config {
        print!("{}", Config::sample_config());
        return Ok(());
    }

    // Get the executable directory for Config and Log directories
    let exe_dir = get_executable_dir()?;

    // Determine log file path
    let log_path = get_log_path(&exe_dir);

    // Setup logging
    let _guard = setup_logging(&cli, &log_path)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Event Sorter starting"
    );

    // Load configuration
    let config = load_config(&cli, &exe_dir)?;

    if cli.verbose {
        info!(?config, "Configuration loaded");
    }

    info!(log_file = %log_path.display(), "Log file location");

    // Validate configuration
    validate_config(&config)?;

    // Create and run the organizer
    let organizer = Organizer::new(config);

    match organizer.run() {
        Ok(summary) => {
            print_summary(&summary);
            info!(log_file = %log_path.display(), "Organization complete");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Organization failed");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print the human-readable run summary to the console
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!("  Media files found:   {}", summary.scan.found);
    println!("  Skipped unsupported: {}", summary.scan.skipped);
    println!("  Images:              {}", summary.scan.images);
    println!("  Videos:              {}", summary.scan.videos);
    println!("  Unknown timestamps:  {}", summary.scan.unknown);
    if !summary.scan.per_year.is_empty() {
        println!("  Media per year:");
        for (year, count) in &summary.scan.per_year {
            println!("    {}: {}", year, count);
        }
    }
    println!("  Events identified:   {}", summary.organize.events);
    println!("  Large events:        {}", summary.organize.large_events);
    println!("  Files copied:        {}", summary.organize.copied);
    if summary.organize.copy_failures > 0 {
        println!("  Copy failures:       {}", summary.organize.copy_failures);
    }
}

/// Get the directory where the executable is located
fn get_executable_dir() -> Result<PathBuf> {
    let exe_path = std::env::current_exe()?;
    Ok(exe_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Determine the log file path from a run timestamp
fn get_log_path(exe_dir: &Path) -> PathBuf {
    let log_dir = exe_dir.join("Log");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    log_dir.join(format!("Run_{}.log", timestamp))
}

/// Resolve config path - supports shorthand syntax
fn resolve_config_path(exe_dir: &Path, config_path: &Path) -> PathBuf {
    if config_path.exists() {
        return config_path.to_path_buf();
    }

    let with_extension = if config_path.extension().is_none() {
        config_path.with_extension("toml")
    } else {
        config_path.to_path_buf()
    };

    if with_extension.exists() {
        return with_extension;
    }

    let config_dir = exe_dir.join("Config");
    let filename = config_path.file_name().unwrap_or(config_path.as_os_str());

    let mut in_config_dir = config_dir.join(filename);
    if in_config_dir.extension().is_none() {
        in_config_dir = in_config_dir.with_extension("toml");
    }

    if in_config_dir.exists() {
        return in_config_dir;
    }

    config_path.to_path_buf()
}

/// Load configuration from file or CLI arguments
fn load_config(cli: &Cli, exe_dir: &Path) -> Result<Config> {
    let config = if let Some(ref config_path) = cli.config {
        let resolved_path = resolve_config_path(exe_dir, config_path);
        info!(config_file = %resolved_path.display(), "Loading configuration from file");
        let file_config = Config::load_from_file(&resolved_path)?;
        cli.merge_with_config(file_config)
    } else {
        cli.to_config()
    };

    if config.input_folders.is_empty() {
        anyhow::bail!("No input folders specified (use --input or a config file)");
    }

    Ok(config)
}

/// Setup logging (file + console)
fn setup_logging(cli: &Cli, log_path: &Path) -> Result<Option<WorkerGuard>> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if cli.json_log {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(Some(guard))
}

/// Validate configuration before processing
fn validate_config(config: &Config) -> Result<()> {
    for input_dir in &config.input_folders {
        if !input_dir.exists() {
            eprintln!("Warning: input folder does not exist: {}", input_dir.display());
        }
    }

    for input_dir in &config.input_folders {
        if config.event_output_folder.starts_with(input_dir) {
            anyhow::bail!(
                "Output folder {} is inside input folder {}",
                config.event_output_folder.display(),
                input_dir.display()
            );
        }
        if config.large_output_root().starts_with(input_dir) {
            anyhow::bail!(
                "Large event output folder {} is inside input folder {}",
                config.large_output_root().display(),
                input_dir.display()
            );
        }
    }

    Ok(())
}
