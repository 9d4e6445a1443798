use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use workout_summary::logging::{init_logging, LogFormat, LogLevel};
use workout_summary::{write_report, AppConfig, OutputFormat, SensorPackage, TrackerError};

/// workout-summary - Workout Summary CLI
///
/// Turns raw sensor packages (steps or strokes, duration, weight, ...) into
/// distance, mean speed and calories for running, walking and swimming.
#[derive(Parser)]
#[command(name = "workout-summary")]
#[command(version)]
#[command(about = "Workout summary calculator", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of log output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log level (error, warn, info, debug, trace); overrides -v
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Log format on stderr (pretty, json, compact)
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<LogFormat>,

    /// Report format (text, json)
    #[arg(short = 'f', long)]
    format: Option<OutputFormat>,

    /// Sensor package as TAG:value,value,... (repeatable, e.g. RUN:15000,1,75)
    #[arg(short, long = "package", value_name = "PACKAGE")]
    packages: Vec<SensorPackage>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = match e.downcast_ref::<TrackerError>() {
                Some(tracker_error) => {
                    let level = tracker_error.severity().to_tracing_level();
                    if level == tracing::Level::ERROR {
                        tracing::error!(error = %tracker_error, "Run aborted");
                    } else {
                        tracing::warn!(error = %tracker_error, "Run aborted");
                    }
                    tracker_error.user_message()
                }
                None => format!("{:#}", e),
            };
            eprintln!("{} {}", "error:".red().bold(), message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(),
    };

    config
        .logging
        .apply_overrides(cli.verbose, cli.log_level, cli.log_format);
    init_logging(&config.logging).context("Failed to initialize logging")?;

    if !cli.packages.is_empty() {
        config.packages = cli.packages;
    }
    let format = cli.format.unwrap_or(config.output);

    tracing::info!(packages = config.packages.len(), ?format, "Summarizing sensor packages");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&config.packages, format, &mut out)?;
    out.flush()?;

    Ok(())
}
