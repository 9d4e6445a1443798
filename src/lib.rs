//! Workout summaries from raw sensor packages
//!
//! Distance, mean speed and calories for running, sports walking and
//! swimming, plus the report, config and logging layers the CLI is built on.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod report;
pub mod training;

// Re-export commonly used types for convenience
pub use models::*;
pub use training::{
    read_package, SportsWalking, Running, Swimming, Training, TrainingBase, Workout, WorkoutKind,
};
pub use report::{summarize_package, write_report, OutputFormat};
pub use config::AppConfig;
pub use error::{TrackerError, Result};
pub use logging::{LogConfig, LogLevel, LogFormat};
