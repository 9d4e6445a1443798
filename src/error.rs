//! Error hierarchy for workout summaries
//!
//! Construction of a calculator is the only fallible step: formulas themselves
//! never fail and propagate `inf`/`NaN` for degenerate inputs instead.

use thiserror::Error;

use crate::training::AVAILABLE_WORKOUT_TYPES;

/// Top-level error type for all workout-summary operations
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Sensor package carries a tag with no matching calculator
    #[error("Unknown workout type: {tag}. Available workout types: {}", AVAILABLE_WORKOUT_TYPES.join(", "))]
    UnknownWorkoutType { tag: String },

    /// Sensor package parameters do not fit the calculator's constructor
    #[error("Invalid {workout_type} package: {reason}")]
    InvalidPackage { workout_type: String, reason: String },

    /// Report serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for workout-summary operations
pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TrackerError::UnknownWorkoutType { .. } => ErrorSeverity::Error,
            TrackerError::InvalidPackage { .. } => ErrorSeverity::Error,
            TrackerError::Serialization(_) => ErrorSeverity::Critical,
            TrackerError::Io(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            TrackerError::UnknownWorkoutType { tag } => {
                format!(
                    "Sensor package has unknown workout type '{}'. Use one of: {}.",
                    tag,
                    AVAILABLE_WORKOUT_TYPES.join(", ")
                )
            }
            TrackerError::InvalidPackage { workout_type, reason } => {
                format!("Could not read {} sensor package: {}", workout_type, reason)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents the whole run
    Critical,
    /// Error that aborts the current package
    Error,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::WARN,
        }
    }
}
