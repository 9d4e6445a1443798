//! Report output for a batch of sensor packages

use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::info_span;

use crate::error::{Result, TrackerError};
use crate::models::{ActivityRecord, SensorPackage};
use crate::training::{Training, Workout};

/// Report line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The fixed one-line text template
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

/// Summarize one package
pub fn summarize_package(package: &SensorPackage) -> Result<ActivityRecord> {
    let workout = Workout::try_from(package)?;
    Ok(workout.summarize())
}

/// Summarize every package in order and write one line per package.
///
/// Stops at the first package that fails; lines already written stay written.
pub fn write_report<W: Write>(
    packages: &[SensorPackage],
    format: OutputFormat,
    out: &mut W,
) -> Result<Vec<ActivityRecord>> {
    let mut records = Vec::with_capacity(packages.len());

    for (index, package) in packages.iter().enumerate() {
        let span = info_span!("package", index, workout_type = %package.workout_type);
        let _guard = span.enter();

        let record = summarize_package(package)?;
        let line = match format {
            OutputFormat::Text => record.render(),
            OutputFormat::Json => serde_json::to_string(&record)
                .map_err(|e| TrackerError::Serialization(e.to_string()))?,
        };
        writeln!(out, "{}", line)?;

        records.push(record);
    }

    tracing::info!(count = records.len(), "Report written");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_text_report_for_samples() {
        let mut out = Vec::new();
        let records =
            write_report(&SensorPackage::sample_packages(), OutputFormat::Text, &mut out).unwrap();
        assert_eq!(records.len(), 3);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Тип тренировки: Swimming; Длительность: 1.000 ч.; Дистанция: 0.994 км; Ср. скорость: 1.000 км/ч; Потрачено ккал: 336.000.",
                "Тип тренировки: Running; Длительность: 1.000 ч.; Дистанция: 9.750 км; Ср. скорость: 9.750 км/ч; Потрачено ккал: 699.750.",
                "Тип тренировки: SportsWalking; Длительность: 1.000 ч.; Дистанция: 5.850 км; Ср. скорость: 5.850 км/ч; Потрачено ккал: 157.500.",
            ]
        );
    }

    #[test]
    fn test_json_report() {
        let mut out = Vec::new();
        let packages = vec![SensorPackage::new("RUN", vec![15000.0, 1.0, 75.0])];
        write_report(&packages, OutputFormat::Json, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let record: ActivityRecord = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(record.training_type, "Running");
        assert!((record.distance - 9.75).abs() < 1e-9);
    }

    #[test]
    fn test_report_stops_at_first_failure() {
        let packages = vec![
            SensorPackage::new("RUN", vec![15000.0, 1.0, 75.0]),
            SensorPackage::new("XYZ", vec![1.0, 1.0, 1.0]),
            SensorPackage::new("WLK", vec![9000.0, 1.0, 75.0, 180.0]),
        ];
        let mut out = Vec::new();
        let result = write_report(&packages, OutputFormat::Text, &mut out);

        assert!(matches!(result, Err(TrackerError::UnknownWorkoutType { ref tag }) if tag == "XYZ"));
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Тип тренировки: Running;"));
    }
}
