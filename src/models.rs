use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

/// Summary of one completed workout, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Calculator name (`Running`, `SportsWalking`, `Swimming`)
    pub training_type: String,

    /// Workout duration in hours
    pub duration: f64,

    /// Distance covered in kilometres
    pub distance: f64,

    /// Mean speed in km/h
    pub speed: f64,

    /// Calories spent (kcal)
    pub calories: f64,
}

impl ActivityRecord {
    pub fn new(
        training_type: impl Into<String>,
        duration: f64,
        distance: f64,
        speed: f64,
        calories: f64,
    ) -> Self {
        Self {
            training_type: training_type.into(),
            duration,
            distance,
            speed,
            calories,
        }
    }

    /// Render the fixed one-line report
    pub fn render(&self) -> String {
        format!(
            "Тип тренировки: {}; Длительность: {:.3} ч.; Дистанция: {:.3} км; Ср. скорость: {:.3} км/ч; Потрачено ккал: {:.3}.",
            self.training_type, self.duration, self.distance, self.speed, self.calories
        )
    }
}

impl fmt::Display for ActivityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Raw sensor package: workout tag plus positional readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorPackage {
    /// Workout tag (`SWM`, `RUN`, `WLK`)
    pub workout_type: String,

    /// Positional constructor parameters for the tagged calculator
    pub data: Vec<f64>,
}

impl SensorPackage {
    pub fn new(workout_type: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            workout_type: workout_type.into(),
            data,
        }
    }

    /// The three packages shipped with the driver
    pub fn sample_packages() -> Vec<SensorPackage> {
        vec![
            SensorPackage::new("SWM", vec![720.0, 1.0, 80.0, 25.0, 40.0]),
            SensorPackage::new("RUN", vec![15000.0, 1.0, 75.0]),
            SensorPackage::new("WLK", vec![9000.0, 1.0, 75.0, 180.0]),
        ]
    }
}

/// Parses `TAG:v1,v2,...`, e.g. `RUN:15000,1,75`
impl FromStr for SensorPackage {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, values) = s.split_once(':').ok_or_else(|| TrackerError::InvalidPackage {
            workout_type: s.trim().to_string(),
            reason: "expected TAG:value,value,...".to_string(),
        })?;
        let tag = tag.trim();

        let data = values
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| {
                v.parse::<f64>().map_err(|_| TrackerError::InvalidPackage {
                    workout_type: tag.to_string(),
                    reason: format!("'{}' is not a number", v),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SensorPackage::new(tag, data))
    }
}
