//! Workout calculators
//!
//! Every supported workout shares the distance and mean-speed formulas of the
//! [`Training`] trait and supplies its own calorie formula. Swimming also
//! replaces mean speed with a pool-based figure.
//!
//! Calculators are built from raw sensor packages by [`read_package`], which
//! returns the [`Workout`] sum type so callers never handle a bare trait
//! object.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{Result, TrackerError};
use crate::models::{ActivityRecord, SensorPackage};

/// Step length for running and walking (metres per step)
pub const LEN_STEP: f64 = 0.65;
/// Stroke length for swimming (metres per stroke)
pub const LEN_STROKE: f64 = 1.38;
pub const M_IN_KM: f64 = 1000.0;
pub const MIN_IN_HR: f64 = 60.0;

/// Tags accepted by [`read_package`]
pub const AVAILABLE_WORKOUT_TYPES: [&str; 3] = ["SWM", "RUN", "WLK"];

const RUN_SPEED_MULTIPLIER: f64 = 18.0;
const RUN_SPEED_SHIFT: f64 = 20.0;

const WALK_WEIGHT_MULTIPLIER: f64 = 0.035;
const WALK_SPEED_HEIGHT_MULTIPLIER: f64 = 0.029;

const SWIM_SPEED_SHIFT: f64 = 1.1;
const SWIM_WEIGHT_MULTIPLIER: f64 = 2.0;

/// Readings common to every workout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingBase {
    /// Steps (running, walking) or strokes (swimming)
    pub action: f64,
    pub duration_hrs: f64,
    pub weight_kg: f64,
}

impl TrainingBase {
    pub fn new(action: f64, duration_hrs: f64, weight_kg: f64) -> Self {
        Self {
            action,
            duration_hrs,
            weight_kg,
        }
    }
}

/// Shared workout formulas
///
/// `spent_calories` has no shared definition; every implementor provides it.
pub trait Training {
    /// Calculator name shown in reports
    fn name(&self) -> &'static str;

    fn base(&self) -> &TrainingBase;

    /// Distance covered by one step or stroke, in metres
    fn len_step(&self) -> f64 {
        LEN_STEP
    }

    /// Distance in kilometres
    fn distance_km(&self) -> f64 {
        self.base().action * self.len_step() / M_IN_KM
    }

    /// Mean speed in km/h
    fn mean_speed_kmh(&self) -> f64 {
        self.distance_km() / self.base().duration_hrs
    }

    /// Calories spent, in kcal
    fn spent_calories(&self) -> f64;

    /// Build the activity record for this workout
    fn summarize(&self) -> ActivityRecord {
        let record = ActivityRecord::new(
            self.name(),
            self.base().duration_hrs,
            self.distance_km(),
            self.mean_speed_kmh(),
            self.spent_calories(),
        );

        debug!(
            training_type = %record.training_type,
            distance = record.distance,
            speed = record.speed,
            calories = record.calories,
            "Workout summarized"
        );

        record
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Running {
    pub base: TrainingBase,
}

impl Running {
    pub fn new(action: f64, duration_hrs: f64, weight_kg: f64) -> Self {
        Self {
            base: TrainingBase::new(action, duration_hrs, weight_kg),
        }
    }
}

impl Training for Running {
    fn name(&self) -> &'static str {
        "Running"
    }

    fn base(&self) -> &TrainingBase {
        &self.base
    }

    fn spent_calories(&self) -> f64 {
        (RUN_SPEED_MULTIPLIER * self.mean_speed_kmh() - RUN_SPEED_SHIFT) * self.base.weight_kg
            / M_IN_KM
            * self.base.duration_hrs
            * MIN_IN_HR
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SportsWalking {
    pub base: TrainingBase,
    pub height_cm: f64,
}

impl SportsWalking {
    pub fn new(action: f64, duration_hrs: f64, weight_kg: f64, height_cm: f64) -> Self {
        Self {
            base: TrainingBase::new(action, duration_hrs, weight_kg),
            height_cm,
        }
    }
}

impl Training for SportsWalking {
    fn name(&self) -> &'static str {
        "SportsWalking"
    }

    fn base(&self) -> &TrainingBase {
        &self.base
    }

    /// The speed²/height ratio is floor-divided, so for realistic walking
    /// speeds the speed term contributes nothing.
    fn spent_calories(&self) -> f64 {
        let weight = self.base.weight_kg;
        (WALK_WEIGHT_MULTIPLIER * weight
            + floor_div(self.mean_speed_kmh().powi(2), self.height_cm)
                * WALK_SPEED_HEIGHT_MULTIPLIER
                * weight)
            * (self.base.duration_hrs * MIN_IN_HR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swimming {
    pub base: TrainingBase,
    pub length_pool_m: f64,
    pub count_pool: f64,
}

impl Swimming {
    pub fn new(
        action: f64,
        duration_hrs: f64,
        weight_kg: f64,
        length_pool_m: f64,
        count_pool: f64,
    ) -> Self {
        Self {
            base: TrainingBase::new(action, duration_hrs, weight_kg),
            length_pool_m,
            count_pool,
        }
    }
}

impl Training for Swimming {
    fn name(&self) -> &'static str {
        "Swimming"
    }

    fn base(&self) -> &TrainingBase {
        &self.base
    }

    fn len_step(&self) -> f64 {
        LEN_STROKE
    }

    /// Pool length times laps; the stroke count is not used here.
    fn mean_speed_kmh(&self) -> f64 {
        self.length_pool_m * self.count_pool / M_IN_KM / self.base.duration_hrs
    }

    fn spent_calories(&self) -> f64 {
        (self.mean_speed_kmh() + SWIM_SPEED_SHIFT) * SWIM_WEIGHT_MULTIPLIER * self.base.weight_kg
    }
}

/// Floor division of two floats, derived from the `fmod` remainder.
///
/// `floor(a / b)` rounds the quotient before flooring, so `1.0 / 0.1`
/// floors to 10; here the remainder keeps it at 9. A zero result carries the
/// sign of `a / b`. A zero divisor yields `inf`/`NaN` rather than an error.
pub fn floor_div(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        return a / b;
    }

    let rem = a % b;
    let mut div = (a - rem) / b;
    if rem != 0.0 && (b < 0.0) != (rem < 0.0) {
        div -= 1.0;
    }

    if div == 0.0 {
        return 0.0_f64.copysign(a / b);
    }

    let floored = div.floor();
    if div - floored > 0.5 {
        floored + 1.0
    } else {
        floored
    }
}

/// Workout tags recognised in sensor packages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkoutKind {
    Swimming,
    Running,
    SportsWalking,
}

impl WorkoutKind {
    /// Sensor package tag
    pub fn tag(&self) -> &'static str {
        match self {
            WorkoutKind::Swimming => "SWM",
            WorkoutKind::Running => "RUN",
            WorkoutKind::SportsWalking => "WLK",
        }
    }

    /// Number of positional values the calculator takes
    pub fn arity(&self) -> usize {
        match self {
            WorkoutKind::Running => 3,
            WorkoutKind::SportsWalking => 4,
            WorkoutKind::Swimming => 5,
        }
    }
}

impl FromStr for WorkoutKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "SWM" => Ok(WorkoutKind::Swimming),
            "RUN" => Ok(WorkoutKind::Running),
            "WLK" => Ok(WorkoutKind::SportsWalking),
            _ => Err(TrackerError::UnknownWorkoutType { tag: s.to_string() }),
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Any supported workout calculator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Workout {
    Running(Running),
    SportsWalking(SportsWalking),
    Swimming(Swimming),
}

impl Workout {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            Workout::Running(_) => WorkoutKind::Running,
            Workout::SportsWalking(_) => WorkoutKind::SportsWalking,
            Workout::Swimming(_) => WorkoutKind::Swimming,
        }
    }

    fn as_training(&self) -> &dyn Training {
        match self {
            Workout::Running(w) => w,
            Workout::SportsWalking(w) => w,
            Workout::Swimming(w) => w,
        }
    }
}

impl Training for Workout {
    fn name(&self) -> &'static str {
        self.as_training().name()
    }

    fn base(&self) -> &TrainingBase {
        self.as_training().base()
    }

    fn len_step(&self) -> f64 {
        self.as_training().len_step()
    }

    fn distance_km(&self) -> f64 {
        self.as_training().distance_km()
    }

    fn mean_speed_kmh(&self) -> f64 {
        self.as_training().mean_speed_kmh()
    }

    fn spent_calories(&self) -> f64 {
        self.as_training().spent_calories()
    }
}

impl From<Running> for Workout {
    fn from(w: Running) -> Self {
        Workout::Running(w)
    }
}

impl From<SportsWalking> for Workout {
    fn from(w: SportsWalking) -> Self {
        Workout::SportsWalking(w)
    }
}

impl From<Swimming> for Workout {
    fn from(w: Swimming) -> Self {
        Workout::Swimming(w)
    }
}

/// Build the calculator for a sensor package
///
/// `data` is applied positionally:
/// - `RUN`: action, duration (h), weight (kg)
/// - `WLK`: action, duration (h), weight (kg), height (cm)
/// - `SWM`: action, duration (h), weight (kg), pool length (m), pool laps
pub fn read_package(workout_type: &str, data: &[f64]) -> Result<Workout> {
    let kind = workout_type.parse::<WorkoutKind>().map_err(|e| {
        warn!(workout_type, "Unknown workout type");
        e
    })?;

    if data.len() != kind.arity() {
        return Err(TrackerError::InvalidPackage {
            workout_type: kind.tag().to_string(),
            reason: format!("expected {} values, got {}", kind.arity(), data.len()),
        });
    }

    debug!(workout_type = kind.tag(), ?data, "Reading sensor package");

    let workout: Workout = match kind {
        WorkoutKind::Running => Running::new(data[0], data[1], data[2]).into(),
        WorkoutKind::SportsWalking => SportsWalking::new(data[0], data[1], data[2], data[3]).into(),
        WorkoutKind::Swimming => Swimming::new(data[0], data[1], data[2], data[3], data[4]).into(),
    };

    Ok(workout)
}

impl TryFrom<&SensorPackage> for Workout {
    type Error = TrackerError;

    fn try_from(package: &SensorPackage) -> Result<Self> {
        read_package(&package.workout_type, &package.data)
    }
}
