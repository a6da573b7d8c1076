//! Workout model
//!
//! The [`Training`] trait is the computation contract shared by every workout:
//! distance, average speed, spent calories and the summary record. Each
//! variant is an independent struct; [`Workout`] is the tagged sum the
//! factory hands out and dispatches over them with an exhaustive `match`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{running, step, swimming, units, walking};
use crate::error::{Result, TrackerError};
use crate::models::{WorkoutKind, WorkoutRecord};

/// Computation contract for a single workout
pub trait Training {
    /// Variant tag
    fn kind(&self) -> WorkoutKind;

    /// Steps or strokes recorded by the sensor
    fn action(&self) -> u64;

    /// Duration in hours
    fn duration(&self) -> f64;

    /// Body weight in kg
    fn weight(&self) -> f64;

    /// Length of one step or stroke in meters
    fn step_length(&self) -> f64 {
        step::LEN_STEP
    }

    /// Distance in km
    fn distance(&self) -> f64 {
        self.action() as f64 * self.step_length() / units::M_IN_KM
    }

    /// Average speed in km/h
    fn mean_speed(&self) -> Result<f64> {
        per_hour(self.distance(), self.duration(), "mean speed")
    }

    /// Energy spent in kcal
    fn spent_calories(&self) -> Result<f64>;

    /// Build the summary record for this workout
    fn summarize(&self) -> Result<WorkoutRecord> {
        let record = WorkoutRecord {
            training_type: self.kind().display_name().to_string(),
            duration: self.duration(),
            distance: self.distance(),
            speed: self.mean_speed()?,
            calories: self.spent_calories()?,
        };

        debug!(
            training_type = %record.training_type,
            distance = record.distance,
            speed = record.speed,
            calories = record.calories,
            "Workout summarized"
        );

        Ok(record)
    }
}

/// Divide by a duration in hours, reporting a zero duration as an error
fn per_hour(amount: f64, duration: f64, calculation: &str) -> Result<f64> {
    if duration == 0.0 {
        return Err(TrackerError::division_by_zero(calculation));
    }
    finite(amount / duration, calculation)
}

/// Reject infinite or NaN results
fn finite(value: f64, calculation: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TrackerError::overflow(calculation))
    }
}

fn duration_in_minutes(duration: f64) -> f64 {
    duration * units::MIN_IN_H
}

fn check_common(kind: WorkoutKind, duration: f64, weight: f64) -> Result<()> {
    // Zero duration is accepted here and reported by the computations.
    check_value(kind, "duration", duration, |v| v >= 0.0, "must not be negative")?;
    check_value(kind, "weight", weight, |v| v > 0.0, "must be positive")
}

fn check_value(
    kind: WorkoutKind,
    name: &str,
    value: f64,
    in_range: impl Fn(f64) -> bool,
    requirement: &str,
) -> Result<()> {
    if !value.is_finite() {
        return Err(TrackerError::invalid(
            kind.display_name(),
            format!("{} must be a finite number, got {}", name, value),
        ));
    }
    if !in_range(value) {
        return Err(TrackerError::invalid(
            kind.display_name(),
            format!("{} {}, got {}", name, requirement, value),
        ));
    }
    Ok(())
}

/// Running workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Running {
    action: u64,
    duration: f64,
    weight: f64,
}

impl Running {
    pub fn new(action: u64, duration: f64, weight: f64) -> Result<Self> {
        check_common(WorkoutKind::Running, duration, weight)?;
        Ok(Self {
            action,
            duration,
            weight,
        })
    }
}

impl Training for Running {
    fn kind(&self) -> WorkoutKind {
        WorkoutKind::Running
    }

    fn action(&self) -> u64 {
        self.action
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn spent_calories(&self) -> Result<f64> {
        let speed = self.mean_speed()?;
        let calories = (running::CALORIES_MEAN_SPEED_MULTIPLIER * speed
            + running::CALORIES_MEAN_SPEED_SHIFT)
            * self.weight
            / units::M_IN_KM
            * duration_in_minutes(self.duration);
        finite(calories, "calories")
    }
}

/// Sports walking workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportsWalking {
    action: u64,
    duration: f64,
    weight: f64,
    /// Height in cm
    height: f64,
}

impl SportsWalking {
    pub fn new(action: u64, duration: f64, weight: f64, height: f64) -> Result<Self> {
        let kind = WorkoutKind::SportsWalking;
        check_common(kind, duration, weight)?;
        check_value(kind, "height", height, |v| v > 0.0, "must be positive")?;
        Ok(Self {
            action,
            duration,
            weight,
            height,
        })
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Training for SportsWalking {
    fn kind(&self) -> WorkoutKind {
        WorkoutKind::SportsWalking
    }

    fn action(&self) -> u64 {
        self.action
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn spent_calories(&self) -> Result<f64> {
        let speed_ms = self.mean_speed()? * units::KMH_IN_MSEC;
        let height_m = self.height / units::CM_IN_M;
        let calories = (walking::CALORIES_WEIGHT_MULTIPLIER * self.weight
            + (speed_ms.powi(2) / height_m)
                * walking::CALORIES_SPEED_HEIGHT_MULTIPLIER
                * self.weight)
            * duration_in_minutes(self.duration);
        finite(calories, "calories")
    }
}

/// Pool swimming workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swimming {
    action: u64,
    duration: f64,
    weight: f64,
    /// Pool length in meters
    length_pool: f64,
    /// Pool lengths completed
    count_pool: f64,
}

impl Swimming {
    pub fn new(
        action: u64,
        duration: f64,
        weight: f64,
        length_pool: f64,
        count_pool: f64,
    ) -> Result<Self> {
        let kind = WorkoutKind::Swimming;
        check_common(kind, duration, weight)?;
        check_value(kind, "length_pool", length_pool, |v| v > 0.0, "must be positive")?;
        check_value(kind, "count_pool", count_pool, |v| v >= 0.0, "must not be negative")?;
        Ok(Self {
            action,
            duration,
            weight,
            length_pool,
            count_pool,
        })
    }

    pub fn length_pool(&self) -> f64 {
        self.length_pool
    }

    pub fn count_pool(&self) -> f64 {
        self.count_pool
    }
}

impl Training for Swimming {
    fn kind(&self) -> WorkoutKind {
        WorkoutKind::Swimming
    }

    fn action(&self) -> u64 {
        self.action
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn step_length(&self) -> f64 {
        step::SWIM_LEN_STEP
    }

    /// Speed over the pool lengths swum; strokes do not contribute.
    fn mean_speed(&self) -> Result<f64> {
        per_hour(
            self.length_pool * self.count_pool / units::M_IN_KM,
            self.duration,
            "mean speed",
        )
    }

    fn spent_calories(&self) -> Result<f64> {
        let speed = self.mean_speed()?;
        let calories = (speed + swimming::CALORIES_SPEED_SHIFT)
            * swimming::CALORIES_WEIGHT_MULTIPLIER
            * self.weight
            * self.duration;
        finite(calories, "calories")
    }
}

/// A constructed workout of any kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Workout {
    Running(Running),
    SportsWalking(SportsWalking),
    Swimming(Swimming),
}

impl Workout {
    fn as_training(&self) -> &dyn Training {
        match self {
            Workout::Running(w) => w,
            Workout::SportsWalking(w) => w,
            Workout::Swimming(w) => w,
        }
    }
}

impl Training for Workout {
    fn kind(&self) -> WorkoutKind {
        self.as_training().kind()
    }

    fn action(&self) -> u64 {
        self.as_training().action()
    }

    fn duration(&self) -> f64 {
        self.as_training().duration()
    }

    fn weight(&self) -> f64 {
        self.as_training().weight()
    }

    fn step_length(&self) -> f64 {
        self.as_training().step_length()
    }

    fn distance(&self) -> f64 {
        self.as_training().distance()
    }

    fn mean_speed(&self) -> Result<f64> {
        self.as_training().mean_speed()
    }

    fn spent_calories(&self) -> Result<f64> {
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
