//! Workout factory
//!
//! Turns a sensor package (type code plus positional values) into a validated
//! [`Workout`]. Arity is checked before any constructor runs.

use tracing::{debug, warn};

use crate::error::{Result, TrackerError};
use crate::models::{Package, WorkoutKind};
use crate::training::{Running, SportsWalking, Swimming, Workout};

/// Build a workout from a type code and its positional values
pub fn read_package(workout_type: &str, data: &[f64]) -> Result<Workout> {
    let kind = WorkoutKind::from_code(workout_type).ok_or_else(|| {
        warn!(code = workout_type, "Unknown workout type");
        TrackerError::UnknownWorkoutType {
            code: workout_type.to_string(),
        }
    })?;

    if data.len() != kind.arity() {
        return Err(TrackerError::invalid(
            kind.display_name(),
            format!(
                "expected {} values ({}), got {}",
                kind.arity(),
                kind.parameter_names().join(", "),
                data.len()
            ),
        ));
    }

    let action = action_count(kind, data[0])?;
    let workout: Workout = match kind {
        WorkoutKind::Running => Running::new(action, data[1], data[2])?.into(),
        WorkoutKind::SportsWalking => SportsWalking::new(action, data[1], data[2], data[3])?.into(),
        WorkoutKind::Swimming => {
            Swimming::new(action, data[1], data[2], data[3], data[4])?.into()
        }
    };

    debug!(code = workout_type, values = ?data, "Workout constructed");
    Ok(workout)
}

/// Build a workout from a [`Package`]
pub fn build(package: &Package) -> Result<Workout> {
    read_package(&package.workout_type, &package.data)
}

/// Parse raw textual sensor values into numbers
pub fn parse_values<S: AsRef<str>>(workout_type: &str, raw: &[S]) -> Result<Vec<f64>> {
    raw.iter()
        .map(|token| {
            let token = token.as_ref().trim();
            token.parse::<f64>().map_err(|_| {
                TrackerError::invalid(workout_type, format!("'{}' is not a number", token))
            })
        })
        .collect()
}

/// Steps and strokes are counted, so only whole non-negative values qualify
fn action_count(kind: WorkoutKind, value: f64) -> Result<u64> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(TrackerError::invalid(
            kind.display_name(),
            format!("action must be a non-negative whole number, got {}", value),
        ));
    }
    // u64::MAX rounds up to 2^64 as f64
    if value >= u64::MAX as f64 {
        return Err(TrackerError::invalid(
            kind.display_name(),
            format!("action is too large: {}", value),
        ));
    }
    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::Training;

    #[test]
    fn test_codes_map_to_variants() {
        let run = read_package("RUN", &[15000.0, 1.0, 75.0]).unwrap();
        assert!(matches!(run, Workout::Running(_)));
        assert_eq!(run.summarize().unwrap().training_type, "Running");

        let walk = read_package("WLK", &[9000.0, 1.0, 75.0, 180.0]).unwrap();
        assert!(matches!(walk, Workout::SportsWalking(_)));
        assert_eq!(walk.summarize().unwrap().training_type, "SportsWalking");

        let swim = read_package("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0]).unwrap();
        assert!(matches!(swim, Workout::Swimming(_)));
        assert_eq!(swim.summarize().unwrap().training_type, "Swimming");
    }

    #[test]
    fn test_unknown_code() {
        let err = read_package("XYZ", &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, TrackerError::UnknownWorkoutType { ref code } if code == "XYZ"));

        // Codes are case-sensitive
        assert!(matches!(
            read_package("run", &[15000.0, 1.0, 75.0]),
            Err(TrackerError::UnknownWorkoutType { .. })
        ));
    }

    #[test]
    fn test_arity_mismatch() {
        let err = read_package("RUN", &[15000.0, 1.0]).unwrap_err();
        match err {
            TrackerError::InvalidArguments { workout, reason } => {
                assert_eq!(workout, "Running");
                assert!(reason.contains("expected 3 values"));
                assert!(reason.contains("got 2"));
            }
            other => panic!("Expected InvalidArguments, got {:?}", other),
        }

        assert!(matches!(
            read_package("SWM", &[720.0, 1.0, 80.0, 25.0]),
            Err(TrackerError::InvalidArguments { .. })
        ));
        assert!(matches!(
            read_package("WLK", &[9000.0, 1.0, 75.0, 180.0, 1.0]),
            Err(TrackerError::InvalidArguments { .. })
        ));
    }

    #[test]
    fn test_action_must_be_whole() {
        assert!(read_package("RUN", &[150.5, 1.0, 75.0]).is_err());
        assert!(read_package("RUN", &[-1.0, 1.0, 75.0]).is_err());
        assert!(read_package("RUN", &[f64::NAN, 1.0, 75.0]).is_err());
        assert!(read_package("RUN", &[0.0, 1.0, 75.0]).is_ok());
    }

    #[test]
    fn test_action_beyond_counter_range() {
        let two_pow_64 = 18_446_744_073_709_551_616.0_f64;
        assert!(matches!(
            read_package("RUN", &[two_pow_64, 1.0, 75.0]),
            Err(TrackerError::InvalidArguments { .. })
        ));

        let largest = 9_007_199_254_740_992.0_f64; // 2^53
        let workout = read_package("RUN", &[largest, 1.0, 75.0]).unwrap();
        assert_eq!(workout.action(), 9_007_199_254_740_992);
    }

    #[test]
    fn test_out_of_range_values() {
        assert!(matches!(
            read_package("WLK", &[9000.0, 1.0, 75.0, -180.0]),
            Err(TrackerError::InvalidArguments { .. })
        ));
        assert!(matches!(
            read_package("RUN", &[15000.0, 1.0, 0.0]),
            Err(TrackerError::InvalidArguments { .. })
        ));
    }

    #[test]
    fn test_parse_values() {
        let values = parse_values("RUN", &["15000", " 1 ", "75.5"]).unwrap();
        assert_eq!(values, vec![15000.0, 1.0, 75.5]);

        let err = parse_values("RUN", &["15000", "fast", "75"]).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidArguments { .. }));
        assert!(err.to_string().contains("'fast'"));
    }

    #[test]
    fn test_build_from_package() {
        let package = Package::new("SWM", vec![720.0, 1.0, 80.0, 25.0, 40.0]);
        let workout = build(&package).unwrap();
        assert_eq!(workout.kind(), WorkoutKind::Swimming);
    }
}
