//! Unified error hierarchy for fittrack
//!
//! Every failure of the construct → compute → format pipeline is reported
//! through [`TrackerError`]. Errors are terminal for the computation that
//! raised them: no partial records are produced.

use thiserror::Error;

/// Top-level error type for all fittrack operations
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Workout code not in {SWM, RUN, WLK}
    #[error("Unknown workout type: {code}")]
    UnknownWorkoutType { code: String },

    /// Argument list does not fit the selected workout constructor
    #[error("Invalid arguments for {workout}: {reason}")]
    InvalidArguments { workout: String, reason: String },

    /// A workout contract method has no implementation
    #[error("Operation not implemented: {operation}")]
    NotImplemented { operation: String },

    /// Zero divisor reached a calculation
    #[error("Division by zero in {calculation}")]
    DivisionByZero { calculation: String },

    /// Calculation result is not a finite number
    #[error("Numerical overflow in {calculation}")]
    Overflow { calculation: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Package input could not be decoded
    #[error("Parse error in {format}: {reason}")]
    Parse { format: String, reason: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for fittrack operations
pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    pub(crate) fn invalid(workout: impl Into<String>, reason: impl Into<String>) -> Self {
        TrackerError::InvalidArguments {
            workout: workout.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn division_by_zero(calculation: impl Into<String>) -> Self {
        TrackerError::DivisionByZero {
            calculation: calculation.into(),
        }
    }

    pub(crate) fn overflow(calculation: impl Into<String>) -> Self {
        TrackerError::Overflow {
            calculation: calculation.into(),
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TrackerError::UnknownWorkoutType { .. } => ErrorSeverity::Warning,
            TrackerError::InvalidArguments { .. } => ErrorSeverity::Warning,
            TrackerError::DivisionByZero { .. } => ErrorSeverity::Error,
            TrackerError::Overflow { .. } => ErrorSeverity::Error,
            TrackerError::Parse { .. } => ErrorSeverity::Error,
            TrackerError::NotImplemented { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            TrackerError::UnknownWorkoutType { code } => {
                format!(
                    "Workout type '{}' is not recognized. Use one of SWM, RUN or WLK.",
                    code
                )
            }
            TrackerError::InvalidArguments { workout, reason } => {
                format!("Sensor readings for {} are not valid: {}", workout, reason)
            }
            TrackerError::DivisionByZero { calculation } => {
                format!(
                    "Cannot compute {} for a workout with zero duration.",
                    calculation
                )
            }
            TrackerError::Overflow { calculation } => {
                format!(
                    "The {} value is out of range. Check the duration and weight readings.",
                    calculation
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Contract violation inside the library
    Critical,
    /// Error that prevents the computation
    Error,
    /// Bad input that the caller can correct
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = TrackerError::UnknownWorkoutType {
            code: "XYZ".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = TrackerError::NotImplemented {
            operation: "spent_calories".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_error_display() {
        let err = TrackerError::invalid("Running", "expected 3 values, got 2");
        assert_eq!(
            err.to_string(),
            "Invalid arguments for Running: expected 3 values, got 2"
        );

        let err = TrackerError::division_by_zero("mean speed");
        assert_eq!(err.to_string(), "Division by zero in mean speed");

        let err = TrackerError::overflow("calories");
        assert_eq!(err.to_string(), "Numerical overflow in calories");
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_user_messages() {
        let err = TrackerError::UnknownWorkoutType {
            code: "XYZ".to_string(),
        };
        assert!(err.user_message().contains("'XYZ'"));

        let err = TrackerError::division_by_zero("calories");
        assert!(err.user_message().contains("zero duration"));
    }
}
