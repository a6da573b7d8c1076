//! Fixed coefficients of the workout formulas
//!
//! Values are part of the output contract: changing any of them changes the
//! printed summaries.

/// Unit conversions shared by every workout
pub mod units {
    /// Meters in one kilometer
    pub const M_IN_KM: f64 = 1000.0;

    /// Minutes in one hour
    pub const MIN_IN_H: f64 = 60.0;

    /// Centimeters in one meter
    pub const CM_IN_M: f64 = 100.0;

    /// km/h to m/s conversion factor, truncated to three places
    pub const KMH_IN_MSEC: f64 = 0.278;
}

/// Stride lengths in meters
pub mod step {
    /// One step for running and walking
    pub const LEN_STEP: f64 = 0.65;

    /// One stroke in the pool
    pub const SWIM_LEN_STEP: f64 = 1.38;
}

/// Running calorie model
pub mod running {
    pub const CALORIES_MEAN_SPEED_MULTIPLIER: f64 = 18.0;
    pub const CALORIES_MEAN_SPEED_SHIFT: f64 = 1.79;
}

/// Sports walking calorie model
pub mod walking {
    pub const CALORIES_WEIGHT_MULTIPLIER: f64 = 0.035;
    pub const CALORIES_SPEED_HEIGHT_MULTIPLIER: f64 = 0.029;
}

/// Swimming calorie model
pub mod swimming {
    pub const CALORIES_SPEED_SHIFT: f64 = 1.1;
    pub const CALORIES_WEIGHT_MULTIPLIER: f64 = 2.0;
}
