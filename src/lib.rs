// Library interface for fittrack modules
// This allows integration tests and benchmarks to access the core functionality

pub mod batch;
pub mod config;
pub mod constants;
pub mod error;
pub mod factory;
pub mod logging;
pub mod models;
pub mod report;
pub mod training;

// Re-export commonly used types for convenience
pub use models::*;
pub use training::{Running, SportsWalking, Swimming, Training, Workout};
pub use factory::{build, parse_values, read_package};
pub use report::{format_localized, format_message, render_records, MessageLocale, OutputFormat};
pub use batch::{process_batch, process_package, BatchConfig, BatchSummary, PackageOutcome};
pub use error::{TrackerError, Result};
pub use logging::{LogConfig, LogLevel, LogFormat};
