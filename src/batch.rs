//! Batch processing of sensor packages
//!
//! Each package is computed independently. Parallel runs use rayon; the
//! outcome list always follows the input order.

use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, warn, Level};

use crate::error::{Result, TrackerError};
use crate::factory::{build, parse_values};
use crate::models::{Package, WorkoutRecord};
use crate::training::Training;

/// Configuration for batch runs
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Process packages on the rayon thread pool
    pub parallel: bool,
    /// Number of threads for parallel processing
    pub num_threads: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            num_threads: None, // Use rayon default (number of CPUs)
        }
    }
}

/// Result of computing one package
#[derive(Debug)]
pub struct PackageOutcome {
    /// Position of the package in the input
    pub index: usize,
    pub workout_type: String,
    pub result: Result<WorkoutRecord>,
}

impl PackageOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Summary of a batch run
#[derive(Debug)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub duration_ms: u128,
    /// Per-package outcomes in input order
    pub outcomes: Vec<PackageOutcome>,
}

impl BatchSummary {
    /// Records of the successful packages, in input order
    pub fn records(&self) -> Vec<&WorkoutRecord> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .collect()
    }

    /// Failed packages with their errors
    pub fn errors(&self) -> Vec<(usize, &TrackerError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.index, e)))
            .collect()
    }

    pub fn is_fully_successful(&self) -> bool {
        self.failed == 0
    }
}

/// Compute one package end to end
pub fn process_package(package: &Package) -> Result<WorkoutRecord> {
    build(package)?.summarize()
}

/// Compute every package, keeping input order
pub fn process_batch(packages: &[Package], config: &BatchConfig) -> Result<BatchSummary> {
    let start = Instant::now();

    let outcome_for = |(index, package): (usize, &Package)| PackageOutcome {
        index,
        workout_type: package.workout_type.clone(),
        result: process_package(package),
    };

    let outcomes: Vec<PackageOutcome> = if config.parallel {
        match config.num_threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| TrackerError::Configuration(e.to_string()))?;
                pool.install(|| packages.par_iter().enumerate().map(outcome_for).collect())
            }
            None => packages.par_iter().enumerate().map(outcome_for).collect(),
        }
    } else {
        packages.iter().enumerate().map(outcome_for).collect()
    };

    for outcome in &outcomes {
        if let Err(e) = &outcome.result {
            log_rejection(outcome.index, &outcome.workout_type, e);
        }
    }

    let successful = outcomes.iter().filter(|o| o.is_success()).count();
    let summary = BatchSummary {
        total: outcomes.len(),
        successful,
        failed: outcomes.len() - successful,
        duration_ms: start.elapsed().as_millis(),
        outcomes,
    };

    info!(
        total = summary.total,
        successful = summary.successful,
        failed = summary.failed,
        duration_ms = summary.duration_ms as u64,
        parallel = config.parallel,
        "Batch processed"
    );

    Ok(summary)
}

fn log_rejection(index: usize, workout_type: &str, error: &TrackerError) {
    if error.severity().to_tracing_level() == Level::ERROR {
        error!(index, workout_type, error = %error, "Package failed");
    } else {
        warn!(index, workout_type, error = %error, "Package rejected");
    }
}

/// Load packages from a JSON or CSV file, chosen by extension
///
/// Decoding is all-or-nothing: a malformed row or a non-numeric CSV value
/// rejects the whole file, so a batch never runs on a silently shortened
/// input. Per-package isolation applies once packages are decoded, in
/// [`process_batch`].
pub fn load_packages<P: AsRef<Path>>(path: P) -> Result<Vec<Package>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("json") => {
            let content = std::fs::read_to_string(path)?;
            parse_json_packages(&content)
        }
        Some("csv") => {
            let content = std::fs::read_to_string(path)?;
            parse_csv_packages(&content)
        }
        other => Err(TrackerError::Parse {
            format: other.unwrap_or("none").to_string(),
            reason: format!("unsupported package file: {}", path.display()),
        }),
    }
}

/// Parse a JSON array of packages
pub fn parse_json_packages(content: &str) -> Result<Vec<Package>> {
    serde_json::from_str(content).map_err(|e| TrackerError::Parse {
        format: "json".to_string(),
        reason: e.to_string(),
    })
}

/// Parse CSV rows of the form `CODE,value,value,...`
///
/// Fails on the first row that cannot be decoded.
pub fn parse_csv_packages(content: &str) -> Result<Vec<Package>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(content.as_bytes());

    let mut packages = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row.map_err(|e| TrackerError::Parse {
            format: "csv".to_string(),
            reason: e.to_string(),
        })?;

        let mut fields = row.iter();
        let code = match fields.next() {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => {
                return Err(TrackerError::Parse {
                    format: "csv".to_string(),
                    reason: format!("row {} has no workout type", line + 1),
                })
            }
        };
        let raw: Vec<&str> = fields.collect();
        let data = parse_values(&code, &raw)?;
        packages.push(Package::new(code, data));
    }

    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_packages;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_sample_batch() {
        let summary = process_batch(&sample_packages(), &BatchConfig::default()).unwrap();

        assert_eq!(summary.total, 3);
        assert!(summary.is_fully_successful());

        let types: Vec<_> = summary
            .records()
            .iter()
            .map(|r| r.training_type.clone())
            .collect();
        assert_eq!(types, vec!["Swimming", "Running", "SportsWalking"]);
    }

    #[test]
    fn test_failures_do_not_stop_batch() {
        let packages = vec![
            Package::new("RUN", vec![15000.0, 1.0, 75.0]),
            Package::new("XYZ", vec![1.0, 2.0, 3.0]),
            Package::new("RUN", vec![15000.0, 0.0, 75.0]),
            Package::new("SWM", vec![720.0, 1.0, 80.0, 25.0, 40.0]),
        ];

        let summary = process_batch(&packages, &BatchConfig::default()).unwrap();
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.failed, 2);

        let errors = summary.errors();
        assert_eq!(errors[0].0, 1);
        assert!(matches!(errors[0].1, TrackerError::UnknownWorkoutType { .. }));
        assert_eq!(errors[1].0, 2);
        assert!(matches!(errors[1].1, TrackerError::DivisionByZero { .. }));
    }

    #[test]
    fn test_parallel_preserves_order() {
        let packages: Vec<Package> = (1..=200)
            .map(|i| Package::new("RUN", vec![i as f64 * 100.0, 1.0, 70.0]))
            .collect();

        let sequential = process_batch(&packages, &BatchConfig::default()).unwrap();
        let parallel = process_batch(
            &packages,
            &BatchConfig {
                parallel: true,
                num_threads: Some(4),
            },
        )
        .unwrap();

        assert_eq!(sequential.records(), parallel.records());
        for (i, outcome) in parallel.outcomes.iter().enumerate() {
            assert_eq!(outcome.index, i);
        }
    }

    #[test]
    fn test_parse_csv_packages() {
        let content = "# code,values\nSWM,720,1,80,25,40\nRUN, 15000, 1, 75\nWLK,9000,1,75,180\n";
        let packages = parse_csv_packages(content).unwrap();

        assert_eq!(packages, sample_packages());
    }

    #[test]
    fn test_parse_csv_rejects_non_numeric() {
        let err = parse_csv_packages("RUN,15000,one,75\n").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidArguments { .. }));
    }

    #[test]
    fn test_load_json_file() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"workout_type":"RUN","data":[15000,1,75]}},{{"workout_type":"WLK","data":[9000,1,75,180]}}]"#
        )
        .unwrap();

        let packages = load_packages(file.path()).unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[1].workout_type, "WLK");
    }

    #[test]
    fn test_bad_csv_row_rejects_file() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "RUN,15000,1,75").unwrap();
        writeln!(file, "WLK,9000,one,75,180").unwrap();
        writeln!(file, "SWM,720,1,80,25,40").unwrap();

        let err = load_packages(file.path()).unwrap_err();
        match err {
            TrackerError::InvalidArguments { workout, reason } => {
                assert_eq!(workout, "WLK");
                assert!(reason.contains("'one'"));
            }
            other => panic!("Expected InvalidArguments, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_records_elapsed_time() {
        let summary = process_batch(&sample_packages(), &BatchConfig::default()).unwrap();
        // Three packages finish well inside a second
        assert!(summary.duration_ms < 1000);
    }

    #[test]
    fn test_load_unsupported_extension() {
        let file = Builder::new().suffix(".xml").tempfile().unwrap();
        assert!(matches!(
            load_packages(file.path()),
            Err(TrackerError::Parse { .. })
        ));
    }
}
