use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;

use fittrack::batch::{load_packages, process_batch, BatchConfig, BatchSummary};
use fittrack::config::AppConfig;
use fittrack::logging::{init_logging, LogLevel};
use fittrack::{
    parse_values, read_package, render_records, sample_packages, MessageLocale, OutputFormat,
    Training, TrackerError,
};

/// fittrack - Fitness tracker CLI
///
/// Computes distance, average speed and spent calories from raw sensor
/// packages for running, sports walking and swimming workouts.
#[derive(Parser)]
#[command(name = "fittrack")]
#[command(version = "0.1.0")]
#[command(about = "Fitness tracker workout summaries", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Message language (en, ru)
    #[arg(long, global = true)]
    locale: Option<MessageLocale>,

    /// Output format (text, json, table)
    #[arg(short = 'f', long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the built-in sample packages
    Demo,

    /// Summarize a single sensor package
    Calc {
        /// Workout type code (SWM, RUN, WLK)
        #[arg(short = 't', long = "type")]
        workout_type: String,

        /// Comma-separated sensor values, e.g. 15000,1,75
        #[arg(short, long, required = true, value_delimiter = ',', num_args = 1.., allow_hyphen_values = true)]
        data: Vec<String>,
    },

    /// Summarize packages read from a JSON or CSV file
    Batch {
        /// Input file path
        #[arg(long)]
        file: PathBuf,

        /// Process packages in parallel
        #[arg(short, long)]
        parallel: bool,
    },

    /// Show or initialize configuration
    Config {
        /// Print the effective configuration
        #[arg(short, long)]
        show: bool,

        /// Write a default configuration file
        #[arg(short, long)]
        init: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(),
    };

    if cli.verbose > 0 {
        config.logging.level = LogLevel::from_verbosity(cli.verbose);
    }
    if let Some(locale) = cli.locale {
        config.output.locale = locale;
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    init_logging(&config.logging).context("Failed to initialize logging")?;

    match cli.command {
        Commands::Demo => {
            let summary = process_batch(&sample_packages(), &config.batch.to_batch_config())?;
            print_summary(&summary, &config)
        }

        Commands::Calc { workout_type, data } => {
            let outcome = parse_values(&workout_type, &data)
                .and_then(|values| read_package(&workout_type, &values))
                .and_then(|workout| workout.summarize());

            match outcome {
                Ok(record) => {
                    let output =
                        render_records(&[record], config.output.format, config.output.locale)?;
                    println!("{}", output);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    report_error(&e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        Commands::Batch { file, parallel } => {
            let packages = load_packages(&file)
                .with_context(|| format!("Failed to load packages from {}", file.display()))?;

            let mut batch_config: BatchConfig = config.batch.to_batch_config();
            batch_config.parallel |= parallel;

            let summary = process_batch(&packages, &batch_config)?;
            print_summary(&summary, &config)
        }

        Commands::Config { show, init } => {
            if init {
                let path = cli
                    .config
                    .clone()
                    .unwrap_or_else(AppConfig::default_config_path);
                config.save_to_file(&path)?;
                println!(
                    "{}",
                    format!("✓ Configuration written to {}", path.display()).green()
                );
            }
            if show || !init {
                println!("{}", config.to_toml()?);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_summary(summary: &BatchSummary, config: &AppConfig) -> Result<ExitCode> {
    let records: Vec<_> = summary.records().into_iter().cloned().collect();
    if !records.is_empty() {
        println!(
            "{}",
            render_records(&records, config.output.format, config.output.locale)?
        );
    }

    for (index, error) in summary.errors() {
        eprint!("{} ", format!("Package #{}:", index + 1).dimmed());
        report_error(error);
    }

    Ok(if summary.is_fully_successful() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn report_error(error: &TrackerError) {
    tracing::debug!(severity = ?error.severity(), error = %error, "Computation failed");
    eprintln!("{}", error.user_message().red());
}
