//! Rendering of workout summaries
//!
//! The one-line text message is the primary output; JSON and table renderings
//! serve the batch driver.

use serde::{Deserialize, Serialize};
use std::fmt;
use tabled::{settings::Style, Table, Tabled};

use crate::error::{Result, TrackerError};
use crate::models::WorkoutRecord;

/// Language of the summary message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLocale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ru")]
    Russian,
}

impl std::str::FromStr for MessageLocale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(MessageLocale::English),
            "ru" | "russian" => Ok(MessageLocale::Russian),
            _ => Err(format!("Invalid locale: {}", s)),
        }
    }
}

/// Output rendering for a list of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One summary message per line
    #[default]
    Text,
    /// JSON array of records
    Json,
    /// Terminal table
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

/// Render the summary message in English
pub fn format_message(record: &WorkoutRecord) -> String {
    format_localized(record, MessageLocale::English)
}

/// Render the summary message in the given locale
pub fn format_localized(record: &WorkoutRecord, locale: MessageLocale) -> String {
    match locale {
        MessageLocale::English => format!(
            "Training type: {}; Duration: {:.3} h.; Distance: {:.3} km; \
             Avg. speed: {:.3} km/h; Calories burned: {:.3}.",
            record.training_type, record.duration, record.distance, record.speed, record.calories
        ),
        MessageLocale::Russian => format!(
            "Тип тренировки: {}; Длительность: {:.3} ч.; Дистанция: {:.3} км; \
             Ср. скорость: {:.3} км/ч; Потрачено ккал: {:.3}.",
            record.training_type, record.duration, record.distance, record.speed, record.calories
        ),
    }
}

impl fmt::Display for WorkoutRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_message(self))
    }
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Training type")]
    training_type: String,
    #[tabled(rename = "Duration (h)")]
    duration: String,
    #[tabled(rename = "Distance (km)")]
    distance: String,
    #[tabled(rename = "Avg. speed (km/h)")]
    speed: String,
    #[tabled(rename = "Calories (kcal)")]
    calories: String,
}

impl From<&WorkoutRecord> for RecordRow {
    fn from(record: &WorkoutRecord) -> Self {
        Self {
            training_type: record.training_type.clone(),
            duration: format!("{:.3}", record.duration),
            distance: format!("{:.3}", record.distance),
            speed: format!("{:.3}", record.speed),
            calories: format!("{:.3}", record.calories),
        }
    }
}

/// Render a list of records in the requested format
pub fn render_records(
    records: &[WorkoutRecord],
    format: OutputFormat,
    locale: MessageLocale,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(records
            .iter()
            .map(|record| format_localized(record, locale))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            serde_json::to_string_pretty(records).map_err(|e| TrackerError::Parse {
                format: "json".to_string(),
                reason: e.to_string(),
            })
        }
        OutputFormat::Table => {
            let mut table = Table::new(records.iter().map(RecordRow::from));
            table.with(Style::rounded());
            Ok(table.to_string())
        }
    }
}
