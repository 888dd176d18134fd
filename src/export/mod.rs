//! Export orchestration
//!
//! This module provides the public API for turning a day's aggregate into
//! text: apply the data-type filter, then hand the filtered aggregate and the
//! formatting profile to the serializer for the requested format.

pub mod bases;
pub mod csv;
pub mod json;
pub mod markdown;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ExportError;
use crate::filter::DataTypeSelection;
use crate::profile::FormattingProfile;
use crate::types::HealthDay;

pub use bases::BasesSerializer;
pub use csv::CsvSerializer;
pub use json::JsonSerializer;
pub use markdown::MarkdownSerializer;

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportFormat {
    Markdown,
    ObsidianBases,
    Json,
    Csv,
}

impl ExportFormat {
    /// File extension used by the persistence layer, dot included
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown | ExportFormat::ObsidianBases => ".md",
            ExportFormat::Json => ".json",
            ExportFormat::Csv => ".csv",
        }
    }

    /// Human-readable format name
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "Markdown",
            ExportFormat::ObsidianBases => "Obsidian Bases",
            ExportFormat::Json => "JSON",
            ExportFormat::Csv => "CSV",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "markdown",
            ExportFormat::ObsidianBases => "obsidianBases",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(ExportFormat::Markdown),
            "obsidianBases" => Ok(ExportFormat::ObsidianBases),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Everything configurable about one export run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    pub data_types: DataTypeSelection,
    pub customization: FormattingProfile,
    /// Emit the frontmatter block in the Markdown format
    pub include_metadata: bool,
    /// Accepted for settings compatibility; the grouped layout is the only
    /// one implemented
    pub group_by_category: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportSettings {
    pub fn new() -> Self {
        Self {
            data_types: DataTypeSelection::all(),
            customization: FormattingProfile::default(),
            include_metadata: true,
            group_by_category: true,
        }
    }
}

impl HealthDay {
    /// Export this day in the requested format.
    ///
    /// The data-type filter runs first; serializers see only the categories
    /// the selection kept. Output is deterministic for identical input.
    pub fn export(&self, format: ExportFormat, settings: &ExportSettings) -> String {
        debug!(date = %self.date, format = %format, "exporting health day");
        let filtered = self.filtered(&settings.data_types);
        let profile = &settings.customization;

        match format {
            ExportFormat::Markdown => {
                MarkdownSerializer::serialize(&filtered, profile, settings.include_metadata)
            }
            ExportFormat::ObsidianBases => BasesSerializer::serialize(&filtered, profile),
            ExportFormat::Json => JsonSerializer::serialize(&filtered, profile),
            ExportFormat::Csv => CsvSerializer::serialize(&filtered, profile),
        }
    }
}

/// File name the persistence layer should write an export to
pub fn file_name(date: NaiveDate, format: ExportFormat) -> String {
    format!("{}{}", date.format("%Y-%m-%d"), format.extension())
}
