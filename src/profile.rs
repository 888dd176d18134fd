//! Formatting profile
//!
//! An immutable configuration bundle threaded through every serializer:
//! date/time patterns, unit system, markdown cosmetics, and frontmatter key
//! remapping. Serializers contain no style constants of their own; every
//! stylistic choice resolves here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::units::{UnitConverter, UnitSystem};
use crate::EXPORT_TYPE;

const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%d";
const DEFAULT_TIME_PATTERN: &str = "%-I:%M %p";

/// Date formatting strategy (chrono strftime pattern)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFormat {
    pattern: String,
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_PATTERN.to_string(),
        }
    }
}

impl DateFormat {
    /// A custom pattern; must only use date fields
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn format(&self, date: NaiveDate) -> String {
        date.format(&self.pattern).to_string()
    }
}

/// Time formatting strategy (chrono strftime pattern)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFormat {
    pattern: String,
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_TIME_PATTERN.to_string(),
        }
    }
}

impl TimeFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn format(&self, timestamp: DateTime<Utc>) -> String {
        timestamp.format(&self.pattern).to_string()
    }
}

/// Markdown bullet glyph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulletStyle {
    #[default]
    Dash,
    Asterisk,
    Plus,
}

impl BulletStyle {
    pub fn glyph(&self) -> &'static str {
        match self {
            BulletStyle::Dash => "-",
            BulletStyle::Asterisk => "*",
            BulletStyle::Plus => "+",
        }
    }
}

/// Cosmetic choices for the Markdown serializer
///
/// Governs only how sections look, never which data appears; category
/// inclusion is the data-type filter's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownTemplate {
    pub bullet: BulletStyle,
    /// Depth of category headings (2 = `##`)
    pub section_header_level: usize,
    pub use_emoji: bool,
    /// Emit the one-line day summary under the title
    pub include_summary: bool,
}

impl Default for MarkdownTemplate {
    fn default() -> Self {
        Self {
            bullet: BulletStyle::Dash,
            section_header_level: 2,
            use_emoji: true,
            include_summary: true,
        }
    }
}

/// Remapping rule for one frontmatter key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOverride {
    /// Emit the field under a different key
    Rename(String),
    /// Drop the field from output entirely
    Omit,
}

/// Frontmatter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontmatterConfig {
    pub include_date: bool,
    pub include_type: bool,
    pub date_key: String,
    pub type_key: String,
    pub type_value: String,
    /// Extra static fields, emitted sorted by key
    pub custom_fields: BTreeMap<String, String>,
    /// Per-field key remapping; honored only by the Bases serializer
    pub key_overrides: HashMap<String, KeyOverride>,
}

impl Default for FrontmatterConfig {
    fn default() -> Self {
        Self {
            include_date: true,
            include_type: true,
            date_key: "date".to_string(),
            type_key: "type".to_string(),
            type_value: EXPORT_TYPE.to_string(),
            custom_fields: BTreeMap::new(),
            key_overrides: HashMap::new(),
        }
    }
}

impl FrontmatterConfig {
    /// Resolve the output key for a canonical field name.
    ///
    /// Returns `None` when the field must be omitted; the default is the
    /// identity mapping.
    pub fn output_key<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        match self.key_overrides.get(name) {
            Some(KeyOverride::Omit) => None,
            Some(KeyOverride::Rename(key)) => Some(key.as_str()),
            None => Some(name),
        }
    }
}

/// The complete, immutable customization profile for one export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormattingProfile {
    pub date_format: DateFormat,
    pub time_format: TimeFormat,
    pub unit_system: UnitSystem,
    pub markdown: MarkdownTemplate,
    pub frontmatter: FrontmatterConfig,
}

impl FormattingProfile {
    pub fn converter(&self) -> UnitConverter {
        UnitConverter::new(self.unit_system)
    }
}
