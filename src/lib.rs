//! HealthMd - Multi-format export engine for daily personal health metrics
//!
//! HealthMd turns a day's aggregated health record into text for a
//! personal-knowledge-management vault through a deterministic pipeline:
//! data-type filtering → format serialization under a customization profile.
//!
//! ## Formats
//!
//! - **Markdown**: grouped, human-readable daily note
//! - **Obsidian Bases**: every metric as a queryable frontmatter property
//! - **JSON**: base-unit values plus compatibility duplicates
//! - **CSV**: long-format `Date,Category,Metric,Value,Unit` table
//!
//! All serializers are pure and synchronous; exporting many days in parallel
//! needs no coordination.

pub mod error;
pub mod export;
pub mod fields;
pub mod filter;
pub mod profile;
pub mod types;
pub mod units;
pub mod workout;

pub use error::ExportError;
pub use export::{file_name, ExportFormat, ExportSettings};
pub use filter::DataTypeSelection;
pub use profile::{
    BulletStyle, DateFormat, FormattingProfile, FrontmatterConfig, KeyOverride, MarkdownTemplate,
    TimeFormat,
};
pub use types::{
    ActivityData, BodyData, HealthDay, HearingData, HeartData, MindfulnessData, MobilityData,
    NutritionData, SleepData, StateOfMindEntry, StateOfMindKind, VitalsData,
};
pub use units::{UnitConverter, UnitSystem};
pub use workout::{WorkoutRecord, WorkoutType};

/// HealthMd version embedded by surrounding tooling
pub const HEALTHMD_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `type:` frontmatter value marking exported notes
pub const EXPORT_TYPE: &str = "health-data";
