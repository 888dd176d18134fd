//! Workout records and activity-type naming

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workout activity type
///
/// Mirrors the platform health store's activity catalogue. Types without a
/// dedicated variant are mapped to [`WorkoutType::Other`] by the acquisition
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Running,
    Walking,
    Cycling,
    Swimming,
    Hiking,
    Yoga,
    FunctionalStrengthTraining,
    TraditionalStrengthTraining,
    CoreTraining,
    HighIntensityIntervalTraining,
    Elliptical,
    Rowing,
    StairClimbing,
    Pilates,
    Dance,
    Cooldown,
    MixedCardio,
    SocialDance,
    Pickleball,
    Tennis,
    Badminton,
    TableTennis,
    Golf,
    Soccer,
    Basketball,
    Baseball,
    Softball,
    Volleyball,
    AmericanFootball,
    Rugby,
    Hockey,
    Lacrosse,
    SkatingSports,
    SnowSports,
    WaterSports,
    MartialArts,
    Boxing,
    Kickboxing,
    Wrestling,
    Climbing,
    JumpRope,
    MindAndBody,
    Flexibility,
    Other,
}

impl WorkoutType {
    /// Display name used in all export formats
    pub fn name(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Walking => "Walking",
            WorkoutType::Cycling => "Cycling",
            WorkoutType::Swimming => "Swimming",
            WorkoutType::Hiking => "Hiking",
            WorkoutType::Yoga => "Yoga",
            // Both strength variants share one display name
            WorkoutType::FunctionalStrengthTraining => "Strength Training",
            WorkoutType::TraditionalStrengthTraining => "Strength Training",
            WorkoutType::CoreTraining => "Core Training",
            WorkoutType::HighIntensityIntervalTraining => "HIIT",
            WorkoutType::Elliptical => "Elliptical",
            WorkoutType::Rowing => "Rowing",
            WorkoutType::StairClimbing => "Stair Climbing",
            WorkoutType::Pilates => "Pilates",
            WorkoutType::Dance => "Dance",
            WorkoutType::Cooldown => "Cooldown",
            WorkoutType::MixedCardio => "Mixed Cardio",
            WorkoutType::SocialDance => "Social Dance",
            WorkoutType::Pickleball => "Pickleball",
            WorkoutType::Tennis => "Tennis",
            WorkoutType::Badminton => "Badminton",
            WorkoutType::TableTennis => "Table Tennis",
            WorkoutType::Golf => "Golf",
            WorkoutType::Soccer => "Soccer",
            WorkoutType::Basketball => "Basketball",
            WorkoutType::Baseball => "Baseball",
            WorkoutType::Softball => "Softball",
            WorkoutType::Volleyball => "Volleyball",
            WorkoutType::AmericanFootball => "American Football",
            WorkoutType::Rugby => "Rugby",
            WorkoutType::Hockey => "Hockey",
            WorkoutType::Lacrosse => "Lacrosse",
            WorkoutType::SkatingSports => "Skating",
            WorkoutType::SnowSports => "Snow Sports",
            WorkoutType::WaterSports => "Water Sports",
            WorkoutType::MartialArts => "Martial Arts",
            WorkoutType::Boxing => "Boxing",
            WorkoutType::Kickboxing => "Kickboxing",
            WorkoutType::Wrestling => "Wrestling",
            WorkoutType::Climbing => "Climbing",
            WorkoutType::JumpRope => "Jump Rope",
            WorkoutType::MindAndBody => "Mind & Body",
            WorkoutType::Flexibility => "Flexibility",
            WorkoutType::Other => "Other",
        }
    }

    /// Lowercase, hyphenated form for frontmatter tag lists
    pub fn tag(&self) -> String {
        self.name().to_lowercase().replace(' ', "-")
    }
}

/// A single workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub workout_type: WorkoutType,
    pub start_time: DateTime<Utc>,
    /// Duration (seconds)
    pub duration: f64,
    /// Active calories (kcal)
    pub calories: Option<f64>,
    /// Distance (meters)
    pub distance: Option<f64>,
}
