//! Core data model for the HealthMd export engine
//!
//! This module defines the per-day aggregate record and its category
//! sub-records: sleep, activity, heart, vitals, body, nutrition, mindfulness,
//! mobility, and hearing. Every optional metric is an explicit `Option`;
//! absence of data is never encoded as a sentinel zero.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::workout::WorkoutRecord;

/// Sleep durations for one day, in seconds
///
/// All fields default to zero; a field counts as populated when it is
/// positive. `total_duration` is not required to equal the sum of the stage
/// durations, since untyped "asleep" time is folded into `core_sleep` by the
/// acquisition layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepData {
    pub total_duration: f64,
    pub deep_sleep: f64,
    pub rem_sleep: f64,
    pub core_sleep: f64,
    pub awake_time: f64,
    pub in_bed_time: f64,
}

impl SleepData {
    pub fn has_data(&self) -> bool {
        self.total_duration > 0.0
            || self.deep_sleep > 0.0
            || self.rem_sleep > 0.0
            || self.core_sleep > 0.0
            || self.awake_time > 0.0
            || self.in_bed_time > 0.0
    }
}

/// Daily activity totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityData {
    pub steps: Option<u32>,
    pub active_calories: Option<f64>,
    pub exercise_minutes: Option<f64>,
    pub flights_climbed: Option<u32>,
    /// Walking + running distance (meters)
    pub walking_running_distance: Option<f64>,
    pub stand_hours: Option<u32>,
    pub basal_energy_burned: Option<f64>,
    /// Cycling distance (meters)
    pub cycling_distance: Option<f64>,
    /// Swimming distance (meters)
    pub swimming_distance: Option<f64>,
    pub swimming_strokes: Option<u32>,
    /// Wheelchair pushes
    pub push_count: Option<u32>,
}

impl ActivityData {
    pub fn has_data(&self) -> bool {
        self.steps.is_some()
            || self.active_calories.is_some()
            || self.exercise_minutes.is_some()
            || self.flights_climbed.is_some()
            || self.walking_running_distance.is_some()
            || self.stand_hours.is_some()
            || self.basal_energy_burned.is_some()
            || self.cycling_distance.is_some()
            || self.swimming_distance.is_some()
            || self.swimming_strokes.is_some()
            || self.push_count.is_some()
    }
}

/// Daily heart metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartData {
    pub resting_heart_rate: Option<f64>,
    pub walking_heart_rate_average: Option<f64>,
    pub average_heart_rate: Option<f64>,
    /// Heart rate variability (milliseconds)
    pub hrv: Option<f64>,
    pub heart_rate_min: Option<f64>,
    pub heart_rate_max: Option<f64>,
}

impl HeartData {
    pub fn has_data(&self) -> bool {
        self.resting_heart_rate.is_some()
            || self.walking_heart_rate_average.is_some()
            || self.average_heart_rate.is_some()
            || self.hrv.is_some()
            || self.heart_rate_min.is_some()
            || self.heart_rate_max.is_some()
    }
}

/// Daily vitals aggregates (avg/min/max triples)
///
/// A category counts as populated only when at least one average is present;
/// min/max values without an average are carried but do not make the section
/// appear on their own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalsData {
    /// Respiratory rate (breaths per minute)
    pub respiratory_rate_avg: Option<f64>,
    pub respiratory_rate_min: Option<f64>,
    pub respiratory_rate_max: Option<f64>,

    /// Blood oxygen saturation (fraction, 0-1)
    pub blood_oxygen_avg: Option<f64>,
    pub blood_oxygen_min: Option<f64>,
    pub blood_oxygen_max: Option<f64>,

    /// Body temperature (Celsius)
    pub body_temperature_avg: Option<f64>,
    pub body_temperature_min: Option<f64>,
    pub body_temperature_max: Option<f64>,

    /// Blood pressure (mmHg)
    pub blood_pressure_systolic_avg: Option<f64>,
    pub blood_pressure_systolic_min: Option<f64>,
    pub blood_pressure_systolic_max: Option<f64>,
    pub blood_pressure_diastolic_avg: Option<f64>,
    pub blood_pressure_diastolic_min: Option<f64>,
    pub blood_pressure_diastolic_max: Option<f64>,

    /// Blood glucose (mg/dL)
    pub blood_glucose_avg: Option<f64>,
    pub blood_glucose_min: Option<f64>,
    pub blood_glucose_max: Option<f64>,
}

impl VitalsData {
    pub fn has_data(&self) -> bool {
        self.respiratory_rate_avg.is_some()
            || self.blood_oxygen_avg.is_some()
            || self.body_temperature_avg.is_some()
            || self.blood_pressure_systolic_avg.is_some()
            || self.blood_pressure_diastolic_avg.is_some()
            || self.blood_glucose_avg.is_some()
    }

    // Convenience accessors for simple single-value access
    pub fn respiratory_rate(&self) -> Option<f64> {
        self.respiratory_rate_avg
    }

    pub fn blood_oxygen(&self) -> Option<f64> {
        self.blood_oxygen_avg
    }

    pub fn body_temperature(&self) -> Option<f64> {
        self.body_temperature_avg
    }

    pub fn blood_pressure_systolic(&self) -> Option<f64> {
        self.blood_pressure_systolic_avg
    }

    pub fn blood_pressure_diastolic(&self) -> Option<f64> {
        self.blood_pressure_diastolic_avg
    }

    pub fn blood_glucose(&self) -> Option<f64> {
        self.blood_glucose_avg
    }
}

/// Body measurements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyData {
    /// Weight (kg)
    pub weight: Option<f64>,
    /// Body fat (fraction, 0-1)
    pub body_fat_percentage: Option<f64>,
    /// Height (meters)
    pub height: Option<f64>,
    pub bmi: Option<f64>,
    /// Lean body mass (kg)
    pub lean_body_mass: Option<f64>,
    /// Waist circumference (meters)
    pub waist_circumference: Option<f64>,
}

impl BodyData {
    pub fn has_data(&self) -> bool {
        self.weight.is_some()
            || self.body_fat_percentage.is_some()
            || self.height.is_some()
            || self.bmi.is_some()
            || self.lean_body_mass.is_some()
            || self.waist_circumference.is_some()
    }
}

/// Daily nutrition totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionData {
    /// Dietary energy (kcal)
    pub dietary_energy: Option<f64>,
    /// Protein (grams)
    pub protein: Option<f64>,
    /// Carbohydrates (grams)
    pub carbohydrates: Option<f64>,
    /// Fat (grams)
    pub fat: Option<f64>,
    /// Fiber (grams)
    pub fiber: Option<f64>,
    /// Sugar (grams)
    pub sugar: Option<f64>,
    /// Sodium (mg)
    pub sodium: Option<f64>,
    /// Water (liters)
    pub water: Option<f64>,
    /// Caffeine (mg)
    pub caffeine: Option<f64>,
    /// Cholesterol (mg)
    pub cholesterol: Option<f64>,
    /// Saturated fat (grams)
    pub saturated_fat: Option<f64>,
}

impl NutritionData {
    pub fn has_data(&self) -> bool {
        self.dietary_energy.is_some()
            || self.protein.is_some()
            || self.carbohydrates.is_some()
            || self.fat.is_some()
            || self.fiber.is_some()
            || self.sugar.is_some()
            || self.sodium.is_some()
            || self.water.is_some()
            || self.caffeine.is_some()
            || self.cholesterol.is_some()
            || self.saturated_fat.is_some()
    }
}

/// Kind of state-of-mind reflection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateOfMindKind {
    MomentaryEmotion,
    DailyMood,
}

impl StateOfMindKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            StateOfMindKind::MomentaryEmotion => "Momentary Emotion",
            StateOfMindKind::DailyMood => "Daily Mood",
        }
    }
}

/// A single state-of-mind reflection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateOfMindEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub kind: StateOfMindKind,
    /// Pleasantness, -1.0 (very unpleasant) to 1.0 (very pleasant)
    pub valence: f64,
    /// Emotion/mood labels like "Happy", "Anxious"
    pub labels: Vec<String>,
    /// Context like "Work", "Exercise", "Family"
    pub associations: Vec<String>,
}

impl StateOfMindEntry {
    /// Human-readable description of the valence
    pub fn valence_description(&self) -> &'static str {
        valence_description(self.valence)
    }

    /// Valence as a 0-100 percentage
    pub fn valence_percent(&self) -> i64 {
        valence_percent(self.valence)
    }

    /// Emoji representation of the valence
    pub fn valence_emoji(&self) -> &'static str {
        valence_emoji(self.valence)
    }
}

/// Classify a valence into one of five buckets
///
/// Buckets are inclusive on the lower bound and exclusive on the upper,
/// except the top bucket which includes 1.0. Values outside [-1, 1] are
/// "Unknown".
pub fn valence_description(valence: f64) -> &'static str {
    if (-1.0..-0.6).contains(&valence) {
        "Very Unpleasant"
    } else if (-0.6..-0.2).contains(&valence) {
        "Unpleasant"
    } else if (-0.2..0.2).contains(&valence) {
        "Neutral"
    } else if (0.2..0.6).contains(&valence) {
        "Pleasant"
    } else if (0.6..=1.0).contains(&valence) {
        "Very Pleasant"
    } else {
        "Unknown"
    }
}

/// Map a valence from [-1, 1] to a 0-100 percentage (truncated)
pub fn valence_percent(valence: f64) -> i64 {
    (((valence + 1.0) / 2.0) * 100.0) as i64
}

/// Emoji for a valence, using the same buckets as [`valence_description`]
pub fn valence_emoji(valence: f64) -> &'static str {
    if (-1.0..-0.6).contains(&valence) {
        "😢"
    } else if (-0.6..-0.2).contains(&valence) {
        "😔"
    } else if (-0.2..0.2).contains(&valence) {
        "😐"
    } else if (0.2..0.6).contains(&valence) {
        "🙂"
    } else if (0.6..=1.0).contains(&valence) {
        "😊"
    } else {
        "❓"
    }
}

/// Mindfulness minutes, sessions, and state-of-mind reflections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MindfulnessData {
    pub mindful_minutes: Option<f64>,
    pub mindful_sessions: Option<u32>,
    /// Reflections in the order they were recorded
    pub state_of_mind: Vec<StateOfMindEntry>,
}

impl MindfulnessData {
    pub fn has_data(&self) -> bool {
        self.mindful_minutes.is_some()
            || self.mindful_sessions.is_some()
            || !self.state_of_mind.is_empty()
    }

    /// Entries of kind [`StateOfMindKind::DailyMood`], in recorded order
    pub fn daily_moods(&self) -> Vec<&StateOfMindEntry> {
        self.state_of_mind
            .iter()
            .filter(|e| e.kind == StateOfMindKind::DailyMood)
            .collect()
    }

    /// Entries of kind [`StateOfMindKind::MomentaryEmotion`], in recorded order
    pub fn momentary_emotions(&self) -> Vec<&StateOfMindEntry> {
        self.state_of_mind
            .iter()
            .filter(|e| e.kind == StateOfMindKind::MomentaryEmotion)
            .collect()
    }

    /// Mean valence over all entries, or `None` when there are none
    pub fn average_valence(&self) -> Option<f64> {
        average_valence_of(&self.state_of_mind.iter().collect::<Vec<_>>())
    }

    /// Mean valence over daily-mood entries, or `None` when there are none
    pub fn average_daily_mood_valence(&self) -> Option<f64> {
        average_valence_of(&self.daily_moods())
    }

    /// Deduplicated, lexicographically sorted union of entry labels
    pub fn all_labels(&self) -> Vec<String> {
        sorted_union(self.state_of_mind.iter().flat_map(|e| e.labels.iter()))
    }

    /// Deduplicated, lexicographically sorted union of entry associations
    pub fn all_associations(&self) -> Vec<String> {
        sorted_union(self.state_of_mind.iter().flat_map(|e| e.associations.iter()))
    }
}

fn average_valence_of(entries: &[&StateOfMindEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total: f64 = entries.iter().map(|e| e.valence).sum();
    Some(total / entries.len() as f64)
}

fn sorted_union<'a>(items: impl Iterator<Item = &'a String>) -> Vec<String> {
    items
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Walking and stair metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MobilityData {
    /// Walking speed (m/s)
    pub walking_speed: Option<f64>,
    /// Step length (meters)
    pub walking_step_length: Option<f64>,
    /// Double support time (fraction, 0-1)
    pub walking_double_support_percentage: Option<f64>,
    /// Walking asymmetry (fraction, 0-1)
    pub walking_asymmetry_percentage: Option<f64>,
    /// Stair ascent speed (m/s)
    pub stair_ascent_speed: Option<f64>,
    /// Stair descent speed (m/s)
    pub stair_descent_speed: Option<f64>,
    /// Six-minute walk test distance (meters)
    pub six_minute_walk_distance: Option<f64>,
}

impl MobilityData {
    pub fn has_data(&self) -> bool {
        self.walking_speed.is_some()
            || self.walking_step_length.is_some()
            || self.walking_double_support_percentage.is_some()
            || self.walking_asymmetry_percentage.is_some()
            || self.stair_ascent_speed.is_some()
            || self.stair_descent_speed.is_some()
            || self.six_minute_walk_distance.is_some()
    }
}

/// Audio exposure levels (dB)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HearingData {
    pub headphone_audio_level: Option<f64>,
    pub environmental_sound_level: Option<f64>,
}

impl HearingData {
    pub fn has_data(&self) -> bool {
        self.headphone_audio_level.is_some() || self.environmental_sound_level.is_some()
    }
}

/// The complete health record for one calendar day
///
/// Assembled by the acquisition layer and treated as immutable afterwards;
/// filtering produces a new copy rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthDay {
    pub date: NaiveDate,
    pub sleep: SleepData,
    pub activity: ActivityData,
    pub heart: HeartData,
    pub vitals: VitalsData,
    pub body: BodyData,
    pub nutrition: NutritionData,
    pub mindfulness: MindfulnessData,
    pub mobility: MobilityData,
    pub hearing: HearingData,
    /// Workouts in the order they were received
    pub workouts: Vec<WorkoutRecord>,
}

impl HealthDay {
    /// An empty record for the given date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            sleep: SleepData::default(),
            activity: ActivityData::default(),
            heart: HeartData::default(),
            vitals: VitalsData::default(),
            body: BodyData::default(),
            nutrition: NutritionData::default(),
            mindfulness: MindfulnessData::default(),
            mobility: MobilityData::default(),
            hearing: HearingData::default(),
            workouts: Vec::new(),
        }
    }

    pub fn has_any_data(&self) -> bool {
        self.sleep.has_data()
            || self.activity.has_data()
            || self.heart.has_data()
            || self.vitals.has_data()
            || self.body.has_data()
            || self.nutrition.has_data()
            || self.mindfulness.has_data()
            || self.mobility.has_data()
            || self.hearing.has_data()
            || !self.workouts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_entry(kind: StateOfMindKind, valence: f64) -> StateOfMindEntry {
        StateOfMindEntry {
            id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 13, 14, 30, 0).unwrap(),
            kind,
            valence,
            labels: vec![],
            associations: vec![],
        }
    }

    #[test]
    fn test_valence_bucket_boundaries() {
        assert_eq!(valence_description(-1.0), "Very Unpleasant");
        assert_eq!(valence_description(-0.6), "Unpleasant");
        assert_eq!(valence_description(-0.2), "Neutral");
        assert_eq!(valence_description(0.2), "Pleasant");
        assert_eq!(valence_description(0.6), "Very Pleasant");
        assert_eq!(valence_description(1.0), "Very Pleasant");
        assert_eq!(valence_description(1.5), "Unknown");
        assert_eq!(valence_description(-1.1), "Unknown");
    }

    #[test]
    fn test_valence_percent_endpoints() {
        assert_eq!(valence_percent(-1.0), 0);
        assert_eq!(valence_percent(0.0), 50);
        assert_eq!(valence_percent(1.0), 100);
        // Truncated, not rounded
        assert_eq!(valence_percent(0.75), 87);
    }

    #[test]
    fn test_valence_emoji_buckets() {
        assert_eq!(valence_emoji(0.75), "😊");
        assert_eq!(valence_emoji(-0.6), "😔");
        assert_eq!(valence_emoji(0.0), "😐");
        assert_eq!(valence_emoji(2.0), "❓");
    }

    #[test]
    fn test_average_valence_of_empty_is_none() {
        let mindfulness = MindfulnessData::default();
        assert_eq!(mindfulness.average_valence(), None);
        assert_eq!(mindfulness.average_daily_mood_valence(), None);
    }

    #[test]
    fn test_average_valence_by_kind() {
        let mindfulness = MindfulnessData {
            state_of_mind: vec![
                make_entry(StateOfMindKind::DailyMood, 0.4),
                make_entry(StateOfMindKind::MomentaryEmotion, -0.2),
                make_entry(StateOfMindKind::DailyMood, 0.8),
            ],
            ..Default::default()
        };

        let avg = mindfulness.average_valence().unwrap();
        assert!((avg - (0.4 - 0.2 + 0.8) / 3.0).abs() < 1e-9);

        let daily = mindfulness.average_daily_mood_valence().unwrap();
        assert!((daily - 0.6).abs() < 1e-9);
        assert_eq!(mindfulness.daily_moods().len(), 2);
        assert_eq!(mindfulness.momentary_emotions().len(), 1);
    }

    #[test]
    fn test_labels_deduplicated_and_sorted() {
        let mut a = make_entry(StateOfMindKind::DailyMood, 0.5);
        a.labels = vec!["Happy".to_string(), "Calm".to_string()];
        a.associations = vec!["Work".to_string()];
        let mut b = make_entry(StateOfMindKind::MomentaryEmotion, 0.1);
        b.labels = vec!["Happy".to_string(), "Anxious".to_string()];
        b.associations = vec!["Family".to_string(), "Work".to_string()];

        let mindfulness = MindfulnessData {
            state_of_mind: vec![a, b],
            ..Default::default()
        };

        assert_eq!(mindfulness.all_labels(), vec!["Anxious", "Calm", "Happy"]);
        assert_eq!(mindfulness.all_associations(), vec!["Family", "Work"]);
    }

    #[test]
    fn test_has_data_independence() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        assert!(!day.has_any_data());

        day.sleep.total_duration = 30600.0;
        assert!(day.sleep.has_data());
        assert!(!day.activity.has_data());
        assert!(day.has_any_data());

        day.activity.steps = Some(0);
        // Present-but-zero still counts as data for optional fields
        assert!(day.activity.has_data());
    }
}
