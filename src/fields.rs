//! Per-category metric tables
//!
//! One ordered table per category describing every exportable metric: its
//! canonical key, display labels, unit kind, and an accessor that applies the
//! category's gating rule. The Markdown and CSV serializers iterate these
//! tables for the categories whose behavior is uniform; vitals, mindfulness,
//! and workouts have genuinely divergent layouts and are handled in their
//! serializers directly.
//!
//! Gating predicates are intentionally uneven: sleep durations count only
//! when positive, while every optional category counts on presence. This
//! matches the historical export behavior that downstream consumers rely on.

use std::fmt;

use crate::types::{
    ActivityData, BodyData, HearingData, HeartData, MobilityData, NutritionData, SleepData,
};
use crate::units::{format_duration, group_thousands, UnitConverter};

/// A metric value, preserving integer-ness for display
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    pub fn as_f64(&self) -> f64 {
        match self {
            Num::Int(i) => *i as f64,
            Num::Float(f) => *f,
        }
    }

    pub fn as_i64(&self) -> i64 {
        match self {
            Num::Int(i) => *i,
            Num::Float(f) => *f as i64,
        }
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Num::Int(i) => write!(f, "{}", i),
            Num::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Display semantics of a metric.
///
/// One variant per distinct rendering behavior: how the value reads in a
/// Markdown bullet, and what value/unit pair lands in a CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Seconds shown as "8h 30m"; CSV keeps raw seconds
    Duration,
    /// Integer with thousands separators
    CountGrouped,
    /// Plain integer count
    Count,
    /// Plain integer; CSV unit is "hours"
    StandHours,
    /// Grouped integer with a kcal suffix
    KcalInt,
    /// Truncated integer minutes
    MinutesInt,
    /// Truncated integer bpm
    Bpm,
    /// One-decimal milliseconds
    MillisF1,
    /// One-decimal grams
    GramsF1,
    /// One-decimal milligrams
    MilligramsF1,
    /// Grouped integer milligrams
    MilligramsInt,
    /// Meters through the distance converter; CSV keeps raw meters
    Distance,
    /// Kilograms through the weight converter, converted in CSV too
    Weight,
    /// Meters through the height converter, converted in CSV too
    Height,
    /// Meters through the length converter, converted in CSV too
    Length,
    /// Meters through the length converter; CSV keeps raw meters
    LengthRawMeters,
    /// Liters through the volume converter; CSV keeps raw liters
    Volume,
    /// m/s through the speed converter; CSV keeps raw m/s
    Speed,
    /// Fraction (0-1) shown as a one-decimal percentage
    PercentFraction,
    /// Unitless one-decimal score
    ScoreF1,
    /// One-decimal decibels
    DecibelsF1,
}

impl UnitKind {
    /// Render a metric value for a Markdown bullet
    pub fn markdown_value(&self, num: Num, conv: &UnitConverter) -> String {
        match self {
            UnitKind::Duration => format_duration(num.as_f64()),
            UnitKind::CountGrouped => group_thousands(num.as_i64()),
            UnitKind::Count | UnitKind::StandHours => num.as_i64().to_string(),
            UnitKind::KcalInt => format!("{} kcal", group_thousands(num.as_i64())),
            UnitKind::MinutesInt => format!("{} min", num.as_i64()),
            UnitKind::Bpm => format!("{} bpm", num.as_i64()),
            UnitKind::MillisF1 => format!("{:.1} ms", num.as_f64()),
            UnitKind::GramsF1 => format!("{:.1} g", num.as_f64()),
            UnitKind::MilligramsF1 => format!("{:.1} mg", num.as_f64()),
            UnitKind::MilligramsInt => format!("{} mg", group_thousands(num.as_i64())),
            UnitKind::Distance => conv.format_distance(num.as_f64()),
            UnitKind::Weight => conv.format_weight(num.as_f64()),
            UnitKind::Height => conv.format_height(num.as_f64()),
            UnitKind::Length | UnitKind::LengthRawMeters => conv.format_length(num.as_f64()),
            UnitKind::Volume => conv.format_volume(num.as_f64()),
            UnitKind::Speed => conv.format_speed(num.as_f64()),
            UnitKind::PercentFraction => format!("{:.1}%", num.as_f64() * 100.0),
            UnitKind::ScoreF1 => format!("{:.1}", num.as_f64()),
            UnitKind::DecibelsF1 => format!("{:.1} dB", num.as_f64()),
        }
    }

    /// Render a metric value as a CSV (value, unit) pair.
    ///
    /// Distances, speeds, and volumes stay in base units with the base unit
    /// named in the unit column; weight, height, length, and temperature-like
    /// values are converted to the display system first.
    pub fn csv_value_unit(&self, num: Num, conv: &UnitConverter) -> (String, String) {
        match self {
            UnitKind::Duration => (num.as_i64().to_string(), "seconds".to_string()),
            UnitKind::CountGrouped | UnitKind::Count => {
                (num.as_i64().to_string(), "count".to_string())
            }
            UnitKind::StandHours => (num.as_i64().to_string(), "hours".to_string()),
            UnitKind::KcalInt => (num.to_string(), "kcal".to_string()),
            UnitKind::MinutesInt => (num.to_string(), "minutes".to_string()),
            UnitKind::Bpm => (num.to_string(), "bpm".to_string()),
            UnitKind::MillisF1 => (num.to_string(), "ms".to_string()),
            UnitKind::GramsF1 => (num.to_string(), "g".to_string()),
            UnitKind::MilligramsF1 | UnitKind::MilligramsInt => {
                (num.to_string(), "mg".to_string())
            }
            UnitKind::Distance | UnitKind::LengthRawMeters => {
                (num.to_string(), "meters".to_string())
            }
            UnitKind::Weight => (
                format!("{:.1}", conv.convert_weight(num.as_f64())),
                conv.weight_unit().to_string(),
            ),
            UnitKind::Height => (
                format!("{:.1}", conv.convert_height(num.as_f64())),
                conv.height_unit().to_string(),
            ),
            UnitKind::Length => (
                format!("{:.1}", conv.convert_length(num.as_f64())),
                conv.length_unit().to_string(),
            ),
            UnitKind::Volume => (num.to_string(), "L".to_string()),
            UnitKind::Speed => (num.to_string(), "m/s".to_string()),
            UnitKind::PercentFraction => {
                (format!("{}", num.as_f64() * 100.0), "percent".to_string())
            }
            UnitKind::ScoreF1 => (num.to_string(), String::new()),
            UnitKind::DecibelsF1 => (num.to_string(), "dB".to_string()),
        }
    }
}

/// One exportable metric of a category record
pub struct Metric<T: 'static> {
    /// Canonical field name
    pub key: &'static str,
    /// Bullet label in Markdown
    pub md_label: &'static str,
    /// Metric name in CSV rows
    pub csv_label: &'static str,
    pub kind: UnitKind,
    /// Accessor with the category's gating rule applied
    pub get: fn(&T) -> Option<Num>,
}

fn positive(v: f64) -> Option<Num> {
    (v > 0.0).then_some(Num::Float(v))
}

fn float(v: Option<f64>) -> Option<Num> {
    v.map(Num::Float)
}

fn int(v: Option<u32>) -> Option<Num> {
    v.map(|i| Num::Int(i as i64))
}

/// Sleep durations in CSV emission order (Markdown orders these itself)
pub const SLEEP_METRICS: &[Metric<SleepData>] = &[
    Metric {
        key: "totalDuration",
        md_label: "Total",
        csv_label: "Total Duration",
        kind: UnitKind::Duration,
        get: |s| positive(s.total_duration),
    },
    Metric {
        key: "deepSleep",
        md_label: "Deep",
        csv_label: "Deep Sleep",
        kind: UnitKind::Duration,
        get: |s| positive(s.deep_sleep),
    },
    Metric {
        key: "remSleep",
        md_label: "REM",
        csv_label: "REM Sleep",
        kind: UnitKind::Duration,
        get: |s| positive(s.rem_sleep),
    },
    Metric {
        key: "coreSleep",
        md_label: "Core",
        csv_label: "Core Sleep",
        kind: UnitKind::Duration,
        get: |s| positive(s.core_sleep),
    },
    Metric {
        key: "awakeTime",
        md_label: "Awake",
        csv_label: "Awake Time",
        kind: UnitKind::Duration,
        get: |s| positive(s.awake_time),
    },
    Metric {
        key: "inBedTime",
        md_label: "In Bed",
        csv_label: "In Bed Time",
        kind: UnitKind::Duration,
        get: |s| positive(s.in_bed_time),
    },
];

pub const ACTIVITY_METRICS: &[Metric<ActivityData>] = &[
    Metric {
        key: "steps",
        md_label: "Steps",
        csv_label: "Steps",
        kind: UnitKind::CountGrouped,
        get: |a| int(a.steps),
    },
    Metric {
        key: "activeCalories",
        md_label: "Active Calories",
        csv_label: "Active Calories",
        kind: UnitKind::KcalInt,
        get: |a| float(a.active_calories),
    },
    Metric {
        key: "basalEnergyBurned",
        md_label: "Basal Energy",
        csv_label: "Basal Energy",
        kind: UnitKind::KcalInt,
        get: |a| float(a.basal_energy_burned),
    },
    Metric {
        key: "exerciseMinutes",
        md_label: "Exercise",
        csv_label: "Exercise Minutes",
        kind: UnitKind::MinutesInt,
        get: |a| float(a.exercise_minutes),
    },
    Metric {
        key: "standHours",
        md_label: "Stand Hours",
        csv_label: "Stand Hours",
        kind: UnitKind::StandHours,
        get: |a| int(a.stand_hours),
    },
    Metric {
        key: "flightsClimbed",
        md_label: "Flights Climbed",
        csv_label: "Flights Climbed",
        kind: UnitKind::Count,
        get: |a| int(a.flights_climbed),
    },
    Metric {
        key: "walkingRunningDistance",
        md_label: "Walking/Running Distance",
        csv_label: "Walking Running Distance",
        kind: UnitKind::Distance,
        get: |a| float(a.walking_running_distance),
    },
    Metric {
        key: "cyclingDistance",
        md_label: "Cycling Distance",
        csv_label: "Cycling Distance",
        kind: UnitKind::Distance,
        get: |a| float(a.cycling_distance),
    },
    Metric {
        key: "swimmingDistance",
        md_label: "Swimming Distance",
        csv_label: "Swimming Distance",
        kind: UnitKind::Distance,
        get: |a| float(a.swimming_distance),
    },
    Metric {
        key: "swimmingStrokes",
        md_label: "Swimming Strokes",
        csv_label: "Swimming Strokes",
        kind: UnitKind::CountGrouped,
        get: |a| int(a.swimming_strokes),
    },
    Metric {
        key: "pushCount",
        md_label: "Wheelchair Pushes",
        csv_label: "Wheelchair Pushes",
        kind: UnitKind::CountGrouped,
        get: |a| int(a.push_count),
    },
];

pub const HEART_METRICS: &[Metric<HeartData>] = &[
    Metric {
        key: "restingHeartRate",
        md_label: "Resting HR",
        csv_label: "Resting Heart Rate",
        kind: UnitKind::Bpm,
        get: |h| float(h.resting_heart_rate),
    },
    Metric {
        key: "walkingHeartRateAverage",
        md_label: "Walking HR Average",
        csv_label: "Walking Heart Rate Average",
        kind: UnitKind::Bpm,
        get: |h| float(h.walking_heart_rate_average),
    },
    Metric {
        key: "averageHeartRate",
        md_label: "Average HR",
        csv_label: "Average Heart Rate",
        kind: UnitKind::Bpm,
        get: |h| float(h.average_heart_rate),
    },
    Metric {
        key: "heartRateMin",
        md_label: "Min HR",
        csv_label: "Min Heart Rate",
        kind: UnitKind::Bpm,
        get: |h| float(h.heart_rate_min),
    },
    Metric {
        key: "heartRateMax",
        md_label: "Max HR",
        csv_label: "Max Heart Rate",
        kind: UnitKind::Bpm,
        get: |h| float(h.heart_rate_max),
    },
    Metric {
        key: "hrv",
        md_label: "HRV",
        csv_label: "HRV",
        kind: UnitKind::MillisF1,
        get: |h| float(h.hrv),
    },
];

pub const NUTRITION_METRICS: &[Metric<NutritionData>] = &[
    Metric {
        key: "dietaryEnergy",
        md_label: "Calories",
        csv_label: "Dietary Energy",
        kind: UnitKind::KcalInt,
        get: |n| float(n.dietary_energy),
    },
    Metric {
        key: "protein",
        md_label: "Protein",
        csv_label: "Protein",
        kind: UnitKind::GramsF1,
        get: |n| float(n.protein),
    },
    Metric {
        key: "carbohydrates",
        md_label: "Carbohydrates",
        csv_label: "Carbohydrates",
        kind: UnitKind::GramsF1,
        get: |n| float(n.carbohydrates),
    },
    Metric {
        key: "fat",
        md_label: "Fat",
        csv_label: "Fat",
        kind: UnitKind::GramsF1,
        get: |n| float(n.fat),
    },
    Metric {
        key: "saturatedFat",
        md_label: "Saturated Fat",
        csv_label: "Saturated Fat",
        kind: UnitKind::GramsF1,
        get: |n| float(n.saturated_fat),
    },
    Metric {
        key: "fiber",
        md_label: "Fiber",
        csv_label: "Fiber",
        kind: UnitKind::GramsF1,
        get: |n| float(n.fiber),
    },
    Metric {
        key: "sugar",
        md_label: "Sugar",
        csv_label: "Sugar",
        kind: UnitKind::GramsF1,
        get: |n| float(n.sugar),
    },
    Metric {
        key: "sodium",
        md_label: "Sodium",
        csv_label: "Sodium",
        kind: UnitKind::MilligramsInt,
        get: |n| float(n.sodium),
    },
    Metric {
        key: "cholesterol",
        md_label: "Cholesterol",
        csv_label: "Cholesterol",
        kind: UnitKind::MilligramsF1,
        get: |n| float(n.cholesterol),
    },
    Metric {
        key: "water",
        md_label: "Water",
        csv_label: "Water",
        kind: UnitKind::Volume,
        get: |n| float(n.water),
    },
    Metric {
        key: "caffeine",
        md_label: "Caffeine",
        csv_label: "Caffeine",
        kind: UnitKind::MilligramsF1,
        get: |n| float(n.caffeine),
    },
];

pub const BODY_METRICS: &[Metric<BodyData>] = &[
    Metric {
        key: "weight",
        md_label: "Weight",
        csv_label: "Weight",
        kind: UnitKind::Weight,
        get: |b| float(b.weight),
    },
    Metric {
        key: "height",
        md_label: "Height",
        csv_label: "Height",
        kind: UnitKind::Height,
        get: |b| float(b.height),
    },
    Metric {
        key: "bmi",
        md_label: "BMI",
        csv_label: "BMI",
        kind: UnitKind::ScoreF1,
        get: |b| float(b.bmi),
    },
    Metric {
        key: "bodyFatPercentage",
        md_label: "Body Fat",
        csv_label: "Body Fat Percentage",
        kind: UnitKind::PercentFraction,
        get: |b| float(b.body_fat_percentage),
    },
    Metric {
        key: "leanBodyMass",
        md_label: "Lean Body Mass",
        csv_label: "Lean Body Mass",
        kind: UnitKind::Weight,
        get: |b| float(b.lean_body_mass),
    },
    Metric {
        key: "waistCircumference",
        md_label: "Waist Circumference",
        csv_label: "Waist Circumference",
        kind: UnitKind::Length,
        get: |b| float(b.waist_circumference),
    },
];

pub const MOBILITY_METRICS: &[Metric<MobilityData>] = &[
    Metric {
        key: "walkingSpeed",
        md_label: "Walking Speed",
        csv_label: "Walking Speed",
        kind: UnitKind::Speed,
        get: |m| float(m.walking_speed),
    },
    Metric {
        key: "walkingStepLength",
        md_label: "Step Length",
        csv_label: "Walking Step Length",
        kind: UnitKind::LengthRawMeters,
        get: |m| float(m.walking_step_length),
    },
    Metric {
        key: "walkingDoubleSupportPercentage",
        md_label: "Double Support",
        csv_label: "Double Support Percentage",
        kind: UnitKind::PercentFraction,
        get: |m| float(m.walking_double_support_percentage),
    },
    Metric {
        key: "walkingAsymmetryPercentage",
        md_label: "Walking Asymmetry",
        csv_label: "Walking Asymmetry",
        kind: UnitKind::PercentFraction,
        get: |m| float(m.walking_asymmetry_percentage),
    },
    Metric {
        key: "stairAscentSpeed",
        md_label: "Stair Ascent Speed",
        csv_label: "Stair Ascent Speed",
        kind: UnitKind::Speed,
        get: |m| float(m.stair_ascent_speed),
    },
    Metric {
        key: "stairDescentSpeed",
        md_label: "Stair Descent Speed",
        csv_label: "Stair Descent Speed",
        kind: UnitKind::Speed,
        get: |m| float(m.stair_descent_speed),
    },
    Metric {
        key: "sixMinuteWalkDistance",
        md_label: "6-Min Walk Distance",
        csv_label: "Six Minute Walk Distance",
        kind: UnitKind::Distance,
        get: |m| float(m.six_minute_walk_distance),
    },
];

pub const HEARING_METRICS: &[Metric<HearingData>] = &[
    Metric {
        key: "headphoneAudioLevel",
        md_label: "Headphone Audio Level",
        csv_label: "Headphone Audio Level",
        kind: UnitKind::DecibelsF1,
        get: |h| float(h.headphone_audio_level),
    },
    Metric {
        key: "environmentalSoundLevel",
        md_label: "Environmental Sound Level",
        csv_label: "Environmental Sound Level",
        kind: UnitKind::DecibelsF1,
        get: |h| float(h.environmental_sound_level),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitSystem;

    #[test]
    fn test_sleep_gating_is_positivity() {
        let sleep = SleepData {
            total_duration: 30600.0,
            ..Default::default()
        };
        let values: Vec<Option<Num>> = SLEEP_METRICS.iter().map(|m| (m.get)(&sleep)).collect();
        assert_eq!(values[0], Some(Num::Float(30600.0)));
        // Zero-valued durations are absent, not zero rows
        assert!(values[1..].iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_activity_gating_is_presence() {
        let activity = ActivityData {
            steps: Some(0),
            ..Default::default()
        };
        let steps = (ACTIVITY_METRICS[0].get)(&activity);
        assert_eq!(steps, Some(Num::Int(0)));
    }

    #[test]
    fn test_markdown_value_per_kind() {
        let conv = UnitConverter::new(UnitSystem::Metric);
        assert_eq!(
            UnitKind::Duration.markdown_value(Num::Float(30600.0), &conv),
            "8h 30m"
        );
        assert_eq!(
            UnitKind::CountGrouped.markdown_value(Num::Int(8432), &conv),
            "8,432"
        );
        assert_eq!(
            UnitKind::KcalInt.markdown_value(Num::Float(1250.7), &conv),
            "1,250 kcal"
        );
        assert_eq!(
            UnitKind::PercentFraction.markdown_value(Num::Float(0.225), &conv),
            "22.5%"
        );
        assert_eq!(
            UnitKind::Distance.markdown_value(Num::Float(5230.0), &conv),
            "5.2 km"
        );
    }

    #[test]
    fn test_csv_value_unit_per_kind() {
        let conv = UnitConverter::new(UnitSystem::Metric);
        assert_eq!(
            UnitKind::Duration.csv_value_unit(Num::Float(30600.0), &conv),
            ("30600".to_string(), "seconds".to_string())
        );
        assert_eq!(
            UnitKind::Distance.csv_value_unit(Num::Float(5230.0), &conv),
            ("5230".to_string(), "meters".to_string())
        );
        assert_eq!(
            UnitKind::Weight.csv_value_unit(Num::Float(70.25), &conv),
            ("70.2".to_string(), "kg".to_string())
        );
        assert_eq!(
            UnitKind::PercentFraction.csv_value_unit(Num::Float(0.97), &conv),
            ("97".to_string(), "percent".to_string())
        );
    }
}
