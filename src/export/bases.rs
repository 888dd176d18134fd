//! Bases-Markdown serializer
//!
//! Every populated metric becomes a flat frontmatter scalar so external
//! tools can query it as a property; the note body is a short summary plus a
//! `## Notes` placeholder for the user's own text. This is the only
//! serializer that honors frontmatter key remapping and omission.
//!
//! Keys are fixed names carrying the nominal unit (`weight_kg`,
//! `walking_running_km`); under the imperial system the converted value is
//! still written under the same key. Inherited contract, kept for vault
//! compatibility.

use std::collections::BTreeSet;

use crate::profile::{FormattingProfile, FrontmatterConfig};
use crate::types::{valence_percent, HealthDay};
use crate::units::{format_duration, group_thousands};

/// Renders a day as property-rich frontmatter for queryable vaults
pub struct BasesSerializer;

impl BasesSerializer {
    pub fn serialize(day: &HealthDay, profile: &FormattingProfile) -> String {
        let conv = profile.converter();
        let fm = &profile.frontmatter;
        let date_str = profile.date_format.format(day.date);

        let mut lines: Vec<String> = Vec::new();
        lines.push("---".to_string());

        if fm.include_date {
            lines.push(format!("{}: {}", fm.date_key, date_str));
        }
        if fm.include_type {
            lines.push(format!("{}: {}", fm.type_key, fm.type_value));
        }
        for (key, value) in &fm.custom_fields {
            lines.push(format!("{}: {}", key, value));
        }

        let field = |lines: &mut Vec<String>, key: &str, value: String| {
            push_field(lines, fm, key, value);
        };

        // Sleep, as decimal hours
        if day.sleep.has_data() {
            let sleep = &day.sleep;
            for (key, value) in [
                ("sleep_total_hours", sleep.total_duration),
                ("sleep_deep_hours", sleep.deep_sleep),
                ("sleep_rem_hours", sleep.rem_sleep),
                ("sleep_core_hours", sleep.core_sleep),
                ("sleep_awake_hours", sleep.awake_time),
                ("sleep_in_bed_hours", sleep.in_bed_time),
            ] {
                if value > 0.0 {
                    field(&mut lines, key, format!("{:.2}", value / 3600.0));
                }
            }
        }

        // Activity
        if day.activity.has_data() {
            let activity = &day.activity;
            if let Some(steps) = activity.steps {
                field(&mut lines, "steps", steps.to_string());
            }
            if let Some(calories) = activity.active_calories {
                field(&mut lines, "active_calories", (calories as i64).to_string());
            }
            if let Some(basal) = activity.basal_energy_burned {
                field(&mut lines, "basal_calories", (basal as i64).to_string());
            }
            if let Some(exercise) = activity.exercise_minutes {
                field(&mut lines, "exercise_minutes", (exercise as i64).to_string());
            }
            if let Some(stand) = activity.stand_hours {
                field(&mut lines, "stand_hours", stand.to_string());
            }
            if let Some(flights) = activity.flights_climbed {
                field(&mut lines, "flights_climbed", flights.to_string());
            }
            if let Some(distance) = activity.walking_running_distance {
                field(
                    &mut lines,
                    "walking_running_km",
                    format!("{:.2}", conv.convert_distance(distance)),
                );
            }
            if let Some(cycling) = activity.cycling_distance {
                field(
                    &mut lines,
                    "cycling_km",
                    format!("{:.2}", conv.convert_distance(cycling)),
                );
            }
            if let Some(swimming) = activity.swimming_distance {
                field(&mut lines, "swimming_m", (swimming as i64).to_string());
            }
            if let Some(strokes) = activity.swimming_strokes {
                field(&mut lines, "swimming_strokes", strokes.to_string());
            }
            if let Some(pushes) = activity.push_count {
                field(&mut lines, "wheelchair_pushes", pushes.to_string());
            }
        }

        // Heart
        if day.heart.has_data() {
            let heart = &day.heart;
            if let Some(hr) = heart.resting_heart_rate {
                field(&mut lines, "resting_heart_rate", (hr as i64).to_string());
            }
            if let Some(hr) = heart.walking_heart_rate_average {
                field(&mut lines, "walking_heart_rate", (hr as i64).to_string());
            }
            if let Some(hr) = heart.average_heart_rate {
                field(&mut lines, "average_heart_rate", (hr as i64).to_string());
            }
            if let Some(hr) = heart.heart_rate_min {
                field(&mut lines, "heart_rate_min", (hr as i64).to_string());
            }
            if let Some(hr) = heart.heart_rate_max {
                field(&mut lines, "heart_rate_max", (hr as i64).to_string());
            }
            if let Some(hrv) = heart.hrv {
                field(&mut lines, "hrv_ms", format!("{:.1}", hrv));
            }
        }

        // Vitals; averages are duplicated under a bare alias for older vault
        // queries
        if day.vitals.has_data() {
            let vitals = &day.vitals;

            if let Some(avg) = vitals.respiratory_rate_avg {
                field(&mut lines, "respiratory_rate", format!("{:.1}", avg));
                field(&mut lines, "respiratory_rate_avg", format!("{:.1}", avg));
            }
            if let Some(min) = vitals.respiratory_rate_min {
                field(&mut lines, "respiratory_rate_min", format!("{:.1}", min));
            }
            if let Some(max) = vitals.respiratory_rate_max {
                field(&mut lines, "respiratory_rate_max", format!("{:.1}", max));
            }

            if let Some(avg) = vitals.blood_oxygen_avg {
                let pct = ((avg * 100.0) as i64).to_string();
                field(&mut lines, "blood_oxygen", pct.clone());
                field(&mut lines, "blood_oxygen_avg", pct);
            }
            if let Some(min) = vitals.blood_oxygen_min {
                field(&mut lines, "blood_oxygen_min", ((min * 100.0) as i64).to_string());
            }
            if let Some(max) = vitals.blood_oxygen_max {
                field(&mut lines, "blood_oxygen_max", ((max * 100.0) as i64).to_string());
            }

            if let Some(avg) = vitals.body_temperature_avg {
                let converted = format!("{:.1}", conv.convert_temperature(avg));
                field(&mut lines, "body_temperature", converted.clone());
                field(&mut lines, "body_temperature_avg", converted);
            }
            if let Some(min) = vitals.body_temperature_min {
                field(
                    &mut lines,
                    "body_temperature_min",
                    format!("{:.1}", conv.convert_temperature(min)),
                );
            }
            if let Some(max) = vitals.body_temperature_max {
                field(
                    &mut lines,
                    "body_temperature_max",
                    format!("{:.1}", conv.convert_temperature(max)),
                );
            }

            if let Some(avg) = vitals.blood_pressure_systolic_avg {
                let value = (avg as i64).to_string();
                field(&mut lines, "blood_pressure_systolic", value.clone());
                field(&mut lines, "blood_pressure_systolic_avg", value);
            }
            if let Some(min) = vitals.blood_pressure_systolic_min {
                field(&mut lines, "blood_pressure_systolic_min", (min as i64).to_string());
            }
            if let Some(max) = vitals.blood_pressure_systolic_max {
                field(&mut lines, "blood_pressure_systolic_max", (max as i64).to_string());
            }

            if let Some(avg) = vitals.blood_pressure_diastolic_avg {
                let value = (avg as i64).to_string();
                field(&mut lines, "blood_pressure_diastolic", value.clone());
                field(&mut lines, "blood_pressure_diastolic_avg", value);
            }
            if let Some(min) = vitals.blood_pressure_diastolic_min {
                field(&mut lines, "blood_pressure_diastolic_min", (min as i64).to_string());
            }
            if let Some(max) = vitals.blood_pressure_diastolic_max {
                field(&mut lines, "blood_pressure_diastolic_max", (max as i64).to_string());
            }

            if let Some(avg) = vitals.blood_glucose_avg {
                let value = format!("{:.1}", avg);
                field(&mut lines, "blood_glucose", value.clone());
                field(&mut lines, "blood_glucose_avg", value);
            }
            if let Some(min) = vitals.blood_glucose_min {
                field(&mut lines, "blood_glucose_min", format!("{:.1}", min));
            }
            if let Some(max) = vitals.blood_glucose_max {
                field(&mut lines, "blood_glucose_max", format!("{:.1}", max));
            }
        }

        // Body
        if day.body.has_data() {
            let body = &day.body;
            if let Some(weight) = body.weight {
                field(&mut lines, "weight_kg", format!("{:.1}", conv.convert_weight(weight)));
            }
            if let Some(height) = body.height {
                field(&mut lines, "height_m", format!("{:.2}", conv.convert_height(height)));
            }
            if let Some(bmi) = body.bmi {
                field(&mut lines, "bmi", format!("{:.1}", bmi));
            }
            if let Some(fat) = body.body_fat_percentage {
                field(&mut lines, "body_fat_percent", format!("{:.1}", fat * 100.0));
            }
            if let Some(lean) = body.lean_body_mass {
                field(
                    &mut lines,
                    "lean_body_mass_kg",
                    format!("{:.1}", conv.convert_weight(lean)),
                );
            }
            if let Some(waist) = body.waist_circumference {
                field(
                    &mut lines,
                    "waist_circumference_cm",
                    format!("{:.1}", conv.convert_length(waist)),
                );
            }
        }

        // Nutrition
        if day.nutrition.has_data() {
            let nutrition = &day.nutrition;
            if let Some(energy) = nutrition.dietary_energy {
                field(&mut lines, "dietary_calories", (energy as i64).to_string());
            }
            if let Some(protein) = nutrition.protein {
                field(&mut lines, "protein_g", format!("{:.1}", protein));
            }
            if let Some(carbs) = nutrition.carbohydrates {
                field(&mut lines, "carbohydrates_g", format!("{:.1}", carbs));
            }
            if let Some(fat) = nutrition.fat {
                field(&mut lines, "fat_g", format!("{:.1}", fat));
            }
            if let Some(saturated) = nutrition.saturated_fat {
                field(&mut lines, "saturated_fat_g", format!("{:.1}", saturated));
            }
            if let Some(fiber) = nutrition.fiber {
                field(&mut lines, "fiber_g", format!("{:.1}", fiber));
            }
            if let Some(sugar) = nutrition.sugar {
                field(&mut lines, "sugar_g", format!("{:.1}", sugar));
            }
            if let Some(sodium) = nutrition.sodium {
                field(&mut lines, "sodium_mg", (sodium as i64).to_string());
            }
            if let Some(cholesterol) = nutrition.cholesterol {
                field(&mut lines, "cholesterol_mg", format!("{:.1}", cholesterol));
            }
            if let Some(water) = nutrition.water {
                field(&mut lines, "water_l", format!("{:.2}", conv.convert_volume(water)));
            }
            if let Some(caffeine) = nutrition.caffeine {
                field(&mut lines, "caffeine_mg", format!("{:.1}", caffeine));
            }
        }

        // Mindfulness
        if day.mindfulness.has_data() {
            let mindfulness = &day.mindfulness;
            if let Some(minutes) = mindfulness.mindful_minutes {
                field(&mut lines, "mindful_minutes", (minutes as i64).to_string());
            }
            if let Some(sessions) = mindfulness.mindful_sessions {
                field(&mut lines, "mindful_sessions", sessions.to_string());
            }

            if !mindfulness.state_of_mind.is_empty() {
                field(
                    &mut lines,
                    "mood_entries",
                    mindfulness.state_of_mind.len().to_string(),
                );

                if let Some(avg) = mindfulness.average_valence() {
                    field(&mut lines, "average_mood_valence", format!("{:.2}", avg));
                    field(&mut lines, "average_mood_percent", valence_percent(avg).to_string());
                }

                let daily = mindfulness.daily_moods();
                if !daily.is_empty() {
                    field(&mut lines, "daily_mood_count", daily.len().to_string());
                    if let Some(avg) = mindfulness.average_daily_mood_valence() {
                        field(&mut lines, "daily_mood_percent", valence_percent(avg).to_string());
                    }
                }

                let momentary = mindfulness.momentary_emotions();
                if !momentary.is_empty() {
                    field(&mut lines, "momentary_emotion_count", momentary.len().to_string());
                }

                let labels = mindfulness.all_labels();
                if !labels.is_empty() {
                    field(&mut lines, "mood_labels", tag_list(labels.iter()));
                }
                let associations = mindfulness.all_associations();
                if !associations.is_empty() {
                    field(&mut lines, "mood_associations", tag_list(associations.iter()));
                }
            }
        }

        // Mobility
        if day.mobility.has_data() {
            let mobility = &day.mobility;
            if let Some(speed) = mobility.walking_speed {
                field(&mut lines, "walking_speed", format!("{:.2}", speed));
            }
            if let Some(step_length) = mobility.walking_step_length {
                field(&mut lines, "step_length_cm", format!("{:.1}", step_length * 100.0));
            }
            if let Some(double_support) = mobility.walking_double_support_percentage {
                field(
                    &mut lines,
                    "double_support_percent",
                    format!("{:.1}", double_support * 100.0),
                );
            }
            if let Some(asymmetry) = mobility.walking_asymmetry_percentage {
                field(
                    &mut lines,
                    "walking_asymmetry_percent",
                    format!("{:.1}", asymmetry * 100.0),
                );
            }
            if let Some(ascent) = mobility.stair_ascent_speed {
                field(&mut lines, "stair_ascent_speed", format!("{:.2}", ascent));
            }
            if let Some(descent) = mobility.stair_descent_speed {
                field(&mut lines, "stair_descent_speed", format!("{:.2}", descent));
            }
            if let Some(six_min) = mobility.six_minute_walk_distance {
                field(&mut lines, "six_min_walk_m", (six_min as i64).to_string());
            }
        }

        // Hearing
        if day.hearing.has_data() {
            let hearing = &day.hearing;
            if let Some(headphone) = hearing.headphone_audio_level {
                field(&mut lines, "headphone_audio_db", format!("{:.1}", headphone));
            }
            if let Some(environmental) = hearing.environmental_sound_level {
                field(&mut lines, "environmental_sound_db", format!("{:.1}", environmental));
            }
        }

        // Workouts collapse to aggregate scalars
        if !day.workouts.is_empty() {
            field(&mut lines, "workout_count", day.workouts.len().to_string());

            let total_duration: f64 = day.workouts.iter().map(|w| w.duration).sum();
            field(
                &mut lines,
                "workout_minutes",
                ((total_duration / 60.0) as i64).to_string(),
            );

            let total_calories: f64 = day.workouts.iter().filter_map(|w| w.calories).sum();
            if total_calories > 0.0 {
                field(&mut lines, "workout_calories", (total_calories as i64).to_string());
            }

            let total_distance: f64 = day.workouts.iter().filter_map(|w| w.distance).sum();
            if total_distance > 0.0 {
                field(
                    &mut lines,
                    "workout_distance_km",
                    format!("{:.2}", conv.convert_distance(total_distance)),
                );
            }

            let types: BTreeSet<String> =
                day.workouts.iter().map(|w| w.workout_type.tag()).collect();
            field(
                &mut lines,
                "workouts",
                format!("[{}]", types.into_iter().collect::<Vec<_>>().join(", ")),
            );
        }

        lines.push("---".to_string());

        // Note body: title, summary line, notes placeholder
        lines.push(format!("# Health — {}", date_str));

        let mut summary: Vec<String> = Vec::new();
        if day.sleep.total_duration > 0.0 {
            summary.push(format!("{} sleep", format_duration(day.sleep.total_duration)));
        }
        if let Some(steps) = day.activity.steps {
            summary.push(format!("{} steps", group_thousands(steps as i64)));
        }
        if let Some(calories) = day.nutrition.dietary_energy {
            summary.push(format!("{} kcal", calories as i64));
        }
        if let Some(minutes) = day.mindfulness.mindful_minutes {
            if minutes > 0.0 {
                summary.push(format!("{} mindful min", minutes as i64));
            }
        }
        if let Some(avg) = day.mindfulness.average_valence() {
            summary.push(format!("mood: {}%", valence_percent(avg)));
        }
        if !day.workouts.is_empty() {
            let n = day.workouts.len();
            let plural = if n > 1 { "s" } else { "" };
            let types: BTreeSet<&str> = day.workouts.iter().map(|w| w.workout_type.name()).collect();
            // Name the type when the whole day was one kind of workout
            summary.push(match (types.len(), types.iter().next()) {
                (1, Some(type_name)) => {
                    format!("{} {} workout{}", n, type_name.to_lowercase(), plural)
                }
                _ => format!("{} workout{}", n, plural),
            });
        }

        if !summary.is_empty() {
            lines.push(String::new());
            lines.push(summary.join(" · "));
        }

        // The Notes heading is a stable anchor for user annotations; always
        // emitted, never followed by generated content.
        lines.push(String::new());
        lines.push("## Notes".to_string());
        lines.push(String::new());

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}

fn push_field(lines: &mut Vec<String>, fm: &FrontmatterConfig, key: &str, value: String) {
    if let Some(output_key) = fm.output_key(key) {
        lines.push(format!("{}: {}", output_key, value));
    }
}

/// Lowercase, hyphenated, bracket-free tag from a label
fn tag_list<'a>(items: impl Iterator<Item = &'a String>) -> String {
    let tags: Vec<String> = items
        .map(|s| s.to_lowercase().replace(' ', "-"))
        .collect();
    format!("[{}]", tags.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    use crate::profile::KeyOverride;
    use crate::types::{StateOfMindEntry, StateOfMindKind};
    use crate::units::UnitSystem;
    use crate::workout::{WorkoutRecord, WorkoutType};

    fn make_test_day() -> HealthDay {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.sleep.total_duration = 30600.0;
        day.activity.steps = Some(8432);
        day.body.weight = Some(70.5);
        day
    }

    fn make_workout(workout_type: WorkoutType, calories: Option<f64>, distance: Option<f64>) -> WorkoutRecord {
        WorkoutRecord {
            id: Uuid::new_v4(),
            workout_type,
            start_time: Utc.with_ymd_and_hms(2026, 1, 13, 7, 15, 0).unwrap(),
            duration: 2700.0,
            calories,
            distance,
        }
    }

    #[test]
    fn test_scalars_in_frontmatter() {
        let day = make_test_day();
        let output = BasesSerializer::serialize(&day, &FormattingProfile::default());

        assert!(output.starts_with("---\ndate: 2026-01-13\ntype: health-data\n"));
        assert!(output.contains("sleep_total_hours: 8.50"));
        assert!(output.contains("steps: 8432"));
        assert!(output.contains("weight_kg: 70.5"));
        assert!(output.contains("# Health — 2026-01-13"));
        assert!(output.contains("8h 30m sleep · 8,432 steps"));
        assert!(output.ends_with("## Notes\n\n"));
    }

    #[test]
    fn test_key_remap_and_omit() {
        let day = make_test_day();
        let mut profile = FormattingProfile::default();
        profile
            .frontmatter
            .key_overrides
            .insert("steps".to_string(), KeyOverride::Rename("step_count".to_string()));
        profile
            .frontmatter
            .key_overrides
            .insert("weight_kg".to_string(), KeyOverride::Omit);

        let output = BasesSerializer::serialize(&day, &profile);
        assert!(output.contains("step_count: 8432"));
        assert!(!output.contains("steps: 8432"));
        assert!(!output.contains("weight_kg"));
    }

    #[test]
    fn test_percent_fractions_scaled() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.body.body_fat_percentage = Some(0.225);
        day.vitals.blood_oxygen_avg = Some(0.97);
        day.mobility.walking_double_support_percentage = Some(0.29);

        let output = BasesSerializer::serialize(&day, &FormattingProfile::default());
        assert!(output.contains("body_fat_percent: 22.5"));
        assert!(output.contains("blood_oxygen: 97"));
        assert!(output.contains("blood_oxygen_avg: 97"));
        assert!(output.contains("double_support_percent: 29.0"));
    }

    #[test]
    fn test_mood_tags_lowercased_and_sorted() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.mindfulness.state_of_mind = vec![StateOfMindEntry {
            id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 13, 14, 30, 0).unwrap(),
            kind: StateOfMindKind::DailyMood,
            valence: 0.5,
            labels: vec!["Very Happy".to_string(), "Calm".to_string()],
            associations: vec!["Work".to_string()],
        }];

        let output = BasesSerializer::serialize(&day, &FormattingProfile::default());
        assert!(output.contains("mood_entries: 1"));
        assert!(output.contains("average_mood_valence: 0.50"));
        assert!(output.contains("average_mood_percent: 75"));
        assert!(output.contains("daily_mood_count: 1"));
        assert!(output.contains("mood_labels: [calm, very-happy]"));
        assert!(output.contains("mood_associations: [work]"));
    }

    #[test]
    fn test_workout_aggregates() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.workouts.push(make_workout(WorkoutType::Running, Some(320.0), Some(5230.0)));
        day.workouts.push(make_workout(WorkoutType::Running, Some(280.0), Some(4100.0)));

        let output = BasesSerializer::serialize(&day, &FormattingProfile::default());
        assert!(output.contains("workout_count: 2"));
        assert!(output.contains("workout_minutes: 90"));
        assert!(output.contains("workout_calories: 600"));
        assert!(output.contains("workout_distance_km: 9.33"));
        assert!(output.contains("workouts: [running]"));
        assert!(output.contains("2 running workouts"));
    }

    #[test]
    fn test_workouts_without_calories_skip_total() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.workouts.push(make_workout(WorkoutType::Yoga, None, None));

        let output = BasesSerializer::serialize(&day, &FormattingProfile::default());
        assert!(output.contains("workout_count: 1"));
        assert!(!output.contains("workout_calories"));
        assert!(!output.contains("workout_distance_km"));
        assert!(output.contains("1 yoga workout\n"));
    }

    #[test]
    fn test_imperial_values_under_fixed_keys() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.body.weight = Some(70.0);
        day.activity.walking_running_distance = Some(1609.34);

        let mut profile = FormattingProfile::default();
        profile.unit_system = UnitSystem::Imperial;

        let output = BasesSerializer::serialize(&day, &profile);
        // Keys keep their nominal unit even when the value is converted
        assert!(output.contains("weight_kg: 154.3"));
        assert!(output.contains("walking_running_km: 1.00"));
    }

    #[test]
    fn test_notes_heading_always_emitted() {
        let day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        let output = BasesSerializer::serialize(&day, &FormattingProfile::default());
        assert!(output.contains("## Notes"));
        let a = BasesSerializer::serialize(&day, &FormattingProfile::default());
        assert_eq!(a, output);
    }
}
