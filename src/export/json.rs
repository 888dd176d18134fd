//! JSON serializer
//!
//! Machine-readable export: base-unit numerics plus pre-formatted string and
//! percent-scaled duplicates. The duplicates are a compatibility contract;
//! consumers may rely on either representation, so none are deduplicated.
//! Keys print sorted (serde_json's default map), which keeps output
//! deterministic.

use serde_json::{json, Map, Value};

use crate::profile::FormattingProfile;
use crate::types::{valence_percent, HealthDay};
use crate::units::format_duration;
use crate::EXPORT_TYPE;

/// Renders a day as pretty-printed JSON
pub struct JsonSerializer;

impl JsonSerializer {
    pub fn serialize(day: &HealthDay, profile: &FormattingProfile) -> String {
        let conv = profile.converter();
        let mut root = Map::new();

        root.insert("date".to_string(), json!(profile.date_format.format(day.date)));
        root.insert("type".to_string(), json!(EXPORT_TYPE));
        root.insert("units".to_string(), json!(profile.unit_system.as_str()));

        // Sleep
        if day.sleep.has_data() {
            let sleep = &day.sleep;
            let mut object = Map::new();
            for (key, value) in [
                ("totalDuration", sleep.total_duration),
                ("deepSleep", sleep.deep_sleep),
                ("remSleep", sleep.rem_sleep),
                ("coreSleep", sleep.core_sleep),
                ("awakeTime", sleep.awake_time),
                ("inBedTime", sleep.in_bed_time),
            ] {
                if value > 0.0 {
                    object.insert(key.to_string(), json!(value));
                    object.insert(format!("{}Formatted", key), json!(format_duration(value)));
                }
            }
            root.insert("sleep".to_string(), Value::Object(object));
        }

        // Activity
        if day.activity.has_data() {
            let activity = &day.activity;
            let mut object = Map::new();
            if let Some(steps) = activity.steps {
                object.insert("steps".to_string(), json!(steps));
            }
            if let Some(calories) = activity.active_calories {
                object.insert("activeCalories".to_string(), json!(calories));
            }
            if let Some(basal) = activity.basal_energy_burned {
                object.insert("basalEnergyBurned".to_string(), json!(basal));
            }
            if let Some(exercise) = activity.exercise_minutes {
                object.insert("exerciseMinutes".to_string(), json!(exercise));
            }
            if let Some(stand) = activity.stand_hours {
                object.insert("standHours".to_string(), json!(stand));
            }
            if let Some(flights) = activity.flights_climbed {
                object.insert("flightsClimbed".to_string(), json!(flights));
            }
            if let Some(distance) = activity.walking_running_distance {
                object.insert("walkingRunningDistance".to_string(), json!(distance));
                object.insert("walkingRunningDistanceKm".to_string(), json!(distance / 1000.0));
            }
            if let Some(cycling) = activity.cycling_distance {
                object.insert("cyclingDistance".to_string(), json!(cycling));
                object.insert("cyclingDistanceKm".to_string(), json!(cycling / 1000.0));
            }
            if let Some(swimming) = activity.swimming_distance {
                object.insert("swimmingDistance".to_string(), json!(swimming));
            }
            if let Some(strokes) = activity.swimming_strokes {
                object.insert("swimmingStrokes".to_string(), json!(strokes));
            }
            if let Some(pushes) = activity.push_count {
                object.insert("pushCount".to_string(), json!(pushes));
            }
            root.insert("activity".to_string(), Value::Object(object));
        }

        // Heart
        if day.heart.has_data() {
            let heart = &day.heart;
            let mut object = Map::new();
            if let Some(hr) = heart.resting_heart_rate {
                object.insert("restingHeartRate".to_string(), json!(hr));
            }
            if let Some(hr) = heart.walking_heart_rate_average {
                object.insert("walkingHeartRateAverage".to_string(), json!(hr));
            }
            if let Some(hr) = heart.average_heart_rate {
                object.insert("averageHeartRate".to_string(), json!(hr));
            }
            if let Some(hr) = heart.heart_rate_min {
                object.insert("heartRateMin".to_string(), json!(hr));
            }
            if let Some(hr) = heart.heart_rate_max {
                object.insert("heartRateMax".to_string(), json!(hr));
            }
            if let Some(hrv) = heart.hrv {
                object.insert("hrv".to_string(), json!(hrv));
            }
            root.insert("heart".to_string(), Value::Object(object));
        }

        // Vitals; averages carry a bare backward-compatibility alias, blood
        // oxygen additionally a percent-scaled duplicate
        if day.vitals.has_data() {
            let vitals = &day.vitals;
            let mut object = Map::new();

            if let Some(avg) = vitals.respiratory_rate_avg {
                object.insert("respiratoryRateAvg".to_string(), json!(avg));
                object.insert("respiratoryRate".to_string(), json!(avg));
            }
            if let Some(min) = vitals.respiratory_rate_min {
                object.insert("respiratoryRateMin".to_string(), json!(min));
            }
            if let Some(max) = vitals.respiratory_rate_max {
                object.insert("respiratoryRateMax".to_string(), json!(max));
            }

            if let Some(avg) = vitals.blood_oxygen_avg {
                object.insert("bloodOxygenAvg".to_string(), json!(avg));
                object.insert("bloodOxygen".to_string(), json!(avg));
                object.insert("bloodOxygenPercent".to_string(), json!(avg * 100.0));
            }
            if let Some(min) = vitals.blood_oxygen_min {
                object.insert("bloodOxygenMin".to_string(), json!(min));
                object.insert("bloodOxygenMinPercent".to_string(), json!(min * 100.0));
            }
            if let Some(max) = vitals.blood_oxygen_max {
                object.insert("bloodOxygenMax".to_string(), json!(max));
                object.insert("bloodOxygenMaxPercent".to_string(), json!(max * 100.0));
            }

            if let Some(avg) = vitals.body_temperature_avg {
                object.insert("bodyTemperatureAvg".to_string(), json!(avg));
                object.insert("bodyTemperature".to_string(), json!(avg));
            }
            if let Some(min) = vitals.body_temperature_min {
                object.insert("bodyTemperatureMin".to_string(), json!(min));
            }
            if let Some(max) = vitals.body_temperature_max {
                object.insert("bodyTemperatureMax".to_string(), json!(max));
            }

            if let Some(avg) = vitals.blood_pressure_systolic_avg {
                object.insert("bloodPressureSystolicAvg".to_string(), json!(avg));
                object.insert("bloodPressureSystolic".to_string(), json!(avg));
            }
            if let Some(min) = vitals.blood_pressure_systolic_min {
                object.insert("bloodPressureSystolicMin".to_string(), json!(min));
            }
            if let Some(max) = vitals.blood_pressure_systolic_max {
                object.insert("bloodPressureSystolicMax".to_string(), json!(max));
            }

            if let Some(avg) = vitals.blood_pressure_diastolic_avg {
                object.insert("bloodPressureDiastolicAvg".to_string(), json!(avg));
                object.insert("bloodPressureDiastolic".to_string(), json!(avg));
            }
            if let Some(min) = vitals.blood_pressure_diastolic_min {
                object.insert("bloodPressureDiastolicMin".to_string(), json!(min));
            }
            if let Some(max) = vitals.blood_pressure_diastolic_max {
                object.insert("bloodPressureDiastolicMax".to_string(), json!(max));
            }

            if let Some(avg) = vitals.blood_glucose_avg {
                object.insert("bloodGlucoseAvg".to_string(), json!(avg));
                object.insert("bloodGlucose".to_string(), json!(avg));
            }
            if let Some(min) = vitals.blood_glucose_min {
                object.insert("bloodGlucoseMin".to_string(), json!(min));
            }
            if let Some(max) = vitals.blood_glucose_max {
                object.insert("bloodGlucoseMax".to_string(), json!(max));
            }

            root.insert("vitals".to_string(), Value::Object(object));
        }

        // Body
        if day.body.has_data() {
            let body = &day.body;
            let mut object = Map::new();
            if let Some(weight) = body.weight {
                object.insert("weight".to_string(), json!(weight));
            }
            if let Some(height) = body.height {
                object.insert("height".to_string(), json!(height));
            }
            if let Some(bmi) = body.bmi {
                object.insert("bmi".to_string(), json!(bmi));
            }
            if let Some(fat) = body.body_fat_percentage {
                object.insert("bodyFatPercentage".to_string(), json!(fat));
                object.insert("bodyFatPercent".to_string(), json!(fat * 100.0));
            }
            if let Some(lean) = body.lean_body_mass {
                object.insert("leanBodyMass".to_string(), json!(lean));
            }
            if let Some(waist) = body.waist_circumference {
                // Centimeters, unlike the other body fields
                object.insert("waistCircumference".to_string(), json!(waist * 100.0));
            }
            root.insert("body".to_string(), Value::Object(object));
        }

        // Nutrition
        if day.nutrition.has_data() {
            let nutrition = &day.nutrition;
            let mut object = Map::new();
            for (key, value) in [
                ("dietaryEnergy", nutrition.dietary_energy),
                ("protein", nutrition.protein),
                ("carbohydrates", nutrition.carbohydrates),
                ("fat", nutrition.fat),
                ("saturatedFat", nutrition.saturated_fat),
                ("fiber", nutrition.fiber),
                ("sugar", nutrition.sugar),
                ("sodium", nutrition.sodium),
                ("cholesterol", nutrition.cholesterol),
                ("water", nutrition.water),
                ("caffeine", nutrition.caffeine),
            ] {
                if let Some(v) = value {
                    object.insert(key.to_string(), json!(v));
                }
            }
            root.insert("nutrition".to_string(), Value::Object(object));
        }

        // Mindfulness
        if day.mindfulness.has_data() {
            let mindfulness = &day.mindfulness;
            let mut object = Map::new();
            if let Some(minutes) = mindfulness.mindful_minutes {
                object.insert("mindfulMinutes".to_string(), json!(minutes));
            }
            if let Some(sessions) = mindfulness.mindful_sessions {
                object.insert("mindfulSessions".to_string(), json!(sessions));
            }

            if !mindfulness.state_of_mind.is_empty() {
                object.insert(
                    "stateOfMindCount".to_string(),
                    json!(mindfulness.state_of_mind.len()),
                );

                if let Some(avg) = mindfulness.average_valence() {
                    object.insert("averageValence".to_string(), json!(avg));
                    object.insert("averageValencePercent".to_string(), json!(valence_percent(avg)));
                }

                let daily = mindfulness.daily_moods();
                if !daily.is_empty() {
                    object.insert("dailyMoodCount".to_string(), json!(daily.len()));
                    if let Some(avg) = mindfulness.average_daily_mood_valence() {
                        object.insert("averageDailyMoodValence".to_string(), json!(avg));
                    }
                }

                let momentary = mindfulness.momentary_emotions();
                if !momentary.is_empty() {
                    object.insert("momentaryEmotionCount".to_string(), json!(momentary.len()));
                }

                let labels = mindfulness.all_labels();
                if !labels.is_empty() {
                    object.insert("emotionLabels".to_string(), json!(labels));
                }
                let associations = mindfulness.all_associations();
                if !associations.is_empty() {
                    object.insert("associations".to_string(), json!(associations));
                }

                let entries: Vec<Value> = mindfulness
                    .state_of_mind
                    .iter()
                    .map(|entry| {
                        let mut e = Map::new();
                        e.insert(
                            "timestamp".to_string(),
                            json!(profile.time_format.format(entry.timestamp)),
                        );
                        e.insert("kind".to_string(), json!(entry.kind.display_name()));
                        e.insert("valence".to_string(), json!(entry.valence));
                        e.insert("valencePercent".to_string(), json!(entry.valence_percent()));
                        e.insert(
                            "valenceDescription".to_string(),
                            json!(entry.valence_description()),
                        );
                        if !entry.labels.is_empty() {
                            e.insert("labels".to_string(), json!(entry.labels));
                        }
                        if !entry.associations.is_empty() {
                            e.insert("associations".to_string(), json!(entry.associations));
                        }
                        Value::Object(e)
                    })
                    .collect();
                object.insert("stateOfMindEntries".to_string(), Value::Array(entries));
            }

            root.insert("mindfulness".to_string(), Value::Object(object));
        }

        // Mobility
        if day.mobility.has_data() {
            let mobility = &day.mobility;
            let mut object = Map::new();
            for (key, value) in [
                ("walkingSpeed", mobility.walking_speed),
                ("walkingStepLength", mobility.walking_step_length),
                (
                    "walkingDoubleSupportPercentage",
                    mobility.walking_double_support_percentage,
                ),
                ("walkingAsymmetryPercentage", mobility.walking_asymmetry_percentage),
                ("stairAscentSpeed", mobility.stair_ascent_speed),
                ("stairDescentSpeed", mobility.stair_descent_speed),
                ("sixMinuteWalkDistance", mobility.six_minute_walk_distance),
            ] {
                if let Some(v) = value {
                    object.insert(key.to_string(), json!(v));
                }
            }
            root.insert("mobility".to_string(), Value::Object(object));
        }

        // Hearing
        if day.hearing.has_data() {
            let hearing = &day.hearing;
            let mut object = Map::new();
            if let Some(headphone) = hearing.headphone_audio_level {
                object.insert("headphoneAudioLevel".to_string(), json!(headphone));
            }
            if let Some(environmental) = hearing.environmental_sound_level {
                object.insert("environmentalSoundLevel".to_string(), json!(environmental));
            }
            root.insert("hearing".to_string(), Value::Object(object));
        }

        // Workouts
        if !day.workouts.is_empty() {
            let workouts: Vec<Value> = day
                .workouts
                .iter()
                .map(|workout| {
                    let mut w = Map::new();
                    w.insert("type".to_string(), json!(workout.workout_type.name()));
                    w.insert(
                        "startTime".to_string(),
                        json!(profile.time_format.format(workout.start_time)),
                    );
                    w.insert("duration".to_string(), json!(workout.duration));
                    w.insert(
                        "durationFormatted".to_string(),
                        json!(format_duration(workout.duration)),
                    );
                    if let Some(distance) = workout.distance {
                        if distance > 0.0 {
                            w.insert("distance".to_string(), json!(distance));
                            w.insert(
                                "distanceFormatted".to_string(),
                                json!(conv.format_distance(distance)),
                            );
                        }
                    }
                    if let Some(calories) = workout.calories {
                        if calories > 0.0 {
                            w.insert("calories".to_string(), json!(calories));
                        }
                    }
                    Value::Object(w)
                })
                .collect();
            root.insert("workouts".to_string(), Value::Array(workouts));
        }

        // Pretty-printing a value tree does not fail for well-formed input;
        // recover with an empty object rather than propagating
        serde_json::to_string_pretty(&Value::Object(root)).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    use crate::types::{StateOfMindEntry, StateOfMindKind};
    use crate::workout::{WorkoutRecord, WorkoutType};

    fn parse(output: &str) -> Value {
        serde_json::from_str(output).expect("export must be valid JSON")
    }

    fn make_test_day() -> HealthDay {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.sleep.total_duration = 30600.0;
        day.activity.steps = Some(8432);
        day
    }

    #[test]
    fn test_top_level_keys() {
        let output = JsonSerializer::serialize(&make_test_day(), &FormattingProfile::default());
        let value = parse(&output);
        assert_eq!(value["date"], "2026-01-13");
        assert_eq!(value["type"], "health-data");
        assert_eq!(value["units"], "metric");
    }

    #[test]
    fn test_absent_categories_omitted() {
        let output = JsonSerializer::serialize(&make_test_day(), &FormattingProfile::default());
        let value = parse(&output);
        assert!(value.get("sleep").is_some());
        assert!(value.get("activity").is_some());
        assert!(value.get("heart").is_none());
        assert!(value.get("vitals").is_none());
        assert!(value.get("workouts").is_none());
    }

    #[test]
    fn test_base_units_with_formatted_duplicates() {
        let output = JsonSerializer::serialize(&make_test_day(), &FormattingProfile::default());
        let value = parse(&output);
        assert_eq!(value["sleep"]["totalDuration"], 30600.0);
        assert_eq!(value["sleep"]["totalDurationFormatted"], "8h 30m");
        assert_eq!(value["activity"]["steps"], 8432);
    }

    #[test]
    fn test_blood_oxygen_fraction_and_percent() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.vitals.blood_oxygen_avg = Some(0.97);
        day.vitals.blood_oxygen_min = Some(0.95);
        day.vitals.blood_oxygen_max = Some(0.99);

        let output = JsonSerializer::serialize(&day, &FormattingProfile::default());
        let value = parse(&output);
        let vitals = &value["vitals"];
        assert_eq!(vitals["bloodOxygenAvg"], 0.97);
        assert_eq!(vitals["bloodOxygen"], 0.97);
        assert_eq!(vitals["bloodOxygenPercent"], 97.0);
        assert_eq!(vitals["bloodOxygenMinPercent"], 95.0);
    }

    #[test]
    fn test_distance_km_duplicates() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.activity.walking_running_distance = Some(5230.0);
        day.activity.swimming_distance = Some(800.0);

        let output = JsonSerializer::serialize(&day, &FormattingProfile::default());
        let value = parse(&output);
        assert_eq!(value["activity"]["walkingRunningDistance"], 5230.0);
        assert_eq!(value["activity"]["walkingRunningDistanceKm"], 5.23);
        // Swimming distance has no km duplicate
        assert_eq!(value["activity"]["swimmingDistance"], 800.0);
        assert!(value["activity"].get("swimmingDistanceKm").is_none());
    }

    #[test]
    fn test_waist_emitted_in_centimeters() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.body.waist_circumference = Some(0.82);

        let output = JsonSerializer::serialize(&day, &FormattingProfile::default());
        let value = parse(&output);
        assert_eq!(value["body"]["waistCircumference"], 82.0);
    }

    #[test]
    fn test_state_of_mind_entries() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.mindfulness.state_of_mind = vec![StateOfMindEntry {
            id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 13, 14, 30, 0).unwrap(),
            kind: StateOfMindKind::MomentaryEmotion,
            valence: 0.75,
            labels: vec!["Happy".to_string()],
            associations: vec![],
        }];

        let output = JsonSerializer::serialize(&day, &FormattingProfile::default());
        let value = parse(&output);
        let m = &value["mindfulness"];
        assert_eq!(m["stateOfMindCount"], 1);
        assert_eq!(m["averageValence"], 0.75);
        assert_eq!(m["averageValencePercent"], 87);
        let entry = &m["stateOfMindEntries"][0];
        assert_eq!(entry["timestamp"], "2:30 PM");
        assert_eq!(entry["kind"], "Momentary Emotion");
        assert_eq!(entry["valencePercent"], 87);
        assert_eq!(entry["valenceDescription"], "Very Pleasant");
        assert_eq!(entry["labels"][0], "Happy");
        assert!(entry.get("associations").is_none());
    }

    #[test]
    fn test_empty_mindfulness_has_no_average() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.mindfulness.mindful_minutes = Some(10.0);

        let output = JsonSerializer::serialize(&day, &FormattingProfile::default());
        let value = parse(&output);
        assert!(value["mindfulness"].get("averageValence").is_none());
        assert!(value["mindfulness"].get("stateOfMindEntries").is_none());
    }

    #[test]
    fn test_workout_array_preserves_order() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        for (workout_type, hour) in [(WorkoutType::Running, 7), (WorkoutType::Yoga, 18)] {
            day.workouts.push(WorkoutRecord {
                id: Uuid::new_v4(),
                workout_type,
                start_time: Utc.with_ymd_and_hms(2026, 1, 13, hour, 0, 0).unwrap(),
                duration: 2700.0,
                calories: Some(300.0),
                distance: None,
            });
        }

        let output = JsonSerializer::serialize(&day, &FormattingProfile::default());
        let value = parse(&output);
        assert_eq!(value["workouts"][0]["type"], "Running");
        assert_eq!(value["workouts"][1]["type"], "Yoga");
        assert_eq!(value["workouts"][0]["durationFormatted"], "45m");
        assert!(value["workouts"][0].get("distance").is_none());
    }

    #[test]
    fn test_pretty_printed_and_deterministic() {
        let day = make_test_day();
        let a = JsonSerializer::serialize(&day, &FormattingProfile::default());
        let b = JsonSerializer::serialize(&day, &FormattingProfile::default());
        assert_eq!(a, b);
        assert!(a.contains("\n  \"date\""));
    }
}
