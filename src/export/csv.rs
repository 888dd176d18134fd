//! CSV serializer
//!
//! Long-format table: header `Date,Category,Metric,Value,Unit`, one row per
//! populated metric, the unit in the trailing column. Label and association
//! lists collapse into a single quoted cell with `;`-joined values; embedded
//! commas are replaced with semicolons first. That replacement is lossy and
//! deliberate, matching what historical consumers already parse.

use crate::fields::{self, Metric};
use crate::profile::FormattingProfile;
use crate::types::{valence_percent, HealthDay};
use crate::units::UnitConverter;

/// Renders a day as five-column CSV
pub struct CsvSerializer;

impl CsvSerializer {
    pub fn serialize(day: &HealthDay, profile: &FormattingProfile) -> String {
        let conv = profile.converter();
        let date_str = profile.date_format.format(day.date);

        let mut rows: Vec<String> = Vec::new();
        rows.push("Date,Category,Metric,Value,Unit".to_string());

        push_category(&mut rows, &date_str, "Sleep", fields::SLEEP_METRICS, &day.sleep, &conv);
        push_category(
            &mut rows,
            &date_str,
            "Activity",
            fields::ACTIVITY_METRICS,
            &day.activity,
            &conv,
        );
        push_category(&mut rows, &date_str, "Heart", fields::HEART_METRICS, &day.heart, &conv);

        // Vitals rows carry the avg/min/max split in the metric name
        if day.vitals.has_data() {
            let vitals = &day.vitals;
            let mut vital = |metric: &str, value: String, unit: &str| {
                rows.push(row(&date_str, "Vitals", metric, &value, unit));
            };

            for (name, value) in [
                ("Respiratory Rate Avg", vitals.respiratory_rate_avg),
                ("Respiratory Rate Min", vitals.respiratory_rate_min),
                ("Respiratory Rate Max", vitals.respiratory_rate_max),
            ] {
                if let Some(v) = value {
                    vital(name, v.to_string(), "breaths/min");
                }
            }
            for (name, value) in [
                ("Blood Oxygen Avg", vitals.blood_oxygen_avg),
                ("Blood Oxygen Min", vitals.blood_oxygen_min),
                ("Blood Oxygen Max", vitals.blood_oxygen_max),
            ] {
                if let Some(v) = value {
                    vital(name, (v * 100.0).to_string(), "percent");
                }
            }
            for (name, value) in [
                ("Body Temperature Avg", vitals.body_temperature_avg),
                ("Body Temperature Min", vitals.body_temperature_min),
                ("Body Temperature Max", vitals.body_temperature_max),
            ] {
                if let Some(v) = value {
                    vital(
                        name,
                        format!("{:.1}", conv.convert_temperature(v)),
                        conv.temperature_unit(),
                    );
                }
            }
            for (name, value) in [
                ("Blood Pressure Systolic Avg", vitals.blood_pressure_systolic_avg),
                ("Blood Pressure Systolic Min", vitals.blood_pressure_systolic_min),
                ("Blood Pressure Systolic Max", vitals.blood_pressure_systolic_max),
                ("Blood Pressure Diastolic Avg", vitals.blood_pressure_diastolic_avg),
                ("Blood Pressure Diastolic Min", vitals.blood_pressure_diastolic_min),
                ("Blood Pressure Diastolic Max", vitals.blood_pressure_diastolic_max),
            ] {
                if let Some(v) = value {
                    vital(name, v.to_string(), "mmHg");
                }
            }
            for (name, value) in [
                ("Blood Glucose Avg", vitals.blood_glucose_avg),
                ("Blood Glucose Min", vitals.blood_glucose_min),
                ("Blood Glucose Max", vitals.blood_glucose_max),
            ] {
                if let Some(v) = value {
                    vital(name, v.to_string(), "mg/dL");
                }
            }
        }

        push_category(&mut rows, &date_str, "Body", fields::BODY_METRICS, &day.body, &conv);
        push_category(
            &mut rows,
            &date_str,
            "Nutrition",
            fields::NUTRITION_METRICS,
            &day.nutrition,
            &conv,
        );

        // Mindfulness: summary rows, then one row group per reflection
        if day.mindfulness.has_data() {
            let mindfulness = &day.mindfulness;
            if let Some(minutes) = mindfulness.mindful_minutes {
                rows.push(row(
                    &date_str,
                    "Mindfulness",
                    "Mindful Minutes",
                    &minutes.to_string(),
                    "minutes",
                ));
            }
            if let Some(sessions) = mindfulness.mindful_sessions {
                rows.push(row(
                    &date_str,
                    "Mindfulness",
                    "Mindful Sessions",
                    &sessions.to_string(),
                    "count",
                ));
            }

            if !mindfulness.state_of_mind.is_empty() {
                rows.push(row(
                    &date_str,
                    "Mindfulness",
                    "State of Mind Entries",
                    &mindfulness.state_of_mind.len().to_string(),
                    "count",
                ));

                if let Some(avg) = mindfulness.average_valence() {
                    rows.push(row(
                        &date_str,
                        "Mindfulness",
                        "Average Mood Valence",
                        &format!("{:.2}", avg),
                        "scale(-1 to 1)",
                    ));
                    rows.push(row(
                        &date_str,
                        "Mindfulness",
                        "Average Mood Percent",
                        &valence_percent(avg).to_string(),
                        "percent",
                    ));
                }

                let daily = mindfulness.daily_moods();
                if !daily.is_empty() {
                    rows.push(row(
                        &date_str,
                        "Mindfulness",
                        "Daily Mood Count",
                        &daily.len().to_string(),
                        "count",
                    ));
                }
                let momentary = mindfulness.momentary_emotions();
                if !momentary.is_empty() {
                    rows.push(row(
                        &date_str,
                        "Mindfulness",
                        "Momentary Emotion Count",
                        &momentary.len().to_string(),
                        "count",
                    ));
                }

                for entry in &mindfulness.state_of_mind {
                    let time_str = profile.time_format.format(entry.timestamp);
                    let kind = entry.kind.display_name();

                    rows.push(row(
                        &date_str,
                        "State of Mind",
                        &format!("{} at {}", kind, time_str),
                        &format!("{:.2}", entry.valence),
                        "valence",
                    ));

                    let labels = join_list(&entry.labels);
                    if !labels.is_empty() {
                        rows.push(quoted_value_row(
                            &date_str,
                            "State of Mind",
                            &format!("{} Labels at {}", kind, time_str),
                            &labels,
                            "labels",
                        ));
                    }
                    let associations = join_list(&entry.associations);
                    if !associations.is_empty() {
                        rows.push(quoted_value_row(
                            &date_str,
                            "State of Mind",
                            &format!("{} Associations at {}", kind, time_str),
                            &associations,
                            "associations",
                        ));
                    }
                }
            }
        }

        push_category(
            &mut rows,
            &date_str,
            "Mobility",
            fields::MOBILITY_METRICS,
            &day.mobility,
            &conv,
        );
        push_category(
            &mut rows,
            &date_str,
            "Hearing",
            fields::HEARING_METRICS,
            &day.hearing,
            &conv,
        );

        // One row per attribute per workout, metric prefixed with the type
        for workout in &day.workouts {
            let type_name = workout.workout_type.name();
            rows.push(row(
                &date_str,
                "Workouts",
                &format!("{} Start Time", type_name),
                &profile.time_format.format(workout.start_time),
                "time",
            ));
            rows.push(row(
                &date_str,
                "Workouts",
                &format!("{} Duration", type_name),
                &(workout.duration as i64).to_string(),
                "seconds",
            ));
            if let Some(distance) = workout.distance {
                if distance > 0.0 {
                    rows.push(row(
                        &date_str,
                        "Workouts",
                        &format!("{} Distance", type_name),
                        &format!("{:.2}", conv.convert_distance(distance)),
                        conv.distance_unit(),
                    ));
                }
            }
            if let Some(calories) = workout.calories {
                if calories > 0.0 {
                    rows.push(row(
                        &date_str,
                        "Workouts",
                        &format!("{} Calories", type_name),
                        &calories.to_string(),
                        "kcal",
                    ));
                }
            }
        }

        let mut output = rows.join("\n");
        output.push('\n');
        output
    }
}

fn push_category<T>(
    rows: &mut Vec<String>,
    date_str: &str,
    category: &str,
    metrics: &[Metric<T>],
    data: &T,
    conv: &UnitConverter,
) {
    for metric in metrics {
        if let Some(num) = (metric.get)(data) {
            let (value, unit) = metric.kind.csv_value_unit(num, conv);
            rows.push(row(date_str, category, metric.csv_label, &value, &unit));
        }
    }
}

fn row(date: &str, category: &str, metric: &str, value: &str, unit: &str) -> String {
    [date, category, metric, value, unit]
        .iter()
        .map(|cell| escape_csv(cell))
        .collect::<Vec<_>>()
        .join(",")
}

/// Row whose value cell is always quoted (list-valued cells)
fn quoted_value_row(date: &str, category: &str, metric: &str, value: &str, unit: &str) -> String {
    format!(
        "{},{},{},\"{}\",{}",
        escape_csv(date),
        escape_csv(category),
        escape_csv(metric),
        value.replace('"', "\"\""),
        escape_csv(unit)
    )
}

/// Lists become one `; `-joined cell; embedded commas are replaced, not
/// escaped (lossy, inherited behavior)
fn join_list(items: &[String]) -> String {
    items.join("; ").replace(',', ";")
}

fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    use crate::types::{StateOfMindEntry, StateOfMindKind};
    use crate::units::UnitSystem;
    use crate::workout::{WorkoutRecord, WorkoutType};

    fn make_test_day() -> HealthDay {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.sleep.total_duration = 30600.0;
        day.activity.steps = Some(8432);
        day
    }

    #[test]
    fn test_basic_csv_scenario() {
        let output = CsvSerializer::serialize(&make_test_day(), &FormattingProfile::default());
        let expected = "Date,Category,Metric,Value,Unit\n\
                        2026-01-13,Sleep,Total Duration,30600,seconds\n\
                        2026-01-13,Activity,Steps,8432,count\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_header_always_present() {
        let day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        let output = CsvSerializer::serialize(&day, &FormattingProfile::default());
        assert_eq!(output, "Date,Category,Metric,Value,Unit\n");
    }

    #[test]
    fn test_every_row_has_five_fields() {
        let mut day = make_test_day();
        day.heart.resting_heart_rate = Some(52.0);
        day.vitals.blood_oxygen_avg = Some(0.97);
        day.body.weight = Some(70.5);
        day.body.bmi = Some(22.4);
        day.mindfulness.state_of_mind = vec![StateOfMindEntry {
            id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 13, 14, 30, 0).unwrap(),
            kind: StateOfMindKind::DailyMood,
            valence: 0.4,
            labels: vec!["Happy, mostly".to_string(), "Calm".to_string()],
            associations: vec![],
        }];

        let output = CsvSerializer::serialize(&day, &FormattingProfile::default());
        for line in output.lines() {
            let mut fields = 0;
            let mut in_quotes = false;
            for c in line.chars() {
                match c {
                    '"' => in_quotes = !in_quotes,
                    ',' if !in_quotes => fields += 1,
                    _ => {}
                }
            }
            assert_eq!(fields, 4, "expected 5 cells in row: {}", line);
        }
    }

    #[test]
    fn test_vitals_rows_converted() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.vitals.blood_oxygen_avg = Some(0.97);
        day.vitals.body_temperature_avg = Some(36.8);

        let metric = CsvSerializer::serialize(&day, &FormattingProfile::default());
        assert!(metric.contains("2026-01-13,Vitals,Blood Oxygen Avg,97,percent"));
        assert!(metric.contains("2026-01-13,Vitals,Body Temperature Avg,36.8,°C"));

        let mut profile = FormattingProfile::default();
        profile.unit_system = UnitSystem::Imperial;
        let imperial = CsvSerializer::serialize(&day, &profile);
        assert!(imperial.contains("2026-01-13,Vitals,Body Temperature Avg,98.2,°F"));
    }

    #[test]
    fn test_zero_sleep_fields_omitted() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.sleep.total_duration = 28800.0;
        // deep/rem/core/awake/in-bed all zero

        let output = CsvSerializer::serialize(&day, &FormattingProfile::default());
        assert!(output.contains("Total Duration"));
        assert!(!output.contains("Deep Sleep"));
        assert!(!output.contains("In Bed Time"));
    }

    #[test]
    fn test_label_cell_quoted_with_commas_replaced() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.mindfulness.state_of_mind = vec![StateOfMindEntry {
            id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 13, 14, 30, 0).unwrap(),
            kind: StateOfMindKind::MomentaryEmotion,
            valence: 0.75,
            labels: vec!["Happy, mostly".to_string(), "Calm".to_string()],
            associations: vec!["Work".to_string()],
        }];

        let output = CsvSerializer::serialize(&day, &FormattingProfile::default());
        assert!(output
            .contains("2026-01-13,State of Mind,Momentary Emotion at 2:30 PM,0.75,valence"));
        // Comma inside the label replaced by a semicolon, cell quoted
        assert!(output.contains(
            "2026-01-13,State of Mind,Momentary Emotion Labels at 2:30 PM,\"Happy; mostly; Calm\",labels"
        ));
        assert!(output.contains(
            "2026-01-13,State of Mind,Momentary Emotion Associations at 2:30 PM,\"Work\",associations"
        ));
    }

    #[test]
    fn test_workout_rows_prefixed_with_type() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.workouts.push(WorkoutRecord {
            id: Uuid::new_v4(),
            workout_type: WorkoutType::Running,
            start_time: Utc.with_ymd_and_hms(2026, 1, 13, 7, 15, 0).unwrap(),
            duration: 2700.0,
            calories: Some(320.0),
            distance: Some(5230.0),
        });

        let output = CsvSerializer::serialize(&day, &FormattingProfile::default());
        assert!(output.contains("2026-01-13,Workouts,Running Start Time,7:15 AM,time"));
        assert!(output.contains("2026-01-13,Workouts,Running Duration,2700,seconds"));
        assert!(output.contains("2026-01-13,Workouts,Running Distance,5.23,km"));
        assert!(output.contains("2026-01-13,Workouts,Running Calories,320,kcal"));
    }

    #[test]
    fn test_workout_zero_distance_omitted() {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.workouts.push(WorkoutRecord {
            id: Uuid::new_v4(),
            workout_type: WorkoutType::Yoga,
            start_time: Utc.with_ymd_and_hms(2026, 1, 13, 18, 0, 0).unwrap(),
            duration: 1800.0,
            calories: Some(0.0),
            distance: Some(0.0),
        });

        let output = CsvSerializer::serialize(&day, &FormattingProfile::default());
        assert!(output.contains("Yoga Duration"));
        assert!(!output.contains("Yoga Distance"));
        assert!(!output.contains("Yoga Calories"));
    }
}
