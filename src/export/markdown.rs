//! Markdown serializer
//!
//! Human-readable daily note: optional frontmatter, title, one-line summary,
//! then one section per populated category in fixed order (Sleep, Activity,
//! Heart, Vitals, Body, Nutrition, Mindfulness, Mobility, Hearing, Workouts).
//! Lines are accumulated in order and joined once at the end.

use crate::fields::{self, Metric};
use crate::profile::FormattingProfile;
use crate::types::{valence_description, valence_percent, HealthDay};
use crate::units::{format_duration, group_thousands};

/// Renders a day as grouped Markdown prose
pub struct MarkdownSerializer;

impl MarkdownSerializer {
    pub fn serialize(day: &HealthDay, profile: &FormattingProfile, include_metadata: bool) -> String {
        let conv = profile.converter();
        let template = &profile.markdown;
        let date_str = profile.date_format.format(day.date);
        let bullet = template.bullet.glyph();
        let header = "#".repeat(template.section_header_level);
        let sub_header = "#".repeat(template.section_header_level + 1);
        let emoji = |e: &str| {
            if template.use_emoji {
                format!("{} ", e)
            } else {
                String::new()
            }
        };

        let mut lines: Vec<String> = Vec::new();

        if include_metadata {
            let fm = &profile.frontmatter;
            lines.push("---".to_string());
            if fm.include_date {
                lines.push(format!("{}: {}", fm.date_key, date_str));
            }
            if fm.include_type {
                lines.push(format!("{}: {}", fm.type_key, fm.type_value));
            }
            // BTreeMap iteration keeps custom fields sorted by key
            for (key, value) in &fm.custom_fields {
                lines.push(format!("{}: {}", key, value));
            }
            lines.push("---".to_string());
            lines.push(String::new());
        }

        lines.push(format!("# Health Data — {}", date_str));

        if template.include_summary {
            let mut parts: Vec<String> = Vec::new();
            if day.sleep.total_duration > 0.0 {
                parts.push(format!("{} sleep", format_duration(day.sleep.total_duration)));
            }
            if let Some(steps) = day.activity.steps {
                parts.push(format!("{} steps", group_thousands(steps as i64)));
            }
            if !day.workouts.is_empty() {
                let n = day.workouts.len();
                parts.push(format!("{} workout{}", n, if n > 1 { "s" } else { "" }));
            }
            if let Some(avg) = day.mindfulness.average_valence() {
                let mood_emoji = if template.use_emoji {
                    let e = if avg >= 0.2 {
                        "🙂"
                    } else if avg <= -0.2 {
                        "😔"
                    } else {
                        "😐"
                    };
                    format!("{} ", e)
                } else {
                    String::new()
                };
                parts.push(format!("{}mood {}%", mood_emoji, valence_percent(avg)));
            }
            if !parts.is_empty() {
                lines.push(String::new());
                lines.push(parts.join(" · "));
            }
        }

        // Sleep orders In Bed right after Total; the shared table carries the
        // CSV order, so the section is written out explicitly here.
        if day.sleep.has_data() {
            push_section(&mut lines, &header, &emoji("😴"), "Sleep");
            let sleep = &day.sleep;
            for (label, value) in [
                ("Total", sleep.total_duration),
                ("In Bed", sleep.in_bed_time),
                ("Deep", sleep.deep_sleep),
                ("REM", sleep.rem_sleep),
                ("Core", sleep.core_sleep),
                ("Awake", sleep.awake_time),
            ] {
                if value > 0.0 {
                    lines.push(format!("{} **{}:** {}", bullet, label, format_duration(value)));
                }
            }
        }

        if day.activity.has_data() {
            push_section(&mut lines, &header, &emoji("🏃"), "Activity");
            push_metrics(&mut lines, bullet, fields::ACTIVITY_METRICS, &day.activity, &conv);
        }

        if day.heart.has_data() {
            push_section(&mut lines, &header, &emoji("❤️"), "Heart");
            push_metrics(&mut lines, bullet, fields::HEART_METRICS, &day.heart, &conv);
        }

        if day.vitals.has_data() {
            push_section(&mut lines, &header, &emoji("🩺"), "Vitals");
            let vitals = &day.vitals;

            if let Some(avg) = vitals.respiratory_rate_avg {
                let mut line = format!("{} **Respiratory Rate:** {:.1} breaths/min", bullet, avg);
                if let (Some(min), Some(max)) =
                    (vitals.respiratory_rate_min, vitals.respiratory_rate_max)
                {
                    if min != max {
                        line.push_str(&format!(" (range: {:.1}–{:.1})", min, max));
                    }
                }
                lines.push(line);
            }

            if let Some(avg) = vitals.blood_oxygen_avg {
                let mut line = format!("{} **SpO2:** {}%", bullet, (avg * 100.0) as i64);
                if let (Some(min), Some(max)) = (vitals.blood_oxygen_min, vitals.blood_oxygen_max) {
                    if min != max {
                        line.push_str(&format!(
                            " (range: {}%–{}%)",
                            (min * 100.0) as i64,
                            (max * 100.0) as i64
                        ));
                    }
                }
                lines.push(line);
            }

            if let Some(avg) = vitals.body_temperature_avg {
                let mut line =
                    format!("{} **Body Temperature:** {}", bullet, conv.format_temperature(avg));
                if let (Some(min), Some(max)) =
                    (vitals.body_temperature_min, vitals.body_temperature_max)
                {
                    if min != max {
                        line.push_str(&format!(
                            " (range: {}–{})",
                            conv.format_temperature(min),
                            conv.format_temperature(max)
                        ));
                    }
                }
                lines.push(line);
            }

            if let (Some(sys), Some(dia)) = (
                vitals.blood_pressure_systolic_avg,
                vitals.blood_pressure_diastolic_avg,
            ) {
                let mut line = format!(
                    "{} **Blood Pressure:** {}/{} mmHg",
                    bullet, sys as i64, dia as i64
                );
                if let (Some(sys_min), Some(sys_max), Some(dia_min), Some(dia_max)) = (
                    vitals.blood_pressure_systolic_min,
                    vitals.blood_pressure_systolic_max,
                    vitals.blood_pressure_diastolic_min,
                    vitals.blood_pressure_diastolic_max,
                ) {
                    if sys_min != sys_max || dia_min != dia_max {
                        line.push_str(&format!(
                            " (range: {}/{}–{}/{})",
                            sys_min as i64, dia_min as i64, sys_max as i64, dia_max as i64
                        ));
                    }
                }
                lines.push(line);
            }

            if let Some(avg) = vitals.blood_glucose_avg {
                let mut line = format!("{} **Blood Glucose:** {:.1} mg/dL", bullet, avg);
                if let (Some(min), Some(max)) = (vitals.blood_glucose_min, vitals.blood_glucose_max)
                {
                    if min != max {
                        line.push_str(&format!(" (range: {:.1}–{:.1})", min, max));
                    }
                }
                lines.push(line);
            }
        }

        if day.body.has_data() {
            push_section(&mut lines, &header, &emoji("📏"), "Body");
            push_metrics(&mut lines, bullet, fields::BODY_METRICS, &day.body, &conv);
        }

        if day.nutrition.has_data() {
            push_section(&mut lines, &header, &emoji("🍎"), "Nutrition");
            push_metrics(&mut lines, bullet, fields::NUTRITION_METRICS, &day.nutrition, &conv);
        }

        if day.mindfulness.has_data() {
            push_section(&mut lines, &header, &emoji("🧘"), "Mindfulness");
            let mindfulness = &day.mindfulness;
            if let Some(minutes) = mindfulness.mindful_minutes {
                lines.push(format!("{} **Mindful Minutes:** {} min", bullet, minutes as i64));
            }
            if let Some(sessions) = mindfulness.mindful_sessions {
                lines.push(format!("{} **Sessions:** {}", bullet, sessions));
            }

            if !mindfulness.state_of_mind.is_empty() {
                lines.push(String::new());

                if let Some(avg) = mindfulness.average_valence() {
                    lines.push(format!(
                        "{} **Average Mood:** {}% ({})",
                        bullet,
                        valence_percent(avg),
                        valence_description(avg)
                    ));
                }
                let daily = mindfulness.daily_moods();
                if !daily.is_empty() {
                    lines.push(format!("{} **Daily Mood Entries:** {}", bullet, daily.len()));
                }
                let momentary = mindfulness.momentary_emotions();
                if !momentary.is_empty() {
                    lines.push(format!("{} **Momentary Emotions:** {}", bullet, momentary.len()));
                }
                let labels = mindfulness.all_labels();
                if !labels.is_empty() {
                    lines.push(format!("{} **Emotions/Moods:** {}", bullet, labels.join(", ")));
                }
                let associations = mindfulness.all_associations();
                if !associations.is_empty() {
                    lines.push(format!(
                        "{} **Associated With:** {}",
                        bullet,
                        associations.join(", ")
                    ));
                }

                // Itemized entries only for short lists
                if template.include_summary && mindfulness.state_of_mind.len() <= 5 {
                    lines.push(String::new());
                    lines.push(format!("{} Mood Entries", sub_header));
                    lines.push(String::new());
                    for entry in &mindfulness.state_of_mind {
                        let time_str = profile.time_format.format(entry.timestamp);
                        let entry_emoji = if template.use_emoji {
                            format!("{} ", entry.valence_emoji())
                        } else {
                            String::new()
                        };
                        let mut line = format!(
                            "{} **{}** {}({}): {}%",
                            bullet,
                            time_str,
                            entry_emoji,
                            entry.kind.display_name(),
                            entry.valence_percent()
                        );
                        if !entry.labels.is_empty() {
                            line.push_str(&format!(" — {}", entry.labels.join(", ")));
                        }
                        lines.push(line);
                    }
                }
            }
        }

        if day.mobility.has_data() {
            push_section(&mut lines, &header, &emoji("🚶"), "Mobility");
            push_metrics(&mut lines, bullet, fields::MOBILITY_METRICS, &day.mobility, &conv);
        }

        if day.hearing.has_data() {
            push_section(&mut lines, &header, &emoji("👂"), "Hearing");
            push_metrics(&mut lines, bullet, fields::HEARING_METRICS, &day.hearing, &conv);
        }

        if !day.workouts.is_empty() {
            lines.push(String::new());
            lines.push(format!("{} {}Workouts", header, emoji("💪")));
            for (index, workout) in day.workouts.iter().enumerate() {
                lines.push(String::new());
                lines.push(format!(
                    "{} {}. {}",
                    sub_header,
                    index + 1,
                    workout.workout_type.name()
                ));
                lines.push(String::new());
                lines.push(format!(
                    "{} **Time:** {}",
                    bullet,
                    profile.time_format.format(workout.start_time)
                ));
                lines.push(format!(
                    "{} **Duration:** {}",
                    bullet,
                    format_duration(workout.duration)
                ));
                if let Some(distance) = workout.distance {
                    if distance > 0.0 {
                        lines.push(format!(
                            "{} **Distance:** {}",
                            bullet,
                            conv.format_distance(distance)
                        ));
                    }
                }
                if let Some(calories) = workout.calories {
                    if calories > 0.0 {
                        lines.push(format!("{} **Calories:** {} kcal", bullet, calories as i64));
                    }
                }
            }
        }

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}

fn push_section(lines: &mut Vec<String>, header: &str, emoji: &str, title: &str) {
    lines.push(String::new());
    lines.push(format!("{} {}{}", header, emoji, title));
    lines.push(String::new());
}

fn push_metrics<T>(
    lines: &mut Vec<String>,
    bullet: &str,
    metrics: &[Metric<T>],
    data: &T,
    conv: &crate::units::UnitConverter,
) {
    for metric in metrics {
        if let Some(num) = (metric.get)(data) {
            lines.push(format!(
                "{} **{}:** {}",
                bullet,
                metric.md_label,
                metric.kind.markdown_value(num, conv)
            ));
        }
    }
}
