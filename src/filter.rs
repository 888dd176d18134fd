//! Data-type selection and aggregate filtering
//!
//! The single gate deciding which categories appear in an export. Disabled
//! categories are replaced by their canonical empty value; serializers never
//! re-check the selection.

use serde::{Deserialize, Serialize};

use crate::types::{
    ActivityData, BodyData, HealthDay, HearingData, HeartData, MindfulnessData, MobilityData,
    NutritionData, SleepData, VitalsData,
};

/// The user's chosen subset of categories for one export
///
/// `Default` enables everything. When deserializing stored settings, missing
/// keys read as disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTypeSelection {
    #[serde(default)]
    pub sleep: bool,
    #[serde(default)]
    pub activity: bool,
    #[serde(default)]
    pub heart: bool,
    #[serde(default)]
    pub vitals: bool,
    #[serde(default)]
    pub body: bool,
    #[serde(default)]
    pub nutrition: bool,
    #[serde(default)]
    pub mindfulness: bool,
    #[serde(default)]
    pub mobility: bool,
    #[serde(default)]
    pub hearing: bool,
    #[serde(default)]
    pub workouts: bool,
}

impl Default for DataTypeSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl DataTypeSelection {
    /// Every category enabled
    pub fn all() -> Self {
        Self {
            sleep: true,
            activity: true,
            heart: true,
            vitals: true,
            body: true,
            nutrition: true,
            mindfulness: true,
            mobility: true,
            hearing: true,
            workouts: true,
        }
    }

    /// Every category disabled; a legal selection yielding an empty export
    pub fn none() -> Self {
        Self {
            sleep: false,
            activity: false,
            heart: false,
            vitals: false,
            body: false,
            nutrition: false,
            mindfulness: false,
            mobility: false,
            hearing: false,
            workouts: false,
        }
    }
}

impl HealthDay {
    /// A new aggregate with disabled categories reset to empty.
    ///
    /// Enabled categories pass through unchanged and `date` is always
    /// preserved. Idempotent: filtering twice with the same selection gives
    /// the same result.
    pub fn filtered(&self, selection: &DataTypeSelection) -> HealthDay {
        let mut filtered = self.clone();

        if !selection.sleep {
            filtered.sleep = SleepData::default();
        }
        if !selection.activity {
            filtered.activity = ActivityData::default();
        }
        if !selection.heart {
            filtered.heart = HeartData::default();
        }
        if !selection.vitals {
            filtered.vitals = VitalsData::default();
        }
        if !selection.body {
            filtered.body = BodyData::default();
        }
        if !selection.nutrition {
            filtered.nutrition = NutritionData::default();
        }
        if !selection.mindfulness {
            filtered.mindfulness = MindfulnessData::default();
        }
        if !selection.mobility {
            filtered.mobility = MobilityData::default();
        }
        if !selection.hearing {
            filtered.hearing = HearingData::default();
        }
        if !selection.workouts {
            filtered.workouts = Vec::new();
        }

        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_test_day() -> HealthDay {
        let mut day = HealthDay::new(NaiveDate::from_ymd_opt(2026, 1, 13).unwrap());
        day.sleep.total_duration = 30600.0;
        day.activity.steps = Some(8432);
        day.heart.resting_heart_rate = Some(52.0);
        day.body.weight = Some(70.5);
        day
    }

    #[test]
    fn test_filter_disables_categories() {
        let day = make_test_day();
        let selection = DataTypeSelection {
            sleep: true,
            ..DataTypeSelection::none()
        };

        let filtered = day.filtered(&selection);
        assert!(filtered.sleep.has_data());
        assert!(!filtered.activity.has_data());
        assert!(!filtered.heart.has_data());
        assert!(!filtered.body.has_data());
        assert_eq!(filtered.date, day.date);
    }

    #[test]
    fn test_filter_passes_enabled_through_unchanged() {
        let day = make_test_day();
        let filtered = day.filtered(&DataTypeSelection::all());
        assert_eq!(filtered, day);
    }

    #[test]
    fn test_filter_idempotent() {
        let day = make_test_day();
        let selection = DataTypeSelection {
            activity: true,
            heart: true,
            ..DataTypeSelection::none()
        };

        let once = day.filtered(&selection);
        let twice = once.filtered(&selection);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_selection_yields_no_data() {
        let day = make_test_day();
        let filtered = day.filtered(&DataTypeSelection::none());
        assert!(!filtered.has_any_data());
        assert_eq!(filtered.date, day.date);
    }

    #[test]
    fn test_selection_deserializes_missing_keys_as_disabled() {
        let selection: DataTypeSelection =
            serde_json::from_str(r#"{"sleep": true, "workouts": true}"#).unwrap();
        assert!(selection.sleep);
        assert!(selection.workouts);
        assert!(!selection.activity);
        assert!(!selection.vitals);
    }
}
