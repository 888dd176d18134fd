//! Unit conversion and value formatting
//!
//! Pure, total functions converting base-unit quantities (meters, kg,
//! Celsius, liters, m/s) into the user's display system and producing
//! suffixed display strings. Out-of-range input is passed through as-is;
//! nothing here can fail. All unit strings live in this module.

use serde::{Deserialize, Serialize};

const METERS_PER_MILE: f64 = 1609.34;
const POUNDS_PER_KG: f64 = 2.20462;
const FEET_PER_METER: f64 = 3.28084;
const INCHES_PER_METER: f64 = 39.3701;
const GALLONS_PER_LITER: f64 = 0.264172;
const MPH_PER_MPS: f64 = 2.23694;

/// Display unit system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

/// Converter from base units to a display unit system
#[derive(Debug, Clone, Copy)]
pub struct UnitConverter {
    system: UnitSystem,
}

impl UnitConverter {
    pub fn new(system: UnitSystem) -> Self {
        Self { system }
    }

    pub fn system(&self) -> UnitSystem {
        self.system
    }

    /// Meters to km (metric) or miles (imperial)
    pub fn convert_distance(&self, meters: f64) -> f64 {
        match self.system {
            UnitSystem::Metric => meters / 1000.0,
            UnitSystem::Imperial => meters / METERS_PER_MILE,
        }
    }

    /// Suffixed distance string.
    ///
    /// Metric keeps short distances readable: below 1000 m the value is shown
    /// as whole meters, otherwise as km to one decimal. Imperial is always
    /// miles to two decimals.
    pub fn format_distance(&self, meters: f64) -> String {
        match self.system {
            UnitSystem::Metric => {
                if meters < 1000.0 {
                    format!("{} m", meters as i64)
                } else {
                    format!("{:.1} km", meters / 1000.0)
                }
            }
            UnitSystem::Imperial => format!("{:.2} mi", meters / METERS_PER_MILE),
        }
    }

    pub fn distance_unit(&self) -> &'static str {
        match self.system {
            UnitSystem::Metric => "km",
            UnitSystem::Imperial => "mi",
        }
    }

    /// Kilograms to kg or pounds
    pub fn convert_weight(&self, kg: f64) -> f64 {
        match self.system {
            UnitSystem::Metric => kg,
            UnitSystem::Imperial => kg * POUNDS_PER_KG,
        }
    }

    pub fn format_weight(&self, kg: f64) -> String {
        format!("{:.1} {}", self.convert_weight(kg), self.weight_unit())
    }

    pub fn weight_unit(&self) -> &'static str {
        match self.system {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lb",
        }
    }

    /// Meters to meters or feet
    pub fn convert_height(&self, meters: f64) -> f64 {
        match self.system {
            UnitSystem::Metric => meters,
            UnitSystem::Imperial => meters * FEET_PER_METER,
        }
    }

    /// Suffixed height string; imperial uses a feet-and-inches composite
    pub fn format_height(&self, meters: f64) -> String {
        match self.system {
            UnitSystem::Metric => format!("{:.2} m", meters),
            UnitSystem::Imperial => {
                let total_inches = meters * INCHES_PER_METER;
                let mut feet = (total_inches / 12.0).floor() as i64;
                let mut inches = (total_inches - (feet as f64) * 12.0).round() as i64;
                if inches == 12 {
                    feet += 1;
                    inches = 0;
                }
                format!("{}'{}\"", feet, inches)
            }
        }
    }

    pub fn height_unit(&self) -> &'static str {
        match self.system {
            UnitSystem::Metric => "m",
            UnitSystem::Imperial => "ft",
        }
    }

    /// Celsius to Celsius or Fahrenheit
    pub fn convert_temperature(&self, celsius: f64) -> f64 {
        match self.system {
            UnitSystem::Metric => celsius,
            UnitSystem::Imperial => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn format_temperature(&self, celsius: f64) -> String {
        format!(
            "{:.1}{}",
            self.convert_temperature(celsius),
            self.temperature_unit()
        )
    }

    pub fn temperature_unit(&self) -> &'static str {
        match self.system {
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }

    /// Meters to centimeters or inches, for short lengths
    pub fn convert_length(&self, meters: f64) -> f64 {
        match self.system {
            UnitSystem::Metric => meters * 100.0,
            UnitSystem::Imperial => meters * INCHES_PER_METER,
        }
    }

    pub fn format_length(&self, meters: f64) -> String {
        format!("{:.1} {}", self.convert_length(meters), self.length_unit())
    }

    pub fn length_unit(&self) -> &'static str {
        match self.system {
            UnitSystem::Metric => "cm",
            UnitSystem::Imperial => "in",
        }
    }

    /// Liters to liters or gallons
    pub fn convert_volume(&self, liters: f64) -> f64 {
        match self.system {
            UnitSystem::Metric => liters,
            UnitSystem::Imperial => liters * GALLONS_PER_LITER,
        }
    }

    pub fn format_volume(&self, liters: f64) -> String {
        format!("{:.2} {}", self.convert_volume(liters), self.volume_unit())
    }

    pub fn volume_unit(&self) -> &'static str {
        match self.system {
            UnitSystem::Metric => "L",
            UnitSystem::Imperial => "gal",
        }
    }

    /// Meters per second to m/s or mph
    pub fn convert_speed(&self, mps: f64) -> f64 {
        match self.system {
            UnitSystem::Metric => mps,
            UnitSystem::Imperial => mps * MPH_PER_MPS,
        }
    }

    pub fn format_speed(&self, mps: f64) -> String {
        format!("{:.2} {}", self.convert_speed(mps), self.speed_unit())
    }

    pub fn speed_unit(&self) -> &'static str {
        match self.system {
            UnitSystem::Metric => "m/s",
            UnitSystem::Imperial => "mph",
        }
    }
}

/// Format a duration in seconds as "8h 30m" (or "45m" under one hour)
pub fn format_duration(seconds: f64) -> String {
    let total = seconds as i64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Format an integer with thousands separators ("8,432")
pub fn group_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distance_metric_threshold() {
        let conv = UnitConverter::new(UnitSystem::Metric);
        assert_eq!(conv.format_distance(999.0), "999 m");
        assert_eq!(conv.format_distance(1000.0), "1.0 km");
        assert_eq!(conv.format_distance(1234.0), "1.2 km");
    }

    #[test]
    fn test_format_distance_imperial() {
        let conv = UnitConverter::new(UnitSystem::Imperial);
        assert_eq!(conv.format_distance(1207.005), "0.75 mi");
        assert_eq!(conv.distance_unit(), "mi");
    }

    #[test]
    fn test_convert_weight() {
        let metric = UnitConverter::new(UnitSystem::Metric);
        let imperial = UnitConverter::new(UnitSystem::Imperial);
        assert_eq!(metric.convert_weight(70.0), 70.0);
        assert!((imperial.convert_weight(70.0) - 154.3234).abs() < 0.001);
        assert_eq!(imperial.format_weight(70.0), "154.3 lb");
    }

    #[test]
    fn test_format_height_composite() {
        let metric = UnitConverter::new(UnitSystem::Metric);
        let imperial = UnitConverter::new(UnitSystem::Imperial);
        assert_eq!(metric.format_height(1.803), "1.80 m");
        // 1.803 m = 70.99 in = 5'11"
        assert_eq!(imperial.format_height(1.803), "5'11\"");
        // Rounding up to a full foot carries over
        assert_eq!(imperial.format_height(1.8288), "6'0\"");
    }

    #[test]
    fn test_convert_temperature() {
        let metric = UnitConverter::new(UnitSystem::Metric);
        let imperial = UnitConverter::new(UnitSystem::Imperial);
        assert_eq!(metric.format_temperature(36.8), "36.8°C");
        assert_eq!(imperial.convert_temperature(0.0), 32.0);
        assert_eq!(imperial.format_temperature(36.8), "98.2°F");
    }

    #[test]
    fn test_out_of_range_passes_through() {
        let conv = UnitConverter::new(UnitSystem::Metric);
        assert_eq!(conv.convert_distance(-500.0), -0.5);
        assert_eq!(conv.convert_temperature(-500.0), -500.0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30600.0), "8h 30m");
        assert_eq!(format_duration(28800.0), "8h 0m");
        assert_eq!(format_duration(2700.0), "45m");
        assert_eq!(format_duration(0.0), "0m");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(8432), "8,432");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
