use serde::{Deserialize, Serialize};

/// Offset between Kelvin and Celsius.
pub const KELVIN_OFFSET: f64 = 273.15;

/// One 3-hour forecast data point as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherSample {
    pub timestamp: i64,
    pub temperature_k: f64,
}

/// Chronologically non-decreasing sequence of forecast samples.
///
/// Ordering is guaranteed by the upstream API and not re-validated here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastBundle {
    pub samples: Vec<WeatherSample>,
}

/// Current conditions for a city, as reported by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeatherReading {
    pub city_label: String,
    pub temperature_k: f64,
}

/// Average temperature for one upcoming calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAverage {
    /// Weekday name, e.g. "Monday".
    pub day_label: String,
    pub temperature_c: i32,
}

/// Current temperature for the requested city, in whole degrees Celsius.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentTemperature {
    pub city: String,
    pub temperature_c: i32,
}

/// Observable state of one [`WeatherOrchestrator`](crate::WeatherOrchestrator).
///
/// `current` and `forecast` keep their last successfully fetched value; a
/// failed fetch only raises `has_error` and leaves them untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherState {
    pub current: Option<CurrentTemperature>,
    pub forecast: Option<Vec<DailyAverage>>,
    pub is_loading: bool,
    pub has_error: bool,
}

/// Kelvin -> whole Celsius, truncated toward zero (no rounding).
pub fn kelvin_to_celsius(temperature_k: f64) -> i32 {
    (temperature_k - KELVIN_OFFSET) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kelvin_conversion_truncates_toward_zero() {
        assert_eq!(kelvin_to_celsius(293.15), 20);
        assert_eq!(kelvin_to_celsius(294.0), 20);
        assert_eq!(kelvin_to_celsius(273.15), 0);
        // -0.5 C truncates to 0, not -1
        assert_eq!(kelvin_to_celsius(272.65), 0);
        assert_eq!(kelvin_to_celsius(263.15), -10);
    }
}
