//! Turns a flat forecast sample list into daily average temperatures.

use chrono::{DateTime, Utc};

use crate::model::{DailyAverage, ForecastBundle, KELVIN_OFFSET};

const SECONDS_PER_DAY: i64 = 86_400;

/// How many upcoming days are kept after the current (partial) day is dropped.
const FORECAST_DAYS: usize = 4;

/// Group forecast samples by UTC calendar day and average each day.
///
/// The first group always represents "today" with incomplete sample coverage
/// and is discarded; at most four groups are returned after it, in
/// chronological order. Fewer groups are returned as-is, with no padding.
/// An empty bundle yields an empty result.
pub fn daily_averages(bundle: &ForecastBundle) -> Vec<DailyAverage> {
    let mut groups: Vec<(i64, Vec<f64>)> = Vec::new();

    for sample in &bundle.samples {
        let day_start = sample.timestamp.div_euclid(SECONDS_PER_DAY) * SECONDS_PER_DAY;
        match groups.iter_mut().find(|(key, _)| *key == day_start) {
            Some((_, temps)) => temps.push(sample.temperature_k),
            None => groups.push((day_start, vec![sample.temperature_k])),
        }
    }

    groups
        .into_iter()
        .skip(1)
        .take(FORECAST_DAYS)
        .map(|(day_start, temps)| {
            let mean_c =
                temps.iter().map(|k| k - KELVIN_OFFSET).sum::<f64>() / temps.len() as f64;
            DailyAverage {
                day_label: weekday_label(day_start),
                // truncation toward zero, matching the current-weather conversion
                temperature_c: mean_c as i32,
            }
        })
        .collect()
}

/// Full weekday name ("Monday", ...) for an epoch-seconds UTC timestamp.
fn weekday_label(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%A").to_string())
        .unwrap_or_default()
}
