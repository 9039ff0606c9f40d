use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::model::{CurrentWeatherReading, ForecastBundle};

pub mod openweather;

/// Failure of one remote lookup.
///
/// The orchestrator collapses all of these into a single error flag; the
/// variants exist for logging and for tests.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to reach the weather service: {0}")]
    Network(#[from] reqwest::Error),

    #[error("city '{city}' was not found")]
    NotFound { city: String },

    #[error("weather service returned status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("failed to parse weather service response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Abstraction over the two remote lookups the orchestrator performs.
///
/// Credentials are injected at construction time, so callers only supply the
/// city name.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    /// Current conditions for a city.
    async fn fetch_current_weather(
        &self,
        city: &str,
    ) -> Result<CurrentWeatherReading, FetchError>;

    /// Multi-day forecast as raw 3-hour samples, chronologically ordered.
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastBundle, FetchError>;
}
