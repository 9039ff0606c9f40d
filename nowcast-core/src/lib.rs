//! Core library for the `nowcast` tool.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather client abstraction and its OpenWeather implementation
//! - Forecast aggregation (3-hour samples -> daily averages)
//! - The fetch orchestrator and its observable state
//!
//! It is used by `nowcast-cli`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod client;
pub mod config;
pub mod model;
pub mod orchestrator;

pub use aggregate::daily_averages;
pub use client::{FetchError, WeatherClient, openweather::OpenWeatherClient};
pub use config::Config;
pub use model::{
    CurrentTemperature, CurrentWeatherReading, DailyAverage, ForecastBundle, WeatherSample,
    WeatherState,
};
pub use orchestrator::WeatherOrchestrator;
