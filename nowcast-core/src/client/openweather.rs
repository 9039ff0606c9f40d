use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::model::{CurrentWeatherReading, ForecastBundle, WeatherSample};

use super::{FetchError, WeatherClient};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// OpenWeather-backed [`WeatherClient`].
///
/// Temperatures are taken in the API's default unit (Kelvin); conversion
/// happens downstream.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the client at a different endpoint, e.g. a local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        debug!(endpoint, %status, "OpenWeather response received");

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                city: city.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Api {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn fetch_current_weather(
        &self,
        city: &str,
    ) -> Result<CurrentWeatherReading, FetchError> {
        let parsed: OwCurrentResponse = self.get_json("weather", city).await?;

        Ok(CurrentWeatherReading {
            city_label: parsed.name,
            temperature_k: parsed.main.temp,
        })
    }

    async fn fetch_forecast(&self, city: &str) -> Result<ForecastBundle, FetchError> {
        let parsed: OwForecastResponse = self.get_json("forecast", city).await?;

        let samples = parsed
            .list
            .into_iter()
            .map(|entry| WeatherSample {
                timestamp: entry.dt,
                temperature_k: entry.main.temp,
            })
            .collect();

        Ok(ForecastBundle { samples })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // cut on a char boundary, never inside a multibyte sequence
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_truncation_caps_long_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));

        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn body_truncation_backs_off_to_a_char_boundary() {
        // 'é' is two bytes and straddles the 200-byte cut
        let body = format!("{}é and more", "x".repeat(199));
        let truncated = truncate_body(&body);
        assert_eq!(truncated, format!("{}...", "x".repeat(199)));

        // multibyte content entirely before the cut is kept intact
        let cyrillic = "ж".repeat(150);
        let truncated = truncate_body(&cyrillic);
        assert!(truncated.ends_with("..."));
        assert!(truncated.trim_end_matches("...").chars().all(|c| c == 'ж'));
    }

    #[test]
    fn forecast_entries_map_to_samples() {
        let body = r#"{"list":[{"dt":1700006400,"main":{"temp":285.5}},{"dt":1700017200,"main":{"temp":286.0}}]}"#;
        let parsed: OwForecastResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.list.len(), 2);
        assert_eq!(parsed.list[0].dt, 1_700_006_400);
        assert_eq!(parsed.list[1].main.temp, 286.0);
    }
}
