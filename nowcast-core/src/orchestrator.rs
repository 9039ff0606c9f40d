//! Coordinates the two weather fetches for a city and exposes their
//! combined outcome as observable state.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use tokio::sync::watch;
use tracing::{info, warn};

use crate::aggregate::daily_averages;
use crate::client::WeatherClient;
use crate::model::{CurrentTemperature, WeatherState, kelvin_to_celsius};

/// Owns the fetch lifecycle for a city.
///
/// [`fetch_weather_results`](Self::fetch_weather_results) launches the
/// current-weather and forecast lookups as two independent tasks; each one
/// writes its own slice of [`WeatherState`] when it settles. Failures never
/// reach the caller, they only raise the error flag in state.
#[derive(Debug)]
pub struct WeatherOrchestrator {
    client: Arc<dyn WeatherClient>,
    state_tx: watch::Sender<WeatherState>,
    in_flight: Arc<AtomicUsize>,
}

impl WeatherOrchestrator {
    pub fn new(client: Arc<dyn WeatherClient>) -> Self {
        let (state_tx, _) = watch::channel(WeatherState::default());
        Self {
            client,
            state_tx,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Receiver for state updates; the presentation layer awaits changes on it.
    pub fn subscribe(&self) -> watch::Receiver<WeatherState> {
        self.state_tx.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> WeatherState {
        self.state_tx.borrow().clone()
    }

    /// Start both fetches for `city`. Never fails; outcomes land in state.
    ///
    /// A repeated call (e.g. a retry) does not cancel still-pending fetches,
    /// it starts two new ones; `is_loading` stays true until every launched
    /// fetch has settled. Must be called from within a Tokio runtime.
    pub fn fetch_weather_results(&self, city: &str) {
        info!(city, "fetching weather results");

        self.in_flight.fetch_add(2, Ordering::SeqCst);
        self.state_tx.send_modify(|state| {
            state.is_loading = true;
            state.has_error = false;
        });

        self.spawn_current_fetch(city.to_string());
        self.spawn_forecast_fetch(city.to_string());
    }

    fn spawn_current_fetch(&self, city: String) {
        let client = Arc::clone(&self.client);
        let state_tx = self.state_tx.clone();
        let in_flight = Arc::clone(&self.in_flight);

        tokio::spawn(async move {
            match client.fetch_current_weather(&city).await {
                Ok(reading) => state_tx.send_modify(|state| {
                    state.current = Some(CurrentTemperature {
                        city: city.clone(),
                        temperature_c: kelvin_to_celsius(reading.temperature_k),
                    });
                }),
                Err(err) => {
                    warn!(city, error = %err, "current weather fetch failed");
                    state_tx.send_modify(|state| state.has_error = true);
                }
            }
            settle_one(&state_tx, &in_flight);
        });
    }

    fn spawn_forecast_fetch(&self, city: String) {
        let client = Arc::clone(&self.client);
        let state_tx = self.state_tx.clone();
        let in_flight = Arc::clone(&self.in_flight);

        tokio::spawn(async move {
            match client.fetch_forecast(&city).await {
                Ok(bundle) => {
                    let averages = daily_averages(&bundle);
                    state_tx.send_modify(|state| state.forecast = Some(averages));
                }
                Err(err) => {
                    warn!(city, error = %err, "forecast fetch failed");
                    state_tx.send_modify(|state| state.has_error = true);
                }
            }
            settle_one(&state_tx, &in_flight);
        });
    }
}

/// Mark one fetch as settled; the last one to settle clears `is_loading`.
fn settle_one(state_tx: &watch::Sender<WeatherState>, in_flight: &AtomicUsize) {
    if in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
        state_tx.send_modify(|state| state.is_loading = false);
    }
}
