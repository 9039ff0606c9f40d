use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, PasswordDisplayMode};
use nowcast_core::{Config, OpenWeatherClient, WeatherOrchestrator, WeatherState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "nowcast", version, about = "Current weather and a 4-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather and the next days' average temperatures for a city.
    Show {
        /// City name, e.g. "Paris".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    config.api_key = Some(api_key);

    config.save()?;
    println!(
        "Configuration saved to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

async fn show(city: &str) -> Result<()> {
    let config = Config::load()?;
    let api_key = config.require_api_key()?;

    let client = Arc::new(OpenWeatherClient::new(api_key.to_owned()));
    let orchestrator = WeatherOrchestrator::new(client);
    let mut rx = orchestrator.subscribe();

    loop {
        println!("Fetching weather for {city}...");
        orchestrator.fetch_weather_results(city);

        // wait for both fetches of this round to settle
        loop {
            let loading = rx.borrow_and_update().is_loading;
            if !loading {
                break;
            }
            if rx.changed().await.is_err() {
                break;
            }
        }

        let state = orchestrator.state();
        render(&state);

        if state.has_error {
            let retry = Confirm::new("Something went wrong. Retry?")
                .with_default(true)
                .prompt()?;
            if retry {
                continue;
            }
        }
        return Ok(());
    }
}

fn render(state: &WeatherState) {
    if let Some(current) = &state.current {
        println!();
        println!("{}  {}\u{b0}", current.city, current.temperature_c);
    }
    if let Some(days) = &state.forecast {
        for day in days {
            println!("{:<12} {} C", day.day_label, day.temperature_c);
        }
    }
}
