use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geoweather_core::{
    Config, Coordinate, FixedLocation, IpLocation, LocationProvider, OpenWeatherProvider, Phase,
    WeatherController, provider_from_config, render,
};
use inquire::{Password, PasswordDisplayMode, Text};
use std::sync::Arc;
use tracing::info;

use crate::permission::PromptingLocation;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "geoweather", version, about = "Current weather where you are")]
pub struct Cli {
    /// More diagnostics on stderr (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Locate this device and show the current weather there.
    Show {
        /// Latitude in decimal degrees; skips location lookup.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Print the rendered view as JSON.
        #[arg(long)]
        json: bool,

        /// Grant location access without asking.
        #[arg(short, long)]
        yes: bool,
    },

    /// Store the OpenWeather API key and display language.
    Configure,

    /// Ask for location permission again on the next run.
    ForgetPermission,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Show { lat, lon, json, yes } => {
                let mut config = Config::load()?;
                let weather = provider_from_config(&config)?;
                let manual = lat.zip(lon).map(|(lat, lon)| Coordinate::new(lat, lon));

                match manual.or(config.location.manual) {
                    Some(at) => show(FixedLocation::new(at), weather, json).await,
                    None => {
                        let ip = match config.location.ip_endpoint.clone() {
                            Some(endpoint) => {
                                IpLocation::with_endpoint(endpoint, config.request_timeout())?
                            }
                            None => IpLocation::new(config.request_timeout())?,
                        };
                        let gate = Arc::new(PromptingLocation::new(
                            ip,
                            config.location.permission,
                            yes,
                        ));

                        show(gate.clone(), weather, json).await?;

                        if let Some(decision) = gate.new_decision() {
                            config.remember_permission(decision);
                            config.save().context("Failed to remember location permission")?;
                        }
                        Ok(())
                    }
                }
            }
            Command::Configure => configure(),
            Command::ForgetPermission => {
                let mut config = Config::load()?;
                config.forget_permission();
                config.save()?;
                println!("Location permission will be asked again.");
                Ok(())
            }
        }
    }
}

async fn show<L: LocationProvider>(location: L, weather: OpenWeatherProvider, json: bool) -> Result<()> {
    let mut controller = WeatherController::new(location, weather).with_observer(move |state| {
        if json {
            return;
        }
        match state.phase() {
            Phase::RequestingLocation => eprintln!("Haetaan sijaintia..."),
            Phase::FetchingWeather => eprintln!("Haetaan säätietoja..."),
            _ => {}
        }
    });

    let view = render(controller.refresh().await);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{view}");
    }
    Ok(())
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    let lang = Text::new("Display language:")
        .with_default(&config.lang)
        .prompt()
        .context("Failed to read language")?;

    config.set_api_key(api_key.trim().to_string());
    config.lang = lang.trim().to_string();
    config.save()?;

    info!("Configuration saved");
    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}
