use crate::{
    Config,
    error::WeatherError,
    model::{Coordinate, WeatherReport},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Unit system requested from the service. Only metric is supported.
pub const UNITS: &str = "metric";

#[async_trait]
pub trait WeatherService: Send + Sync + Debug {
    async fn current(&self, at: &Coordinate) -> Result<WeatherReport, WeatherError>;
}

/// Construct the weather service from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
             Hint: run `geoweather configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let provider = OpenWeatherProvider::builder(api_key)
        .lang(config.lang.clone())
        .timeout(config.request_timeout())
        .build()?;

    Ok(provider)
}
