use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::{
    config::{DEFAULT_LANG, DEFAULT_TIMEOUT_SECS},
    error::WeatherError,
    model::{Condition, Coordinate, WeatherReport},
};

use super::{UNITS, WeatherService};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    lang: String,
    http: Client,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherBuilder {
    api_key: String,
    base_url: String,
    lang: String,
    timeout: Duration,
}

impl OpenWeatherBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<OpenWeatherProvider, WeatherError> {
        let http = Client::builder().timeout(self.timeout).build()?;

        Ok(OpenWeatherProvider {
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            lang: self.lang,
            http,
        })
    }
}

impl OpenWeatherProvider {
    pub fn builder(api_key: String) -> OpenWeatherBuilder {
        OpenWeatherBuilder {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: DEFAULT_LANG.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

/// Error payload, e.g. `{"cod":401,"message":"Invalid API key"}`.
/// `cod` is a number or a string depending on the endpoint.
#[derive(Debug, Deserialize)]
struct OwError {
    message: String,
}

impl From<OwCurrentResponse> for WeatherReport {
    fn from(parsed: OwCurrentResponse) -> Self {
        WeatherReport {
            place: parsed.name,
            temperature_c: parsed.main.temp,
            conditions: parsed
                .weather
                .into_iter()
                .map(|w| Condition { description: w.description, icon: w.icon })
                .collect(),
            wind_speed_mps: parsed.wind.speed,
            observed_at: parsed.dt.and_then(unix_to_utc),
        }
    }
}

/// Turn a raw response into a typed report or a distinguishable error.
pub(crate) fn parse_current(status: StatusCode, body: &str) -> Result<WeatherReport, WeatherError> {
    if !status.is_success() {
        let message = serde_json::from_str::<OwError>(body)
            .map(|e| e.message)
            .unwrap_or_else(|_| truncate_body(body));
        return Err(WeatherError::Service { status, message });
    }

    let parsed: OwCurrentResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::Malformed(e.to_string()))?;

    Ok(parsed.into())
}

#[async_trait]
impl WeatherService for OpenWeatherProvider {
    async fn current(&self, at: &Coordinate) -> Result<WeatherReport, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let lat = at.latitude.to_string();
        let lon = at.longitude.to_string();

        debug!(%at, lang = %self.lang, "Requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", UNITS),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        parse_current(status, &body)
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
