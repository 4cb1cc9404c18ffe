//! Where the device is.
//!
//! A [`LocationProvider`] answers two questions in order: may we read the
//! position, and if so, what is it. [`FixedLocation`] serves a configured
//! coordinate; [`IpLocation`] approximates the position from the public IP
//! address.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt::Debug, sync::Arc, time::Duration};
use tracing::{debug, info};

use crate::{
    error::LocationError,
    model::Coordinate,
};

pub const DEFAULT_IP_ENDPOINT: &str = "http://ip-api.com/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

impl From<bool> for Permission {
    fn from(granted: bool) -> Self {
        if granted { Permission::Granted } else { Permission::Denied }
    }
}

#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    /// Ask for foreground access. May suspend until the user answers.
    async fn request_permission(&self) -> Result<Permission, LocationError>;

    /// A single fix at the provider's highest precision.
    async fn current_position(&self) -> Result<Coordinate, LocationError>;
}

#[async_trait]
impl<T: LocationProvider + ?Sized> LocationProvider for Arc<T> {
    async fn request_permission(&self) -> Result<Permission, LocationError> {
        (**self).request_permission().await
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        (**self).current_position().await
    }
}

/// Always-granted provider returning one configured coordinate.
#[derive(Debug, Clone)]
pub struct FixedLocation {
    coordinate: Coordinate,
}

impl FixedLocation {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn request_permission(&self) -> Result<Permission, LocationError> {
        Ok(Permission::Granted)
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        Ok(self.coordinate)
    }
}

/// Approximate position from an ip-api.com compatible endpoint.
/// City-level at best.
#[derive(Debug, Clone)]
pub struct IpLocation {
    endpoint: String,
    http: Client,
}

impl IpLocation {
    pub fn new(timeout: Duration) -> Result<Self, LocationError> {
        Self::with_endpoint(DEFAULT_IP_ENDPOINT, timeout)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, LocationError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { endpoint: endpoint.into(), http })
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[async_trait]
impl LocationProvider for IpLocation {
    async fn request_permission(&self) -> Result<Permission, LocationError> {
        Ok(Permission::Granted)
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        debug!(endpoint = %self.endpoint, "Requesting IP geolocation");

        let parsed: IpApiResponse = self
            .http
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if parsed.status != "success" {
            let reason = parsed.message.unwrap_or_else(|| parsed.status.clone());
            return Err(LocationError::Unavailable(reason));
        }

        match (parsed.lat, parsed.lon) {
            (Some(lat), Some(lon)) => {
                info!("Geolocation successful - ({}, {})", lat, lon);
                Ok(Coordinate::new(lat, lon))
            }
            _ => Err(LocationError::Unavailable(
                "geolocation answer carried no coordinates".to_string(),
            )),
        }
    }
}
