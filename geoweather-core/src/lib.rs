//! Core library for the `geoweather` CLI.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - Location and weather service abstractions
//! - The screen state, the flow that drives it, and its rendering
//!
//! It is used by `geoweather-cli`, but the controller and renderer do not
//! depend on a terminal and can back other front ends.

pub mod config;
pub mod controller;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod render;
pub mod state;

pub use config::Config;
pub use controller::WeatherController;
pub use error::{FailureKind, LocationError, WeatherError};
pub use location::{FixedLocation, IpLocation, LocationProvider, Permission};
pub use model::{Condition, Coordinate, WeatherReport};
pub use provider::{WeatherService, openweather::OpenWeatherProvider, provider_from_config};
pub use render::{View, render};
pub use state::{Phase, RequestId, ViewState};
