//! Core library for the `weather-bot` chat bot.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Forward geocoding of free-text locations
//! - Abstraction over forecast providers
//! - Reply formatting and shared domain models
//!
//! It is used by `weather-bot`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod format;
pub mod geocode;
pub mod model;
pub mod provider;
pub mod service;

pub use config::{Credentials, Settings};
pub use error::{FetchError, GeocodeError, LookupError};
pub use format::{Reading, render};
pub use geocode::{Geocoder, NominatimGeocoder};
pub use model::{CommandKind, Coordinates, ForecastRecord};
pub use provider::{ForecastProvider, OpenWeatherProvider};
pub use service::WeatherService;
