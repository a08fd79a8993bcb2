//! Core library for the `forecast-server` weather proxy.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Clients for the geocoding and forecast services, behind traits
//! - Shared domain models (geocode results, forecast payloads)
//! - The city → forecast flow in [`ForecastService`]
//!
//! It is used by `forecast-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;

pub use config::Config;
pub use error::{ForecastError, Upstream};
pub use model::{ForecastRequestParams, ForecastResponse, GeocodeResult, HourlySeries};
pub use provider::{ForecastProvider, Geocoder, providers_from_config};
pub use service::ForecastService;

/// Build a [`ForecastService`] wired to the upstream services named in `config`.
pub fn service_from_config(config: &Config) -> Result<ForecastService, ForecastError> {
    let (geocoder, forecaster) = providers_from_config(config)?;
    Ok(ForecastService::new(geocoder, forecaster))
}
