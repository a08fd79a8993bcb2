use crate::{
    Config,
    error::ForecastError,
    model::{ForecastRequestParams, ForecastResponse, GeocodeResult},
    provider::{open_meteo::OpenMeteoProvider, openweather::OpenWeatherGeocoder},
};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, sync::Arc, time::Duration};

pub mod open_meteo;
pub mod openweather;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Resolves a place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Returns `None` when the service knows no place by that name.
    async fn locate(&self, city: &str) -> Result<Option<GeocodeResult>, ForecastError>;
}

/// Fetches forecast data for a coordinate.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch(&self, params: &ForecastRequestParams)
    -> Result<ForecastResponse, ForecastError>;
}

/// Shared outbound client; every request carries `timeout`.
pub fn http_client(timeout: Duration) -> Result<Client, ForecastError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(ForecastError::Client)
}

/// Construct both upstream clients from config, sharing one HTTP client.
pub fn providers_from_config(
    config: &Config,
) -> Result<(Arc<dyn Geocoder>, Arc<dyn ForecastProvider>), ForecastError> {
    let http = http_client(config.request_timeout())?;

    let geocoder = OpenWeatherGeocoder::new(
        config.geocoding.api_key.clone(),
        &config.geocoding.base_url,
        http.clone(),
    );
    let forecaster = OpenMeteoProvider::new(&config.forecast.base_url, http);

    Ok((Arc::new(geocoder), Arc::new(forecaster)))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
