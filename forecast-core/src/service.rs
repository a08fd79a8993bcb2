//! The city → forecast flow, independent of any web framework.

use std::sync::Arc;

use crate::{
    error::ForecastError,
    model::{ForecastRequestParams, ForecastResponse},
    provider::{ForecastProvider, Geocoder},
};

#[derive(Debug, Clone)]
pub struct ForecastService {
    geocoder: Arc<dyn Geocoder>,
    forecaster: Arc<dyn ForecastProvider>,
}

impl ForecastService {
    pub fn new(geocoder: Arc<dyn Geocoder>, forecaster: Arc<dyn ForecastProvider>) -> Self {
        Self { geocoder, forecaster }
    }

    /// Geocode `city`, fetch its forecast and drop the leading hourly sample.
    pub async fn forecast_for_city(
        &self,
        city: Option<&str>,
    ) -> Result<ForecastResponse, ForecastError> {
        let city = city.filter(|c| !c.is_empty()).ok_or(ForecastError::MissingCity)?;

        let location = self
            .geocoder
            .locate(city)
            .await?
            .ok_or(ForecastError::CityNotFound)?;

        tracing::info!(city, lat = location.latitude, lon = location.longitude, "Resolved city");

        let params = ForecastRequestParams::for_location(location);
        let mut forecast = self.forecaster.fetch(&params).await?;
        forecast.trim_leading_hour();

        Ok(forecast)
    }
}
