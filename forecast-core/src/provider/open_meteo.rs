use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::{ForecastError, Upstream},
    model::{ForecastRequestParams, ForecastResponse},
    provider::truncate_body,
};

use super::ForecastProvider;

/// Open-Meteo forecast API (`/v1/forecast`).
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    endpoint: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(base_url: &str, http: Client) -> Self {
        Self {
            endpoint: format!("{}/v1/forecast", base_url.trim_end_matches('/')),
            http,
        }
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    async fn fetch(
        &self,
        params: &ForecastRequestParams,
    ) -> Result<ForecastResponse, ForecastError> {
        let service = Upstream::Forecast;

        let res = self
            .http
            .get(&self.endpoint)
            .query(params)
            .send()
            .await
            .map_err(|e| ForecastError::transport(service, e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ForecastError::transport(service, e))?;

        tracing::debug!(%status, body = %body, "Forecast payload");

        if !status.is_success() {
            return Err(ForecastError::UpstreamStatus {
                service,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| ForecastError::UpstreamParse { service, source })
    }
}
