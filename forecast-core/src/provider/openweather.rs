use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{
    error::{ForecastError, Upstream},
    model::GeocodeResult,
    provider::truncate_body,
};

use super::Geocoder;

/// OpenWeather direct geocoding (`/geo/1.0/direct`).
#[derive(Debug, Clone)]
pub struct OpenWeatherGeocoder {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherGeocoder {
    pub fn new(api_key: String, base_url: &str, http: Client) -> Self {
        Self {
            api_key,
            endpoint: format!("{}/geo/1.0/direct", base_url.trim_end_matches('/')),
            http,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwLocation {
    lat: f64,
    lon: f64,
}

#[async_trait]
impl Geocoder for OpenWeatherGeocoder {
    async fn locate(&self, city: &str) -> Result<Option<GeocodeResult>, ForecastError> {
        let service = Upstream::Geocoding;

        let request = self
            .http
            .get(&self.endpoint)
            .query(&[("q", city), ("limit", "1"), ("appid", self.api_key.as_str())])
            .build()
            .map_err(|e| ForecastError::transport(service, e))?;

        tracing::debug!(url = %redact_api_key(request.url()), "Geocoding city");

        let res = self
            .http
            .execute(request)
            .await
            .map_err(|e| ForecastError::transport(service, e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ForecastError::transport(service, e))?;

        if !status.is_success() {
            return Err(ForecastError::UpstreamStatus {
                service,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let matches: Vec<OwLocation> = serde_json::from_str(&body)
            .map_err(|source| ForecastError::UpstreamParse { service, source })?;

        Ok(matches.first().map(|m| GeocodeResult {
            latitude: m.lat,
            longitude: m.lon,
        }))
    }
}

fn redact_api_key(url: &Url) -> Url {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "appid" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let geocoder = OpenWeatherGeocoder::new("K".into(), "http://geo.test/", Client::new());
        assert_eq!(geocoder.endpoint, "http://geo.test/geo/1.0/direct");
    }

    #[test]
    fn redact_hides_only_the_api_key() {
        let url = Url::parse("http://geo.test/geo/1.0/direct?q=Paris&limit=1&appid=SECRET").unwrap();
        let redacted = redact_api_key(&url).to_string();

        assert!(!redacted.contains("SECRET"));
        assert!(redacted.contains("q=Paris"));
        assert!(redacted.contains("limit=1"));
        assert!(redacted.contains("appid=***") || redacted.contains("appid=%2A%2A%2A"));
    }
}
