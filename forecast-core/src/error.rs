//! Error taxonomy shared by the forecast service and its upstream clients.

use thiserror::Error;

/// Which third-party service an upstream failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Geocoding,
    Forecast,
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Upstream::Geocoding => f.write_str("geocoding service"),
            Upstream::Forecast => f.write_str("forecast service"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("City name is required")]
    MissingCity,

    #[error("City not found")]
    CityNotFound,

    #[error("Failed to reach the {service}: {source}")]
    UpstreamTransport {
        service: Upstream,
        #[source]
        source: reqwest::Error,
    },

    #[error("The {service} did not respond in time")]
    UpstreamTimeout { service: Upstream },

    #[error("The {service} returned status {status}: {body}")]
    UpstreamStatus {
        service: Upstream,
        status: u16,
        body: String,
    },

    #[error("Failed to parse the {service} response: {source}")]
    UpstreamParse {
        service: Upstream,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ForecastError {
    /// Classify a `reqwest` failure, keeping timeouts apart from other transport faults.
    pub fn transport(service: Upstream, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::UpstreamTimeout { service }
        } else {
            Self::UpstreamTransport { service, source }
        }
    }

    /// Errors caused by the caller's input rather than an upstream fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingCity | Self::CityNotFound)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::UpstreamTimeout { .. })
    }
}
