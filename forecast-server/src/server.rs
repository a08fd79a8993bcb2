//! HTTP surface: `GET /api/weather?city=<name>`.

use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use forecast_core::{ForecastError, ForecastResponse, ForecastService};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// First `city` value in the query string; later repeats are ignored.
fn first_city(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "city")
        .map(|(_, value)| value.as_str())
}

/// Maps a [`ForecastError`] to a status code and `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError(ForecastError);

impl From<ForecastError> for ApiError {
    fn from(err: ForecastError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            ForecastError::MissingCity => StatusCode::BAD_REQUEST,
            ForecastError::CityNotFound => StatusCode::NOT_FOUND,
            ForecastError::UpstreamTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ForecastError::UpstreamTransport { .. }
            | ForecastError::UpstreamStatus { .. }
            | ForecastError::UpstreamParse { .. } => StatusCode::BAD_GATEWAY,
            ForecastError::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if !self.0.is_client_error() {
            tracing::error!(error = %self.0, %status, "Forecast request failed");
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub fn router(service: ForecastService) -> Router {
    Router::new()
        .route("/api/weather", get(get_weather))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

async fn get_weather(
    State(service): State<ForecastService>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ForecastResponse>, ApiError> {
    let forecast = service.forecast_for_city(first_city(&pairs)).await?;
    Ok(Json(forecast))
}

/// Serve the router on `addr` until Ctrl-C.
pub async fn serve(addr: SocketAddr, service: ForecastService) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(%addr, "Listening for forecast requests");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
