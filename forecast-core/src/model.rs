use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Fields requested for the `current` and `hourly` sections.
pub const CURRENT_FIELDS: &str = "temperature_2m,weathercode";
pub const HOURLY_FIELDS: &str = "temperature_2m,weathercode";
pub const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode";

/// One leading hour more than the 24 returned to clients; the extra hour is trimmed.
pub const FORECAST_HOURS: u32 = 25;
pub const FORECAST_TIMEZONE: &str = "auto";

/// Coordinates of the first geocoding match for a city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
}

/// Query string sent to the forecast service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRequestParams {
    pub latitude: f64,
    pub longitude: f64,
    pub current: &'static str,
    pub hourly: &'static str,
    pub forecast_hours: u32,
    pub daily: &'static str,
    pub timezone: &'static str,
}

impl ForecastRequestParams {
    pub fn for_location(location: GeocodeResult) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            current: CURRENT_FIELDS,
            hourly: HOURLY_FIELDS,
            forecast_hours: FORECAST_HOURS,
            daily: DAILY_FIELDS,
            timezone: FORECAST_TIMEZONE,
        }
    }
}

/// Forecast service reply.
///
/// Known sections are typed so a malformed reply fails to parse instead of
/// surfacing later; every field not modelled here is kept in `extra` and
/// written back untouched.
///
/// A section sent as `null` reads as `None` and is omitted on output rather
/// than echoed as `null`; Open-Meteo never sends null sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentConditions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly: Option<HourlySeries>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily: Option<DailySeries>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ForecastResponse {
    /// Drop the leading current-hour sample from the hourly series, if present.
    pub fn trim_leading_hour(&mut self) {
        if let Some(hourly) = self.hourly.as_mut() {
            hourly.drop_first();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_2m: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weathercode: Option<u8>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Index-aligned hourly samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_2m: Option<Vec<Option<Number>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weathercode: Option<Vec<Option<u8>>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HourlySeries {
    /// Remove index 0 from every present series. Absent series stay absent,
    /// so the present ones remain aligned with each other.
    pub fn drop_first(&mut self) {
        drop_first(&mut self.time);
        drop_first(&mut self.temperature_2m);
        drop_first(&mut self.weathercode);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_2m_max: Option<Vec<Option<Number>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_2m_min: Option<Vec<Option<Number>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weathercode: Option<Vec<Option<u8>>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn drop_first<T>(series: &mut Option<Vec<T>>) {
    if let Some(values) = series.as_mut().filter(|v| !v.is_empty()) {
        values.remove(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> ForecastResponse {
        serde_json::from_value(value).expect("valid forecast payload")
    }

    #[test]
    fn params_use_fixed_forecast_configuration() {
        let params = ForecastRequestParams::for_location(GeocodeResult {
            latitude: 48.85,
            longitude: 2.35,
        });

        assert_eq!(params.latitude, 48.85);
        assert_eq!(params.longitude, 2.35);
        assert_eq!(params.current, "temperature_2m,weathercode");
        assert_eq!(params.hourly, "temperature_2m,weathercode");
        assert_eq!(params.daily, "temperature_2m_max,temperature_2m_min,weathercode");
        assert_eq!(params.forecast_hours, 25);
        assert_eq!(params.timezone, "auto");
    }

    #[test]
    fn trimming_drops_first_hour_and_keeps_everything_else() {
        let mut forecast = parse(json!({
            "latitude": 48.86,
            "timezone": "Europe/Paris",
            "hourly_units": { "time": "iso8601" },
            "current": { "time": "t0", "temperature_2m": 9.5, "weathercode": 3 },
            "hourly": {
                "time": ["t0", "t1", "t2"],
                "temperature_2m": [10, 11, 12],
                "weathercode": [0, 1, 2]
            },
            "daily": { "time": ["d0"], "temperature_2m_max": [14.2] }
        }));

        forecast.trim_leading_hour();
        let out = serde_json::to_value(&forecast).unwrap();

        assert_eq!(
            out,
            json!({
                "latitude": 48.86,
                "timezone": "Europe/Paris",
                "hourly_units": { "time": "iso8601" },
                "current": { "time": "t0", "temperature_2m": 9.5, "weathercode": 3 },
                "hourly": {
                    "time": ["t1", "t2"],
                    "temperature_2m": [11, 12],
                    "weathercode": [1, 2]
                },
                "daily": { "time": ["d0"], "temperature_2m_max": [14.2] }
            })
        );
    }

    #[test]
    fn trimming_leaves_missing_series_absent() {
        let mut forecast = parse(json!({
            "hourly": {
                "time": ["t0", "t1"],
                "temperature_2m": [1.5, null]
            }
        }));

        forecast.trim_leading_hour();
        let out = serde_json::to_value(&forecast).unwrap();

        assert_eq!(out, json!({ "hourly": { "time": ["t1"], "temperature_2m": [null] } }));
    }

    #[test]
    fn trimming_without_hourly_is_a_no_op() {
        let original = parse(json!({ "latitude": 1.0, "daily": { "weathercode": [61] } }));
        let mut forecast = original.clone();

        forecast.trim_leading_hour();

        assert_eq!(forecast, original);
    }

    #[test]
    fn null_sections_are_omitted_on_output() {
        let forecast = parse(json!({ "latitude": 1.0, "current": null, "daily": null }));

        assert_eq!(forecast.current, None);
        assert_eq!(serde_json::to_value(&forecast).unwrap(), json!({ "latitude": 1.0 }));
    }

    #[test]
    fn trimming_empty_series_keeps_it_empty() {
        let mut forecast = parse(json!({ "hourly": { "time": [], "weathercode": [] } }));

        forecast.trim_leading_hour();
        let hourly = forecast.hourly.unwrap();

        assert_eq!(hourly.time, Some(vec![]));
        assert_eq!(hourly.weathercode, Some(vec![]));
        assert_eq!(hourly.temperature_2m, None);
    }

    #[test]
    fn unknown_hourly_fields_pass_through_untrimmed() {
        let mut forecast = parse(json!({
            "hourly": { "time": ["t0", "t1"], "precipitation": [0.1, 0.2] }
        }));

        forecast.trim_leading_hour();
        let out = serde_json::to_value(&forecast).unwrap();

        assert_eq!(out["hourly"]["time"], json!(["t1"]));
        assert_eq!(out["hourly"]["precipitation"], json!([0.1, 0.2]));
    }

    #[test]
    fn mistyped_known_fields_are_rejected() {
        let result = serde_json::from_value::<ForecastResponse>(json!({
            "hourly": { "time": "not-a-list" }
        }));

        assert!(result.is_err());
    }
}
