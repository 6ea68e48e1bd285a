use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A validated inbound forecast request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    pub token: String,
    pub location: String,
    pub requester_name: String,
    /// Raw requested date, parsed later by the transformer.
    pub date: Option<String>,
}

/// Timing information about the handled request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_start_datetime: String,
    pub event_finished_datetime: String,
    pub event_duration: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub min_c: Number,
    pub max_c: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub wind_direction: String,
    pub min_speed_kph: Number,
    pub max_speed_kph: Number,
    pub gusts_value_kph: Option<Number>,
}

/// One simplified day of forecast as returned to callers.
///
/// Measurements are copied from the provider as-is, integers included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastItem {
    pub date: String,
    pub timestamp: String,
    pub description: String,
    pub prec_probability: Number,
    pub temperature: Temperature,
    pub wind: Wind,
}

/// Body of a successful `POST /weather/api/v1/forecast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub event: Event,
    pub requester_name: String,
    pub location: String,
    pub coordinates: Coordinates,
    pub forecast: Vec<ForecastItem>,
}

/// JSON body of a rejected request: `{"message": ..., ...payload}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}
