//! Payload returned by the RapidAPI "forecast9" summary endpoint.
//!
//! Only the fields the proxy reads are modelled; anything else in the
//! provider's document is ignored. A missing field fails deserialization.
//! Per-day measurements stay [`Number`] so integers are passed on as integers.

use serde::Deserialize;
use serde_json::Number;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamForecast {
    pub location: UpstreamLocation,
    pub forecast: UpstreamItems,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamLocation {
    pub name: String,
    pub coordinates: UpstreamCoordinates,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct UpstreamCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamItems {
    /// Item 0 is today, item N is today + N days.
    pub items: Vec<UpstreamItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamItem {
    pub date: String,
    pub date_with_timezone: String,
    pub weather: UpstreamWeather,
    pub prec: UpstreamPrecipitation,
    pub temperature: UpstreamTemperature,
    pub wind: UpstreamWind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamWeather {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamPrecipitation {
    pub probability: Number,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamTemperature {
    pub min: Number,
    pub max: Number,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamWind {
    pub direction: String,
    pub min: Number,
    pub max: Number,
    pub gusts: UpstreamGusts,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamGusts {
    /// The provider sends `null` on calm days.
    pub value: Option<Number>,
}
