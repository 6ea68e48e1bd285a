//! Core library for the forecast proxy.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Validation of inbound forecast requests
//! - Abstraction over the upstream forecast provider
//! - Reshaping of the provider's forecast into the public response schema
//!
//! It is used by `forecast-server`, which only adds the HTTP surface.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod transform;
pub mod upstream;
pub mod validator;

pub use config::{Config, ProviderConfig, ServerConfig};
pub use error::{ProviderError, Rejection};
pub use model::{ErrorBody, ForecastItem, ForecastRequest, ForecastResponse};
pub use provider::{ForecastProvider, provider_from_config, rapidapi::RapidApiProvider};
pub use service::{Clock, ForecastService, SystemClock};
pub use upstream::UpstreamForecast;
