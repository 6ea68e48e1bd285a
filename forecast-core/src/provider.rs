use crate::{Config, UpstreamForecast, error::ProviderError, provider::rapidapi::RapidApiProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod rapidapi;

/// Location queried when the caller sends an empty one.
pub const DEFAULT_LOCATION: &str = "Kyiv";

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Fetch the provider's multi-day forecast for `location`.
    async fn get_forecast(&self, location: &str) -> Result<UpstreamForecast, ProviderError>;
}

/// Construct the upstream provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    if !config.is_provider_configured() {
        return Err(anyhow::anyhow!(
            "No API key configured for the forecast provider.\n\
             Hint: run `forecast-server configure` or set FORECAST_PROVIDER_API_KEY."
        ));
    }

    let provider = RapidApiProvider::new(&config.provider)?;
    Ok(Box::new(provider))
}
