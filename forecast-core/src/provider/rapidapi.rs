use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    config::ProviderConfig,
    error::ProviderError,
    provider::{DEFAULT_LOCATION, ForecastProvider},
    upstream::UpstreamForecast,
};

/// Client for the RapidAPI "forecast9" summary endpoint.
#[derive(Debug, Clone)]
pub struct RapidApiProvider {
    api_key: String,
    host: String,
    base_url: Url,
    http: Client,
}

impl RapidApiProvider {
    pub fn new(config: &ProviderConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid provider base URL '{}'", config.base_url))?;

        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Invalid provider base URL '{}'", config.base_url));
        }

        Ok(Self {
            api_key: config.api_key.clone(),
            host: config.host.clone(),
            base_url,
            http: Client::new(),
        })
    }

    /// `{base}/rapidapi/forecast/{location}/summary/`
    pub fn forecast_url(&self, location: &str) -> Url {
        let location = if location.is_empty() { DEFAULT_LOCATION } else { location };

        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["rapidapi", "forecast", location, "summary", ""]);
        }
        url
    }
}

#[async_trait]
impl ForecastProvider for RapidApiProvider {
    async fn get_forecast(&self, location: &str) -> Result<UpstreamForecast, ProviderError> {
        let url = self.forecast_url(location);
        tracing::debug!(%url, "requesting upstream forecast");

        let res = self
            .http
            .get(url)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.host)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: &str) -> RapidApiProvider {
        RapidApiProvider::new(&ProviderConfig {
            api_key: "KEY".into(),
            base_url: base_url.into(),
            ..ProviderConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn url_embeds_location_as_single_segment() {
        let url = provider("https://forecast9.p.rapidapi.com").forecast_url("Kyiv");
        assert_eq!(
            url.as_str(),
            "https://forecast9.p.rapidapi.com/rapidapi/forecast/Kyiv/summary/"
        );
    }

    #[test]
    fn url_escapes_location() {
        let url = provider("https://example.test/").forecast_url("New York/Queens");
        assert_eq!(url.path(), "/rapidapi/forecast/New%20York%2FQueens/summary/");
    }

    #[test]
    fn url_keeps_base_path_prefix() {
        let url = provider("http://127.0.0.1:9000/mock/").forecast_url("Lviv");
        assert_eq!(url.path(), "/mock/rapidapi/forecast/Lviv/summary/");
    }

    #[test]
    fn empty_location_defaults_to_kyiv() {
        let url = provider("https://example.test").forecast_url("");
        assert_eq!(url.path(), "/rapidapi/forecast/Kyiv/summary/");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "й".repeat(250);
        let cut = truncate_body(&long);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
