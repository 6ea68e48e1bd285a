use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::ErrorBody;

/// Failure talking to the upstream forecast provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to upstream provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream provider answered with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected upstream payload: {0}")]
    Schema(#[from] serde_json::Error),
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Transport(e) if e.is_timeout())
    }
}

/// Reason a forecast request was not served.
#[derive(Debug, Error)]
pub enum Rejection {
    #[error("request body must be a JSON object")]
    InvalidBody,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0}")]
    Unauthorized(String),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("upstream provider error: {0}")]
    Upstream(#[from] ProviderError),
}

impl Rejection {
    /// HTTP status code the boundary should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Rejection::InvalidBody | Rejection::MissingField(_) | Rejection::InvalidDate(_) => 400,
            Rejection::Unauthorized(_) => 403,
            Rejection::Upstream(e) if e.is_timeout() => 504,
            Rejection::Upstream(_) => 502,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let mut payload = Map::new();
        if let Rejection::InvalidDate(date) = self {
            payload.insert("date".to_string(), Value::String(date.clone()));
        }

        ErrorBody {
            message: self.to_string(),
            payload,
        }
    }
}
