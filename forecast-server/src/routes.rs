use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use forecast_core::{ForecastResponse, ForecastService, Rejection};
use serde_json::Value;
use std::sync::Arc;

pub const FORECAST_PATH: &str = "/weather/api/v1/forecast";

const GREETING: &str = "<p><h2>Weather forecast proxy.</h2></p>";

#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<ForecastService>,
}

impl AppState {
    pub fn new(service: ForecastService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route(FORECAST_PATH, post(forecast))
        .with_state(state)
}

async fn home() -> Html<&'static str> {
    Html(GREETING)
}

async fn forecast(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ForecastResponse>, ApiError> {
    // Parsed by hand so malformed JSON still gets a `{"message": ...}` body.
    let payload: Value = serde_json::from_slice(&body).map_err(|_| Rejection::InvalidBody)?;

    let response = state.service.handle(&payload).await?;

    tracing::info!(
        requester = %response.requester_name,
        location = %response.location,
        days = response.forecast.len(),
        "forecast served"
    );
    Ok(Json(response))
}

/// A [`Rejection`] rendered as a JSON error response.
#[derive(Debug)]
pub struct ApiError(pub Rejection);

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        Self(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self.0, "forecast request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.0, "forecast request rejected");
        }

        (status, Json(self.0.body())).into_response()
    }
}
