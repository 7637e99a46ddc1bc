use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use windrose_weather::WeatherSummary;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct WeatherRequest {
    lon: f64,
    lat: f64,
}

pub(super) async fn get_weather(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<WeatherRequest>,
) -> Result<Json<ApiResponse<WeatherSummary>>, ApiError> {
    let req_id = req_id.0;

    let data = state
        .weather
        .fetch_summary(body.lon, body.lat)
        .await
        .map_err(|error| {
            tracing::error!(error = %error, "weather fetch failed");
            ApiError::new(req_id.clone(), "bad_gateway", "could not fetch weather data")
        })?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id),
    }))
}
