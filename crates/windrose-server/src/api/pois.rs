use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use windrose_poi::{AggregateSites, Category, Location};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct PoiRequest {
    lon: f64,
    lat: f64,
    /// When present, only this category is fetched; otherwise all categories
    /// are aggregated.
    #[serde(default)]
    category: Option<Category>,
}

pub(super) async fn find_pois(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<PoiRequest>,
) -> Result<Json<ApiResponse<AggregateSites>>, ApiError> {
    let req_id = req_id.0;
    let center = Location::new(body.lon, body.lat);
    let categories: Vec<Category> = match body.category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };

    let data = state
        .poi
        .aggregate(center, &categories)
        .await
        .map_err(|error| {
            // The failing category and cause stay in the logs; the client
            // only ever sees the generic message.
            tracing::error!(category = %error.category, error = %error, "poi aggregation failed");
            ApiError::new(
                req_id.clone(),
                "bad_gateway",
                "could not fetch points of interest",
            )
        })?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id),
    }))
}
