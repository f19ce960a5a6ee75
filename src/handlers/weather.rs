use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::instrument;

use common::{ApiResponse, FieldLists, WeatherRecord};

use crate::schemas::{station_error, ApiError, AppState};

/// Get the most recent weather observation
#[utoipa::path(
    get,
    path = "/api/weather/current",
    tag = "weather",
    responses(
        (status = 200, description = "Current weather retrieved successfully", body = ApiResponse<WeatherRecord>),
        (status = 502, description = "Station table could not be fetched", body = common::ErrorResponse),
        (status = 500, description = "Station table could not be read", body = common::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_current_weather(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<WeatherRecord>>, ApiError> {
    let record = state.station.read_current().await.map_err(station_error)?;

    Ok(Json(ApiResponse {
        data: record,
        message: "Current weather retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get the last `n` observations as full records
#[utoipa::path(
    get,
    path = "/api/weather/past-record-list/{n}",
    tag = "weather",
    params(
        ("n" = usize, Path, description = "Number of trailing records to return"),
    ),
    responses(
        (status = 200, description = "Past records retrieved successfully", body = ApiResponse<Vec<WeatherRecord>>),
        (status = 404, description = "Fewer records than requested", body = common::ErrorResponse),
        (status = 502, description = "Station table could not be fetched", body = common::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_past_record_list(
    Path(n): Path<usize>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<WeatherRecord>>>, ApiError> {
    let records = state.station.read_last_n(n).await.map_err(station_error)?;

    Ok(Json(ApiResponse {
        data: records,
        message: "Past records retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get the last `n` observations as per-field lists aligned to `DATE_TIME`
#[utoipa::path(
    get,
    path = "/api/weather/past-field-lists/{n}",
    tag = "weather",
    params(
        ("n" = usize, Path, description = "Number of trailing records to return"),
    ),
    responses(
        (status = 200, description = "Past field lists retrieved successfully", body = ApiResponse<FieldLists>),
        (status = 404, description = "Fewer records than requested", body = common::ErrorResponse),
        (status = 502, description = "Station table could not be fetched", body = common::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_past_field_lists(
    Path(n): Path<usize>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FieldLists>>, ApiError> {
    let lists = state
        .station
        .read_last_n_field_lists(n)
        .await
        .map_err(station_error)?;

    Ok(Json(ApiResponse {
        data: lists,
        message: "Past field lists retrieved successfully".to_string(),
        success: true,
    }))
}
