use axum::http::StatusCode;
use axum::response::Json;
use utoipa::{OpenApi, ToSchema};

use common::{ApiResponse, ErrorResponse, FieldLists, WeatherField, WeatherRecord};
use serde::Serialize;

use crate::station::{Station, StationError};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Handle to the station table (fetcher + TTL cache)
    pub station: Station,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Station table reachability
    pub station: String,
}

/// Error tuple returned by handlers on failure.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Maps a station failure onto a status code and coded error body.
pub fn station_error(err: StationError) -> ApiError {
    let (status, code) = match &err {
        StationError::Fetch(_) => (StatusCode::BAD_GATEWAY, "STATION_UNAVAILABLE"),
        StationError::NotEnoughRecords { .. } => (StatusCode::NOT_FOUND, "NOT_ENOUGH_RECORDS"),
        StationError::Table(_) | StationError::BadTimestamp(_) | StationError::Alignment(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "BAD_TABLE")
        }
    };
    tracing::warn!(%err, code, "Station read failed");
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::weather::get_current_weather,
        crate::handlers::weather::get_past_record_list,
        crate::handlers::weather::get_past_field_lists,
    ),
    components(
        schemas(
            ApiResponse<WeatherRecord>,
            ApiResponse<Vec<WeatherRecord>>,
            ApiResponse<FieldLists>,
            ErrorResponse,
            HealthResponse,
            WeatherRecord,
            FieldLists,
            WeatherField,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "weather", description = "Current and historical weather readings"),
    ),
    info(
        title = "Chapelco Weather API",
        description = "Current and historical readings from the Chapelco ski resort weather station",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
