//! Common transport-layer types shared between backend and frontend.
//! These structs mirror the backend handlers' response payloads so the
//! frontend can deserialize API responses without duplicating shapes.

mod chart;
mod fields;
mod record;

pub use chart::{ChartConfig, ChartSeries, LABEL_ROTATION_DEG, LABEL_STEP, ZERO_LINE_COLOR};
pub use fields::{ParseFieldError, WeatherField};
pub use record::{FieldLists, FieldListsError, WeatherRecord};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
/// Every successful payload is wrapped in this envelope; the frontend
/// unwraps it in its API client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

/// Error envelope returned by the backend on failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Machine-readable error code
    pub code: String,
    /// Success flag (always false for errors)
    pub success: bool,
}
