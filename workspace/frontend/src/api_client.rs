use gloo_net::http::Request;
use serde::Deserialize;

use common::{ApiResponse, FieldLists, WeatherRecord};

use crate::settings;

fn api_base() -> String {
    settings::get_settings().api_base_url()
}

/// Common GET request handler: fetch, check status, unwrap the envelope.
pub async fn get<T>(endpoint: &str) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    let url = format!("{}{}", api_base(), endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url).send().await.map_err(|e| {
        let error_msg = format!("Request failed: {}", e);
        log::error!("GET {} - {}", endpoint, error_msg);
        error_msg
    })?;

    if !response.ok() {
        let error_msg = format!("HTTP error: {}", response.status());
        log::error!("GET {} - {}", endpoint, error_msg);
        return Err(error_msg);
    }

    let api_response: ApiResponse<T> = response.json().await.map_err(|e| {
        let error_msg = format!("Failed to parse response: {}", e);
        log::error!("GET {} - {}", endpoint, error_msg);
        error_msg
    })?;

    log::info!("GET {} - Success", endpoint);
    Ok(api_response.data)
}

/// The most recent observation, for the current-conditions cards.
pub async fn get_current_weather() -> Result<WeatherRecord, String> {
    get("/api/weather/current").await
}

/// The trailing `n` records as per-field lists, for the charts view.
pub async fn get_past_field_lists(n: u32) -> Result<FieldLists, String> {
    get(&format!("/api/weather/past-field-lists/{}", n)).await
}
