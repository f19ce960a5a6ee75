use std::sync::Arc;
use std::time::Duration;

use crate::schemas::AppState;
use crate::station::{HttpTableFetch, Station};

/// Fixed URL the station republishes its dbf table at.
pub const DEFAULT_DBF_URL: &str = "http://googledrive.com/host/0B06ZoNF0o91ncXRPdVRuZjBDaE0";

/// The station publisher updates the table every 20 minutes.
pub const DEFAULT_CACHE_MINUTES: u64 = 20;

/// Runtime settings, from environment with defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_address: String,
    pub dbf_url: String,
    pub cache_minutes: u64,
}

impl Settings {
    /// Load settings from the environment (after `dotenvy`).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            dbf_url: std::env::var("STATION_DBF_URL")
                .unwrap_or_else(|_| DEFAULT_DBF_URL.to_string()),
            cache_minutes: std::env::var("STATION_CACHE_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_MINUTES),
        }
    }
}

/// Initialize application state from settings.
pub fn initialize_app_state(settings: &Settings) -> AppState {
    tracing::info!("Station table source: {}", settings.dbf_url);
    let fetch = Arc::new(HttpTableFetch::new(settings.dbf_url.clone()));
    let station = Station::new(fetch, Duration::from_secs(settings.cache_minutes * 60));
    AppState { station }
}
