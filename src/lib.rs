//! Backend for the Chapelco weather dashboard: downloads the station's
//! published dbf table, caches it, and serves current and historical
//! readings over a small REST API.

pub mod config;
pub mod handlers;
pub mod router;
pub mod schemas;
pub mod station;

mod openapi_tests;
