//! Download and caching of the station's published dbf table.
//!
//! The station republishes its table at a fixed URL; readings only change a
//! few times an hour, so the parsed table is cached and refetched once the
//! staleness window passes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, info};

use super::dbf::DbfTable;
use super::StationError;

/// Source of raw table bytes. Production uses [`HttpTableFetch`]; tests
/// substitute an in-memory fake.
#[async_trait]
pub trait TableFetch: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>, StationError>;
}

/// Fetches the table over HTTP.
pub struct HttpTableFetch {
    client: reqwest::Client,
    url: String,
}

impl HttpTableFetch {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl TableFetch for HttpTableFetch {
    async fn fetch(&self) -> Result<Vec<u8>, StationError> {
        debug!("Fetching station table from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| StationError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StationError::Fetch(format!(
                "station returned HTTP {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StationError::Fetch(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Handle to the station's table: a fetcher plus a TTL cache of the parsed
/// result. Cloning shares the cache.
#[derive(Clone)]
pub struct Station {
    fetch: Arc<dyn TableFetch>,
    cache: Cache<(), Arc<DbfTable>>,
}

impl Station {
    /// `ttl` is the staleness window; the original station publisher updates
    /// every 20 minutes.
    pub fn new(fetch: Arc<dyn TableFetch>, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(1).time_to_live(ttl).build();
        Self { fetch, cache }
    }

    /// The parsed table, from cache when fresh.
    pub async fn table(&self) -> Result<Arc<DbfTable>, StationError> {
        if let Some(table) = self.cache.get(&()).await {
            return Ok(table);
        }

        let bytes = self.fetch.fetch().await?;
        let table = Arc::new(DbfTable::parse(bytes)?);
        info!(records = table.record_count(), "Station table refreshed");
        self.cache.insert((), table.clone()).await;
        Ok(table)
    }
}

impl std::fmt::Debug for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Station").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::{weather_table, CountingTableFetch, FailingTableFetch};

    #[tokio::test]
    async fn table_is_fetched_once_within_ttl() {
        let fetch = Arc::new(CountingTableFetch::new(weather_table(3)));
        let station = Station::new(fetch.clone(), Duration::from_secs(1200));

        let first = station.table().await.unwrap();
        let second = station.table().await.unwrap();

        assert_eq!(first.record_count(), 3);
        assert_eq!(second.record_count(), 3);
        assert_eq!(fetch.fetches(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_is_reported() {
        let station = Station::new(Arc::new(FailingTableFetch), Duration::from_secs(1200));
        assert!(matches!(
            station.table().await,
            Err(StationError::Fetch(_))
        ));
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let station = Station::new(Arc::new(FailingTableFetch), Duration::from_secs(1200));
        let _ = station.table().await;
        // A second read retries the fetch instead of serving a poisoned entry.
        assert!(station.table().await.is_err());
    }
}
