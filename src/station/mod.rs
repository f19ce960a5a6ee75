//! Weather data from the Chapelco ski resort station.
//!
//! The station publishes its history as a dbf table; this module downloads
//! and caches it ([`tables`]), parses it ([`dbf`]), and extracts typed
//! records and per-field columns for the API handlers.

pub mod dbf;
pub mod tables;

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;
use tracing::instrument;

use common::{FieldLists, FieldListsError, WeatherField, WeatherRecord};

use dbf::{DbfError, DbfTable};
pub use tables::{HttpTableFetch, Station, TableFetch};

/// Timestamp column of the station table.
const DATE_TIME: &str = "DATE_TIME";

/// The table stores timestamps as fractional days since 1899-12-30;
/// 25569 days later is the Unix epoch.
const EPOCH_OFFSET_DAYS: f64 = 25569.0;
const SECONDS_PER_DAY: f64 = 86400.0;
/// The station clock runs four hours behind UTC.
const STATION_CLOCK_OFFSET_SECS: i64 = 4 * 3600;

#[derive(Debug, Error)]
pub enum StationError {
    #[error("station table fetch failed: {0}")]
    Fetch(String),
    #[error(transparent)]
    Table(#[from] DbfError),
    #[error("station table has {available} records, {requested} requested")]
    NotEnoughRecords { requested: usize, available: usize },
    #[error("station table timestamp {0} is out of range")]
    BadTimestamp(f64),
    #[error(transparent)]
    Alignment(#[from] FieldListsError),
}

/// Converts a raw day-fraction timestamp to UTC.
fn record_datetime(raw_days: f64) -> Result<DateTime<Utc>, StationError> {
    let secs = ((raw_days - EPOCH_OFFSET_DAYS) * SECONDS_PER_DAY) as i64 + STATION_CLOCK_OFFSET_SECS;
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or(StationError::BadTimestamp(raw_days))
}

fn record_at(table: &DbfTable, row: usize) -> Result<WeatherRecord, StationError> {
    Ok(WeatherRecord {
        datetime: record_datetime(table.f64_by_name(row, DATE_TIME)?)?,
        temperature: table.f64_by_name(row, WeatherField::Temperature.code())?,
        dew_point: table.f64_by_name(row, WeatherField::DewPoint.code())?,
        relative_humidity: table.f64_by_name(row, WeatherField::RelativeHumidity.code())?,
        rain_sum: table.f64_by_name(row, WeatherField::RainSum.code())?,
        local_pressure: table.f64_by_name(row, WeatherField::LocalPressure.code())?,
        absolute_pressure: table.f64_by_name(row, WeatherField::AbsolutePressure.code())?,
    })
}

/// Row indices of the trailing window of `n` records, oldest first.
/// Rows carrying the dbf deletion flag do not count as observations.
fn window_rows(table: &DbfTable, n: usize) -> Result<Vec<usize>, StationError> {
    let mut live = Vec::with_capacity(table.record_count());
    for row in 0..table.record_count() {
        if !table.is_deleted(row)? {
            live.push(row);
        }
    }

    let available = live.len();
    if n > available {
        return Err(StationError::NotEnoughRecords {
            requested: n,
            available,
        });
    }
    Ok(live.split_off(available - n))
}

impl Station {
    /// The most recent observation.
    #[instrument(skip(self))]
    pub async fn read_current(&self) -> Result<WeatherRecord, StationError> {
        let table = self.table().await?;
        let rows = window_rows(&table, 1)?;
        record_at(&table, rows[0])
    }

    /// The last `n` observations, oldest first.
    #[instrument(skip(self))]
    pub async fn read_last_n(&self, n: usize) -> Result<Vec<WeatherRecord>, StationError> {
        let table = self.table().await?;
        window_rows(&table, n)?
            .into_iter()
            .map(|row| record_at(&table, row))
            .collect()
    }

    /// The last `n` observations as per-field columns aligned to `DATE_TIME`,
    /// the shape the charts view consumes.
    #[instrument(skip(self))]
    pub async fn read_last_n_field_lists(&self, n: usize) -> Result<FieldLists, StationError> {
        let table = self.table().await?;
        let rows = window_rows(&table, n)?;

        let date_time = rows
            .iter()
            .map(|&row| record_datetime(table.f64_by_name(row, DATE_TIME)?))
            .collect::<Result<Vec<_>, _>>()?;

        let mut series = BTreeMap::new();
        for field in WeatherField::ALL {
            let values = rows
                .iter()
                .map(|&row| table.f64_by_name(row, field.code()))
                .collect::<Result<Vec<_>, _>>()?;
            series.insert(field, values);
        }

        Ok(FieldLists::new(date_time, series)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::{mark_deleted, test_station, weather_table, CountingTableFetch};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn day_fraction_timestamps_convert_to_utc() {
        // 25569.0 days is the Unix epoch; the station clock offset shifts it.
        let at_epoch = record_datetime(25569.0).unwrap();
        assert_eq!(
            at_epoch,
            Utc.with_ymd_and_hms(1970, 1, 1, 4, 0, 0).unwrap()
        );

        let one_day_later = record_datetime(25570.5).unwrap();
        assert_eq!(
            one_day_later,
            Utc.with_ymd_and_hms(1970, 1, 2, 16, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn current_reading_is_the_last_row() {
        let station = test_station(weather_table(5));
        let current = station.read_current().await.unwrap();
        let all = station.read_last_n(5).await.unwrap();
        assert_eq!(current, all[4]);
    }

    #[tokio::test]
    async fn last_n_is_oldest_first() {
        let station = test_station(weather_table(6));
        let records = station.read_last_n(3).await.unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[0].datetime < records[1].datetime);
        assert!(records[1].datetime < records[2].datetime);
    }

    #[tokio::test]
    async fn requesting_more_than_available_fails() {
        let station = test_station(weather_table(2));
        assert!(matches!(
            station.read_last_n(3).await,
            Err(StationError::NotEnoughRecords {
                requested: 3,
                available: 2
            })
        ));
    }

    #[tokio::test]
    async fn deleted_rows_are_not_served_as_observations() {
        let mut bytes = weather_table(5);
        mark_deleted(&mut bytes, 4);
        mark_deleted(&mut bytes, 1);
        let station = test_station(bytes);

        // The flagged newest row is skipped; row 3 is now current.
        let current = station.read_current().await.unwrap();
        let all = station.read_last_n(3).await.unwrap();
        assert_eq!(current, all[2]);
        assert!(all.iter().all(|r| r.datetime <= current.datetime));

        // Only three live rows remain, in all read shapes.
        let lists = station.read_last_n_field_lists(3).await.unwrap();
        assert_eq!(lists.len(), 3);
        assert!(matches!(
            station.read_last_n(4).await,
            Err(StationError::NotEnoughRecords {
                requested: 4,
                available: 3
            })
        ));
    }

    #[tokio::test]
    async fn field_lists_carry_all_six_fields_aligned() {
        let station = test_station(weather_table(8));
        let lists = station.read_last_n_field_lists(4).await.unwrap();
        assert_eq!(lists.len(), 4);
        for field in WeatherField::ALL {
            assert_eq!(lists.series(field).unwrap().len(), 4);
        }
    }

    #[tokio::test]
    async fn record_and_field_list_reads_share_the_cached_table() {
        let fetch = Arc::new(CountingTableFetch::new(weather_table(4)));
        let station = Station::new(fetch.clone(), Duration::from_secs(1200));

        station.read_current().await.unwrap();
        station.read_last_n_field_lists(2).await.unwrap();

        assert_eq!(fetch.fetches(), 1);
    }
}
