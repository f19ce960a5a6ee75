use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::fields::WeatherField;

/// One observation snapshot from the station.
///
/// Replaced wholesale on every fetch; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherRecord {
    /// Observation time, UTC
    pub datetime: DateTime<Utc>,
    /// Temperature in °C
    pub temperature: f64,
    /// Dew point in °C
    pub dew_point: f64,
    /// Relative humidity in %
    pub relative_humidity: f64,
    /// Accumulated rain in mm
    pub rain_sum: f64,
    /// Station-local pressure in hPa
    pub local_pressure: f64,
    /// Sea-level adjusted pressure in hPa
    pub absolute_pressure: f64,
}

impl WeatherRecord {
    pub fn value(&self, field: WeatherField) -> f64 {
        match field {
            WeatherField::Temperature => self.temperature,
            WeatherField::DewPoint => self.dew_point,
            WeatherField::RelativeHumidity => self.relative_humidity,
            WeatherField::RainSum => self.rain_sum,
            WeatherField::LocalPressure => self.local_pressure,
            WeatherField::AbsolutePressure => self.absolute_pressure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldListsError {
    #[error("series {field} has {len} values but DATE_TIME has {expected}")]
    LengthMismatch {
        field: WeatherField,
        len: usize,
        expected: usize,
    },
}

/// The `past-field-lists` payload: an ordered timestamp sequence plus one
/// same-length value sequence per field, index-aligned.
///
/// Invariant: every series in `series` has exactly `date_time.len()` values.
/// [`FieldLists::new`] enforces this, and deserialization routes through it,
/// so a misaligned wire payload is rejected rather than carried; the series
/// map is private so the invariant cannot be broken after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "RawFieldLists")]
pub struct FieldLists {
    /// Observation times, oldest first
    #[serde(rename = "DATE_TIME")]
    date_time: Vec<DateTime<Utc>>,
    /// Per-field value sequences, keyed by wire code
    #[serde(flatten)]
    series: BTreeMap<WeatherField, Vec<f64>>,
}

/// Unvalidated wire shape of [`FieldLists`].
#[derive(Deserialize)]
struct RawFieldLists {
    #[serde(rename = "DATE_TIME")]
    date_time: Vec<DateTime<Utc>>,
    #[serde(flatten)]
    series: BTreeMap<WeatherField, Vec<f64>>,
}

impl TryFrom<RawFieldLists> for FieldLists {
    type Error = FieldListsError;

    fn try_from(raw: RawFieldLists) -> Result<Self, Self::Error> {
        FieldLists::new(raw.date_time, raw.series)
    }
}

impl FieldLists {
    pub fn new(
        date_time: Vec<DateTime<Utc>>,
        series: BTreeMap<WeatherField, Vec<f64>>,
    ) -> Result<Self, FieldListsError> {
        let expected = date_time.len();
        for (&field, values) in &series {
            if values.len() != expected {
                return Err(FieldListsError::LengthMismatch {
                    field,
                    len: values.len(),
                    expected,
                });
            }
        }
        Ok(Self { date_time, series })
    }

    pub fn date_time(&self) -> &[DateTime<Utc>] {
        &self.date_time
    }

    /// Value sequence for `field`, or `None` if the payload does not carry it.
    pub fn series(&self, field: WeatherField) -> Option<&[f64]> {
        self.series.get(&field).map(Vec::as_slice)
    }

    /// Number of observations (= length of every series).
    pub fn len(&self) -> usize {
        self.date_time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.date_time.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn timestamps(n: usize) -> Vec<DateTime<Utc>> {
        (0..n)
            .map(|i| Utc.with_ymd_and_hms(2014, 7, 1, 0, 0, 0).unwrap() + chrono::Duration::minutes(10 * i as i64))
            .collect()
    }

    #[test]
    fn rejects_misaligned_series() {
        let mut series = BTreeMap::new();
        series.insert(WeatherField::Temperature, vec![1.0, 2.0, 3.0]);
        let err = FieldLists::new(timestamps(4), series).unwrap_err();
        assert_eq!(
            err,
            FieldListsError::LengthMismatch {
                field: WeatherField::Temperature,
                len: 3,
                expected: 4,
            }
        );
    }

    #[test]
    fn json_shape_matches_wire_format() {
        let mut series = BTreeMap::new();
        series.insert(WeatherField::RainSum, vec![0.0, 0.2]);
        let lists = FieldLists::new(timestamps(2), series).unwrap();

        let json = serde_json::to_value(&lists).unwrap();
        assert!(json.get("DATE_TIME").is_some());
        assert_eq!(json["RAIN_SUM"], serde_json::json!([0.0, 0.2]));
    }

    #[test]
    fn deserializes_backend_payload() {
        let json = serde_json::json!({
            "DATE_TIME": ["2014-07-01T00:00:00Z", "2014-07-01T00:10:00Z"],
            "CHN1_DEG": [-2.5, -2.1],
            "CHN1_RF": [81.0, 83.5],
        });
        let lists: FieldLists = serde_json::from_value(json).unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists.series(WeatherField::Temperature), Some(&[-2.5, -2.1][..]));
        assert_eq!(lists.series(WeatherField::RainSum), None);
    }

    #[test]
    fn misaligned_payload_fails_to_deserialize() {
        let json = serde_json::json!({
            "DATE_TIME": [
                "2014-07-01T00:00:00Z",
                "2014-07-01T00:10:00Z",
                "2014-07-01T00:20:00Z",
            ],
            "CHN1_DEG": [-2.5, -2.1],
        });
        let err = serde_json::from_value::<FieldLists>(json).unwrap_err();
        assert!(err.to_string().contains("CHN1_DEG"));
    }
}
