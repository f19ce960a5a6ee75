use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One measured quantity from the station table.
///
/// Serializes as the station's wire code (`CHN1_DEG`, `RAIN_SUM`, ...) so the
/// enum can key the flattened per-field maps in [`crate::FieldLists`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum WeatherField {
    #[serde(rename = "CHN1_DEG")]
    Temperature,
    #[serde(rename = "CHN1_DEW")]
    DewPoint,
    #[serde(rename = "CHN1_RF")]
    RelativeHumidity,
    #[serde(rename = "RAIN_SUM")]
    RainSum,
    #[serde(rename = "PRES_LOC")]
    LocalPressure,
    #[serde(rename = "PRES_ABS")]
    AbsolutePressure,
}

impl WeatherField {
    /// All six recognized fields, in dashboard display order.
    pub const ALL: [WeatherField; 6] = [
        WeatherField::Temperature,
        WeatherField::DewPoint,
        WeatherField::RelativeHumidity,
        WeatherField::RainSum,
        WeatherField::LocalPressure,
        WeatherField::AbsolutePressure,
    ];

    /// Column name in the station's dbf table, also the JSON map key.
    pub fn code(self) -> &'static str {
        match self {
            WeatherField::Temperature => "CHN1_DEG",
            WeatherField::DewPoint => "CHN1_DEW",
            WeatherField::RelativeHumidity => "CHN1_RF",
            WeatherField::RainSum => "RAIN_SUM",
            WeatherField::LocalPressure => "PRES_LOC",
            WeatherField::AbsolutePressure => "PRES_ABS",
        }
    }

    /// Chart title for the field's history chart.
    pub fn title(self) -> &'static str {
        match self {
            WeatherField::Temperature => "Past Temperatures",
            WeatherField::DewPoint => "Past Dew Points",
            WeatherField::RelativeHumidity => "Past Relative Humidities",
            WeatherField::RainSum => "Past Rain Sums",
            WeatherField::LocalPressure => "Past Pressure",
            WeatherField::AbsolutePressure => "Past Absolute Pressure",
        }
    }

    /// Y-axis label; also names the chart's single series.
    pub fn axis_label(self) -> &'static str {
        match self {
            WeatherField::Temperature => "Temperature (°C)",
            WeatherField::DewPoint => "Temperature (°C)",
            WeatherField::RelativeHumidity => "Relative Humidity (%)",
            WeatherField::RainSum => "MM Water",
            WeatherField::LocalPressure => "hPa",
            WeatherField::AbsolutePressure => "hPa",
        }
    }

    /// Measurement unit suffix for stat cards.
    pub fn unit(self) -> &'static str {
        match self {
            WeatherField::Temperature | WeatherField::DewPoint => "°C",
            WeatherField::RelativeHumidity => "%",
            WeatherField::RainSum => "mm",
            WeatherField::LocalPressure | WeatherField::AbsolutePressure => "hPa",
        }
    }

    /// Short human-readable name for buttons and stat cards.
    pub fn display_name(self) -> &'static str {
        match self {
            WeatherField::Temperature => "Temperature",
            WeatherField::DewPoint => "Dew Point",
            WeatherField::RelativeHumidity => "Relative Humidity",
            WeatherField::RainSum => "Rain Sum",
            WeatherField::LocalPressure => "Local Pressure",
            WeatherField::AbsolutePressure => "Absolute Pressure",
        }
    }
}

impl fmt::Display for WeatherField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a token is not one of the six recognized wire codes.
/// Callers treat this as "no chart": the trigger becomes a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized weather field token: {0}")]
pub struct ParseFieldError(pub String);

impl FromStr for WeatherField {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeatherField::ALL
            .into_iter()
            .find(|field| field.code() == s)
            .ok_or_else(|| ParseFieldError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_from_str() {
        for field in WeatherField::ALL {
            assert_eq!(field.code().parse::<WeatherField>(), Ok(field));
        }
    }

    #[test]
    fn unknown_token_is_rejected() {
        let err = "WIND_SPEED".parse::<WeatherField>().unwrap_err();
        assert_eq!(err, ParseFieldError("WIND_SPEED".to_string()));
    }

    #[test]
    fn serializes_as_wire_code() {
        let json = serde_json::to_string(&WeatherField::RelativeHumidity).unwrap();
        assert_eq!(json, "\"CHN1_RF\"");
    }
}
