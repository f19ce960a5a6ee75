use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::fields::WeatherField;
use crate::record::FieldLists;

/// Show one category label per this many points so rotated timestamps
/// do not overlap.
pub const LABEL_STEP: usize = 18;

/// X-axis tick label rotation in degrees.
pub const LABEL_ROTATION_DEG: u16 = 45;

/// Color of the horizontal reference line at y = 0.
pub const ZERO_LINE_COLOR: &str = "#808080";

/// The chart's single data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartSeries {
    /// Series name shown in the legend (the y-axis label)
    pub name: String,
    pub values: Vec<f64>,
}

/// Fully resolved description of one history chart, handed to the charting
/// widget for rendering. Built fresh per request; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartConfig {
    pub title: String,
    pub x_label: String,
    /// Formatted timestamps used as x-axis categories
    pub x_categories: Vec<String>,
    pub label_rotation_deg: u16,
    pub label_step: usize,
    pub y_label: String,
    pub series: ChartSeries,
    /// Draw a horizontal reference line at y = 0
    pub zero_line: bool,
}

impl ChartConfig {
    /// Builds the chart description for `field` from a previously fetched
    /// historical record.
    ///
    /// Returns `None` when the record carries no series for the field; the
    /// caller shows nothing in that case. A fresh config is constructed on
    /// every call, so repeated triggers cannot leak state into each other.
    pub fn for_field(field: WeatherField, lists: &FieldLists) -> Option<ChartConfig> {
        let values = lists.series(field)?;
        let x_categories = lists
            .date_time()
            .iter()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .collect();

        Some(ChartConfig {
            title: field.title().to_string(),
            x_label: "Time".to_string(),
            x_categories,
            label_rotation_deg: LABEL_ROTATION_DEG,
            label_step: LABEL_STEP,
            y_label: field.axis_label().to_string(),
            series: ChartSeries {
                name: field.axis_label().to_string(),
                values: values.to_vec(),
            },
            zero_line: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::BTreeMap;

    fn history(points: usize) -> FieldLists {
        let date_time: Vec<DateTime<Utc>> = (0..points)
            .map(|i| {
                Utc.with_ymd_and_hms(2014, 7, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::minutes(10 * i as i64)
            })
            .collect();
        let series: BTreeMap<WeatherField, Vec<f64>> = WeatherField::ALL
            .into_iter()
            .map(|field| (field, (0..points).map(|i| i as f64).collect()))
            .collect();
        FieldLists::new(date_time, series).unwrap()
    }

    #[test]
    fn every_field_yields_a_config_aligned_with_date_time() {
        let lists = history(30);
        for field in WeatherField::ALL {
            let config = ChartConfig::for_field(field, &lists).unwrap();
            assert_eq!(config.series.values.len(), lists.len());
            assert_eq!(config.x_categories.len(), lists.len());
            assert_eq!(config.title, field.title());
            assert_eq!(config.series.name, config.y_label);
        }
    }

    #[test]
    fn eighteen_point_humidity_chart_shows_a_single_label() {
        let lists = history(18);
        let config = ChartConfig::for_field(WeatherField::RelativeHumidity, &lists).unwrap();
        assert_eq!(config.label_step, 18);
        assert_eq!(config.label_rotation_deg, 45);
        // With one label per 18th category, an 18-point chart renders at most one.
        let rendered = config.x_categories.len().div_ceil(config.label_step);
        assert_eq!(rendered, 1);
    }

    #[test]
    fn missing_series_builds_no_chart() {
        let date_time = vec![Utc.with_ymd_and_hms(2014, 7, 1, 0, 0, 0).unwrap()];
        let mut series = BTreeMap::new();
        series.insert(WeatherField::Temperature, vec![1.5]);
        let lists = FieldLists::new(date_time, series).unwrap();

        assert!(ChartConfig::for_field(WeatherField::RainSum, &lists).is_none());
    }

    #[test]
    fn zero_reference_line_is_always_requested() {
        let config = ChartConfig::for_field(WeatherField::Temperature, &history(3)).unwrap();
        assert!(config.zero_line);
    }

    #[test]
    fn configs_are_independent_between_calls() {
        let lists = history(5);
        let first = ChartConfig::for_field(WeatherField::Temperature, &lists).unwrap();
        let second = ChartConfig::for_field(WeatherField::RainSum, &lists).unwrap();
        assert_ne!(first.title, second.title);
        assert_eq!(first.series.values.len(), second.series.values.len());
    }
}
