//! Core data models for gfscast
//!
//! This module contains the forecast record produced by the feed parser and
//! the day-grouped mapping consumed by callers, together with the grouping
//! operation itself.

pub mod gfs;

pub use gfs::{parse_forecasts, GfsClient, GfsError};

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format used by the feed's entry keys
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-only format used for day bucket keys
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// A single validated weather observation
///
/// A `Forecast` is only constructed once both numeric fields have been read
/// successfully from a feed entry; partial records never exist. Coordinates
/// are echoed from the request, never read from the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Time the observation is valid for
    pub datetime: NaiveDateTime,
    /// Ground-level temperature in kelvin (feed field `temperature.sol`)
    pub floor_temperature: f64,
    /// Mean wind at 10 meters (feed field `vent_moyen.10m`)
    pub mean_wind: f64,
    /// Latitude the forecast was requested for
    pub latitude: f64,
    /// Longitude the forecast was requested for
    pub longitude: f64,
}

/// Forecasts grouped by calendar day, keyed by `yyyy-MM-dd` strings
///
/// Per-day insertion order follows the order in which entries were parsed.
/// Sorting (both of the day keys and within a day) is the presentation
/// layer's job.
pub type FormattedForecasts = HashMap<String, Vec<Forecast>>;

/// Returns the day bucket key for a datetime
pub fn day_key(datetime: &NaiveDateTime) -> String {
    datetime.format(DAY_FORMAT).to_string()
}

/// Groups forecasts into day buckets
///
/// Every forecast lands in exactly one bucket, keyed by the date portion of
/// its datetime. Buckets are created lazily on first insertion and keep the
/// input order of their members.
pub fn group_by_day(forecasts: Vec<Forecast>) -> FormattedForecasts {
    let mut grouped = FormattedForecasts::new();

    for forecast in forecasts {
        grouped
            .entry(day_key(&forecast.datetime))
            .or_default()
            .push(forecast);
    }

    grouped
}
