//! Infoclimat GFS API client
//!
//! This module fetches the raw GFS forecast feed for a coordinate pair and
//! deserializes its entries into `Forecast` records. The feed is unversioned
//! third-party data that mixes timestamp formats and field types, so each
//! entry is validated independently and malformed entries are dropped
//! without aborting the fetch.

use chrono::NaiveDateTime;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use super::{Forecast, DATETIME_FORMAT};

/// Base URL for the Infoclimat public API
const GFS_BASE_URL: &str = "https://www.infoclimat.fr";

/// Opaque API authentication token (`_auth` query parameter)
const GFS_AUTH_TOKEN: &str = "UkgFElUrVnRTfgcwAXcAKQJqDzoPeQUiUy8HZFs%2BB3oAawRlAmJTNV4wVypSfVFnBSgObQ80BDRROgF5Xy0HZlI4BWlVPlYxUzwHYgEuACsCLA9uDy8FIlMxB2lbNQd6AGEEZQJiUy9eN1c0UnxRZAU3DmYPLwQjUTMBY18zB2dSMgVlVTZWNVM9B2ABLgArAjQPPg8zBT5TYgczW2IHZwBiBGYCYlNkXmdXNlJ8UWcFMA5uDzkEP1E3AWZfMQd7Ui4FGFVFVilTfAcnAWQAcgIsDzoPbgVp";

/// Opaque checksum accompanying the auth token (`_c` query parameter)
const GFS_C_TOKEN: &str = "a70e327597460269ee0853b1ca78c9ba";

/// Errors that can occur when fetching the forecast feed
#[derive(Debug, Error)]
pub enum GfsError {
    /// HTTP request failed (connection error or non-2xx status)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body is not a JSON document
    #[error("Failed to decode response body: {0}")]
    Document(#[from] serde_json::Error),
}

/// Client issuing the remote forecast feed fetch
///
/// One GET per call, no retries, transport-default timeout. Coordinates are
/// sent as-is without range validation; the remote service decides validity
/// and typically answers an out-of-range pair with an empty result set.
#[derive(Debug, Clone)]
pub struct GfsClient {
    client: Client,
    base_url: String,
}

impl Default for GfsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GfsClient {
    /// Creates a new GfsClient against the public endpoint
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: GFS_BASE_URL.to_string(),
        }
    }

    /// Creates a new GfsClient with a custom base URL (for testing or mirrors)
    #[allow(dead_code)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches the raw forecast document for the given coordinates
    ///
    /// # Arguments
    /// * `latitude` - Latitude coordinate
    /// * `longitude` - Longitude coordinate
    ///
    /// # Returns
    /// * `Ok(Value)` - The decoded JSON document
    /// * `Err(GfsError)` - On connection failure, non-2xx status, or a body
    ///   that is not JSON
    pub async fn fetch_document(&self, latitude: f64, longitude: f64) -> Result<Value, GfsError> {
        let url = format!(
            "{}/public-api/gfs/json?_ll={},{}&_auth={}&_c={}",
            self.base_url, latitude, longitude, GFS_AUTH_TOKEN, GFS_C_TOKEN
        );

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let text = response.text().await?;
        let document: Value = serde_json::from_str(&text)?;

        Ok(document)
    }
}

/// Deserializes the raw feed document into validated forecasts
///
/// Walks every `(key, body)` pair of the top-level object. An entry is kept
/// only when its key parses under the feed's timestamp format and both
/// numeric fields are present; anything else is dropped silently, so a
/// single malformed entry never aborts the fetch. The feed's metadata keys
/// (`request_state`, `request_key`, `message`, `model_run`, `source`) fail
/// the timestamp parse and are dropped by the same path. A document that is
/// not a JSON object yields no forecasts.
pub fn parse_forecasts(document: &Value, latitude: f64, longitude: f64) -> Vec<Forecast> {
    let Some(entries) = document.as_object() else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|(key, body)| deserialize_entry(key, body, latitude, longitude))
        .collect()
}

/// Deserializes a single feed entry
///
/// Returns `None` when the key is not a feed timestamp or either required
/// field is missing or non-numeric.
fn deserialize_entry(key: &str, body: &Value, latitude: f64, longitude: f64) -> Option<Forecast> {
    let datetime = NaiveDateTime::parse_from_str(key, DATETIME_FORMAT).ok()?;

    let floor_temperature = body.get("temperature")?.get("sol")?.as_f64()?;
    let mean_wind = body.get("vent_moyen")?.get("10m")?.as_f64()?;

    Some(Forecast {
        datetime,
        floor_temperature,
        mean_wind,
        latitude,
        longitude,
    })
}
