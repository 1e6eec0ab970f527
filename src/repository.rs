//! Forecasts repository: single entry point for forecasts data handling
//!
//! Orchestrates the fetch pipeline: consult the local store, fetch from the
//! remote feed on a miss, group the result by day, and write it back for
//! offline reuse.

use tracing::{debug, warn};

use crate::cache::ForecastStore;
use crate::data::{group_by_day, parse_forecasts, FormattedForecasts, GfsClient};

/// Repository responsible for forecasts data handling
///
/// Both collaborators are injected at construction: the endpoint client
/// issuing the remote fetch and an optional store for offline reuse. Each
/// call builds its result from scratch; no state is shared across calls.
#[derive(Debug)]
pub struct ForecastsRepository {
    client: GfsClient,
    store: Option<ForecastStore>,
}

impl ForecastsRepository {
    /// Creates a repository from its collaborators
    pub fn new(client: GfsClient, store: Option<ForecastStore>) -> Self {
        Self { client, store }
    }

    /// Fetches forecasts for a location, preferring the local store
    ///
    /// A non-empty stored mapping is returned without touching the network;
    /// otherwise the remote feed is fetched and the result stored. A stored
    /// mapping is used regardless of its age.
    pub async fn fetch(&self, latitude: f64, longitude: f64) -> FormattedForecasts {
        let stored = self.fetch_locally(latitude, longitude);
        if !stored.is_empty() {
            debug!(latitude, longitude, days = stored.len(), "serving stored forecasts");
            return stored;
        }

        self.fetch_remotely(latitude, longitude).await
    }

    /// Fetches forecasts from the remote feed
    ///
    /// Fetched data is written back to the store when one is configured and
    /// the result is non-empty; store write failures are logged and ignored.
    /// A transport failure is logged once and collapses to an empty mapping,
    /// indistinguishable from a response carrying zero forecasts.
    pub async fn fetch_remotely(&self, latitude: f64, longitude: f64) -> FormattedForecasts {
        let document = match self.client.fetch_document(latitude, longitude).await {
            Ok(document) => document,
            Err(error) => {
                warn!(%error, latitude, longitude, "forecast fetch failed");
                return FormattedForecasts::new();
            }
        };

        let forecasts = group_by_day(parse_forecasts(&document, latitude, longitude));

        if let Some(ref store) = self.store {
            if !forecasts.is_empty() {
                if let Err(error) = store.save(latitude, longitude, &forecasts) {
                    warn!(%error, latitude, longitude, "could not store forecasts");
                }
            }
        }

        forecasts
    }

    /// Fetches forecasts from the local store only
    ///
    /// Returns an empty mapping when no store is configured or nothing is
    /// stored for the location.
    pub fn fetch_locally(&self, latitude: f64, longitude: f64) -> FormattedForecasts {
        match self.store {
            Some(ref store) => store.load(latitude, longitude),
            None => FormattedForecasts::new(),
        }
    }
}
