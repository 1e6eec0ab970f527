//! Command-line interface parsing for gfscast
//!
//! Parses the coordinate pair and fetch-mode flags using clap, and checks
//! that the coordinates are finite before they reach the pipeline.

use clap::Parser;
use thiserror::Error;

/// Latitude used when none is given
const DEFAULT_LATITUDE: f64 = 48.85341;

/// Longitude used when none is given
const DEFAULT_LONGITUDE: f64 = 2.3488;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// A coordinate was NaN or infinite
    #[error("Invalid {0}: must be a finite number")]
    NonFiniteCoordinate(&'static str),
}

/// gfscast - GFS weather forecasts grouped by day
#[derive(Parser, Debug)]
#[command(name = "gfscast")]
#[command(about = "Fetch GFS weather forecasts for a coordinate pair, grouped by day")]
#[command(version)]
pub struct Cli {
    /// Latitude of the location to fetch forecasts for
    #[arg(long, default_value_t = DEFAULT_LATITUDE, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude of the location to fetch forecasts for
    #[arg(long, default_value_t = DEFAULT_LONGITUDE, allow_negative_numbers = true)]
    pub lon: f64,

    /// Read forecasts from the local store only, without any network call
    #[arg(long, conflicts_with = "fresh")]
    pub offline: bool,

    /// Fetch from the remote feed even when stored forecasts exist
    #[arg(long)]
    pub fresh: bool,
}

/// How the repository should be driven for this invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Consult the store first, fetch remotely on a miss
    StoreThenRemote,
    /// Local store only
    LocalOnly,
    /// Remote feed, skipping the store read
    RemoteOnly,
}

impl Cli {
    /// Resolves the fetch mode from the mode flags
    pub fn fetch_mode(&self) -> FetchMode {
        if self.offline {
            FetchMode::LocalOnly
        } else if self.fresh {
            FetchMode::RemoteOnly
        } else {
            FetchMode::StoreThenRemote
        }
    }

    /// Checks that both coordinates are finite
    ///
    /// No range validation is applied beyond this: out-of-range coordinates
    /// are sent as-is and the remote service decides their validity.
    pub fn validate(&self) -> Result<(), CliError> {
        if !self.lat.is_finite() {
            return Err(CliError::NonFiniteCoordinate("latitude"));
        }
        if !self.lon.is_finite() {
            return Err(CliError::NonFiniteCoordinate("longitude"));
        }

        Ok(())
    }
}
