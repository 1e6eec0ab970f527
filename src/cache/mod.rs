//! Local forecast store
//!
//! On-device persistence for fetched forecasts, one JSON file per
//! coordinate pair.

pub mod store;

pub use store::ForecastStore;
