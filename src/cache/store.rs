//! Forecast store persisting fetched data to disk
//!
//! Provides a `ForecastStore` that writes day-grouped forecasts to JSON
//! files keyed by coordinate pair, so a location's last fetch can be reused
//! offline.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::data::FormattedForecasts;

/// Wrapper struct for stored data on disk
#[derive(Debug, Serialize, Deserialize)]
struct StoreEntry {
    /// The day-grouped forecasts
    forecasts: FormattedForecasts,
    /// When the data was stored. Recorded for inspection only; entries are
    /// never invalidated by age.
    stored_at: DateTime<Utc>,
}

/// Manages reading and writing forecasts to disk
///
/// Data lives as JSON files in an XDG-compliant cache directory
/// (`~/.cache/gfscast/` on Linux), one file per coordinate pair. A stored
/// mapping is served regardless of its age: there is no expiry.
#[derive(Debug, Clone)]
pub struct ForecastStore {
    /// Directory where store files are kept
    store_dir: PathBuf,
}

impl ForecastStore {
    /// Creates a new ForecastStore using the XDG-compliant cache directory
    ///
    /// Returns `None` if the directory cannot be determined (e.g., no home
    /// directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "gfscast")?;
        let store_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self { store_dir })
    }

    /// Creates a new ForecastStore with a custom directory
    ///
    /// Useful for testing or when a specific location is needed.
    #[allow(dead_code)]
    pub fn with_dir(store_dir: PathBuf) -> Self {
        Self { store_dir }
    }

    /// Returns the file name key for a coordinate pair
    fn entry_key(latitude: f64, longitude: f64) -> String {
        format!("forecasts_{}_{}", latitude, longitude).replace('.', "_")
    }

    /// Returns the path to the store file for a coordinate pair
    fn entry_path(&self, latitude: f64, longitude: f64) -> PathBuf {
        self.store_dir
            .join(format!("{}.json", Self::entry_key(latitude, longitude)))
    }

    /// Ensures the store directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.store_dir)
    }

    /// Writes the grouped forecasts for a coordinate pair
    ///
    /// # Arguments
    /// * `latitude` - Latitude the forecasts were fetched for
    /// * `longitude` - Longitude the forecasts were fetched for
    /// * `forecasts` - The day-grouped mapping to persist
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation or file writing fails
    pub fn save(
        &self,
        latitude: f64,
        longitude: f64,
        forecasts: &FormattedForecasts,
    ) -> std::io::Result<()> {
        self.ensure_dir()?;

        let entry = StoreEntry {
            forecasts: forecasts.clone(),
            stored_at: Utc::now(),
        };

        let json = serde_json::to_string_pretty(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.entry_path(latitude, longitude), json)
    }

    /// Reads the stored forecasts for a coordinate pair
    ///
    /// Returns an empty mapping when nothing is stored for the pair or the
    /// file cannot be parsed.
    pub fn load(&self, latitude: f64, longitude: f64) -> FormattedForecasts {
        let path = self.entry_path(latitude, longitude);

        fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str::<StoreEntry>(&content).ok())
            .map(|entry| entry.forecasts)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Forecast, DATETIME_FORMAT};
    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    const LATITUDE: f64 = 48.85341;
    const LONGITUDE: f64 = 2.3488;

    fn create_test_store() -> (ForecastStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = ForecastStore::with_dir(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    fn sample_forecasts() -> FormattedForecasts {
        let forecast = Forecast {
            datetime: NaiveDateTime::parse_from_str("2017-12-18 04:00:00", DATETIME_FORMAT)
                .expect("valid test datetime"),
            floor_temperature: 277.0,
            mean_wind: 5.0,
            latitude: LATITUDE,
            longitude: LONGITUDE,
        };

        let mut forecasts = FormattedForecasts::new();
        forecasts.insert("2017-12-18".to_string(), vec![forecast]);
        forecasts
    }

    #[test]
    fn test_save_creates_file_in_store_directory() {
        let (store, temp_dir) = create_test_store();

        store
            .save(LATITUDE, LONGITUDE, &sample_forecasts())
            .expect("Save should succeed");

        let expected_path = temp_dir.path().join("forecasts_48_85341_2_3488.json");
        assert!(expected_path.exists(), "Store file should exist");

        let content = fs::read_to_string(&expected_path).expect("Should read file");
        assert!(content.contains("2017-12-18"));
        assert!(content.contains("floor_temperature"));
        assert!(content.contains("stored_at"));
    }

    #[test]
    fn test_load_returns_empty_for_unknown_coordinates() {
        let (store, _temp_dir) = create_test_store();

        let loaded = store.load(12.34, 56.78);

        assert!(loaded.is_empty(), "Unknown pair should load empty");
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (store, _temp_dir) = create_test_store();
        let forecasts = sample_forecasts();

        store
            .save(LATITUDE, LONGITUDE, &forecasts)
            .expect("Save should succeed");

        let loaded = store.load(LATITUDE, LONGITUDE);

        assert_eq!(loaded, forecasts, "Mapping should survive roundtrip");
    }

    #[test]
    fn test_entries_are_keyed_by_coordinate_pair() {
        let (store, _temp_dir) = create_test_store();

        store
            .save(LATITUDE, LONGITUDE, &sample_forecasts())
            .expect("Save should succeed");

        let other = store.load(45.0, 5.0);

        assert!(other.is_empty(), "Other coordinates should not see the entry");
    }

    #[test]
    fn test_save_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("nested").join("store");
        let store = ForecastStore::with_dir(nested.clone());

        store
            .save(LATITUDE, LONGITUDE, &sample_forecasts())
            .expect("Save should succeed");

        assert!(nested.exists(), "Nested directory should be created");
    }

    #[test]
    fn test_overwrite_replaces_stored_forecasts() {
        let (store, _temp_dir) = create_test_store();
        let first = sample_forecasts();

        let mut second = sample_forecasts();
        second
            .get_mut("2017-12-18")
            .expect("bucket exists")
            .push(Forecast {
                datetime: NaiveDateTime::parse_from_str("2017-12-18 07:00:00", DATETIME_FORMAT)
                    .expect("valid test datetime"),
                floor_temperature: 278.0,
                mean_wind: 6.0,
                latitude: LATITUDE,
                longitude: LONGITUDE,
            });

        store
            .save(LATITUDE, LONGITUDE, &first)
            .expect("First save should succeed");
        store
            .save(LATITUDE, LONGITUDE, &second)
            .expect("Second save should succeed");

        let loaded = store.load(LATITUDE, LONGITUDE);

        assert_eq!(loaded, second, "Store should contain latest data");
    }

    #[test]
    fn test_load_returns_empty_for_corrupt_file() {
        let (store, temp_dir) = create_test_store();
        fs::create_dir_all(temp_dir.path()).expect("dir exists");
        fs::write(
            temp_dir.path().join("forecasts_48_85341_2_3488.json"),
            "{ not json }",
        )
        .expect("write corrupt file");

        let loaded = store.load(LATITUDE, LONGITUDE);

        assert!(loaded.is_empty(), "Corrupt file should load empty");
    }

    #[test]
    fn test_negative_coordinates_get_distinct_keys() {
        let (store, _temp_dir) = create_test_store();

        store
            .save(-49.28, -123.12, &sample_forecasts())
            .expect("Save should succeed");

        assert!(!store.load(-49.28, -123.12).is_empty());
        assert!(store.load(49.28, 123.12).is_empty());
    }

    #[test]
    fn test_new_uses_xdg_compliant_path() {
        if let Some(store) = ForecastStore::new() {
            let path_str = store.store_dir.to_string_lossy();
            assert!(
                path_str.contains("gfscast"),
                "Store path should contain project name"
            );
        }
        // Test passes if new() returns None (e.g., no home directory in CI)
    }
}
