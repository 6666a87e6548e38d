//! Station persistence backends.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Station;

use super::error::StorageError;

/// Read/write access to the persisted station table.
///
/// Stores keep stations in line order. Writing a station whose id already
/// exists replaces it in place; new ids are appended.
pub trait StationStore: Send + Sync {
    /// Load every station, in stored order.
    fn load(&self) -> Result<Vec<Station>, StorageError>;

    /// Insert or replace the given stations.
    fn upsert_all(&self, stations: &[Station]) -> Result<(), StorageError>;
}

/// Insert-or-replace `incoming` into `existing`, keeping existing positions.
fn merge(existing: &mut Vec<Station>, incoming: &[Station]) {
    for station in incoming {
        match existing.iter_mut().find(|s| s.id() == station.id()) {
            Some(slot) => *slot = station.clone(),
            None => existing.push(station.clone()),
        }
    }
}

/// In-process station store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    stations: Mutex<Vec<Station>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `stations`.
    pub fn with_stations(stations: Vec<Station>) -> Self {
        Self {
            stations: Mutex::new(stations),
        }
    }
}

fn poisoned() -> StorageError {
    StorageError::Io {
        message: "station store lock poisoned".to_string(),
    }
}

impl StationStore for MemoryStore {
    fn load(&self) -> Result<Vec<Station>, StorageError> {
        let guard = self.stations.lock().map_err(|_| poisoned())?;
        Ok(guard.clone())
    }

    fn upsert_all(&self, stations: &[Station]) -> Result<(), StorageError> {
        let mut guard = self.stations.lock().map_err(|_| poisoned())?;
        merge(&mut guard, stations);
        Ok(())
    }
}

/// On-disk layout of the JSON store.
#[derive(Debug, Serialize, Deserialize)]
struct StoredStations {
    /// When the file was last written.
    saved_at: DateTime<Utc>,
    /// Stations in line order.
    stations: Vec<Station>,
}

/// JSON file station store.
///
/// A missing file reads as an empty table.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<Station>, StorageError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::Io {
                    message: format!("failed to read {}: {}", self.path.display(), e),
                });
            }
        };

        let stored: StoredStations =
            serde_json::from_str(&contents).map_err(|e| StorageError::Corrupt {
                message: format!("{}: {}", self.path.display(), e),
            })?;

        Ok(stored.stations)
    }

    fn write(&self, stations: Vec<Station>) -> Result<(), StorageError> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                message: format!("failed to create store directory: {}", e),
            })?;
        }

        let stored = StoredStations {
            saved_at: Utc::now(),
            stations,
        };

        let json = serde_json::to_string_pretty(&stored).map_err(|e| StorageError::Io {
            message: format!("failed to serialize stations: {}", e),
        })?;

        std::fs::write(&self.path, json).map_err(|e| StorageError::Io {
            message: format!("failed to write {}: {}", self.path.display(), e),
        })
    }
}

impl StationStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Station>, StorageError> {
        self.read()
    }

    fn upsert_all(&self, stations: &[Station]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| poisoned())?;
        let mut existing = self.read()?;
        merge(&mut existing, stations);
        self.write(existing)
    }
}
