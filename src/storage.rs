//! Key-value persistence for tasks, sessions and settings.
//!
//! Values are stored as JSON strings under fixed keys. [`JsonFileStore`] keeps
//! one file per key in a directory; [`MemoryStore`] keeps them in a map and is
//! what tests use. Failures are typed ([`StoreError`]) at the store boundary,
//! but the helpers the application calls ([`load_or`], [`persist`]) log them
//! and carry on with defaults.

use crate::timer::{clamp_seconds, DEFAULT_SECONDS};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key of the task list.
pub const TASKS_KEY: &str = "focus-flow.tasks";
/// Key of the session log.
pub const SESSIONS_KEY: &str = "focus-flow.sessions";
/// Key of the settings record.
pub const SETTINGS_KEY: &str = "focus-flow.settings";

/// Errors raised by a [`Store`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a file failed.
    #[error("failed to access {path}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// A stored value could not be encoded or decoded.
    #[error("invalid JSON under {key}")]
    Json {
        /// Key of the value.
        key: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Raw string storage by key.
pub trait Store {
    /// The stored string, or `None` if nothing is stored under `key`.
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing what was there.
    fn save_raw(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Loads and decodes the value under `key`.
pub fn load<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Result<Option<T>, StoreError> {
    match store.load_raw(key)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Json {
                key: key.to_string(),
                source,
            }),
    }
}

/// Encodes and stores `value` under `key`.
pub fn save<T: Serialize + ?Sized>(
    store: &mut dyn Store,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Json {
        key: key.to_string(),
        source,
    })?;
    store.save_raw(key, &raw)
}

/// Loads the value under `key`, falling back to `fallback` when it is missing
/// or unreadable.
pub fn load_or<T: DeserializeOwned>(store: &dyn Store, key: &str, fallback: T) -> T {
    match load(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => fallback,
        Err(err) => {
            log::warn!("unable to load {}: {}", key, err);
            fallback
        }
    }
}

/// Stores `value` under `key`, logging a failure instead of returning it.
///
/// Returns whether the value was stored.
pub fn persist<T: Serialize + ?Sized>(store: &mut dyn Store, key: &str, value: &T) -> bool {
    match save(store, key, value) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("unable to persist {}: {}", key, err);
            false
        }
    }
}

/// One JSON file per key in a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory the files live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Store for JsonFileStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn save_raw(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|source| StoreError::Io { path, source })
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `key` with a raw string.
    pub fn with_raw(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// The raw string under `key`.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Store for MemoryStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save_raw(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Persisted user settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Session length last committed, in seconds.
    pub last_duration_seconds: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_duration_seconds: DEFAULT_SECONDS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSettings {
    last_duration_seconds: Option<f64>,
    last_duration_minutes: Option<f64>,
}

impl Settings {
    /// Settings for `seconds`, clamped to the timer's range.
    pub fn with_duration(seconds: u32) -> Self {
        Self {
            last_duration_seconds: clamp_seconds(f64::from(seconds)),
        }
    }

    /// Also reports whether a legacy minutes field was present, used or not.
    fn from_stored(stored: StoredSettings) -> (Self, bool) {
        let legacy = stored.last_duration_minutes.is_some();
        let settings = match (stored.last_duration_seconds, stored.last_duration_minutes) {
            (Some(seconds), _) => Self {
                last_duration_seconds: clamp_seconds(seconds),
            },
            (None, Some(minutes)) => Self {
                last_duration_seconds: clamp_seconds(minutes * 60.0),
            },
            (None, None) => Self::default(),
        };
        (settings, legacy)
    }
}

/// Loads the settings, migrating a legacy minutes record.
///
/// A migrated record is written back in the current shape so the legacy
/// field is gone from then on.
pub fn load_settings(store: &mut dyn Store) -> Settings {
    let stored: Option<StoredSettings> = match load(store, SETTINGS_KEY) {
        Ok(stored) => stored,
        Err(err) => {
            log::warn!("unable to load {}: {}", SETTINGS_KEY, err);
            None
        }
    };
    let Some(stored) = stored else {
        return Settings::default();
    };

    let (settings, migrated) = Settings::from_stored(stored);
    if migrated {
        log::debug!(
            "migrated legacy duration setting to {}s",
            settings.last_duration_seconds
        );
        persist(store, SETTINGS_KEY, &settings);
    }
    settings
}
