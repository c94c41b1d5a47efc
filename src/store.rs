//! Client-local key/value storage.
//!
//! Persisted UI state (learning status, theme) lives in a flat string map.
//! [`FileStore`] keeps that map in a JSON file in the config directory;
//! [`MemoryStore`] keeps it in memory for tests and ephemeral sessions.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// String-keyed storage for small pieces of client state.
pub trait KeyValueStore {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Key/value store backed by a JSON object on disk.
///
/// Every write rewrites the whole file through a temp file + rename so
/// the file is never left half-written. A missing or unreadable file
/// reads as an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store at `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the default store (`state.json` in the config directory).
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Gets the default store path.
    ///
    /// - Linux: `~/.config/verbdeck/state.json`
    /// - macOS: `~/Library/Application Support/verbdeck/state.json`
    /// - Windows: `%APPDATA%\verbdeck\state.json`
    pub fn default_path() -> Result<PathBuf> {
        Ok(Config::config_dir()?.join("state.json"))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> BTreeMap<String, String> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                tracing::debug!(
                    "Ignoring unreadable state file {}: {}",
                    self.path.display(),
                    e
                );
                BTreeMap::new()
            }
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context(format!(
                "Failed to create state directory: {}",
                parent.display()
            ))?;
        }

        let content = serde_json::to_string_pretty(map).context("Failed to serialize state")?;
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp state file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &self.path).context(format!(
            "Failed to rename temp state file to: {}",
            self.path.display()
        ))?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// In-memory key/value store.
///
/// `fail_writes` makes every write return an error, which lets callers
/// exercise their handling of an unavailable store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    /// When true, `set` and `remove` fail without changing anything
    pub fail_writes: bool,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("Store is read-only");
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("Store is read-only");
        }
        self.entries.remove(key);
        Ok(())
    }
}
