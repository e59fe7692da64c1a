//! Session snapshot persistence
//!
//! The entire session collection plus the active-session pointer is written
//! as one JSON blob, rewritten whole on every mutation and read back once at
//! startup. The blob's shape (`{sessions, activeSessionId}`, camelCase) is
//! fixed; snapshots written by any Pokepedai client stay interchangeable.

use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{PokepedaiError, Result};
use crate::session::ChatSession;

/// Environment variable overriding the snapshot file location
pub const SNAPSHOT_PATH_ENV: &str = "POKEPEDAI_SESSIONS_FILE";

/// File name of the snapshot inside the application data directory
const SNAPSHOT_FILE_NAME: &str = "sessions.json";

/// The persisted state: every session plus the active pointer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// All sessions, newest-created first
    pub sessions: Vec<ChatSession>,
    /// Id of the currently active session, if any
    pub active_session_id: Option<String>,
}

/// File-backed storage for the session snapshot
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a store at the default location
    ///
    /// Uses the file named by [`SNAPSHOT_PATH_ENV`] when set, otherwise
    /// `sessions.json` in the user's application data directory.
    ///
    /// # Errors
    ///
    /// Returns `PokepedaiError::Storage` if the data directory cannot be
    /// determined or created
    pub fn new() -> Result<Self> {
        if let Ok(override_path) = std::env::var(SNAPSHOT_PATH_ENV) {
            return Self::new_with_path(override_path);
        }

        let proj_dirs = ProjectDirs::from("dev", "pokepedai", "pokepedai")
            .ok_or_else(|| PokepedaiError::Storage("Could not determine data directory".into()))?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .context("Failed to create data directory")
            .map_err(|e| PokepedaiError::Storage(e.to_string()))?;

        Ok(Self {
            path: data_dir.join(SNAPSHOT_FILE_NAME),
        })
    }

    /// Create a store that uses the specified snapshot file
    ///
    /// Primarily useful for tests where the default application data
    /// directory is not desirable.
    ///
    /// # Examples
    ///
    /// ```
    /// use pokepedai::session::SnapshotStore;
    ///
    /// let store = SnapshotStore::new_with_path("/tmp/pokepedai-sessions.json").unwrap();
    /// assert!(store.path().ends_with("pokepedai-sessions.json"));
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create parent directory for snapshot")
                    .map_err(|e| PokepedaiError::Storage(e.to_string()))?;
            }
        }

        Ok(Self { path })
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted snapshot, if one exists
    ///
    /// A missing file is not an error; it simply means first run.
    ///
    /// # Errors
    ///
    /// Returns `PokepedaiError::Storage` if the file exists but cannot be
    /// read or parsed
    pub fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| PokepedaiError::Storage(format!("Failed to read snapshot: {}", e)))?;

        let snapshot: Snapshot = serde_json::from_str(&raw)
            .map_err(|e| PokepedaiError::Storage(format!("Failed to parse snapshot: {}", e)))?;

        Ok(Some(snapshot))
    }

    /// Write the snapshot, replacing any previous contents
    ///
    /// # Errors
    ///
    /// Returns `PokepedaiError::Storage` if serialization or the write fails
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| PokepedaiError::Storage(format!("Serialization failed: {}", e)))?;

        std::fs::write(&self.path, json)
            .map_err(|e| PokepedaiError::Storage(format!("Failed to write snapshot: {}", e)))?;

        Ok(())
    }
}
