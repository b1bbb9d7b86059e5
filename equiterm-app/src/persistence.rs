//! Session snapshot persistence
//!
//! Refresh-triggering actions (login, logout, purchase) persist the focus
//! instrument and both panel assignments as a single JSON blob, restored
//! verbatim before the first render of the next session. Missing or corrupt
//! blobs fall back to the hardcoded defaults.

use std::fs;
use std::path::{Path, PathBuf};

use equiterm_core::{ContentType, Instrument, TerminalError, TerminalResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The persisted terminal state: one combined blob, not per-panel keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub instrument: Instrument,
    pub panel1: ContentType,
    pub panel2: ContentType,
}

impl SessionSnapshot {
    /// The state a fresh install starts with
    pub fn defaults() -> Self {
        Self {
            instrument: Instrument::default_focus(),
            panel1: ContentType::News,
            panel2: ContentType::Network,
        }
    }
}

/// File-backed store for the session snapshot
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Persist the snapshot, creating parent directories as needed
    pub fn save(&self, snapshot: &SessionSnapshot) -> TerminalResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| TerminalError::storage(format!("Failed to create {}: {}", parent.display(), e)))?;
        }

        let blob = serde_json::to_string(snapshot)
            .map_err(|e| TerminalError::storage(format!("Failed to encode snapshot: {}", e)))?;

        fs::write(&self.path, blob)
            .map_err(|e| TerminalError::storage(format!("Failed to write snapshot: {}", e)))?;

        debug!("Saved session snapshot to {}", self.path.display());
        Ok(())
    }

    /// Load the persisted snapshot if one exists.
    ///
    /// A corrupt blob is treated the same as an absent one: the caller
    /// applies defaults. Only real I/O trouble surfaces in logs.
    pub fn load(&self) -> Option<SessionSnapshot> {
        let blob = match fs::read_to_string(&self.path) {
            Ok(blob) => blob,
            Err(_) => return None,
        };

        match serde_json::from_str(&blob) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Discarding unreadable session snapshot: {}", e);
                None
            }
        }
    }

    /// Remove the persisted snapshot, ignoring a missing file
    pub fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}
