//! Snapshot document and its durable stores.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use caja_state::{Alert, AppState, CashSession, KardexEntry, Sale, StatePatch};

/// The persisted subset of the state tree.
///
/// Exactly the four durable sequences; the current-user and current-session
/// pointers are session-scoped and excluded by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub sales: Vec<Sale>,
    pub kardex_entries: Vec<KardexEntry>,
    pub cash_sessions: Vec<CashSession>,
    pub alerts: Vec<Alert>,
}

impl Snapshot {
    /// Capture the persisted fields of a state tree.
    pub fn capture(state: &AppState) -> Self {
        Self {
            sales: state.sales.clone(),
            kardex_entries: state.kardex_entries.clone(),
            cash_sessions: state.cash_sessions.clone(),
            alerts: state.alerts.clone(),
        }
    }

    /// Turn the snapshot into a restore patch (the four fields only).
    pub fn into_patch(self) -> StatePatch {
        StatePatch {
            sales: Some(self.sales),
            kardex_entries: Some(self.kardex_entries),
            cash_sessions: Some(self.cash_sessions),
            alerts: Some(self.alerts),
            current_user: None,
            current_cash_session: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Durable storage for one named snapshot record.
pub trait SnapshotStore {
    /// Read the snapshot. Missing is `Ok(None)`; malformed is an error the
    /// bridge logs and otherwise ignores.
    fn load(&self) -> Result<Option<Snapshot>, SnapshotError>;

    /// Overwrite the snapshot (last-write-wins, synchronous).
    fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError>;
}

/// JSON-file-backed snapshot store.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// reader never observes a half-written document.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform default location:
    /// `{app_data_dir}/caja/snapshot.json`.
    pub fn at_default_location() -> Result<Self, SnapshotError> {
        Ok(Self::new(default_snapshot_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let snapshot = serde_json::from_str(&raw)?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&payload)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Resolve `{app_data_dir}/caja/snapshot.json`.
fn default_snapshot_path() -> Result<PathBuf, SnapshotError> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not resolve OS app data directory",
            )
        })?;

    let mut path = base;
    path.push("caja");
    path.push("snapshot.json");
    Ok(path)
}
