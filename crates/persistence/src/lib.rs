//! `caja-persistence` — durable local snapshot of the state tree.
//!
//! Keeps `{sales, kardex_entries, cash_sessions, alerts}` synchronized with a
//! local JSON document: restored once at startup, written through after every
//! state change that touches one of the four fields. `current_user` and
//! `current_cash_session` are deliberately never persisted.

pub mod bridge;
pub mod snapshot;

pub use bridge::{PersistenceBridge, PersistentStore};
pub use snapshot::{FileSnapshotStore, Snapshot, SnapshotError, SnapshotStore};
