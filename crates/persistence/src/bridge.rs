//! The persistence bridge and the persistent store wrapper.

use std::sync::Arc;

use caja_core::Clock;
use caja_state::{Action, AppState, Dispatcher, StateStore};

use crate::snapshot::{Snapshot, SnapshotStore};

/// Observes settled states and writes the durable snapshot through.
///
/// All persistence failures are logged and swallowed; they must never
/// interrupt the state transition that triggered them.
pub struct PersistenceBridge {
    store: Box<dyn SnapshotStore + Send>,
    last_written: Option<Snapshot>,
}

impl PersistenceBridge {
    pub fn new(store: Box<dyn SnapshotStore + Send>) -> Self {
        Self {
            store,
            last_written: None,
        }
    }

    /// Restore the durable snapshot at startup.
    ///
    /// Present and well-formed: one `LoadData` dispatch with its contents.
    /// Absent: nothing to do. Malformed: log and keep the empty initial
    /// state — never crash.
    pub fn restore(&mut self, dispatcher: &mut dyn Dispatcher) {
        match self.store.load() {
            Ok(Some(snapshot)) => {
                self.last_written = Some(snapshot.clone());
                dispatcher.dispatch(Action::LoadData(snapshot.into_patch()));
            }
            Ok(None) => {
                self.last_written = Some(Snapshot::default());
            }
            Err(err) => {
                tracing::warn!(%err, "failed to restore snapshot; starting empty");
                self.last_written = Some(Snapshot::default());
            }
        }
    }

    /// Write through if any of the four persisted fields changed.
    ///
    /// Called strictly after a dispatch completes, so the snapshot always
    /// reflects a fully-settled state.
    pub fn on_state_change(&mut self, state: &AppState) {
        let snapshot = Snapshot::capture(state);
        if self.last_written.as_ref() == Some(&snapshot) {
            return;
        }

        match self.store.save(&snapshot) {
            Ok(()) => {
                self.last_written = Some(snapshot);
            }
            Err(err) => {
                tracing::warn!(%err, "failed to write snapshot; continuing");
            }
        }
    }
}

/// [`StateStore`] plus write-through persistence.
///
/// The sole dispatch path for the application: applies the transition, then
/// lets the bridge observe the settled result.
pub struct PersistentStore {
    store: StateStore,
    bridge: PersistenceBridge,
}

impl PersistentStore {
    /// Build the store and immediately restore the durable snapshot.
    pub fn open(snapshot_store: Box<dyn SnapshotStore + Send>, clock: Arc<dyn Clock>) -> Self {
        let mut store = StateStore::with_clock(clock);
        let mut bridge = PersistenceBridge::new(snapshot_store);
        bridge.restore(&mut store);
        Self { store, bridge }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }
}

impl Dispatcher for PersistentStore {
    fn dispatch(&mut self, action: Action) {
        self.store.dispatch(action);
        self.bridge.on_state_change(self.store.state());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use chrono::{TimeZone, Utc};

    use caja_core::{AlertId, FixedClock, UserId};
    use caja_state::Alert;
    use caja_users::{User, UserRole};

    use crate::snapshot::SnapshotError;

    /// Snapshot store test double: holds the document in memory, counts
    /// writes, and can be switched to fail.
    #[derive(Default)]
    struct MemorySnapshotStore {
        inner: Arc<MemorySnapshotInner>,
    }

    #[derive(Default)]
    struct MemorySnapshotInner {
        snapshot: Mutex<Option<Snapshot>>,
        saves: AtomicUsize,
        failing: AtomicBool,
        malformed: AtomicBool,
    }

    impl MemorySnapshotStore {
        fn with_inner(inner: Arc<MemorySnapshotInner>) -> Self {
            Self { inner }
        }
    }

    impl SnapshotStore for MemorySnapshotStore {
        fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
            if self.inner.malformed.load(Ordering::SeqCst) {
                let bad: Result<Snapshot, _> = serde_json::from_str("{ not json");
                return Err(SnapshotError::Malformed(bad.unwrap_err()));
            }
            Ok(self.inner.snapshot.lock().unwrap().clone())
        }

        fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
            if self.inner.failing.load(Ordering::SeqCst) {
                return Err(SnapshotError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "quota exceeded",
                )));
            }
            self.inner.saves.fetch_add(1, Ordering::SeqCst);
            *self.inner.snapshot.lock().unwrap() = Some(snapshot.clone());
            Ok(())
        }
    }

    fn test_clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap(),
        ))
    }

    fn test_alert(message: &str) -> Alert {
        Alert::new(
            AlertId::new(),
            message,
            Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap(),
        )
    }

    fn test_user() -> User {
        User {
            id: UserId::new(),
            username: "admin".to_string(),
            email: "admin@empresa.com".to_string(),
            role: UserRole::Admin,
            active: true,
            password_hash: "$argon2id$stub".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn dispatch_writes_through_after_settling() {
        let inner = Arc::new(MemorySnapshotInner::default());
        let mut app = PersistentStore::open(
            Box::new(MemorySnapshotStore::with_inner(inner.clone())),
            test_clock(),
        );

        app.dispatch(Action::AddAlert(test_alert("stock low")));

        let written = inner.snapshot.lock().unwrap().clone().unwrap();
        assert_eq!(written.alerts.len(), 1);
        assert_eq!(written, Snapshot::capture(app.state()));
    }

    #[test]
    fn login_does_not_trigger_a_write() {
        let inner = Arc::new(MemorySnapshotInner::default());
        let mut app = PersistentStore::open(
            Box::new(MemorySnapshotStore::with_inner(inner.clone())),
            test_clock(),
        );

        app.dispatch(Action::AddAlert(test_alert("stock low")));
        let saves_before = inner.saves.load(Ordering::SeqCst);

        // Only the session pointers change; the persisted fields do not.
        app.dispatch(Action::Login(test_user()));

        assert_eq!(inner.saves.load(Ordering::SeqCst), saves_before);
        assert!(app.state().current_user.is_some());
    }

    #[test]
    fn restore_reproduces_the_four_fields_and_nothing_else() {
        let inner = Arc::new(MemorySnapshotInner::default());

        {
            let mut app = PersistentStore::open(
                Box::new(MemorySnapshotStore::with_inner(inner.clone())),
                test_clock(),
            );
            app.dispatch(Action::AddAlert(test_alert("stock low")));
            app.dispatch(Action::Login(test_user()));
        }

        let reopened = PersistentStore::open(
            Box::new(MemorySnapshotStore::with_inner(inner)),
            test_clock(),
        );

        assert_eq!(reopened.state().alerts.len(), 1);
        assert!(reopened.state().current_user.is_none());
        assert!(reopened.state().current_cash_session.is_none());
    }

    #[test]
    fn malformed_snapshot_leaves_initial_state() {
        let inner = Arc::new(MemorySnapshotInner::default());
        inner.malformed.store(true, Ordering::SeqCst);

        let app = PersistentStore::open(
            Box::new(MemorySnapshotStore::with_inner(inner)),
            test_clock(),
        );

        assert_eq!(app.state(), &AppState::default());
    }

    #[test]
    fn write_failure_does_not_interrupt_the_transition() {
        let inner = Arc::new(MemorySnapshotInner::default());
        inner.failing.store(true, Ordering::SeqCst);

        let mut app = PersistentStore::open(
            Box::new(MemorySnapshotStore::with_inner(inner.clone())),
            test_clock(),
        );
        app.dispatch(Action::AddAlert(test_alert("stock low")));

        // The state advanced even though persistence failed.
        assert_eq!(app.state().alerts.len(), 1);
        assert!(inner.snapshot.lock().unwrap().is_none());

        // And once the store recovers, the next change is written.
        inner.failing.store(false, Ordering::SeqCst);
        app.dispatch(Action::AddAlert(test_alert("shift unclosed")));
        assert_eq!(inner.snapshot.lock().unwrap().clone().unwrap().alerts.len(), 2);
    }

    #[test]
    fn unchanged_persisted_fields_skip_redundant_writes() {
        let inner = Arc::new(MemorySnapshotInner::default());
        let mut app = PersistentStore::open(
            Box::new(MemorySnapshotStore::with_inner(inner.clone())),
            test_clock(),
        );

        app.dispatch(Action::AddAlert(test_alert("stock low")));
        let saves_before = inner.saves.load(Ordering::SeqCst);

        // End without an open session is a no-op transition.
        app.dispatch(Action::EndCashSession);
        assert_eq!(inner.saves.load(Ordering::SeqCst), saves_before);
    }
}
