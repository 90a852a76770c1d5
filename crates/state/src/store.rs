//! The state store: single owner of the state tree.

use std::sync::Arc;

use caja_core::{Clock, SystemClock};

use crate::action::Action;
use crate::state::AppState;
use crate::transition::transition;

/// Something actions can be dispatched into.
///
/// Components that need to mutate state (auth flow, persistence restore)
/// take a `&mut dyn Dispatcher` instead of reaching for a global context.
pub trait Dispatcher {
    fn dispatch(&mut self, action: Action);
}

/// Holds the one [`AppState`] value and applies transitions to it.
///
/// `dispatch` is synchronous and takes `&mut self`, so no two dispatches can
/// interleave mid-transition.
pub struct StateStore {
    state: AppState,
    clock: Arc<dyn Clock>,
}

impl StateStore {
    /// Store with the system clock and an empty initial state.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Store with an injected clock (fixed clocks keep tests deterministic).
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: AppState::default(),
            clock,
        }
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher for StateStore {
    fn dispatch(&mut self, action: Action) {
        self.state = transition(&self.state, &action, self.clock.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use caja_core::{AlertId, FixedClock};

    use crate::alert::Alert;

    #[test]
    fn dispatch_replaces_state_with_transition_result() {
        let t = Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
        let mut store = StateStore::with_clock(Arc::new(FixedClock(t)));
        let alert = Alert::new(AlertId::new(), "stock low", t);

        store.dispatch(Action::AddAlert(alert.clone()));

        assert_eq!(store.state().alerts, vec![alert]);
        assert_eq!(store.state().unread_alerts(), 1);
    }
}
