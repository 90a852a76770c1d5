//! The application state tree.

use serde::{Deserialize, Serialize};

use caja_users::User;

use crate::alert::Alert;
use crate::cash_session::CashSession;
use crate::kardex::KardexEntry;
use crate::sale::Sale;

/// The single authoritative state tree.
///
/// The four sequences are ordered append-logs (with in-place update for cash
/// sessions and alerts, matched by id). `current_user` and
/// `current_cash_session` are value copies, not owning references, and are
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppState {
    pub sales: Vec<Sale>,
    pub kardex_entries: Vec<KardexEntry>,
    pub cash_sessions: Vec<CashSession>,
    pub alerts: Vec<Alert>,
    pub current_user: Option<User>,
    pub current_cash_session: Option<CashSession>,
}

impl AppState {
    /// Count of alerts not yet marked as read.
    pub fn unread_alerts(&self) -> usize {
        self.alerts.iter().filter(|a| !a.is_read).count()
    }
}

/// Partial state for bulk restore (`Action::LoadData`).
///
/// Each populated field overwrites the same-named state field wholesale;
/// absent fields leave the state untouched. The persistence bridge only ever
/// populates the four persisted sequences.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatePatch {
    pub sales: Option<Vec<Sale>>,
    pub kardex_entries: Option<Vec<KardexEntry>>,
    pub cash_sessions: Option<Vec<CashSession>>,
    pub alerts: Option<Vec<Alert>>,
    pub current_user: Option<Option<User>>,
    pub current_cash_session: Option<Option<CashSession>>,
}

impl StatePatch {
    pub fn is_empty(&self) -> bool {
        self.sales.is_none()
            && self.kardex_entries.is_none()
            && self.cash_sessions.is_none()
            && self.alerts.is_none()
            && self.current_user.is_none()
            && self.current_cash_session.is_none()
    }
}
