//! The closed set of state transitions.

use caja_core::AlertId;
use caja_users::User;

use crate::alert::Alert;
use crate::cash_session::CashSession;
use crate::kardex::KardexEntry;
use crate::sale::Sale;
use crate::state::StatePatch;

/// Everything that can happen to the state tree.
///
/// The set is closed: `transition` matches exhaustively, so every action maps
/// to a defined next state by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a completed sale.
    AddSale(Sale),
    /// Append an inventory ledger movement.
    AddKardexEntry(KardexEntry),
    /// Set the logged-in user.
    Login(User),
    /// Clear the logged-in user and any open register session pointer.
    Logout,
    /// Open a register session: becomes current and joins the history.
    StartCashSession(CashSession),
    /// Close the current register session, if any.
    EndCashSession,
    /// Replace the history entry with a matching id (field-level edit).
    ReplaceCashSession(CashSession),
    /// Append an alert.
    AddAlert(Alert),
    /// Mark the alert with this id as read.
    MarkAlertRead(AlertId),
    /// Bulk restore: overwrite the populated fields wholesale.
    LoadData(StatePatch),
}
