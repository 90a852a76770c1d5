//! The pure transition function.

use caja_core::{Clock, Entity};

use crate::action::Action;
use crate::cash_session::CashSessionStatus;
use crate::state::AppState;

/// Overwrite the sequence entry whose id matches; absent ids are a no-op.
fn replace_matching<E: Entity + Clone>(seq: &mut [E], replacement: &E) {
    for slot in seq.iter_mut() {
        if slot.id() == replacement.id() {
            *slot = replacement.clone();
        }
    }
}

/// Map `(state, action)` to the next state.
///
/// Pure and total: no I/O, no hidden state, and the only clock read
/// (stamping the end of a cash session) goes through the injected [`Clock`],
/// so equal inputs always produce equal outputs.
pub fn transition(state: &AppState, action: &Action, clock: &dyn Clock) -> AppState {
    let mut next = state.clone();

    match action {
        Action::AddSale(sale) => {
            next.sales.push(sale.clone());
        }

        Action::AddKardexEntry(entry) => {
            next.kardex_entries.push(entry.clone());
        }

        Action::Login(user) => {
            next.current_user = Some(user.clone());
        }

        Action::Logout => {
            next.current_user = None;
            next.current_cash_session = None;
        }

        Action::StartCashSession(session) => {
            next.current_cash_session = Some(session.clone());
            next.cash_sessions.push(session.clone());
        }

        Action::EndCashSession => {
            // No open session: leave the state exactly as it was.
            if let Some(mut closed) = next.current_cash_session.take() {
                closed.end_time = Some(clock.now());
                closed.status = CashSessionStatus::Closed;
                replace_matching(&mut next.cash_sessions, &closed);
            }
        }

        Action::ReplaceCashSession(session) => {
            replace_matching(&mut next.cash_sessions, session);
        }

        Action::AddAlert(alert) => {
            next.alerts.push(alert.clone());
        }

        Action::MarkAlertRead(id) => {
            for alert in next.alerts.iter_mut() {
                if alert.id == *id {
                    alert.is_read = true;
                }
            }
        }

        Action::LoadData(patch) => {
            if let Some(sales) = &patch.sales {
                next.sales = sales.clone();
            }
            if let Some(entries) = &patch.kardex_entries {
                next.kardex_entries = entries.clone();
            }
            if let Some(sessions) = &patch.cash_sessions {
                next.cash_sessions = sessions.clone();
            }
            if let Some(alerts) = &patch.alerts {
                next.alerts = alerts.clone();
            }
            if let Some(user) = &patch.current_user {
                next.current_user = user.clone();
            }
            if let Some(session) = &patch.current_cash_session {
                next.current_cash_session = session.clone();
            }
        }
    }

    next
}
