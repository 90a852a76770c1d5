//! `caja-state` — the application state core.
//!
//! One in-memory state tree ([`AppState`]), mutated exclusively through a
//! closed set of typed transitions ([`Action`]) applied by a pure function
//! ([`transition`]). The [`StateStore`] owns the single state value and is
//! the only legal mutation path.

pub mod action;
pub mod alert;
pub mod cash_session;
pub mod kardex;
pub mod sale;
pub mod state;
pub mod store;
pub mod transition;

pub use action::Action;
pub use alert::Alert;
pub use cash_session::{CashSession, CashSessionStatus};
pub use kardex::{KardexEntry, KardexMovement};
pub use sale::{Sale, SaleLine};
pub use state::{AppState, StatePatch};
pub use store::{Dispatcher, StateStore};
pub use transition::transition;
