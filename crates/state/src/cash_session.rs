//! Cash-register sessions (shifts).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use caja_core::{CashSessionId, Entity, UserId};

/// Whether a register shift is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashSessionStatus {
    Open,
    Closed,
}

/// One register shift.
///
/// Historical records and the "current" session are the same entities; the
/// current session is a value copy selected out of the sequence, not a
/// separate store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashSession {
    pub id: CashSessionId,
    pub opened_by: UserId,
    /// Opening float in smallest currency unit.
    pub opening_float_cents: i64,
    pub started_at: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: CashSessionStatus,
}

impl CashSession {
    /// Start a new open session.
    pub fn open(
        id: CashSessionId,
        opened_by: UserId,
        opening_float_cents: i64,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            opened_by,
            opening_float_cents,
            started_at,
            end_time: None,
            status: CashSessionStatus::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == CashSessionStatus::Open
    }
}

impl Entity for CashSession {
    type Id = CashSessionId;

    fn id(&self) -> CashSessionId {
        self.id
    }
}
