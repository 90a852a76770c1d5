//! Operator-facing alerts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use caja_core::{AlertId, Entity};

/// A message shown to the operator until marked as read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(id: AlertId, message: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            message: message.into(),
            is_read: false,
            created_at,
        }
    }
}

impl Entity for Alert {
    type Id = AlertId;

    fn id(&self) -> AlertId {
        self.id
    }
}
