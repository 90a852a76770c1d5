//! Inventory ledger (kardex) movements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use caja_core::{Entity, KardexEntryId, ProductId};

/// Direction/kind of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KardexMovement {
    Inbound,
    Outbound,
    Adjustment,
}

/// One movement in the inventory ledger (immutable once appended).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KardexEntry {
    pub id: KardexEntryId,
    pub product_id: ProductId,
    pub movement: KardexMovement,
    pub quantity: i64,
    /// Free-form reference to the originating document (e.g. a sale id).
    pub reference: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl Entity for KardexEntry {
    type Id = KardexEntryId;

    fn id(&self) -> KardexEntryId {
        self.id
    }
}
