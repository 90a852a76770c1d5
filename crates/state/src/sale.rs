//! Completed sales, appended once and never edited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use caja_core::{Entity, ProductId, SaleId, UserId};

/// One line of a sale.
///
/// `product_id` references a catalog owned outside this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    pub product_id: ProductId,
    pub quantity: i64,
    /// Unit price in smallest currency unit (e.g. cents).
    pub unit_price_cents: i64,
}

impl SaleLine {
    pub fn subtotal_cents(&self) -> i64 {
        self.quantity * self.unit_price_cents
    }
}

/// A completed sale (immutable once appended).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub lines: Vec<SaleLine>,
    /// Total in smallest currency unit.
    pub total_cents: i64,
    pub cashier_id: UserId,
    pub sold_at: DateTime<Utc>,
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> SaleId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_subtotal_is_quantity_times_price() {
        let line = SaleLine {
            product_id: ProductId::new("SKU-1"),
            quantity: 3,
            unit_price_cents: 250,
        };
        assert_eq!(line.subtotal_cents(), 750);
    }
}
