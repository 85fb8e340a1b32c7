use serde::{Deserialize, Serialize};
use thiserror::Error;

use orderdesk_core::{ProductId, StockId};

/// Stock adjustment failure reasons.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    /// The requested quantity exceeds what is available.
    #[error("insufficient stock: {available} available, {requested} requested")]
    Insufficient { available: i64, requested: i64 },

    /// Restock amounts must be at least 1.
    #[error("restock amount must be positive (got {0})")]
    NonPositiveAmount(i64),
}

/// The single inventory record tied 1:1 to a product.
///
/// Invariant: `quantity` never goes negative. Every mutating method refuses
/// an adjustment that would break it and leaves the record untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: StockId,
    pub product_id: ProductId,
    pub quantity: i64,
}

impl Stock {
    /// Fresh stock record for a newly created product (zero quantity).
    pub fn empty(product_id: ProductId) -> Self {
        Self {
            id: StockId::new(),
            product_id,
            quantity: 0,
        }
    }

    /// Take `quantity` units out of stock for a new order.
    pub fn reserve(&mut self, quantity: i64) -> Result<(), StockError> {
        if self.quantity < quantity {
            return Err(StockError::Insufficient {
                available: self.quantity,
                requested: quantity,
            });
        }
        self.quantity -= quantity;
        Ok(())
    }

    /// Apply an order-quantity change, where `diff = new_quantity - old_quantity`.
    ///
    /// A positive diff consumes stock and fails when not enough is available;
    /// a negative diff returns the difference to stock.
    pub fn apply_diff(&mut self, diff: i64) -> Result<(), StockError> {
        if diff > 0 && self.quantity < diff {
            return Err(StockError::Insufficient {
                available: self.quantity,
                requested: diff,
            });
        }
        self.quantity -= diff;
        Ok(())
    }

    /// Return `quantity` units to stock (order deleted).
    pub fn release(&mut self, quantity: i64) {
        self.quantity += quantity;
    }

    /// Manual addition to stock outside the order lifecycle.
    pub fn restock(&mut self, amount: i64) -> Result<(), StockError> {
        if amount < 1 {
            return Err(StockError::NonPositiveAmount(amount));
        }
        self.quantity += amount;
        Ok(())
    }
}
