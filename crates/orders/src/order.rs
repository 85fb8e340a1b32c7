use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use orderdesk_core::{DomainError, OrderId, ProductId};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Received,
    Preparing,
    Shipped,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Received => "received",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Shipped => "shipped",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "received" => Ok(OrderStatus::Received),
            "preparing" => Ok(OrderStatus::Preparing),
            "shipped" => Ok(OrderStatus::Shipped),
            other => Err(DomainError::validation(format!(
                "status must be one of received, preparing, shipped (got {other:?})"
            ))),
        }
    }
}

/// A customer request for a quantity of one product.
///
/// The product is fixed at creation; edits cover the remaining fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub product_id: ProductId,
    /// Units allocated against the product's stock. Never negative.
    pub quantity: i64,
    pub desired_date: Option<NaiveDate>,
    pub status: OrderStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_customer_name(customer_name: &str) -> Result<String, DomainError> {
    let customer_name = customer_name.trim();
    if customer_name.is_empty() {
        return Err(DomainError::validation("customer name cannot be empty"));
    }
    Ok(customer_name.to_string())
}

fn validate_quantity(quantity: i64) -> Result<i64, DomainError> {
    if quantity < 1 {
        return Err(DomainError::validation("quantity must be at least 1"));
    }
    Ok(quantity)
}

fn normalize_note(note: Option<String>) -> Option<String> {
    note.filter(|n| !n.trim().is_empty())
}

/// Validated input for creating an order. New orders start as `received`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    customer_name: String,
    product_id: ProductId,
    quantity: i64,
    desired_date: Option<NaiveDate>,
    note: Option<String>,
}

impl OrderDraft {
    pub fn new(
        customer_name: &str,
        product_id: ProductId,
        quantity: i64,
        desired_date: Option<NaiveDate>,
        note: Option<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            customer_name: validate_customer_name(customer_name)?,
            product_id,
            quantity: validate_quantity(quantity)?,
            desired_date,
            note: normalize_note(note),
        })
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn desired_date(&self) -> Option<NaiveDate> {
        self.desired_date
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// Validated input for editing an order.
///
/// `status: None` keeps the order's current status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderChanges {
    customer_name: String,
    quantity: i64,
    desired_date: Option<NaiveDate>,
    note: Option<String>,
    status: Option<OrderStatus>,
}

impl OrderChanges {
    pub fn new(
        customer_name: &str,
        quantity: i64,
        desired_date: Option<NaiveDate>,
        note: Option<String>,
        status: Option<OrderStatus>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            customer_name: validate_customer_name(customer_name)?,
            quantity: validate_quantity(quantity)?,
            desired_date,
            note: normalize_note(note),
            status,
        })
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn desired_date(&self) -> Option<NaiveDate> {
        self.desired_date
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Status to persist for an order currently in `current`.
    pub fn status_or(&self, current: OrderStatus) -> OrderStatus {
        self.status.unwrap_or(current)
    }

    /// Stock impact of this edit: `new_quantity - old_quantity`.
    pub fn quantity_diff(&self, old_quantity: i64) -> i64 {
        self.quantity - old_quantity
    }
}
