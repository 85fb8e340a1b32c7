use serde::{Deserialize, Serialize};

use orderdesk_core::{DomainError, ProductId};

/// Catalog product.
///
/// Uniqueness of `name` is enforced by storage; this type carries the
/// already-validated state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price in the smallest currency unit. Never negative.
    pub price: i64,
    /// Optional image reference (relative path).
    pub image_url: Option<String>,
}

/// Validated input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    name: String,
    price: i64,
    image_url: String,
}

impl NewProduct {
    /// Validate raw creation input.
    ///
    /// The name is trimmed and must be non-empty; the price must be ≥ 0.
    /// The image reference is derived from the name.
    pub fn new(name: &str, price: i64) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if price < 0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(Self {
            name: name.to_string(),
            price,
            image_url: format!("images/{}.jpg", name.to_lowercase()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }
}
