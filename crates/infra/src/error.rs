//! Operation error model: every user-facing failure reason, enumerated.

use thiserror::Error;

use orderdesk_core::DomainError;
use orderdesk_inventory::StockError;

/// Failure of a storage-backed operation.
///
/// Validation-shaped variants leave the store untouched: the surrounding
/// transaction is dropped uncommitted when one of these is returned.
#[derive(Debug, Error)]
pub enum OpError {
    /// The addressed entity does not exist.
    #[error("not found")]
    NotFound,

    /// The product exists but carries no stock record.
    #[error("this product has no stock record")]
    StockMissing,

    /// A product with the same name already exists.
    #[error("a product named {0:?} already exists")]
    DuplicateName(String),

    /// Stock arithmetic refused the adjustment (e.g. insufficient stock).
    #[error(transparent)]
    Stock(#[from] StockError),

    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The store itself failed.
    #[error("storage error: {0}")]
    Store(#[from] sqlx::Error),
}
