//! Row↔entity mapping and repository functions.
//!
//! Every function takes a `&mut PgConnection` so it composes inside whatever
//! transaction (or plain pooled connection) the caller holds.

pub mod orders;
pub mod products;
pub mod stocks;

pub use orders::OrderRecord;
pub use products::ProductWithStock;
