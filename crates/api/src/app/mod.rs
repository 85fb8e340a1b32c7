//! HTTP API application wiring (Axum router + state).
//!
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use sqlx::PgPool;

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared per-request state: the connection pool operations draw their
/// transactions from.
pub struct AppState {
    pub pool: PgPool,
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(pool: PgPool) -> Router {
    let state = Arc::new(AppState { pool });

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(state))
}
