use axum::{routing::get, Router};

pub mod orders;
pub mod products;
pub mod system;

/// Router for the application endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::index))
        .nest("/orders", orders::router())
        .nest("/products", products::router())
}
