use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::get,
    Form, Json, Router,
};

use orderdesk_core::ProductId;
use orderdesk_infra::ops;
use orderdesk_products::NewProduct;

use crate::app::{dto, errors, AppState};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(restock))
        .route("/new", get(new_product_form).post(create_product))
}

pub async fn list_products(
    Extension(state): Extension<Arc<AppState>>,
) -> axum::response::Response {
    match ops::list_products(&state.pool).await {
        Ok(items) => Json(serde_json::json!({
            "products": items.iter().map(dto::product_to_json).collect::<Vec<_>>(),
        }))
        .into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn restock(
    Extension(state): Extension<Arc<AppState>>,
    Form(body): Form<dto::RestockRequest>,
) -> axum::response::Response {
    let product_id: ProductId = match body.product_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
        }
    };

    match ops::restock(&state.pool, product_id, body.amount).await {
        Ok(_) => Redirect::to("/products").into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

/// Context for the product creation form: a blank form model.
pub async fn new_product_form() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "",
        "price": 0,
    }))
}

pub async fn create_product(
    Extension(state): Extension<Arc<AppState>>,
    Form(body): Form<dto::CreateProductRequest>,
) -> axum::response::Response {
    let new = match NewProduct::new(&body.name, body.price) {
        Ok(n) => n,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match ops::create_product(&state.pool, new).await {
        Ok(_) => Redirect::to("/products").into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}
