use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Form, Json, Router,
};

use orderdesk_core::{OrderId, ProductId};
use orderdesk_infra::ops::{self, OrderFilter};
use orderdesk_orders::{OrderChanges, OrderDraft};

use crate::app::{dto, errors, AppState};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_orders))
        .route("/new", get(new_order_form).post(create_order))
        .route("/:id", get(order_detail))
        .route("/:id/edit", get(edit_order_form).post(edit_order))
        .route("/:id/delete", post(delete_order))
}

/// Context for the order form: the selectable products with stock levels.
pub async fn new_order_form(
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

pub async fn create_order(
    Extension(state): Extension<Arc<AppState>>,
    Form(body): Form<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let product_id: ProductId = match body.product_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
        }
    };
    let desired_date = match errors::parse_desired_date(body.desired_date.as_deref()) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let draft = match OrderDraft::new(
        &body.customer_name,
        product_id,
        body.quantity,
        desired_date,
        body.note,
    ) {
        Ok(d) => d,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match ops::create_order(&state.pool, draft).await {
        Ok(_) => Redirect::to("/orders").into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn list_orders(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<dto::OrderListQuery>,
) -> axum::response::Response {
    let filter = OrderFilter {
        customer: query.customer,
        item: query.item,
    };
    let page = query.page.unwrap_or(1);

    match ops::list_orders(&state.pool, &filter, page).await {
        Ok(page) => Json(dto::order_page_to_json(&page)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn order_detail(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id")
        }
    };

    match ops::get_order(&state.pool, order_id).await {
        Ok(record) => Json(dto::order_to_json(&record)).into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

/// Context for the edit form: the order plus the selectable products.
pub async fn edit_order_form(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id")
        }
    };

    let record = match ops::get_order(&state.pool, order_id).await {
        Ok(r) => r,
        Err(e) => return errors::op_error_to_response(e),
    };
    match ops::list_products(&state.pool).await {
        Ok(items) => Json(serde_json::json!({
            "order": dto::order_to_json(&record),
            "products": items.iter().map(dto::product_to_json).collect::<Vec<_>>(),
        }))
        .into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn edit_order(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Form(body): Form<dto::EditOrderRequest>,
) -> axum::response::Response {
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id")
        }
    };
    let desired_date = match errors::parse_desired_date(body.desired_date.as_deref()) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let status = match errors::parse_status(body.status.as_deref()) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let changes = match OrderChanges::new(
        &body.customer_name,
        body.quantity,
        desired_date,
        body.note,
        status,
    ) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match ops::edit_order(&state.pool, order_id, changes).await {
        Ok(_) => Redirect::to("/orders").into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn delete_order(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id")
        }
    };

    match ops::delete_order(&state.pool, order_id).await {
        Ok(()) => Redirect::to("/orders").into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}
