use serde::Deserialize;

use orderdesk_infra::ops::OrderPage;
use orderdesk_infra::store::{OrderRecord, ProductWithStock};

// -------------------------
// Request DTOs (form-encoded)
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub product_id: String,
    pub quantity: i64,
    pub desired_date: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditOrderRequest {
    pub customer_name: String,
    pub quantity: i64,
    pub desired_date: Option<String>,
    pub note: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RestockRequest {
    pub product_id: String,
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub customer: Option<String>,
    pub item: Option<String>,
    pub page: Option<i64>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(item: &ProductWithStock) -> serde_json::Value {
    serde_json::json!({
        "id": item.product.id.to_string(),
        "name": item.product.name,
        "price": item.product.price,
        "image_url": item.product.image_url,
        "stock_quantity": item.stock_quantity,
    })
}

pub fn order_to_json(record: &OrderRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.order.id.to_string(),
        "customer_name": record.order.customer_name,
        "product_id": record.order.product_id.to_string(),
        "product_name": record.product_name,
        "quantity": record.order.quantity,
        "desired_date": record.order.desired_date.map(|d| d.to_string()),
        "status": record.order.status.as_str(),
        "note": record.order.note,
        "created_at": record.order.created_at.to_rfc3339(),
        "updated_at": record.order.updated_at.to_rfc3339(),
    })
}

pub fn order_page_to_json(page: &OrderPage) -> serde_json::Value {
    serde_json::json!({
        "orders": page.orders.iter().map(order_to_json).collect::<Vec<_>>(),
        "page": page.page,
        "per_page": page.per_page,
        "total": page.total,
    })
}
