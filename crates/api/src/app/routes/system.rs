use axum::{http::StatusCode, response::IntoResponse, Json};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Landing page.
pub async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "orderdesk",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
