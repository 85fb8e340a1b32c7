use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use serde_json::json;

use orderdesk_core::DomainError;
use orderdesk_infra::OpError;
use orderdesk_inventory::StockError;
use orderdesk_orders::OrderStatus;

pub fn op_error_to_response(err: OpError) -> axum::response::Response {
    match err {
        OpError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        OpError::StockMissing => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "stock_missing",
            "this product has no stock record",
        ),
        OpError::DuplicateName(name) => json_error(
            StatusCode::CONFLICT,
            "duplicate_name",
            format!("a product named {name:?} already exists"),
        ),
        OpError::Stock(e @ StockError::Insufficient { .. }) => {
            json_error(StatusCode::CONFLICT, "insufficient_stock", e.to_string())
        }
        OpError::Stock(e @ StockError::NonPositiveAmount(_)) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string())
        }
        OpError::Domain(e) => domain_error_to_response(e),
        OpError::Store(e) => {
            tracing::error!(error = %e, "storage failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                "storage error",
            )
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Empty form fields arrive as empty strings; treat those as absent.
pub fn parse_desired_date(
    raw: Option<&str>,
) -> Result<Option<NaiveDate>, axum::response::Response> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s.parse::<NaiveDate>().map(Some).map_err(|_| {
            json_error(
                StatusCode::BAD_REQUEST,
                "invalid_date",
                "desired_date must be formatted as YYYY-MM-DD",
            )
        }),
    }
}

pub fn parse_status(raw: Option<&str>) -> Result<Option<OrderStatus>, axum::response::Response> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse::<OrderStatus>()
            .map(Some)
            .map_err(domain_error_to_response),
    }
}
