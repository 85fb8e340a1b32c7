//! Transactional operations: the order lifecycle, restocking, product
//! creation, and order listing.
//!
//! Each mutating operation owns one transaction from begin to commit; a
//! `?`-propagated failure drops the transaction uncommitted, so the stock
//! adjustment and the order mutation land together or not at all.

use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use orderdesk_core::{OrderId, ProductId};
use orderdesk_inventory::Stock;
use orderdesk_orders::{Order, OrderChanges, OrderDraft, OrderStatus};
use orderdesk_products::{NewProduct, Product};

use crate::error::OpError;
use crate::store::{self, OrderRecord, ProductWithStock};

/// Fixed page size for order listings.
pub const PER_PAGE: i64 = 10;

/// Optional substring filters for the order listing, combined with AND.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Matches against the customer name.
    pub customer: Option<String>,
    /// Matches against the ordered product's name.
    pub item: Option<String>,
}

/// One page of the order listing.
#[derive(Debug, Clone)]
pub struct OrderPage {
    pub orders: Vec<OrderRecord>,
    /// 1-based page number this page was requested with.
    pub page: i64,
    pub per_page: i64,
    /// Total matching orders across all pages.
    pub total: i64,
}

fn like_pattern(term: Option<&str>) -> String {
    format!("%{}%", term.unwrap_or_default())
}

fn page_offset(page: i64) -> i64 {
    (page.max(1) - 1) * PER_PAGE
}

/// Create a product with a fresh zero-quantity stock record.
///
/// Duplicate names are rejected without mutation.
#[instrument(skip(pool, new), fields(name = new.name()), err)]
pub async fn create_product(pool: &PgPool, new: NewProduct) -> Result<Product, OpError> {
    let mut tx = pool.begin().await?;

    if store::products::find_by_name(&mut tx, new.name()).await?.is_some() {
        return Err(OpError::DuplicateName(new.name().to_string()));
    }

    let product = Product {
        id: ProductId::new(),
        name: new.name().to_string(),
        price: new.price(),
        image_url: Some(new.image_url().to_string()),
    };
    store::products::insert(&mut tx, &product).await?;
    store::stocks::insert(&mut tx, &Stock::empty(product.id)).await?;

    tx.commit().await?;
    Ok(product)
}

/// All products with their stock levels.
pub async fn list_products(pool: &PgPool) -> Result<Vec<ProductWithStock>, OpError> {
    let mut conn = pool.acquire().await?;
    Ok(store::products::list_with_stock(&mut conn).await?)
}

/// Add `amount` (≥ 1) units to a product's stock.
#[instrument(skip(pool), fields(product_id = %product_id, amount), err)]
pub async fn restock(pool: &PgPool, product_id: ProductId, amount: i64) -> Result<Stock, OpError> {
    let mut tx = pool.begin().await?;

    let Some(mut stock) = store::stocks::find_for_product(&mut tx, product_id).await? else {
        return Err(OpError::StockMissing);
    };
    stock.restock(amount)?;
    store::stocks::update_quantity(&mut tx, &stock).await?;

    tx.commit().await?;
    Ok(stock)
}

/// Create an order, taking its quantity out of the product's stock.
///
/// Fails without mutation when the product or its stock record is missing,
/// or when not enough stock is available.
#[instrument(skip(pool, draft), fields(product_id = %draft.product_id(), quantity = draft.quantity()), err)]
pub async fn create_order(pool: &PgPool, draft: OrderDraft) -> Result<Order, OpError> {
    let mut tx = pool.begin().await?;

    if store::products::find_by_id(&mut tx, draft.product_id()).await?.is_none() {
        return Err(OpError::StockMissing);
    }
    // Stock rows are read and rewritten without a row lock, so concurrent
    // requests against the same stock can interleave at default isolation.
    // TODO: serialize them with SELECT ... FOR UPDATE.
    let Some(mut stock) = store::stocks::find_for_product(&mut tx, draft.product_id()).await?
    else {
        return Err(OpError::StockMissing);
    };
    stock.reserve(draft.quantity())?;
    store::stocks::update_quantity(&mut tx, &stock).await?;

    let now = Utc::now();
    let order = Order {
        id: OrderId::new(),
        customer_name: draft.customer_name().to_string(),
        product_id: draft.product_id(),
        quantity: draft.quantity(),
        desired_date: draft.desired_date(),
        status: OrderStatus::Received,
        note: draft.note().map(str::to_string),
        created_at: now,
        updated_at: now,
    };
    store::orders::insert(&mut tx, &order).await?;

    tx.commit().await?;
    Ok(order)
}

/// Apply an edit to an order, moving the quantity difference against stock.
///
/// A missing stock record skips the stock adjustment but still persists the
/// order fields.
#[instrument(skip(pool, changes), fields(order_id = %order_id, quantity = changes.quantity()), err)]
pub async fn edit_order(
    pool: &PgPool,
    order_id: OrderId,
    changes: OrderChanges,
) -> Result<Order, OpError> {
    let mut tx = pool.begin().await?;

    let Some(mut order) = store::orders::find_by_id(&mut tx, order_id).await? else {
        return Err(OpError::NotFound);
    };

    if let Some(mut stock) = store::stocks::find_for_product(&mut tx, order.product_id).await? {
        stock.apply_diff(changes.quantity_diff(order.quantity))?;
        store::stocks::update_quantity(&mut tx, &stock).await?;
    }

    order.customer_name = changes.customer_name().to_string();
    order.quantity = changes.quantity();
    order.desired_date = changes.desired_date();
    order.note = changes.note().map(str::to_string);
    order.status = changes.status_or(order.status);
    order.updated_at = Utc::now();
    store::orders::update(&mut tx, &order).await?;

    tx.commit().await?;
    Ok(order)
}

/// Delete an order, returning its full quantity to stock.
#[instrument(skip(pool), fields(order_id = %order_id), err)]
pub async fn delete_order(pool: &PgPool, order_id: OrderId) -> Result<(), OpError> {
    let mut tx = pool.begin().await?;

    let Some(order) = store::orders::find_by_id(&mut tx, order_id).await? else {
        return Err(OpError::NotFound);
    };

    if let Some(mut stock) = store::stocks::find_for_product(&mut tx, order.product_id).await? {
        stock.release(order.quantity);
        store::stocks::update_quantity(&mut tx, &stock).await?;
    }
    store::orders::delete(&mut tx, order.id).await?;

    tx.commit().await?;
    Ok(())
}

/// Fetch one order (with product name) by id.
pub async fn get_order(pool: &PgPool, order_id: OrderId) -> Result<OrderRecord, OpError> {
    let mut conn = pool.acquire().await?;
    store::orders::find_with_product(&mut conn, order_id)
        .await?
        .ok_or(OpError::NotFound)
}

/// Filtered, paginated order listing. Out-of-range pages yield an empty list.
pub async fn list_orders(
    pool: &PgPool,
    filter: &OrderFilter,
    page: i64,
) -> Result<OrderPage, OpError> {
    let customer_pattern = like_pattern(filter.customer.as_deref());
    let product_pattern = like_pattern(filter.item.as_deref());

    let mut conn = pool.acquire().await?;
    let total =
        store::orders::count_filtered(&mut conn, &customer_pattern, &product_pattern).await?;
    let orders = store::orders::page_filtered(
        &mut conn,
        &customer_pattern,
        &product_pattern,
        PER_PAGE,
        page_offset(page),
    )
    .await?;

    Ok(OrderPage {
        orders,
        page: page.max(1),
        per_page: PER_PAGE,
        total,
    })
}
