use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};

use orderdesk_core::{OrderId, ProductId};
use orderdesk_orders::Order;

/// An order joined with the name of the product it is placed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub order: Order,
    pub product_name: String,
}

fn order_from_row(row: &PgRow) -> Result<Order, sqlx::Error> {
    let status: String = row.try_get("status")?;
    Ok(Order {
        id: OrderId::from_uuid(row.try_get("id")?),
        customer_name: row.try_get("customer_name")?,
        product_id: ProductId::from_uuid(row.try_get("product_id")?),
        quantity: row.try_get("quantity")?,
        desired_date: row.try_get("desired_date")?,
        status: status
            .parse()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        note: row.try_get("note")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn record_from_row(row: &PgRow) -> Result<OrderRecord, sqlx::Error> {
    Ok(OrderRecord {
        order: order_from_row(row)?,
        product_name: row.try_get("product_name")?,
    })
}

pub async fn insert(conn: &mut PgConnection, order: &Order) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO orders
            (id, customer_name, product_id, quantity, desired_date, status, note, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(order.id.as_uuid())
    .bind(&order.customer_name)
    .bind(order.product_id.as_uuid())
    .bind(order.quantity)
    .bind(order.desired_date)
    .bind(order.status.as_str())
    .bind(&order.note)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find_by_id(
    conn: &mut PgConnection,
    id: OrderId,
) -> Result<Option<Order>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, customer_name, product_id, quantity, desired_date, status, note,
               created_at, updated_at
        FROM orders
        WHERE id = $1
        "#,
    )
    .bind(id.as_uuid())
    .fetch_optional(conn)
    .await?;

    row.as_ref().map(order_from_row).transpose()
}

pub async fn find_with_product(
    conn: &mut PgConnection,
    id: OrderId,
) -> Result<Option<OrderRecord>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT o.id, o.customer_name, o.product_id, o.quantity, o.desired_date, o.status,
               o.note, o.created_at, o.updated_at, p.name AS product_name
        FROM orders o
        JOIN products p ON p.id = o.product_id
        WHERE o.id = $1
        "#,
    )
    .bind(id.as_uuid())
    .fetch_optional(conn)
    .await?;

    row.as_ref().map(record_from_row).transpose()
}

pub async fn update(conn: &mut PgConnection, order: &Order) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE orders
        SET customer_name = $2, quantity = $3, desired_date = $4, status = $5,
            note = $6, updated_at = $7
        WHERE id = $1
        "#,
    )
    .bind(order.id.as_uuid())
    .bind(&order.customer_name)
    .bind(order.quantity)
    .bind(order.desired_date)
    .bind(order.status.as_str())
    .bind(&order.note)
    .bind(order.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn delete(conn: &mut PgConnection, id: OrderId) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id.as_uuid())
        .execute(conn)
        .await?;
    Ok(())
}

/// One page of orders matching both substring patterns (`LIKE`, so `%…%`).
pub async fn page_filtered(
    conn: &mut PgConnection,
    customer_pattern: &str,
    product_pattern: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<OrderRecord>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT o.id, o.customer_name, o.product_id, o.quantity, o.desired_date, o.status,
               o.note, o.created_at, o.updated_at, p.name AS product_name
        FROM orders o
        JOIN products p ON p.id = o.product_id
        WHERE o.customer_name LIKE $1 AND p.name LIKE $2
        ORDER BY o.created_at, o.id
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(customer_pattern)
    .bind(product_pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(conn)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in &rows {
        records.push(record_from_row(row)?);
    }
    Ok(records)
}

pub async fn count_filtered(
    conn: &mut PgConnection,
    customer_pattern: &str,
    product_pattern: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM orders o
        JOIN products p ON p.id = o.product_id
        WHERE o.customer_name LIKE $1 AND p.name LIKE $2
        "#,
    )
    .bind(customer_pattern)
    .bind(product_pattern)
    .fetch_one(conn)
    .await
}
