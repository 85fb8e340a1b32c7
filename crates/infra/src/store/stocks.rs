use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};

use orderdesk_core::{ProductId, StockId};
use orderdesk_inventory::Stock;

fn stock_from_row(row: &PgRow) -> Result<Stock, sqlx::Error> {
    Ok(Stock {
        id: StockId::from_uuid(row.try_get("id")?),
        product_id: ProductId::from_uuid(row.try_get("product_id")?),
        quantity: row.try_get("quantity")?,
    })
}

pub async fn insert(conn: &mut PgConnection, stock: &Stock) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO stocks (id, product_id, quantity)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(stock.id.as_uuid())
    .bind(stock.product_id.as_uuid())
    .bind(stock.quantity)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find_for_product(
    conn: &mut PgConnection,
    product_id: ProductId,
) -> Result<Option<Stock>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, product_id, quantity
        FROM stocks
        WHERE product_id = $1
        "#,
    )
    .bind(product_id.as_uuid())
    .fetch_optional(conn)
    .await?;

    row.as_ref().map(stock_from_row).transpose()
}

/// Persist an in-memory quantity adjustment.
pub async fn update_quantity(conn: &mut PgConnection, stock: &Stock) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE stocks
        SET quantity = $2
        WHERE id = $1
        "#,
    )
    .bind(stock.id.as_uuid())
    .bind(stock.quantity)
    .execute(conn)
    .await?;
    Ok(())
}
