//! Connection pool and schema bootstrap.

use sqlx::PgPool;
use tracing::info;

use orderdesk_products::NewProduct;

use crate::error::OpError;
use crate::ops;

/// Connect a shared connection pool.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Create the schema if it does not exist yet.
///
/// Idempotent; runs at startup. The CHECK constraints are the storage-level
/// backstop for the non-negativity invariants the domain layer enforces.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            price BIGINT NOT NULL CHECK (price >= 0),
            image_url TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS stocks (
            id UUID PRIMARY KEY,
            product_id UUID NOT NULL UNIQUE REFERENCES products(id) ON DELETE CASCADE,
            quantity BIGINT NOT NULL DEFAULT 0 CHECK (quantity >= 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id UUID PRIMARY KEY,
            customer_name TEXT NOT NULL,
            product_id UUID NOT NULL REFERENCES products(id),
            quantity BIGINT NOT NULL CHECK (quantity >= 0),
            desired_date DATE,
            status TEXT NOT NULL DEFAULT 'received',
            note TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Seed demo catalog data when the catalog is empty.
///
/// Apple (price 100, stock 10) and Orange (price 80, stock 5).
pub async fn seed_demo_data(pool: &PgPool) -> Result<(), OpError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    for (name, price, quantity) in [("Apple", 100, 10), ("Orange", 80, 5)] {
        let product = ops::create_product(pool, NewProduct::new(name, price)?).await?;
        let stock = ops::restock(pool, product.id, quantity).await?;
        info!(product = name, quantity = stock.quantity, "seeded demo product");
    }

    Ok(())
}
