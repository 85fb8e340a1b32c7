use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};

use orderdesk_core::ProductId;
use orderdesk_products::Product;

/// A catalog product joined with its stock level (if a stock record exists).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductWithStock {
    pub product: Product,
    pub stock_quantity: Option<i64>,
}

fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: ProductId::from_uuid(row.try_get("id")?),
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        image_url: row.try_get("image_url")?,
    })
}

pub async fn insert(conn: &mut PgConnection, product: &Product) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO products (id, name, price, image_url)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(product.id.as_uuid())
    .bind(&product.name)
    .bind(product.price)
    .bind(&product.image_url)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn find_by_id(
    conn: &mut PgConnection,
    id: ProductId,
) -> Result<Option<Product>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, name, price, image_url
        FROM products
        WHERE id = $1
        "#,
    )
    .bind(id.as_uuid())
    .fetch_optional(conn)
    .await?;

    row.as_ref().map(product_from_row).transpose()
}

pub async fn find_by_name(
    conn: &mut PgConnection,
    name: &str,
) -> Result<Option<Product>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, name, price, image_url
        FROM products
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(conn)
    .await?;

    row.as_ref().map(product_from_row).transpose()
}

/// All products with their stock levels, for the catalog page and the order
/// form's product choices.
pub async fn list_with_stock(
    conn: &mut PgConnection,
) -> Result<Vec<ProductWithStock>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT p.id, p.name, p.price, p.image_url, s.quantity AS stock_quantity
        FROM products p
        LEFT JOIN stocks s ON s.product_id = p.id
        ORDER BY p.name
        "#,
    )
    .fetch_all(conn)
    .await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in &rows {
        items.push(ProductWithStock {
            product: product_from_row(row)?,
            stock_quantity: row.try_get("stock_quantity")?,
        });
    }
    Ok(items)
}
