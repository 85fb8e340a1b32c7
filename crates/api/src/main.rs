use anyhow::Context;

use orderdesk_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    orderdesk_observability::init();

    let config = ApiConfig::from_env()?;

    let pool = orderdesk_infra::db::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    orderdesk_infra::db::init_schema(&pool)
        .await
        .context("failed to create schema")?;
    if config.seed_demo_data {
        orderdesk_infra::db::seed_demo_data(&pool)
            .await
            .context("failed to seed demo data")?;
    }

    let app = orderdesk_api::app::build_app(pool);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
