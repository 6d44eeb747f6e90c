use std::sync::Arc;

use anyhow::Context;

use supplytrack_infra::{AppConfig, EntityStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    supplytrack_observability::init(&config.log_filter);

    let store = Arc::new(EntityStore::new());
    let app = supplytrack_api::app::build_app(store);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
