use std::sync::Arc;

use reel_api::{
    cache::CatalogCache,
    config::Config,
    routes::{create_router, AppState},
    services::{CatalogSource, LocalFileSource, RemoteSource},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let source: Arc<dyn CatalogSource> = match &config.catalog_path {
        Some(path) => Arc::new(LocalFileSource::new(path)),
        None => Arc::new(RemoteSource::new(config.catalog_url.clone())),
    };

    let cache = Arc::new(
        CatalogCache::new(source, config.column_overrides()).with_ttl(config.catalog_ttl()),
    );

    // Warm the cache so a broken source is reported at startup
    match cache.get().await {
        Ok(catalog) => tracing::info!(
            source = %catalog.source,
            rows = catalog.catalog.len(),
            "Catalog ready"
        ),
        Err(e) => tracing::error!(error = %e, "Initial catalog load failed, will retry on demand"),
    }

    let state = AppState::new(cache).with_default_count(config.default_recommendations);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
