use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use marquee_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{CatalogStore, TmdbPosterProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("marquee_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Without both artifacts there is nothing to serve
    let catalog = CatalogStore::load(&config.catalog_path, &config.similarity_path)
        .context("Failed to load catalog")?;

    let posters = TmdbPosterProvider::from_config(&config)?;
    if config.api_key().is_none() {
        tracing::warn!("TMDB_API_KEY not set, posters will be placeholders");
    }

    let state = AppState::from_config(&config, catalog, Arc::new(posters));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app).await?;
    Ok(())
}
