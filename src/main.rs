use std::sync::Arc;
use std::time::Duration;

use course_recs::{
    api::{create_router, AppState},
    cache::{spawn_cleanup_task, ResultCache},
    catalog::JsonCatalog,
    config::Config,
    services::Recommender,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("course_recs=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;

    let cache = Arc::new(ResultCache::new(Duration::from_secs(config.cache_ttl_secs)));
    let cleanup = spawn_cleanup_task(
        cache.clone(),
        Duration::from_secs(config.cache_cleanup_interval_secs.max(1)),
    );

    let paths = config.catalog_paths();
    tracing::info!(
        courses = %paths.courses.display(),
        users = %paths.users.display(),
        similarities = %paths.similarities.display(),
        "Using JSON catalog"
    );

    let mut recommender = Recommender::new(Arc::new(JsonCatalog::new(paths)), cache);
    if let Some(seed) = config.rng_seed {
        recommender = recommender.with_seed(seed);
    }

    let app = create_router(AppState::new(recommender, config.max_limit));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cleanup.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
