use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_recommender::{
    config::Config,
    db::JsonStore,
    routes::{create_router, AppState},
    services::{
        providers::{GeminiProvider, TmdbProvider},
        MetadataLookup, RecommendationGenerator, RecommendationService,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_recommender=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| {
        tracing::error!(error = %e, "Startup aborted");
        e
    })?;

    let generator = RecommendationGenerator::new(Arc::new(GeminiProvider::new(config.gemini())));
    let lookup = MetadataLookup::new(Arc::new(TmdbProvider::new(config.tmdb())));
    let store = JsonStore::new(&config.store_path);

    // Create the store up front so a bad path fails before serving
    store
        .load()
        .await
        .with_context(|| format!("Failed to open store at {}", config.store_path))?;

    let store_path = store.path().display().to_string();
    let service = RecommendationService::new(generator, lookup, store);
    let state = Arc::new(AppState::new(service, config.default_language));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!(
        address = %address,
        model = %config.gemini_model,
        store = %store_path,
        "Server running"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
