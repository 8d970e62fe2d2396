use anyhow::Context;
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;

use learnserver::api_router::build_router;
use learnserver::core::config::AppConfig;
use learnserver::core::shared::state::AppState;
use learnserver::learn::{InMemoryLearnStore, LearnStore};
use learnserver::llm::{ContentGenerator, ContentService, LlmContentGenerator, OpenAIClient};

#[cfg(feature = "postgres")]
async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn LearnStore>> {
    use learnserver::core::shared::utils::{create_conn, run_migrations};
    use learnserver::learn::PgLearnStore;

    let Some(url) = config.database.url.as_deref() else {
        warn!("No database URL configured, quizzes and results are kept in memory only");
        return Ok(Arc::new(InMemoryLearnStore::new()));
    };

    let pool = create_conn(url, config.database.max_connections)
        .context("Failed to create database pool")?;
    let migration_pool = pool.clone();
    tokio::task::spawn_blocking(move || run_migrations(&migration_pool))
        .await?
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    info!("Connected to database");

    Ok(Arc::new(PgLearnStore::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn LearnStore>> {
    if config.database.url.is_some() {
        warn!("Built without the postgres feature, ignoring database URL");
    }
    Ok(Arc::new(InMemoryLearnStore::new()))
}

fn content_generator(config: &AppConfig) -> Option<Arc<dyn ContentGenerator>> {
    if !config.llm_enabled() {
        return None;
    }
    let client = OpenAIClient::new(
        config.llm.api_key.clone(),
        config.llm.base_url.clone(),
        config.llm.model.clone(),
    );
    Some(Arc::new(LlmContentGenerator::new(Arc::new(client))))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .write_style(env_logger::WriteStyle::Always)
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    if config.uses_default_jwt_secret() {
        warn!("auth.jwt_secret is the built-in default, set LEARN_AUTH__JWT_SECRET before exposing this server");
    }

    let store = open_store(&config).await?;
    let content = ContentService::new(store.clone(), content_generator(&config));
    content.initialize().await;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    let state = Arc::new(AppState::new(config, store, content));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
