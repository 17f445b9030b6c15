//! loanbot-server: chatbot REST server.
//!
//! Configuration is read from the environment (and an optional `.env`);
//! see [`loanbot_server::config`].

use std::sync::Arc;

use anyhow::Context;
use loanbot_core::{FaqMatcher, KnowledgeBase, MatcherConfig};
use loanbot_server::config::ServerConfig;
use loanbot_server::router::build_router;
use loanbot_server::state::AppState;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before the subscriber, so RUST_LOG may come from .env
    let dotenv_path = dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,loanbot_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = ServerConfig::from_env().context("invalid server configuration")?;

    // The server must not start without a usable knowledge base
    let knowledge_base = KnowledgeBase::load(&config.knowledge_base_path).with_context(|| {
        format!(
            "failed to load knowledge base from {}",
            config.knowledge_base_path.display()
        )
    })?;

    if knowledge_base.is_empty() {
        tracing::warn!(
            "Knowledge base {} has no entries; every chat request will get the fallback reply",
            config.knowledge_base_path.display()
        );
    } else {
        tracing::info!(
            "Loaded knowledge base from {} ({})",
            config.knowledge_base_path.display(),
            knowledge_base.stats()
        );
    }

    let matcher = FaqMatcher::with_config(
        Arc::new(knowledge_base),
        MatcherConfig {
            threshold: config.match_threshold,
            ..MatcherConfig::default()
        },
    );
    let app = build_router(AppState::new(matcher));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    tracing::info!("loanbot-server listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("loanbot-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
