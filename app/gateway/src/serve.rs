//! Shared gateway serve entrypoint, used by the binary and tests.

use crate::config::MemoryBackendKind;
use crate::{AppState, GatewayConfig, MemoryBackend, http};
use anyhow::Result;
use gemini::Gemini;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Handle returned by [`serve_with_config`], holds the bound port and
/// shutdown trigger.
pub struct ServeHandle {
    /// The port the gateway is listening on.
    pub port: u16,
    /// Send a value to trigger graceful shutdown.
    shutdown_tx: Option<oneshot::Sender<()>>,
    /// Join handle for the server task.
    join: Option<tokio::task::JoinHandle<Result<(), std::io::Error>>>,
}

impl ServeHandle {
    /// Trigger graceful shutdown and wait for the server to stop.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(join) = self.join.take() {
            join.await??;
        }
        Ok(())
    }
}

/// Load config from a file, build provider and memory backend, and
/// start serving.
pub async fn serve(config_path: &Path, bind: &str) -> Result<ServeHandle> {
    let config = GatewayConfig::load(config_path)?;
    tracing::info!("loaded configuration from {}", config_path.display());
    serve_with_config(&config, bind).await
}

/// Serve with an already-loaded config. Useful when the caller resolves
/// config separately (e.g. the binary's missing-file fallback).
pub async fn serve_with_config(config: &GatewayConfig, bind: &str) -> Result<ServeHandle> {
    let memory = build_memory(config)?;
    let provider = build_provider(config)?;
    let state = AppState {
        provider,
        memory: Arc::new(memory),
    };
    serve_router(http::router(state), bind).await
}

/// Bind the listener and spawn the server task for an already-built
/// router.
///
/// Binding port 0 picks a free port; the bound port is reported on the
/// returned handle.
pub async fn serve_router(app: axum::Router, bind: &str) -> Result<ServeHandle> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    let port = listener.local_addr()?.port();
    tracing::info!("gateway listening on {bind} (port {port})");

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("received shutdown signal");
            })
            .await
    });

    Ok(ServeHandle {
        port,
        shutdown_tx: Some(shutdown_tx),
        join: Some(join),
    })
}

/// Construct the memory backend from config.
fn build_memory(config: &GatewayConfig) -> Result<MemoryBackend> {
    match config.memory.backend {
        MemoryBackendKind::InMemory => {
            tracing::info!("using in-memory backend");
            Ok(MemoryBackend::in_memory())
        }
        MemoryBackendKind::Sqlite => {
            let path = config.memory.path.as_deref().unwrap_or("ffai.db");
            tracing::info!("using sqlite backend at {path}");
            MemoryBackend::sqlite(path)
        }
    }
}

/// Construct the Gemini provider from config.
fn build_provider(config: &GatewayConfig) -> Result<Gemini> {
    let provider = match config.llm.base_url.as_deref() {
        Some(base_url) => Gemini::custom(
            llm::Client::new(),
            &config.llm.api_key,
            &config.llm.model,
            base_url,
        )?,
        None => Gemini::new(llm::Client::new(), &config.llm.api_key, &config.llm.model)?,
    };
    tracing::info!("provider initialized for model {}", config.llm.model);
    Ok(provider)
}
