//! API server for the task gateway
//!
//! Serves `/upload`, `/task` and `/tasks` over HTTP. Backing resources are
//! provisioned in the background at startup; task routes answer 503 until
//! provisioning has finished.

mod config;
mod error;
mod payload;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;

use anyhow::Context;
use tg_core::TaskGateway;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Backend, Config};
use crate::state::AppState;

/// Provision backing resources, then open the task routes
fn spawn_initializer(state: AppState) {
    tokio::spawn(async move {
        let provisioned = state.gateway().initialize().await;
        if provisioned.is_complete() {
            tracing::info!("All cloud resources ready");
        } else {
            tracing::warn!(?provisioned, "Some cloud resources failed to provision");
        }
        state.mark_ready(provisioned);
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api_server=debug,tg_core=info,aws_backend=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let gateway = match &config.backend {
        Backend::Aws(settings) => {
            tracing::info!(
                bucket = %settings.bucket,
                table = %settings.table,
                queue = %settings.queue,
                topic = %settings.topic,
                "Using AWS backend"
            );
            aws_backend::connect(settings).await
        }
        Backend::Local(data_dir) => {
            tracing::info!("Using local backend in {:?}", data_dir);
            TaskGateway::local(data_dir)
                .await
                .context("Failed to open local data directory")?
        }
    };

    let state = AppState::new(gateway);
    spawn_initializer(state.clone());

    let app = routes::app(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Bind to 0.0.0.0 for localhost/127.0.0.1 compatibility
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Task gateway listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
