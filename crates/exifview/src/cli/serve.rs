//! The `exifview serve` command.

use anyhow::Context;
use clap::Args;
use exifview_core::Config;
use std::path::PathBuf;

use crate::server;

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides `server.bind`)
    #[arg(short, long, env = "EXIFVIEW_BIND")]
    pub bind: Option<String>,

    /// Working directory for uploads (overrides `storage.dir`)
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,
}

/// Execute the serve command.
pub async fn execute(args: ServeArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(dir) = args.storage_dir {
        config.storage.dir = dir;
    }
    config.validate()?;

    let storage_dir = config.storage_dir();
    std::fs::create_dir_all(&storage_dir).with_context(|| {
        format!("Failed to create storage directory: {}", storage_dir.display())
    })?;

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;
    tracing::info!(
        "Listening on http://{} (uploads in {})",
        listener.local_addr()?,
        storage_dir.display()
    );

    let app = server::create_router(server::AppContext::new(config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
