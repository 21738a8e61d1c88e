//! Static file server
//!
//! Busted copies are created once at startup; the registry is then shared
//! read-only with every request handler.

use anyhow::{Context, Result};
use cachebust::{BustConfig, SharedRegistry};
use cachebust_web::{router, StaticFiles};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::commands::build_registry;

pub async fn run(config: BustConfig, port: u16) -> Result<()> {
    info!("cachebust server starting");
    info!("   Port: {}", port);
    info!("   Static root: {}", config.static_root.display());
    info!("   Storage: {}", config.storage);

    let registry = SharedRegistry::new(build_registry(&config)?);
    let shutdown = CancellationToken::new();

    // Ctrl+C during creation stops it between entries.
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            signal_token.cancel();
        }
    });

    let creating = registry.clone();
    let create_token = shutdown.clone();
    let created = tokio::task::spawn_blocking(move || creating.create_with_cancel(&create_token))
        .await
        .context("Creation task panicked")?;
    match created {
        Ok(()) => {}
        Err(e) if e.is_disabled() => info!("Cache busting disabled, serving originals"),
        Err(e) => return Err(e).context("Cache busting failed"),
    }

    for (original, busted) in registry.filename_pairs() {
        info!("   {} -> {}", original, busted);
    }

    let app = router(StaticFiles::from_config(registry, &config));
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}
