mod core;
mod session;
mod watch;

use tokio::sync::{broadcast, mpsc};

use crate::core::{AppCore, AppEvent, BroadcastMessage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = video_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("v1deo.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress
    // connection-level DEBUG from HTTP client internals.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("v1deo log: {}", log_path.display());

    tracing::info!("v1deo starting…");

    let config = match video_core::config::Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("failed to load config, falling back to defaults: {e:#}");
            video_core::config::Config::default()
        }
    };

    // ── AppEvent channel (UI / playback runtime → AppCore) ──────────────────
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(1024);

    // ── Broadcast channel (AppCore → UI / playback runtime) ─────────────────
    let (broadcast_tx, _broadcast_rx) = broadcast::channel::<BroadcastMessage>(1024);

    let app_core = AppCore::new(config, broadcast_tx, event_tx.clone());

    // ── Ctrl-C → clean shutdown ─────────────────────────────────────────────
    let shutdown_tx = event_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(AppEvent::Shutdown).await;
        }
    });

    app_core.run(event_rx).await?;

    tracing::info!("v1deo exiting");
    Ok(())
}
