//! Overlay chat relay binary.
//!
//! Starts the chat relay and the axum web server, then waits for Ctrl+C.

use tracing_subscriber::EnvFilter;

use overlay_chat_lib::app::SharedState;
use overlay_chat_lib::{server, shutdown};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting overlay chat relay");

    let config = overlay_chat_lib::init_foundation();
    let state = SharedState::new(config);

    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(server_state).await {
            tracing::error!("Server failed: {e}");
        }
    });

    let s = state.clone();
    let relay_handle = tokio::spawn(async move { overlay_chat_lib::run_chat_relay(s).await });

    tracing::info!(
        port = state.server_port(),
        "Overlay chat relay running. Press Ctrl+C to stop."
    );

    tokio::signal::ctrl_c().await?;
    shutdown::graceful_shutdown(&state).await;

    let _ = relay_handle.await;
    let _ = server_handle.await;
    Ok(())
}
