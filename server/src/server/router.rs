use axum::{Router, extract::State, routing::get};
use tower_http::cors::CorsLayer;

use super::websocket;
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/status", get(status_handler))
        .route("/api/settings", get(settings_handler))
        .route("/ws", get(websocket::ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler(State(state): State<SharedState>) -> axum::Json<serde_json::Value> {
    let session = state.session().read().await;
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "connected": session.is_connected(),
        "channels": session.joined_channels(),
        "lines": session.log_len(),
        "globalEmotes": session.catalog().global_token_count(),
    }))
}

async fn settings_handler(
    State(state): State<SharedState>,
) -> axum::Json<Vec<crate::config::SettingInfo>> {
    axum::Json(state.config().setting_infos())
}
