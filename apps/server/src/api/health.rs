use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde_json::json;

use crate::error::{ApiJson, ApiResult};
use crate::main_lib::AppState;

/// Liveness probe; also reports the database file in use.
async fn health(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    Ok(ApiJson(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "dbPath": state.db_path,
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
