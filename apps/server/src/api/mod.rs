//! API surface: one router per domain, merged under `/api`.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

mod attendance;
mod auth;
mod documents;
mod export;
mod health;
mod notifications;
mod projects;
mod targets;
mod tasks;
mod teams;
mod workspaces;

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(auth::router())
        .merge(workspaces::router())
        .merge(teams::router())
        .merge(projects::router())
        .merge(tasks::router())
        .merge(targets::router())
        .merge(documents::router())
        .merge(notifications::router())
        .merge(attendance::router())
        .merge(export::router())
        .merge(health::router());

    Router::new()
        .nest("/api", api)
        // Uploads are capped in the document service; the transport limit
        // just needs to sit above it.
        .layer(DefaultBodyLimit::max(
            teamline_core::constants::MAX_UPLOAD_BYTES as usize + 1024 * 1024,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
