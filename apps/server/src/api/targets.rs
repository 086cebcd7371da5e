use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::auth::WorkspaceContext;
use crate::error::{ApiJson, ApiResult};
use crate::main_lib::AppState;
use crate::models::TargetProgressRequest;
use teamline_core::targets::{NewTarget, TargetUpdate};
use teamline_core::workspaces::{Action, Resource};

async fn list_targets(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
) -> ApiResult<impl IntoResponse> {
    let targets = state.target_service.list_targets(ctx.workspace_id()).await?;
    Ok(ApiJson(targets))
}

async fn create_target(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Json(mut body): Json<NewTarget>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Target, Action::Create)?;
    body.workspace_id = ctx.workspace_id().to_string();
    let target = state
        .target_service
        .create_target(body, ctx.user_id())
        .await?;
    Ok(ApiJson(target))
}

async fn get_target(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let target = state
        .target_service
        .get_target(ctx.workspace_id(), &id)
        .await?;
    Ok(ApiJson(target))
}

async fn update_target(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
    Json(mut body): Json<TargetUpdate>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Target, Action::Update)?;
    body.id = id;
    let target = state
        .target_service
        .update_target(ctx.workspace_id(), body)
        .await?;
    Ok(ApiJson(target))
}

async fn delete_target(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Target, Action::Delete)?;
    let removed = state
        .target_service
        .delete_target(ctx.workspace_id(), &id)
        .await?;
    Ok(ApiJson(serde_json::json!({ "removed": removed })))
}

async fn list_targets_for_user(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(user_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let targets = state
        .target_service
        .list_targets_for_user(ctx.workspace_id(), &user_id)
        .await?;
    Ok(ApiJson(targets))
}

/// The assignee-facing progress write: the only target mutation a plain
/// Member may perform, and only on their own target.
async fn update_target_progress(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
    Json(body): Json<TargetProgressRequest>,
) -> ApiResult<impl IntoResponse> {
    let target = state
        .target_service
        .update_progress(
            ctx.workspace_id(),
            &id,
            body.current_value,
            ctx.user_id(),
            ctx.role(),
        )
        .await?;
    Ok(ApiJson(target))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/targets", get(list_targets).post(create_target))
        .route(
            "/targets/{id}",
            get(get_target).put(update_target).delete(delete_target),
        )
        .route("/targets/{id}/progress", put(update_target_progress))
        .route("/targets/user/{userId}", get(list_targets_for_user))
}
