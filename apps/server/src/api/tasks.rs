use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::WorkspaceContext;
use crate::error::{ApiJson, ApiResult};
use crate::main_lib::AppState;
use teamline_core::tasks::{NewTask, TaskFilters, TaskUpdate};
use teamline_core::workspaces::{Action, Resource};

async fn list_tasks(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Query(filters): Query<TaskFilters>,
) -> ApiResult<impl IntoResponse> {
    let tasks = state.task_service.list_tasks(ctx.workspace_id(), &filters)?;
    Ok(ApiJson(tasks))
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Json(mut body): Json<NewTask>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Task, Action::Create)?;
    body.workspace_id = ctx.workspace_id().to_string();
    let task = state.task_service.create_task(body, ctx.user_id()).await?;
    Ok(ApiJson(task))
}

async fn get_task(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let task = state.task_service.get_task(ctx.workspace_id(), &id)?;
    Ok(ApiJson(task))
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
    Json(mut body): Json<TaskUpdate>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Task, Action::Update)?;
    body.id = id;
    let task = state
        .task_service
        .update_task(ctx.workspace_id(), body)
        .await?;
    Ok(ApiJson(task))
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    // Creator deletion is allowed by the service; the table only answers
    // for the admin path.
    let removed = state
        .task_service
        .delete_task(ctx.workspace_id(), &id, ctx.user_id(), ctx.role())
        .await?;
    Ok(ApiJson(serde_json::json!({ "removed": removed })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}
