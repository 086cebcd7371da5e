use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::WorkspaceContext;
use crate::error::{ApiJson, ApiResult};
use crate::main_lib::AppState;
use teamline_core::projects::{NewProject, ProjectUpdate};
use teamline_core::workspaces::{Action, Resource};

async fn list_projects(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
) -> ApiResult<impl IntoResponse> {
    let projects = state.project_service.list_projects(ctx.workspace_id())?;
    Ok(ApiJson(projects))
}

async fn create_project(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Json(mut body): Json<NewProject>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Project, Action::Create)?;
    body.workspace_id = ctx.workspace_id().to_string();
    let project = state
        .project_service
        .create_project(body, ctx.user_id())
        .await?;
    Ok(ApiJson(project))
}

async fn get_project(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let project = state.project_service.get_project(ctx.workspace_id(), &id)?;
    Ok(ApiJson(project))
}

async fn update_project(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
    Json(mut body): Json<ProjectUpdate>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Project, Action::Update)?;
    body.id = id;
    let project = state
        .project_service
        .update_project(ctx.workspace_id(), body)
        .await?;
    Ok(ApiJson(project))
}

async fn delete_project(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Project, Action::Delete)?;
    state
        .project_service
        .delete_project(ctx.workspace_id(), &id)
        .await?;
    Ok(ApiJson(serde_json::json!({ "deleted": true })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
}
