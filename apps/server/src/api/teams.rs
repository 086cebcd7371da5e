use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::WorkspaceContext;
use crate::error::{ApiJson, ApiResult};
use crate::main_lib::AppState;
use crate::models::TeamMemberRequest;
use teamline_core::teams::{NewTeam, TeamUpdate};
use teamline_core::workspaces::{Action, Resource};

async fn list_teams(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
) -> ApiResult<impl IntoResponse> {
    let teams = state.team_service.list_teams(ctx.workspace_id())?;
    Ok(ApiJson(teams))
}

async fn create_team(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Json(mut body): Json<NewTeam>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Team, Action::Create)?;
    body.workspace_id = ctx.workspace_id().to_string();
    let team = state.team_service.create_team(body).await?;
    Ok(ApiJson(team))
}

async fn get_team(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let team = state.team_service.get_team(ctx.workspace_id(), &id)?;
    Ok(ApiJson(team))
}

async fn update_team(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
    Json(mut body): Json<TeamUpdate>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Team, Action::Update)?;
    body.id = id;
    let team = state
        .team_service
        .update_team(ctx.workspace_id(), body)
        .await?;
    Ok(ApiJson(team))
}

async fn delete_team(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Team, Action::Delete)?;
    state.team_service.delete_team(ctx.workspace_id(), &id).await?;
    Ok(ApiJson(serde_json::json!({ "deleted": true })))
}

async fn list_team_members(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let members = state
        .team_service
        .list_team_members(ctx.workspace_id(), &id)?;
    Ok(ApiJson(members))
}

async fn add_team_member(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
    Json(body): Json<TeamMemberRequest>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Team, Action::Manage)?;
    let member = state
        .team_service
        .add_team_member(ctx.workspace_id(), &id, &body.user_id)
        .await?;
    Ok(ApiJson(member))
}

async fn remove_team_member(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
    Json(body): Json<TeamMemberRequest>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Team, Action::Manage)?;
    let removed = state
        .team_service
        .remove_team_member(ctx.workspace_id(), &id, &body.user_id)
        .await?;
    Ok(ApiJson(serde_json::json!({ "removed": removed })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/teams", get(list_teams).post(create_team))
        .route(
            "/teams/{id}",
            get(get_team).put(update_team).delete(delete_team),
        )
        .route(
            "/teams/{id}/members",
            get(list_team_members)
                .post(add_team_member)
                .delete(remove_team_member),
        )
}
