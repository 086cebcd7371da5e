use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};

use crate::auth::{CurrentUser, WorkspaceContext};
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::main_lib::AppState;
use crate::models::{AcceptInvitationRequest, InviteMemberRequest, MemberRoleRequest};
use teamline_core::workspaces::{role_allows, Action, NewWorkspace, Resource, WorkspaceUpdate};

async fn list_workspaces(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<impl IntoResponse> {
    let workspaces = state.workspace_service.list_workspaces_for_user(&user.id)?;
    Ok(ApiJson(workspaces))
}

async fn create_workspace(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<NewWorkspace>,
) -> ApiResult<impl IntoResponse> {
    let workspace = state
        .workspace_service
        .create_workspace(body, &user.id)
        .await?;
    Ok(ApiJson(workspace))
}

async fn get_workspace(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state
        .workspace_service
        .get_membership(&id, &user.id)
        .map_err(|_| ApiError::not_found("Workspace not found"))?;
    let workspace = state.workspace_service.get_workspace(&id)?;
    Ok(ApiJson(workspace))
}

async fn update_workspace(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(mut body): Json<WorkspaceUpdate>,
) -> ApiResult<impl IntoResponse> {
    let member = state
        .workspace_service
        .get_membership(&id, &user.id)
        .map_err(|_| ApiError::not_found("Workspace not found"))?;
    if !role_allows(member.role, Resource::Workspace, Action::Update) {
        return Err(ApiError::forbidden("Insufficient role for this operation"));
    }
    body.id = id;
    let workspace = state.workspace_service.update_workspace(body).await?;
    Ok(ApiJson(workspace))
}

async fn delete_workspace(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let member = state
        .workspace_service
        .get_membership(&id, &user.id)
        .map_err(|_| ApiError::not_found("Workspace not found"))?;
    if !role_allows(member.role, Resource::Workspace, Action::Delete) {
        return Err(ApiError::forbidden("Insufficient role for this operation"));
    }
    state.workspace_service.delete_workspace(&id).await?;
    Ok(ApiJson(serde_json::json!({ "deleted": true })))
}

async fn list_members(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Member, Action::Read)?;
    let members = state.workspace_service.list_members(ctx.workspace_id())?;
    Ok(ApiJson(members))
}

async fn change_member_role(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(member_id): Path<String>,
    Json(body): Json<MemberRoleRequest>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Member, Action::Manage)?;
    let member = state
        .workspace_service
        .change_member_role(ctx.workspace_id(), &member_id, body.role)
        .await?;
    Ok(ApiJson(member))
}

async fn remove_member(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(member_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    // Leaving the workspace is always allowed; removing someone else is an
    // admin-level action checked in the service together with Owner rules.
    let removed = state
        .workspace_service
        .remove_member(ctx.workspace_id(), &member_id, ctx.user_id(), ctx.role())
        .await?;
    Ok(ApiJson(serde_json::json!({ "removed": removed })))
}

async fn invite_member(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Json(body): Json<InviteMemberRequest>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Invitation, Action::Create)?;
    let invitation = state
        .workspace_service
        .invite_member(ctx.workspace_id(), &body.email, body.role, ctx.user_id())
        .await?;
    Ok(ApiJson(invitation))
}

async fn list_invitations(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Invitation, Action::Manage)?;
    let invitations = state
        .workspace_service
        .list_invitations(ctx.workspace_id())?;
    Ok(ApiJson(invitations))
}

async fn accept_invitation(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<AcceptInvitationRequest>,
) -> ApiResult<impl IntoResponse> {
    let member = state
        .workspace_service
        .accept_invitation(&body.token, &user.id)
        .await?;
    Ok(ApiJson(member))
}

async fn revoke_invitation(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(invitation_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Invitation, Action::Delete)?;
    state
        .workspace_service
        .revoke_invitation(ctx.workspace_id(), &invitation_id)
        .await?;
    Ok(ApiJson(serde_json::json!({ "revoked": true })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/workspaces", get(list_workspaces).post(create_workspace))
        .route(
            "/workspaces/{id}",
            get(get_workspace)
                .put(update_workspace)
                .delete(delete_workspace),
        )
        .route("/workspace/members", get(list_members))
        .route(
            "/workspace/members/{id}",
            put(change_member_role).delete(remove_member),
        )
        .route(
            "/workspace/invitations",
            get(list_invitations).post(invite_member),
        )
        .route("/workspace/invitations/accept", post(accept_invitation))
        .route("/workspace/invitations/{id}", delete(revoke_invitation))
}
