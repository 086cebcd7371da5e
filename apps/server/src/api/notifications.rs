use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::Router;

use crate::auth::CurrentUser;
use crate::error::{ApiJson, ApiResult};
use crate::main_lib::AppState;

// Notifications are per-user, not per-membership: an invitation notification
// lives in a workspace the user has not joined yet, so these routes only
// require a session. The workspace header, when present, narrows the listing.
fn workspace_filter(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-workspace-id")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

async fn list_notifications(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let workspace_id = workspace_filter(&headers);
    let notifications = state
        .notification_service
        .list(&user.id, workspace_id.as_deref())?;
    Ok(ApiJson(notifications))
}

async fn unread_count(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let workspace_id = workspace_filter(&headers);
    let count = state
        .notification_service
        .unread_count(&user.id, workspace_id.as_deref())?;
    Ok(ApiJson(serde_json::json!({ "unread": count })))
}

async fn mark_read(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let notification = state.notification_service.mark_read(&id, &user.id).await?;
    Ok(ApiJson(notification))
}

async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let workspace_id = workspace_filter(&headers);
    let updated = state
        .notification_service
        .mark_all_read(&user.id, workspace_id.as_deref())
        .await?;
    Ok(ApiJson(serde_json::json!({ "updated": updated })))
}

/// Accepting an invitation notification: mark it actioned, then hand the
/// embedded token to the invite-acceptance flow.
async fn accept_invitation(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let token = state
        .notification_service
        .take_invitation_token(&id, &user.id)
        .await?;
    let member = state
        .workspace_service
        .accept_invitation(&token, &user.id)
        .await?;
    Ok(ApiJson(member))
}

async fn reject_invitation(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let token = state
        .notification_service
        .take_invitation_token(&id, &user.id)
        .await?;
    state.workspace_service.reject_invitation(&token).await?;
    Ok(ApiJson(serde_json::json!({ "rejected": true })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/unread-count", get(unread_count))
        .route("/notifications/read-all", put(mark_all_read))
        .route("/notifications/{id}/read", put(mark_read))
        .route("/notifications/{id}/accept", post(accept_invitation))
        .route("/notifications/{id}/reject", post(reject_invitation))
}
