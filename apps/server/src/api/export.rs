use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;

use crate::auth::WorkspaceContext;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use teamline_core::workspaces::{Action, Resource};

/// Streams a per-user activity report as an attachment. Everyone may export
/// their own report; exporting someone else's is an admin action.
async fn export_user_report(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(user_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    if user_id != ctx.user_id() {
        ctx.authorize(Resource::Report, Action::Create)?;
    }
    let report = state
        .report_service
        .user_report(ctx.workspace_id(), &user_id)
        .await?;

    let headers = [
        (header::CONTENT_TYPE, report.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", report.file_name),
        ),
    ];
    Ok((headers, report.bytes))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/export/user/{userId}", post(export_user_report))
}
