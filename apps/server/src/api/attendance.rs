use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::auth::WorkspaceContext;
use crate::error::{ApiJson, ApiResult};
use crate::main_lib::AppState;
use crate::models::ClockRequest;
use teamline_core::workspaces::{Action, Resource};

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RangeQuery {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    user_id: Option<String>,
}

async fn clock_in(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Json(body): Json<ClockRequest>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Attendance, Action::Create)?;
    let record = state
        .attendance_service
        .clock_in(ctx.workspace_id(), ctx.user_id(), body.note)
        .await?;
    Ok(ApiJson(record))
}

async fn clock_out(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Json(body): Json<ClockRequest>,
) -> ApiResult<impl IntoResponse> {
    let record = state
        .attendance_service
        .clock_out(ctx.workspace_id(), ctx.user_id(), body.note)
        .await?;
    Ok(ApiJson(record))
}

/// Own records by default; admins may pass `userId` to read someone else's.
async fn list_records(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Query(query): Query<RangeQuery>,
) -> ApiResult<impl IntoResponse> {
    let user_id = match query.user_id {
        Some(other) if other != ctx.user_id() => {
            ctx.authorize(Resource::Attendance, Action::Manage)?;
            other
        }
        _ => ctx.user_id().to_string(),
    };
    let records = state.attendance_service.list_records(
        ctx.workspace_id(),
        &user_id,
        query.from,
        query.to,
    )?;
    Ok(ApiJson(records))
}

async fn summary(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Query(query): Query<RangeQuery>,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Attendance, Action::Manage)?;
    let summary =
        state
            .attendance_service
            .summary(ctx.workspace_id(), query.from, query.to)?;
    Ok(ApiJson(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/attendance", get(list_records))
        .route("/attendance/clock-in", post(clock_in))
        .route("/attendance/clock-out", post(clock_out))
        .route("/attendance/summary", get(summary))
}
