use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::auth::WorkspaceContext;
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::main_lib::AppState;
use teamline_core::workspaces::{Action, Resource};

async fn list_documents(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
) -> ApiResult<impl IntoResponse> {
    let documents = state.document_service.list_documents(ctx.workspace_id())?;
    Ok(ApiJson(documents))
}

/// Multipart upload: a required `file` part plus an optional `projectId`
/// text part.
async fn upload_document(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    mut multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    ctx.authorize(Resource::Document, Action::Create)?;

    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut project_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .unwrap_or("upload")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Upload read failed: {e}")))?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            Some("projectId") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Malformed field: {e}")))?;
                if !value.is_empty() {
                    project_id = Some(value);
                }
            }
            _ => {}
        }
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| ApiError::bad_request("Missing file part"))?;
    let document = state
        .document_service
        .store_document(
            ctx.workspace_id(),
            &file_name,
            &content_type,
            &bytes,
            project_id,
            ctx.user_id(),
        )
        .await?;
    Ok(ApiJson(document))
}

async fn download_document(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let document = state
        .document_service
        .get_document(ctx.workspace_id(), &id)?;
    let path = state.document_service.file_path(&document);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| ApiError::not_found("Stored file is missing"))?;

    let headers = [
        (header::CONTENT_TYPE, document.mime_type.clone()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.original_name),
        ),
    ];
    Ok((headers, bytes))
}

async fn delete_document(
    State(state): State<Arc<AppState>>,
    ctx: WorkspaceContext,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    // The uploader may delete their own; admins may delete any. Checked in
    // the service.
    let removed = state
        .document_service
        .delete_document(ctx.workspace_id(), &id, ctx.user_id(), ctx.role())
        .await?;
    Ok(ApiJson(serde_json::json!({ "removed": removed })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/documents", get(list_documents).post(upload_document))
        .route("/documents/{id}", axum::routing::delete(delete_document))
        .route("/documents/{id}/download", get(download_document))
}
