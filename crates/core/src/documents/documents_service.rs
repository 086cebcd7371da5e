use log::warn;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use super::documents_model::{sanitize_file_name, Document, NewDocument};
use super::documents_traits::{DocumentRepositoryTrait, DocumentServiceTrait};
use crate::constants::MAX_UPLOAD_BYTES;
use crate::errors::{Error, Result, ValidationError};
use crate::workspaces::Role;

/// Service for storing uploaded documents on the local filesystem.
pub struct DocumentService {
    repository: Arc<dyn DocumentRepositoryTrait>,
    uploads_root: PathBuf,
}

impl DocumentService {
    pub fn new(repository: Arc<dyn DocumentRepositoryTrait>, uploads_root: impl Into<PathBuf>) -> Self {
        Self {
            repository,
            uploads_root: uploads_root.into(),
        }
    }

    fn scoped(&self, workspace_id: &str, document_id: &str) -> Result<Document> {
        let document = self.repository.get_by_id(document_id)?;
        if document.workspace_id != workspace_id {
            return Err(Error::NotFound("Document".to_string()));
        }
        Ok(document)
    }
}

#[async_trait::async_trait]
impl DocumentServiceTrait for DocumentService {
    fn list_documents(&self, workspace_id: &str) -> Result<Vec<Document>> {
        self.repository.list_for_workspace(workspace_id)
    }

    fn get_document(&self, workspace_id: &str, document_id: &str) -> Result<Document> {
        self.scoped(workspace_id, document_id)
    }

    async fn store_document(
        &self,
        workspace_id: &str,
        original_name: &str,
        mime_type: &str,
        bytes: &[u8],
        project_id: Option<String>,
        uploaded_by: &str,
    ) -> Result<Document> {
        if bytes.is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Uploaded file is empty".to_string(),
            )));
        }
        if bytes.len() as u64 > MAX_UPLOAD_BYTES {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Uploaded file exceeds {} bytes",
                MAX_UPLOAD_BYTES
            ))));
        }

        let safe_name = sanitize_file_name(original_name);
        let stored_name = format!("{}_{}", Uuid::new_v4(), safe_name);
        let dir = self.uploads_root.join(workspace_id);
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(&stored_name);
        std::fs::write(&path, bytes)?;

        // Row insert after the file write; a failed insert orphans the file,
        // which a sweep can reclaim, never the other way around.
        let relative = Path::new(workspace_id).join(&stored_name);
        let document = self
            .repository
            .insert(NewDocument {
                workspace_id: workspace_id.to_string(),
                name: stored_name,
                original_name: safe_name,
                mime_type: mime_type.to_string(),
                size_bytes: bytes.len() as i64,
                storage_path: relative.to_string_lossy().to_string(),
                project_id,
                uploaded_by: uploaded_by.to_string(),
            })
            .await;
        if document.is_err() {
            let _ = std::fs::remove_file(&path);
        }
        document
    }

    fn file_path(&self, document: &Document) -> PathBuf {
        self.uploads_root.join(&document.storage_path)
    }

    async fn delete_document(
        &self,
        workspace_id: &str,
        document_id: &str,
        actor_id: &str,
        actor_role: Role,
    ) -> Result<usize> {
        let document = self.scoped(workspace_id, document_id)?;
        if !actor_role.is_admin() && document.uploaded_by != actor_id {
            return Err(Error::Forbidden(
                "Only admins or the uploader delete documents".to_string(),
            ));
        }
        let deleted = self.repository.delete(document_id).await?;
        // Row removal is authoritative; file removal is best-effort.
        if let Err(e) = std::fs::remove_file(self.file_path(&document)) {
            warn!("Removing stored file for document {document_id} failed: {e}");
        }
        Ok(deleted)
    }
}
