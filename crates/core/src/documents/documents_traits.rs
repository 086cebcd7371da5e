use async_trait::async_trait;
use std::path::PathBuf;

use super::documents_model::{Document, NewDocument};
use crate::errors::Result;
use crate::workspaces::Role;

/// Trait for document metadata repository operations
#[async_trait]
pub trait DocumentRepositoryTrait: Send + Sync {
    fn get_by_id(&self, document_id: &str) -> Result<Document>;
    fn list_for_workspace(&self, workspace_id: &str) -> Result<Vec<Document>>;
    async fn insert(&self, new_document: NewDocument) -> Result<Document>;
    async fn delete(&self, document_id: &str) -> Result<usize>;
}

/// Trait for document service operations
#[async_trait]
pub trait DocumentServiceTrait: Send + Sync {
    fn list_documents(&self, workspace_id: &str) -> Result<Vec<Document>>;
    fn get_document(&self, workspace_id: &str, document_id: &str) -> Result<Document>;
    /// Persists uploaded bytes and records the metadata row.
    async fn store_document(
        &self,
        workspace_id: &str,
        original_name: &str,
        mime_type: &str,
        bytes: &[u8],
        project_id: Option<String>,
        uploaded_by: &str,
    ) -> Result<Document>;
    /// Absolute path of the stored file, for streaming a download.
    fn file_path(&self, document: &Document) -> PathBuf;
    async fn delete_document(
        &self,
        workspace_id: &str,
        document_id: &str,
        actor_id: &str,
        actor_role: Role,
    ) -> Result<usize>;
}
