//! Tests for document storage on a temporary filesystem root.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::documents_model::{Document, NewDocument};
use super::documents_service::DocumentService;
use super::documents_traits::{DocumentRepositoryTrait, DocumentServiceTrait};
use crate::errors::{Error, Result};
use crate::workspaces::Role;

#[derive(Default)]
struct FakeDocumentRepo {
    documents: Mutex<Vec<Document>>,
}

#[async_trait]
impl DocumentRepositoryTrait for FakeDocumentRepo {
    fn get_by_id(&self, document_id: &str) -> Result<Document> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == document_id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Document".to_string()))
    }

    fn list_for_workspace(&self, workspace_id: &str) -> Result<Vec<Document>> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, new_document: NewDocument) -> Result<Document> {
        let now = Utc::now().naive_utc();
        let document = Document {
            id: Uuid::new_v4().to_string(),
            workspace_id: new_document.workspace_id,
            name: new_document.name,
            original_name: new_document.original_name,
            mime_type: new_document.mime_type,
            size_bytes: new_document.size_bytes,
            storage_path: new_document.storage_path,
            project_id: new_document.project_id,
            uploaded_by: new_document.uploaded_by,
            created_at: now,
            updated_at: now,
        };
        self.documents.lock().unwrap().push(document.clone());
        Ok(document)
    }

    async fn delete(&self, document_id: &str) -> Result<usize> {
        let mut documents = self.documents.lock().unwrap();
        let before = documents.len();
        documents.retain(|d| d.id != document_id);
        Ok(before - documents.len())
    }
}

fn service(root: &std::path::Path) -> DocumentService {
    DocumentService::new(Arc::new(FakeDocumentRepo::default()), root.to_path_buf())
}

#[tokio::test]
async fn store_writes_file_under_workspace_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let svc = service(tmp.path());

    let document = svc
        .store_document("ws1", "report.pdf", "application/pdf", b"%PDF-", None, "user1")
        .await
        .unwrap();

    assert_eq!(document.original_name, "report.pdf");
    assert_eq!(document.size_bytes, 5);
    let path = svc.file_path(&document);
    assert!(path.starts_with(tmp.path().join("ws1")));
    assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-");
}

#[tokio::test]
async fn traversal_names_stay_inside_the_root() {
    let tmp = tempfile::tempdir().unwrap();
    let svc = service(tmp.path());

    let document = svc
        .store_document("ws1", "../../escape.txt", "text/plain", b"nope", None, "user1")
        .await
        .unwrap();

    let path = svc.file_path(&document);
    assert!(path.canonicalize().unwrap().starts_with(tmp.path().canonicalize().unwrap()));
    assert!(document.original_name.ends_with("escape.txt"));
}

#[tokio::test]
async fn empty_uploads_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let svc = service(tmp.path());
    let err = svc
        .store_document("ws1", "empty.bin", "application/octet-stream", b"", None, "user1")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn only_uploader_or_admin_deletes() {
    let tmp = tempfile::tempdir().unwrap();
    let svc = service(tmp.path());
    let document = svc
        .store_document("ws1", "notes.txt", "text/plain", b"hello", None, "user1")
        .await
        .unwrap();

    let err = svc
        .delete_document("ws1", &document.id, "someone-else", Role::Member)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let removed = svc
        .delete_document("ws1", &document.id, "user1", Role::Member)
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert!(!svc.file_path(&document).exists());
}
