use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use teamline_core::documents::{Document, DocumentRepositoryTrait, NewDocument};
use teamline_core::Result;

use super::model::{DocumentDB, NewDocumentDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::documents;

pub struct DocumentRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl DocumentRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        DocumentRepository { pool, writer }
    }
}

#[async_trait]
impl DocumentRepositoryTrait for DocumentRepository {
    fn get_by_id(&self, document_id: &str) -> Result<Document> {
        let mut conn = get_connection(&self.pool)?;
        let document_db = documents::table
            .find(document_id)
            .first::<DocumentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Document::from(document_db))
    }

    fn list_for_workspace(&self, workspace_id: &str) -> Result<Vec<Document>> {
        let mut conn = get_connection(&self.pool)?;
        let documents_db = documents::table
            .filter(documents::workspace_id.eq(workspace_id))
            .order(documents::created_at.desc())
            .load::<DocumentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(documents_db.into_iter().map(Document::from).collect())
    }

    async fn insert(&self, new_document: NewDocument) -> Result<Document> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Document> {
                let now = Utc::now().naive_utc();
                let new_document_db = NewDocumentDB {
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
                let result_db = diesel::insert_into(documents::table)
                    .values(&new_document_db)
                    .returning(DocumentDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Document::from(result_db))
            })
            .await
    }

    async fn delete(&self, document_id: &str) -> Result<usize> {
        let document_id = document_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(documents::table.find(document_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
