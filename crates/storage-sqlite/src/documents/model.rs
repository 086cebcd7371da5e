//! Database models for documents.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use teamline_core::documents::Document;

/// Database model for document metadata
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct DocumentDB {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub storage_path: String,
    pub project_id: Option<String>,
    pub uploaded_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for inserting document metadata
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::documents)]
#[serde(rename_all = "camelCase")]
pub struct NewDocumentDB {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub storage_path: String,
    pub project_id: Option<String>,
    pub uploaded_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<DocumentDB> for Document {
    fn from(db: DocumentDB) -> Self {
        Self {
            id: db.id,
            workspace_id: db.workspace_id,
            name: db.name,
            original_name: db.original_name,
            mime_type: db.mime_type,
            size_bytes: db.size_bytes,
            storage_path: db.storage_path,
            project_id: db.project_id,
            uploaded_by: db.uploaded_by,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
