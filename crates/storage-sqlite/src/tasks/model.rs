//! Database models for tasks.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use teamline_core::tasks::{Task, TaskPriority, TaskStatus};

/// Database model for tasks
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
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TaskDB {
    pub id: String,
    pub workspace_id: String,
    pub title: String,
    pub description: Option<String>,
    pub project_id: Option<String>,
    pub assigned_to: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<NaiveDateTime>,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new task
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::tasks)]
#[serde(rename_all = "camelCase")]
pub struct NewTaskDB {
    pub id: String,
    pub workspace_id: String,
    pub title: String,
    pub description: Option<String>,
    pub project_id: Option<String>,
    pub assigned_to: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<NaiveDateTime>,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<TaskDB> for Task {
    fn from(db: TaskDB) -> Self {
        Self {
            id: db.id,
            workspace_id: db.workspace_id,
            title: db.title,
            description: db.description,
            project_id: db.project_id,
            assigned_to: db.assigned_to,
            status: TaskStatus::parse(&db.status).unwrap_or_default(),
            priority: TaskPriority::parse(&db.priority).unwrap_or_default(),
            due_date: db.due_date,
            created_by: db.created_by,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
