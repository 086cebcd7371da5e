//! Database models for targets.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use teamline_core::targets::{Target, TargetStatus};

/// Database model for targets
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
#[diesel(table_name = crate::schema::targets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TargetDB {
    pub id: String,
    pub workspace_id: String,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: String,
    pub project_id: Option<String>,
    pub created_by: String,
    pub target_value: f64,
    pub current_value: f64,
    pub unit: String,
    pub deadline: NaiveDateTime,
    pub status: String,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new target
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::targets)]
#[serde(rename_all = "camelCase")]
pub struct NewTargetDB {
    pub id: String,
    pub workspace_id: String,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: String,
    pub project_id: Option<String>,
    pub created_by: String,
    pub target_value: f64,
    pub current_value: f64,
    pub unit: String,
    pub deadline: NaiveDateTime,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<TargetDB> for Target {
    fn from(db: TargetDB) -> Self {
        Self {
            id: db.id,
            workspace_id: db.workspace_id,
            title: db.title,
            description: db.description,
            assigned_to: db.assigned_to,
            project_id: db.project_id,
            created_by: db.created_by,
            target_value: db.target_value,
            current_value: db.current_value,
            unit: db.unit,
            deadline: db.deadline,
            status: TargetStatus::parse(&db.status).unwrap_or_default(),
            completed_at: db.completed_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
