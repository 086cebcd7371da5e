//! Database models for workspaces, members, and invitations.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use teamline_core::workspaces::{
    InvitationStatus, Role, Workspace, WorkspaceInvitation, WorkspaceMember,
};

/// Database model for workspaces
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
#[diesel(table_name = crate::schema::workspaces)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceDB {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new workspace
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::workspaces)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkspaceDB {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for workspace members
#[derive(
    Queryable, Identifiable, Selectable, Associations, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(belongs_to(WorkspaceDB, foreign_key = workspace_id))]
#[diesel(table_name = crate::schema::workspace_members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceMemberDB {
    pub id: String,
    pub workspace_id: String,
    pub user_id: String,
    pub role: String,
    pub joined_at: NaiveDateTime,
}

/// Database model for adding a workspace member
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::workspace_members)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkspaceMemberDB {
    pub id: String,
    pub workspace_id: String,
    pub user_id: String,
    pub role: String,
    pub joined_at: NaiveDateTime,
}

/// Database model for workspace invitations
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
#[diesel(table_name = crate::schema::workspace_invitations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceInvitationDB {
    pub id: String,
    pub workspace_id: String,
    pub email: String,
    pub role: String,
    pub token: String,
    pub invited_by: String,
    pub status: String,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a workspace invitation
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::workspace_invitations)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkspaceInvitationDB {
    pub id: String,
    pub workspace_id: String,
    pub email: String,
    pub role: String,
    pub token: String,
    pub invited_by: String,
    pub status: String,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to domain models. Role/status strings are written exclusively
// by this crate, so a lenient parse with the enum default is enough.

impl From<WorkspaceDB> for Workspace {
    fn from(db: WorkspaceDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            description: db.description,
            created_by: db.created_by,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<WorkspaceMemberDB> for WorkspaceMember {
    fn from(db: WorkspaceMemberDB) -> Self {
        Self {
            id: db.id,
            workspace_id: db.workspace_id,
            user_id: db.user_id,
            role: Role::parse(&db.role).unwrap_or_default(),
            joined_at: db.joined_at,
        }
    }
}

impl From<WorkspaceInvitationDB> for WorkspaceInvitation {
    fn from(db: WorkspaceInvitationDB) -> Self {
        Self {
            id: db.id,
            workspace_id: db.workspace_id,
            email: db.email,
            role: Role::parse(&db.role).unwrap_or_default(),
            token: db.token,
            invited_by: db.invited_by,
            status: InvitationStatus::parse(&db.status).unwrap_or(InvitationStatus::Revoked),
            expires_at: db.expires_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
