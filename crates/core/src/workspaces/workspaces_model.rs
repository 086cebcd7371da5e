//! Workspace domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Role of a member within a workspace, gating permitted actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Role {
    Owner,
    Admin,
    #[default]
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "Owner",
            Role::Admin => "Admin",
            Role::Member => "Member",
        }
    }

    pub fn parse(s: &str) -> Result<Role> {
        match s {
            "Owner" => Ok(Role::Owner),
            "Admin" => Ok(Role::Admin),
            "Member" => Ok(Role::Member),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown role '{other}'"
            )))),
        }
    }

    /// Owners and Admins administer workspace content.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Owner | Role::Admin)
    }
}

/// Domain model representing a workspace (top-level tenant boundary).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new workspace
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkspace {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
}

/// Input model for updating a workspace
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceUpdate {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Membership of a user in a workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceMember {
    pub id: String,
    pub workspace_id: String,
    pub user_id: String,
    pub role: Role,
    pub joined_at: NaiveDateTime,
}

/// Input model for adding a member to a workspace
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkspaceMember {
    pub workspace_id: String,
    pub user_id: String,
    pub role: Role,
}

/// Membership joined with the member's user profile, for listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceMemberProfile {
    pub id: String,
    pub workspace_id: String,
    pub user_id: String,
    pub role: Role,
    pub joined_at: NaiveDateTime,
    pub name: String,
    pub email: String,
}

/// Lifecycle of a workspace invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
    Revoked,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "Pending",
            InvitationStatus::Accepted => "Accepted",
            InvitationStatus::Rejected => "Rejected",
            InvitationStatus::Revoked => "Revoked",
        }
    }

    pub fn parse(s: &str) -> Result<InvitationStatus> {
        match s {
            "Pending" => Ok(InvitationStatus::Pending),
            "Accepted" => Ok(InvitationStatus::Accepted),
            "Rejected" => Ok(InvitationStatus::Rejected),
            "Revoked" => Ok(InvitationStatus::Revoked),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown invitation status '{other}'"
            )))),
        }
    }
}

/// Invitation of an email address into a workspace.
///
/// The token is embedded in the invitee's notification; the accept handler
/// hands it back to the acceptance flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceInvitation {
    pub id: String,
    pub workspace_id: String,
    pub email: String,
    pub role: Role,
    pub token: String,
    pub invited_by: String,
    pub status: InvitationStatus,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a workspace invitation
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkspaceInvitation {
    pub workspace_id: String,
    pub email: String,
    pub role: Role,
    pub token: String,
    pub invited_by: String,
    pub expires_at: NaiveDateTime,
}
