//! Notification domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// The events that produce notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    TaskAssigned,
    TeamMemberAdded,
    WorkspaceMemberJoined,
    AddedToTeam,
    WorkspaceInvitation,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::TaskAssigned => "taskAssigned",
            NotificationKind::TeamMemberAdded => "teamMemberAdded",
            NotificationKind::WorkspaceMemberJoined => "workspaceMemberJoined",
            NotificationKind::AddedToTeam => "addedToTeam",
            NotificationKind::WorkspaceInvitation => "workspaceInvitation",
        }
    }

    pub fn parse(s: &str) -> Result<NotificationKind> {
        match s {
            "taskAssigned" => Ok(NotificationKind::TaskAssigned),
            "teamMemberAdded" => Ok(NotificationKind::TeamMemberAdded),
            "workspaceMemberJoined" => Ok(NotificationKind::WorkspaceMemberJoined),
            "addedToTeam" => Ok(NotificationKind::AddedToTeam),
            "workspaceInvitation" => Ok(NotificationKind::WorkspaceInvitation),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown notification kind '{other}'"
            )))),
        }
    }
}

/// A per-user, per-workspace event record. Invitation notifications are
/// actionable: they carry the invite token until accepted or rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub workspace_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub is_read: bool,
    pub requires_action: bool,
    pub invite_token: Option<String>,
    pub action_taken_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for inserting a notification
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub user_id: String,
    pub workspace_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub requires_action: bool,
    pub invite_token: Option<String>,
}
