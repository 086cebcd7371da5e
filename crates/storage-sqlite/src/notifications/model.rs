//! Database models for notifications.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use teamline_core::notifications::{Notification, NotificationKind};

/// Database model for notifications
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
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct NotificationDB {
    pub id: String,
    pub user_id: String,
    pub workspace_id: String,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub is_read: bool,
    pub requires_action: bool,
    pub invite_token: Option<String>,
    pub action_taken_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for inserting a notification
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::notifications)]
#[serde(rename_all = "camelCase")]
pub struct NewNotificationDB {
    pub id: String,
    pub user_id: String,
    pub workspace_id: String,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub is_read: bool,
    pub requires_action: bool,
    pub invite_token: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<NotificationDB> for Notification {
    fn from(db: NotificationDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            workspace_id: db.workspace_id,
            kind: NotificationKind::parse(&db.kind)
                .unwrap_or(NotificationKind::WorkspaceMemberJoined),
            title: db.title,
            body: db.body,
            is_read: db.is_read,
            requires_action: db.requires_action,
            invite_token: db.invite_token,
            action_taken_at: db.action_taken_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
