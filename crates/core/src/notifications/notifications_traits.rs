use async_trait::async_trait;

use super::notifications_model::{NewNotification, Notification, NotificationKind};
use crate::errors::Result;

/// Trait for notification repository operations
#[async_trait]
pub trait NotificationRepositoryTrait: Send + Sync {
    fn get_by_id(&self, notification_id: &str) -> Result<Notification>;
    fn list_for_user(
        &self,
        user_id: &str,
        workspace_id: Option<&str>,
    ) -> Result<Vec<Notification>>;
    fn unread_count(&self, user_id: &str, workspace_id: Option<&str>) -> Result<i64>;
    async fn insert(&self, new_notification: NewNotification) -> Result<Notification>;
    async fn mark_read(&self, notification_id: &str) -> Result<Notification>;
    async fn mark_all_read(&self, user_id: &str, workspace_id: Option<&str>) -> Result<usize>;
    /// Marks an actionable notification as read and actioned.
    async fn mark_actioned(&self, notification_id: &str) -> Result<Notification>;
}

/// Trait for notification service operations
#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    async fn notify(&self, new_notification: NewNotification) -> Result<Notification>;
    /// Writes one notification per recipient. Inserts are independent:
    /// a failed recipient is logged and skipped, the rest still get theirs.
    /// Returns how many were written.
    async fn notify_many(
        &self,
        recipients: &[String],
        workspace_id: &str,
        kind: NotificationKind,
        title: &str,
        body: &str,
    ) -> Result<usize>;
    /// Actionable workspace-invitation notification carrying the invite token.
    async fn notify_invitation(
        &self,
        user_id: &str,
        workspace_id: &str,
        workspace_name: &str,
        token: &str,
    ) -> Result<Notification>;

    /// A user's notifications, newest first, optionally scoped to one
    /// workspace. Invitation notifications are visible before the user is a
    /// member of the inviting workspace.
    fn list(&self, user_id: &str, workspace_id: Option<&str>) -> Result<Vec<Notification>>;
    fn unread_count(&self, user_id: &str, workspace_id: Option<&str>) -> Result<i64>;
    async fn mark_read(&self, notification_id: &str, user_id: &str) -> Result<Notification>;
    async fn mark_all_read(&self, user_id: &str, workspace_id: Option<&str>) -> Result<usize>;

    /// Marks an invitation notification actioned and returns the embedded
    /// token for the invite-acceptance flow.
    async fn take_invitation_token(&self, notification_id: &str, user_id: &str) -> Result<String>;
}
