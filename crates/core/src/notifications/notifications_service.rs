use log::error;
use std::sync::Arc;

use super::notifications_model::{NewNotification, Notification, NotificationKind};
use super::notifications_traits::{NotificationRepositoryTrait, NotificationServiceTrait};
use crate::errors::{Error, Result, ValidationError};

/// Service for writing and reading notifications.
pub struct NotificationService {
    repository: Arc<dyn NotificationRepositoryTrait>,
}

impl NotificationService {
    pub fn new(repository: Arc<dyn NotificationRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn owned(&self, notification_id: &str, user_id: &str) -> Result<Notification> {
        let notification = self.repository.get_by_id(notification_id)?;
        if notification.user_id != user_id {
            return Err(Error::NotFound("Notification".to_string()));
        }
        Ok(notification)
    }
}

#[async_trait::async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn notify(&self, new_notification: NewNotification) -> Result<Notification> {
        self.repository.insert(new_notification).await
    }

    async fn notify_many(
        &self,
        recipients: &[String],
        workspace_id: &str,
        kind: NotificationKind,
        title: &str,
        body: &str,
    ) -> Result<usize> {
        // N independent inserts, no transactional grouping: partial failure
        // leaves some recipients notified and others not.
        let mut written = 0;
        for user_id in recipients {
            let result = self
                .repository
                .insert(NewNotification {
                    user_id: user_id.clone(),
                    workspace_id: workspace_id.to_string(),
                    kind,
                    title: title.to_string(),
                    body: body.to_string(),
                    requires_action: false,
                    invite_token: None,
                })
                .await;
            match result {
                Ok(_) => written += 1,
                Err(e) => error!("Notification insert for {user_id} failed: {e}"),
            }
        }
        Ok(written)
    }

    async fn notify_invitation(
        &self,
        user_id: &str,
        workspace_id: &str,
        workspace_name: &str,
        token: &str,
    ) -> Result<Notification> {
        self.repository
            .insert(NewNotification {
                user_id: user_id.to_string(),
                workspace_id: workspace_id.to_string(),
                kind: NotificationKind::WorkspaceInvitation,
                title: "Workspace invitation".to_string(),
                body: format!("You have been invited to join {workspace_name}"),
                requires_action: true,
                invite_token: Some(token.to_string()),
            })
            .await
    }

    fn list(&self, user_id: &str, workspace_id: Option<&str>) -> Result<Vec<Notification>> {
        self.repository.list_for_user(user_id, workspace_id)
    }

    fn unread_count(&self, user_id: &str, workspace_id: Option<&str>) -> Result<i64> {
        self.repository.unread_count(user_id, workspace_id)
    }

    async fn mark_read(&self, notification_id: &str, user_id: &str) -> Result<Notification> {
        self.owned(notification_id, user_id)?;
        self.repository.mark_read(notification_id).await
    }

    async fn mark_all_read(&self, user_id: &str, workspace_id: Option<&str>) -> Result<usize> {
        self.repository.mark_all_read(user_id, workspace_id).await
    }

    async fn take_invitation_token(
        &self,
        notification_id: &str,
        user_id: &str,
    ) -> Result<String> {
        let notification = self.owned(notification_id, user_id)?;
        if !notification.requires_action || notification.kind != NotificationKind::WorkspaceInvitation
        {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Notification is not an invitation".to_string(),
            )));
        }
        if notification.action_taken_at.is_some() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Invitation was already handled".to_string(),
            )));
        }
        let token = notification.invite_token.clone().ok_or_else(|| {
            Error::Unexpected("Invitation notification lost its token".to_string())
        })?;
        self.repository.mark_actioned(notification_id).await?;
        Ok(token)
    }
}
