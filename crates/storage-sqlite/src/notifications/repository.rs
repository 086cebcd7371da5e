use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use teamline_core::notifications::{
    NewNotification, Notification, NotificationRepositoryTrait,
};
use teamline_core::Result;

use super::model::{NewNotificationDB, NotificationDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::notifications;

pub struct NotificationRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl NotificationRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        NotificationRepository { pool, writer }
    }
}

#[async_trait]
impl NotificationRepositoryTrait for NotificationRepository {
    fn get_by_id(&self, notification_id: &str) -> Result<Notification> {
        let mut conn = get_connection(&self.pool)?;
        let notification_db = notifications::table
            .find(notification_id)
            .first::<NotificationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Notification::from(notification_db))
    }

    fn list_for_user(
        &self,
        user_id: &str,
        workspace_id: Option<&str>,
    ) -> Result<Vec<Notification>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = notifications::table
            .filter(notifications::user_id.eq(user_id))
            .into_boxed();
        if let Some(workspace_id) = workspace_id {
            query = query.filter(notifications::workspace_id.eq(workspace_id.to_string()));
        }
        let notifications_db = query
            .order(notifications::created_at.desc())
            .load::<NotificationDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(notifications_db
            .into_iter()
            .map(Notification::from)
            .collect())
    }

    fn unread_count(&self, user_id: &str, workspace_id: Option<&str>) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = notifications::table
            .filter(notifications::user_id.eq(user_id))
            .filter(notifications::is_read.eq(false))
            .into_boxed();
        if let Some(workspace_id) = workspace_id {
            query = query.filter(notifications::workspace_id.eq(workspace_id.to_string()));
        }
        let count = query
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(count)
    }

    async fn insert(&self, new_notification: NewNotification) -> Result<Notification> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<Notification> {
                    let now = Utc::now().naive_utc();
                    let new_notification_db = NewNotificationDB {
                        id: Uuid::new_v4().to_string(),
                        user_id: new_notification.user_id,
                        workspace_id: new_notification.workspace_id,
                        kind: new_notification.kind.as_str().to_string(),
                        title: new_notification.title,
                        body: new_notification.body,
                        is_read: false,
                        requires_action: new_notification.requires_action,
                        invite_token: new_notification.invite_token,
                        created_at: now,
                        updated_at: now,
                    };
                    let result_db = diesel::insert_into(notifications::table)
                        .values(&new_notification_db)
                        .returning(NotificationDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Ok(Notification::from(result_db))
                },
            )
            .await
    }

    async fn mark_read(&self, notification_id: &str) -> Result<Notification> {
        let notification_id = notification_id.to_string();
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<Notification> {
                    let result_db = diesel::update(notifications::table.find(notification_id))
                        .set((
                            notifications::is_read.eq(true),
                            notifications::updated_at.eq(Utc::now().naive_utc()),
                        ))
                        .returning(NotificationDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Ok(Notification::from(result_db))
                },
            )
            .await
    }

    async fn mark_all_read(&self, user_id: &str, workspace_id: Option<&str>) -> Result<usize> {
        let user_id = user_id.to_string();
        let workspace_id = workspace_id.map(|w| w.to_string());
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let now = Utc::now().naive_utc();
                let affected = match workspace_id {
                    Some(workspace_id) => diesel::update(
                        notifications::table
                            .filter(notifications::user_id.eq(user_id))
                            .filter(notifications::workspace_id.eq(workspace_id))
                            .filter(notifications::is_read.eq(false)),
                    )
                    .set((
                        notifications::is_read.eq(true),
                        notifications::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?,
                    None => diesel::update(
                        notifications::table
                            .filter(notifications::user_id.eq(user_id))
                            .filter(notifications::is_read.eq(false)),
                    )
                    .set((
                        notifications::is_read.eq(true),
                        notifications::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?,
                };
                Ok(affected)
            })
            .await
    }

    async fn mark_actioned(&self, notification_id: &str) -> Result<Notification> {
        let notification_id = notification_id.to_string();
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<Notification> {
                    let now = Utc::now().naive_utc();
                    let result_db = diesel::update(notifications::table.find(notification_id))
                        .set((
                            notifications::is_read.eq(true),
                            notifications::action_taken_at.eq(Some(now)),
                            notifications::updated_at.eq(now),
                        ))
                        .returning(NotificationDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Ok(Notification::from(result_db))
                },
            )
            .await
    }
}
