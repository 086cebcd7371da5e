use log::warn;
use std::sync::Arc;

use super::tasks_model::{NewTask, Task, TaskFilters, TaskUpdate};
use super::tasks_traits::{TaskRepositoryTrait, TaskServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::notifications::{NewNotification, NotificationKind, NotificationServiceTrait};
use crate::workspaces::Role;

/// Service for managing tasks.
pub struct TaskService {
    repository: Arc<dyn TaskRepositoryTrait>,
    notifications: Arc<dyn NotificationServiceTrait>,
}

impl TaskService {
    pub fn new(
        repository: Arc<dyn TaskRepositoryTrait>,
        notifications: Arc<dyn NotificationServiceTrait>,
    ) -> Self {
        Self {
            repository,
            notifications,
        }
    }

    fn scoped(&self, workspace_id: &str, task_id: &str) -> Result<Task> {
        let task = self.repository.get_by_id(task_id)?;
        if task.workspace_id != workspace_id {
            return Err(Error::NotFound("Task".to_string()));
        }
        Ok(task)
    }

    async fn notify_assignment(&self, task: &Task) {
        let Some(assignee) = task.assigned_to.as_deref() else {
            return;
        };
        if let Err(e) = self
            .notifications
            .notify(NewNotification {
                user_id: assignee.to_string(),
                workspace_id: task.workspace_id.clone(),
                kind: NotificationKind::TaskAssigned,
                title: "Task assigned".to_string(),
                body: format!("You were assigned: {}", task.title),
                requires_action: false,
                invite_token: None,
            })
            .await
        {
            warn!("TaskAssigned notification for {assignee} failed: {e}");
        }
    }
}

#[async_trait::async_trait]
impl TaskServiceTrait for TaskService {
    fn get_task(&self, workspace_id: &str, task_id: &str) -> Result<Task> {
        self.scoped(workspace_id, task_id)
    }

    fn list_tasks(&self, workspace_id: &str, filters: &TaskFilters) -> Result<Vec<Task>> {
        self.repository.list(workspace_id, filters)
    }

    async fn create_task(&self, new_task: NewTask, created_by: &str) -> Result<Task> {
        if new_task.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }
        let task = self.repository.insert(new_task, created_by).await?;
        self.notify_assignment(&task).await;
        Ok(task)
    }

    async fn update_task(&self, workspace_id: &str, update: TaskUpdate) -> Result<Task> {
        let existing = self.scoped(workspace_id, &update.id)?;
        let reassigned =
            update.assigned_to.is_some() && update.assigned_to != existing.assigned_to;
        let task = self.repository.update(update).await?;
        if reassigned {
            self.notify_assignment(&task).await;
        }
        Ok(task)
    }

    async fn delete_task(
        &self,
        workspace_id: &str,
        task_id: &str,
        actor_id: &str,
        actor_role: Role,
    ) -> Result<usize> {
        let task = self.scoped(workspace_id, task_id)?;
        if !actor_role.is_admin() && task.created_by != actor_id {
            return Err(Error::Forbidden(
                "Only admins or the task creator delete tasks".to_string(),
            ));
        }
        self.repository.delete(task_id).await
    }
}
