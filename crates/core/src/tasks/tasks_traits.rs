use async_trait::async_trait;

use super::tasks_model::{NewTask, Task, TaskFilters, TaskUpdate};
use crate::errors::Result;
use crate::workspaces::Role;

/// Trait for task repository operations
#[async_trait]
pub trait TaskRepositoryTrait: Send + Sync {
    fn get_by_id(&self, task_id: &str) -> Result<Task>;
    fn list(&self, workspace_id: &str, filters: &TaskFilters) -> Result<Vec<Task>>;
    async fn insert(&self, new_task: NewTask, created_by: &str) -> Result<Task>;
    async fn update(&self, update: TaskUpdate) -> Result<Task>;
    async fn delete(&self, task_id: &str) -> Result<usize>;
}

/// Trait for task service operations
#[async_trait]
pub trait TaskServiceTrait: Send + Sync {
    fn get_task(&self, workspace_id: &str, task_id: &str) -> Result<Task>;
    fn list_tasks(&self, workspace_id: &str, filters: &TaskFilters) -> Result<Vec<Task>>;
    async fn create_task(&self, new_task: NewTask, created_by: &str) -> Result<Task>;
    async fn update_task(&self, workspace_id: &str, update: TaskUpdate) -> Result<Task>;
    async fn delete_task(
        &self,
        workspace_id: &str,
        task_id: &str,
        actor_id: &str,
        actor_role: Role,
    ) -> Result<usize>;
}
