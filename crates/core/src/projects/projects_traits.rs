use async_trait::async_trait;

use super::projects_model::{NewProject, Project, ProjectUpdate};
use crate::errors::Result;

/// Trait for project repository operations
#[async_trait]
pub trait ProjectRepositoryTrait: Send + Sync {
    fn get_by_id(&self, project_id: &str) -> Result<Project>;
    fn list_for_workspace(&self, workspace_id: &str) -> Result<Vec<Project>>;
    async fn insert(&self, new_project: NewProject, created_by: &str) -> Result<Project>;
    async fn update(&self, update: ProjectUpdate) -> Result<Project>;
    async fn delete(&self, project_id: &str) -> Result<usize>;
}

/// Trait for project service operations
#[async_trait]
pub trait ProjectServiceTrait: Send + Sync {
    fn get_project(&self, workspace_id: &str, project_id: &str) -> Result<Project>;
    fn list_projects(&self, workspace_id: &str) -> Result<Vec<Project>>;
    async fn create_project(&self, new_project: NewProject, created_by: &str) -> Result<Project>;
    async fn update_project(&self, workspace_id: &str, update: ProjectUpdate) -> Result<Project>;
    async fn delete_project(&self, workspace_id: &str, project_id: &str) -> Result<usize>;
}
