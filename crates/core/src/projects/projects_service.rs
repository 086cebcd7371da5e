use std::sync::Arc;

use super::projects_model::{NewProject, Project, ProjectUpdate};
use super::projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
use crate::errors::{Error, Result, ValidationError};

/// Service for managing projects.
pub struct ProjectService {
    repository: Arc<dyn ProjectRepositoryTrait>,
}

impl ProjectService {
    pub fn new(repository: Arc<dyn ProjectRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn scoped(&self, workspace_id: &str, project_id: &str) -> Result<Project> {
        let project = self.repository.get_by_id(project_id)?;
        if project.workspace_id != workspace_id {
            return Err(Error::NotFound("Project".to_string()));
        }
        Ok(project)
    }
}

#[async_trait::async_trait]
impl ProjectServiceTrait for ProjectService {
    fn get_project(&self, workspace_id: &str, project_id: &str) -> Result<Project> {
        self.scoped(workspace_id, project_id)
    }

    fn list_projects(&self, workspace_id: &str) -> Result<Vec<Project>> {
        self.repository.list_for_workspace(workspace_id)
    }

    async fn create_project(&self, new_project: NewProject, created_by: &str) -> Result<Project> {
        if new_project.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        self.repository.insert(new_project, created_by).await
    }

    async fn update_project(&self, workspace_id: &str, update: ProjectUpdate) -> Result<Project> {
        self.scoped(workspace_id, &update.id)?;
        self.repository.update(update).await
    }

    async fn delete_project(&self, workspace_id: &str, project_id: &str) -> Result<usize> {
        self.scoped(workspace_id, project_id)?;
        self.repository.delete(project_id).await
    }
}
