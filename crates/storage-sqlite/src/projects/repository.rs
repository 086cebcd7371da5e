use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use teamline_core::projects::{
    NewProject, Project, ProjectRepositoryTrait, ProjectStatus, ProjectUpdate,
};
use teamline_core::Result;

use super::model::{NewProjectDB, ProjectDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::projects;

pub struct ProjectRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl ProjectRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        ProjectRepository { pool, writer }
    }
}

#[async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    fn get_by_id(&self, project_id: &str) -> Result<Project> {
        let mut conn = get_connection(&self.pool)?;
        let project_db = projects::table
            .find(project_id)
            .first::<ProjectDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Project::from(project_db))
    }

    fn list_for_workspace(&self, workspace_id: &str) -> Result<Vec<Project>> {
        let mut conn = get_connection(&self.pool)?;
        let projects_db = projects::table
            .filter(projects::workspace_id.eq(workspace_id))
            .order(projects::created_at.asc())
            .load::<ProjectDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(projects_db.into_iter().map(Project::from).collect())
    }

    async fn insert(&self, new_project: NewProject, created_by: &str) -> Result<Project> {
        let created_by = created_by.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Project> {
                let now = Utc::now().naive_utc();
                let new_project_db = NewProjectDB {
                    id: new_project
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    workspace_id: new_project.workspace_id,
                    name: new_project.name,
                    description: new_project.description,
                    status: ProjectStatus::Active.as_str().to_string(),
                    team_id: new_project.team_id,
                    created_by,
                    created_at: now,
                    updated_at: now,
                };
                let result_db = diesel::insert_into(projects::table)
                    .values(&new_project_db)
                    .returning(ProjectDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Project::from(result_db))
            })
            .await
    }

    async fn update(&self, update: ProjectUpdate) -> Result<Project> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Project> {
                let result_db = diesel::update(projects::table.find(update.id.clone()))
                    .set((
                        projects::name.eq(update.name.clone()),
                        projects::description.eq(update.description.clone()),
                        projects::status.eq(update.status.as_str()),
                        projects::team_id.eq(update.team_id.clone()),
                        projects::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(ProjectDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Project::from(result_db))
            })
            .await
    }

    async fn delete(&self, project_id: &str) -> Result<usize> {
        let project_id = project_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(projects::table.find(project_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
