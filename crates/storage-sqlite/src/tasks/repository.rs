use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use teamline_core::tasks::{NewTask, Task, TaskFilters, TaskRepositoryTrait, TaskUpdate};
use teamline_core::Result;

use super::model::{NewTaskDB, TaskDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::tasks;

pub struct TaskRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl TaskRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        TaskRepository { pool, writer }
    }
}

#[async_trait]
impl TaskRepositoryTrait for TaskRepository {
    fn get_by_id(&self, task_id: &str) -> Result<Task> {
        let mut conn = get_connection(&self.pool)?;
        let task_db = tasks::table
            .find(task_id)
            .first::<TaskDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Task::from(task_db))
    }

    fn list(&self, workspace_id: &str, filters: &TaskFilters) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = tasks::table
            .filter(tasks::workspace_id.eq(workspace_id))
            .into_boxed();
        if let Some(status) = filters.status {
            query = query.filter(tasks::status.eq(status.as_str()));
        }
        if let Some(ref assigned_to) = filters.assigned_to {
            query = query.filter(tasks::assigned_to.eq(assigned_to.clone()));
        }
        if let Some(ref project_id) = filters.project_id {
            query = query.filter(tasks::project_id.eq(project_id.clone()));
        }
        let tasks_db = query
            .order(tasks::created_at.desc())
            .load::<TaskDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(tasks_db.into_iter().map(Task::from).collect())
    }

    async fn insert(&self, new_task: NewTask, created_by: &str) -> Result<Task> {
        let created_by = created_by.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Task> {
                let now = Utc::now().naive_utc();
                let new_task_db = NewTaskDB {
                    id: new_task.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    workspace_id: new_task.workspace_id,
                    title: new_task.title,
                    description: new_task.description,
                    project_id: new_task.project_id,
                    assigned_to: new_task.assigned_to,
                    status: new_task.status.as_str().to_string(),
                    priority: new_task.priority.as_str().to_string(),
                    due_date: new_task.due_date,
                    created_by,
                    created_at: now,
                    updated_at: now,
                };
                let result_db = diesel::insert_into(tasks::table)
                    .values(&new_task_db)
                    .returning(TaskDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Task::from(result_db))
            })
            .await
    }

    async fn update(&self, update: TaskUpdate) -> Result<Task> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Task> {
                let result_db = diesel::update(tasks::table.find(update.id.clone()))
                    .set((
                        tasks::title.eq(update.title.clone()),
                        tasks::description.eq(update.description.clone()),
                        tasks::project_id.eq(update.project_id.clone()),
                        tasks::assigned_to.eq(update.assigned_to.clone()),
                        tasks::status.eq(update.status.as_str()),
                        tasks::priority.eq(update.priority.as_str()),
                        tasks::due_date.eq(update.due_date),
                        tasks::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(TaskDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Task::from(result_db))
            })
            .await
    }

    async fn delete(&self, task_id: &str) -> Result<usize> {
        let task_id = task_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(tasks::table.find(task_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
