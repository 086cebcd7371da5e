use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use teamline_core::targets::{
    NewTarget, Target, TargetRepositoryTrait, TargetStatus, TargetUpdate,
};
use teamline_core::Result;

use super::model::{NewTargetDB, TargetDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::targets;

pub struct TargetRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl TargetRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        TargetRepository { pool, writer }
    }
}

#[async_trait]
impl TargetRepositoryTrait for TargetRepository {
    fn get_by_id(&self, target_id: &str) -> Result<Target> {
        let mut conn = get_connection(&self.pool)?;
        let target_db = targets::table
            .find(target_id)
            .first::<TargetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Target::from(target_db))
    }

    fn list_for_workspace(&self, workspace_id: &str) -> Result<Vec<Target>> {
        let mut conn = get_connection(&self.pool)?;
        let targets_db = targets::table
            .filter(targets::workspace_id.eq(workspace_id))
            .order(targets::deadline.asc())
            .load::<TargetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(targets_db.into_iter().map(Target::from).collect())
    }

    fn list_for_user(&self, workspace_id: &str, user_id: &str) -> Result<Vec<Target>> {
        let mut conn = get_connection(&self.pool)?;
        let targets_db = targets::table
            .filter(targets::workspace_id.eq(workspace_id))
            .filter(targets::assigned_to.eq(user_id))
            .order(targets::deadline.asc())
            .load::<TargetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(targets_db.into_iter().map(Target::from).collect())
    }

    async fn insert(&self, new_target: NewTarget, created_by: &str) -> Result<Target> {
        let created_by = created_by.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Target> {
                let now = Utc::now().naive_utc();
                let new_target_db = NewTargetDB {
                    id: new_target.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    workspace_id: new_target.workspace_id,
                    title: new_target.title,
                    description: new_target.description,
                    assigned_to: new_target.assigned_to,
                    project_id: new_target.project_id,
                    created_by,
                    target_value: new_target.target_value,
                    current_value: new_target.current_value,
                    unit: new_target.unit,
                    deadline: new_target.deadline,
                    status: TargetStatus::Active.as_str().to_string(),
                    created_at: now,
                    updated_at: now,
                };
                let result_db = diesel::insert_into(targets::table)
                    .values(&new_target_db)
                    .returning(TargetDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Target::from(result_db))
            })
            .await
    }

    async fn update(&self, update: TargetUpdate) -> Result<Target> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Target> {
                diesel::update(targets::table.find(update.id.clone()))
                    .set((
                        targets::title.eq(update.title.clone()),
                        targets::description.eq(update.description.clone()),
                        targets::assigned_to.eq(update.assigned_to.clone()),
                        targets::project_id.eq(update.project_id.clone()),
                        targets::target_value.eq(update.target_value),
                        targets::current_value.eq(update.current_value),
                        targets::unit.eq(update.unit.clone()),
                        targets::deadline.eq(update.deadline),
                        targets::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                // A manual status override (cancellation, mostly) rides along
                // as a second write inside the same transaction.
                if let Some(status) = update.status {
                    diesel::update(targets::table.find(update.id.clone()))
                        .set(targets::status.eq(status.as_str()))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                let result_db = targets::table
                    .find(update.id)
                    .first::<TargetDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Target::from(result_db))
            })
            .await
    }

    async fn set_current_value(&self, target_id: &str, current_value: f64) -> Result<Target> {
        let target_id = target_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Target> {
                let result_db = diesel::update(targets::table.find(target_id))
                    .set((
                        targets::current_value.eq(current_value),
                        targets::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(TargetDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Target::from(result_db))
            })
            .await
    }

    async fn set_status(
        &self,
        target_id: &str,
        status: TargetStatus,
        completed_at: Option<NaiveDateTime>,
    ) -> Result<Target> {
        let target_id = target_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Target> {
                let result_db = diesel::update(targets::table.find(target_id))
                    .set((
                        targets::status.eq(status.as_str()),
                        targets::completed_at.eq(completed_at),
                        targets::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(TargetDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Target::from(result_db))
            })
            .await
    }

    async fn delete(&self, target_id: &str) -> Result<usize> {
        let target_id = target_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(targets::table.find(target_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
