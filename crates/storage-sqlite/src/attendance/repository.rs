use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use teamline_core::attendance::{
    AttendanceRecord, AttendanceRepositoryTrait, NewAttendanceRecord,
};
use teamline_core::Result;

use super::model::{AttendanceRecordDB, NewAttendanceRecordDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::attendance_records;

pub struct AttendanceRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl AttendanceRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        AttendanceRepository { pool, writer }
    }
}

#[async_trait]
impl AttendanceRepositoryTrait for AttendanceRepository {
    fn find_open(&self, workspace_id: &str, user_id: &str) -> Result<Option<AttendanceRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let record_db = attendance_records::table
            .filter(attendance_records::workspace_id.eq(workspace_id))
            .filter(attendance_records::user_id.eq(user_id))
            .filter(attendance_records::clock_out.is_null())
            .order(attendance_records::clock_in.desc())
            .first::<AttendanceRecordDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(record_db.map(AttendanceRecord::from))
    }

    fn list_for_user(
        &self,
        workspace_id: &str,
        user_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = attendance_records::table
            .filter(attendance_records::workspace_id.eq(workspace_id))
            .filter(attendance_records::user_id.eq(user_id))
            .into_boxed();
        if let Some(from) = from {
            query = query.filter(attendance_records::work_date.ge(from));
        }
        if let Some(to) = to {
            query = query.filter(attendance_records::work_date.le(to));
        }
        let records_db = query
            .order(attendance_records::clock_in.desc())
            .load::<AttendanceRecordDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(records_db.into_iter().map(AttendanceRecord::from).collect())
    }

    fn list_for_workspace(
        &self,
        workspace_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = attendance_records::table
            .filter(attendance_records::workspace_id.eq(workspace_id))
            .into_boxed();
        if let Some(from) = from {
            query = query.filter(attendance_records::work_date.ge(from));
        }
        if let Some(to) = to {
            query = query.filter(attendance_records::work_date.le(to));
        }
        let records_db = query
            .order(attendance_records::clock_in.desc())
            .load::<AttendanceRecordDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(records_db.into_iter().map(AttendanceRecord::from).collect())
    }

    async fn insert(&self, new_record: NewAttendanceRecord) -> Result<AttendanceRecord> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<AttendanceRecord> {
                    let now = Utc::now().naive_utc();
                    let new_record_db = NewAttendanceRecordDB {
                        id: Uuid::new_v4().to_string(),
                        workspace_id: new_record.workspace_id,
                        user_id: new_record.user_id,
                        work_date: new_record.work_date,
                        clock_in: new_record.clock_in,
                        note: new_record.note,
                        created_at: now,
                        updated_at: now,
                    };
                    let result_db = diesel::insert_into(attendance_records::table)
                        .values(&new_record_db)
                        .returning(AttendanceRecordDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Ok(AttendanceRecord::from(result_db))
                },
            )
            .await
    }

    async fn close(
        &self,
        record_id: &str,
        clock_out: NaiveDateTime,
        note: Option<String>,
    ) -> Result<AttendanceRecord> {
        let record_id = record_id.to_string();
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<AttendanceRecord> {
                    let now = Utc::now().naive_utc();
                    // A clock-out note, when given, replaces the clock-in one.
                    let result_db = if note.is_some() {
                        diesel::update(attendance_records::table.find(record_id))
                            .set((
                                attendance_records::clock_out.eq(Some(clock_out)),
                                attendance_records::note.eq(note),
                                attendance_records::updated_at.eq(now),
                            ))
                            .returning(AttendanceRecordDB::as_returning())
                            .get_result(conn)
                            .map_err(StorageError::from)?
                    } else {
                        diesel::update(attendance_records::table.find(record_id))
                            .set((
                                attendance_records::clock_out.eq(Some(clock_out)),
                                attendance_records::updated_at.eq(now),
                            ))
                            .returning(AttendanceRecordDB::as_returning())
                            .get_result(conn)
                            .map_err(StorageError::from)?
                    };
                    Ok(AttendanceRecord::from(result_db))
                },
            )
            .await
    }
}
