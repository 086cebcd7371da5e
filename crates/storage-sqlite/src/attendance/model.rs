//! Database models for attendance records.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use teamline_core::attendance::AttendanceRecord;

/// Database model for attendance records
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::attendance_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordDB {
    pub id: String,
    pub workspace_id: String,
    pub user_id: String,
    pub work_date: NaiveDate,
    pub clock_in: NaiveDateTime,
    pub clock_out: Option<NaiveDateTime>,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for opening an attendance record
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::attendance_records)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendanceRecordDB {
    pub id: String,
    pub workspace_id: String,
    pub user_id: String,
    pub work_date: NaiveDate,
    pub clock_in: NaiveDateTime,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<AttendanceRecordDB> for AttendanceRecord {
    fn from(db: AttendanceRecordDB) -> Self {
        Self {
            id: db.id,
            workspace_id: db.workspace_id,
            user_id: db.user_id,
            work_date: db.work_date,
            clock_in: db.clock_in,
            clock_out: db.clock_out,
            note: db.note,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
