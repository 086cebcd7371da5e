//! Attendance domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One clock-in (and eventual clock-out) of a user on a work day.
/// A record with `clock_out: None` is "open".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
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

impl AttendanceRecord {
    /// Minutes between clock-in and clock-out, if closed.
    pub fn worked_minutes(&self) -> Option<i64> {
        self.clock_out
            .map(|out| (out - self.clock_in).num_minutes().max(0))
    }
}

/// Input model for opening an attendance record
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendanceRecord {
    pub workspace_id: String,
    pub user_id: String,
    pub work_date: NaiveDate,
    pub clock_in: NaiveDateTime,
    pub note: Option<String>,
}

/// Per-user rollup for the workspace summary view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub user_id: String,
    pub days_present: i64,
    pub total_minutes: i64,
    pub open_record: bool,
}
