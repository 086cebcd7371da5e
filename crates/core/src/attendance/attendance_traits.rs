use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use super::attendance_model::{AttendanceRecord, AttendanceSummary, NewAttendanceRecord};
use crate::errors::Result;

/// Trait for attendance repository operations
#[async_trait]
pub trait AttendanceRepositoryTrait: Send + Sync {
    fn find_open(&self, workspace_id: &str, user_id: &str) -> Result<Option<AttendanceRecord>>;
    fn list_for_user(
        &self,
        workspace_id: &str,
        user_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>>;
    fn list_for_workspace(
        &self,
        workspace_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>>;
    async fn insert(&self, new_record: NewAttendanceRecord) -> Result<AttendanceRecord>;
    async fn close(
        &self,
        record_id: &str,
        clock_out: NaiveDateTime,
        note: Option<String>,
    ) -> Result<AttendanceRecord>;
}

/// Trait for attendance service operations
#[async_trait]
pub trait AttendanceServiceTrait: Send + Sync {
    async fn clock_in(
        &self,
        workspace_id: &str,
        user_id: &str,
        note: Option<String>,
    ) -> Result<AttendanceRecord>;
    async fn clock_out(
        &self,
        workspace_id: &str,
        user_id: &str,
        note: Option<String>,
    ) -> Result<AttendanceRecord>;
    fn list_records(
        &self,
        workspace_id: &str,
        user_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>>;
    /// Workspace-wide per-user rollup over a date range.
    fn summary(
        &self,
        workspace_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceSummary>>;
}
