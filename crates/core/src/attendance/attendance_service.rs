use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;

use super::attendance_model::{AttendanceRecord, AttendanceSummary, NewAttendanceRecord};
use super::attendance_traits::{AttendanceRepositoryTrait, AttendanceServiceTrait};
use crate::errors::{Error, Result};

/// Service for clock-in/clock-out time tracking.
pub struct AttendanceService {
    repository: Arc<dyn AttendanceRepositoryTrait>,
}

impl AttendanceService {
    pub fn new(repository: Arc<dyn AttendanceRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl AttendanceServiceTrait for AttendanceService {
    async fn clock_in(
        &self,
        workspace_id: &str,
        user_id: &str,
        note: Option<String>,
    ) -> Result<AttendanceRecord> {
        if self.repository.find_open(workspace_id, user_id)?.is_some() {
            return Err(Error::ConstraintViolation(
                "Already clocked in".to_string(),
            ));
        }
        let now = Utc::now();
        self.repository
            .insert(NewAttendanceRecord {
                workspace_id: workspace_id.to_string(),
                user_id: user_id.to_string(),
                work_date: now.date_naive(),
                clock_in: now.naive_utc(),
                note,
            })
            .await
    }

    async fn clock_out(
        &self,
        workspace_id: &str,
        user_id: &str,
        note: Option<String>,
    ) -> Result<AttendanceRecord> {
        let open = self
            .repository
            .find_open(workspace_id, user_id)?
            .ok_or_else(|| Error::ConstraintViolation("Not clocked in".to_string()))?;
        self.repository
            .close(&open.id, Utc::now().naive_utc(), note)
            .await
    }

    fn list_records(
        &self,
        workspace_id: &str,
        user_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>> {
        self.repository.list_for_user(workspace_id, user_id, from, to)
    }

    fn summary(
        &self,
        workspace_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceSummary>> {
        let records = self.repository.list_for_workspace(workspace_id, from, to)?;
        let mut minutes: BTreeMap<String, i64> = BTreeMap::new();
        let mut days: BTreeMap<String, BTreeSet<NaiveDate>> = BTreeMap::new();
        let mut open: BTreeMap<String, bool> = BTreeMap::new();

        for record in &records {
            minutes
                .entry(record.user_id.clone())
                .and_modify(|m| *m += record.worked_minutes().unwrap_or(0))
                .or_insert_with(|| record.worked_minutes().unwrap_or(0));
            days.entry(record.user_id.clone())
                .or_default()
                .insert(record.work_date);
            if record.clock_out.is_none() {
                open.insert(record.user_id.clone(), true);
            }
        }

        Ok(minutes
            .into_iter()
            .map(|(user_id, total_minutes)| AttendanceSummary {
                days_present: days.get(&user_id).map_or(0, |d| d.len() as i64),
                open_record: open.get(&user_id).copied().unwrap_or(false),
                user_id,
                total_minutes,
            })
            .collect())
    }
}
