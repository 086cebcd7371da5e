//! Per-user workspace report rendered as CSV.
//!
//! Targets pass through the status resolver on the way into the report, so an
//! exported status is never stale.

use async_trait::async_trait;
use chrono::Utc;
use csv::WriterBuilder;
use std::sync::Arc;

use crate::attendance::AttendanceRepositoryTrait;
use crate::errors::{Error, Result};
use crate::targets::TargetServiceTrait;
use crate::tasks::{TaskFilters, TaskRepositoryTrait};
use crate::users::UserRepositoryTrait;

/// A rendered report, ready to stream as an attachment.
#[derive(Debug, Clone)]
pub struct UserReport {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Trait for report generation
#[async_trait]
pub trait ReportServiceTrait: Send + Sync {
    async fn user_report(&self, workspace_id: &str, user_id: &str) -> Result<UserReport>;
}

/// Service assembling per-user activity reports.
pub struct ReportService {
    users: Arc<dyn UserRepositoryTrait>,
    tasks: Arc<dyn TaskRepositoryTrait>,
    targets: Arc<dyn TargetServiceTrait>,
    attendance: Arc<dyn AttendanceRepositoryTrait>,
}

impl ReportService {
    pub fn new(
        users: Arc<dyn UserRepositoryTrait>,
        tasks: Arc<dyn TaskRepositoryTrait>,
        targets: Arc<dyn TargetServiceTrait>,
        attendance: Arc<dyn AttendanceRepositoryTrait>,
    ) -> Self {
        Self {
            users,
            tasks,
            targets,
            attendance,
        }
    }
}

#[async_trait]
impl ReportServiceTrait for ReportService {
    async fn user_report(&self, workspace_id: &str, user_id: &str) -> Result<UserReport> {
        let user = self.users.get_by_id(user_id)?;
        let tasks = self.tasks.list(
            workspace_id,
            &TaskFilters {
                assigned_to: Some(user_id.to_string()),
                ..TaskFilters::default()
            },
        )?;
        let targets = self
            .targets
            .list_targets_for_user(workspace_id, user_id)
            .await?;
        let attendance = self
            .attendance
            .list_for_user(workspace_id, user_id, None, None)?;

        let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());

        writer.write_record(["report", "generated_at", "user", "email"])?;
        writer.write_record([
            "user-activity".to_string(),
            Utc::now().to_rfc3339(),
            user.name.clone(),
            user.email.clone(),
        ])?;
        writer.write_record([""])?;

        writer.write_record(["section", "tasks"])?;
        writer.write_record(["title", "status", "priority", "dueDate", "projectId"])?;
        for task in &tasks {
            writer.write_record([
                task.title.clone(),
                task.status.as_str().to_string(),
                task.priority.as_str().to_string(),
                task.due_date.map(|d| d.to_string()).unwrap_or_default(),
                task.project_id.clone().unwrap_or_default(),
            ])?;
        }
        writer.write_record([""])?;

        writer.write_record(["section", "targets"])?;
        writer.write_record([
            "title",
            "currentValue",
            "targetValue",
            "unit",
            "deadline",
            "status",
            "completedAt",
        ])?;
        for target in &targets {
            writer.write_record([
                target.title.clone(),
                target.current_value.to_string(),
                target.target_value.to_string(),
                target.unit.clone(),
                target.deadline.to_string(),
                target.status.as_str().to_string(),
                target
                    .completed_at
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
            ])?;
        }
        writer.write_record([""])?;

        writer.write_record(["section", "attendance"])?;
        writer.write_record(["workDate", "clockIn", "clockOut", "minutes"])?;
        for record in &attendance {
            writer.write_record([
                record.work_date.to_string(),
                record.clock_in.to_string(),
                record
                    .clock_out
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
                record
                    .worked_minutes()
                    .map(|m| m.to_string())
                    .unwrap_or_default(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Report(e.to_string()))?;
        Ok(UserReport {
            file_name: format!("report-{}-{}.csv", user.name.replace(' ', "-"), workspace_id),
            content_type: "text/csv",
            bytes,
        })
    }
}
