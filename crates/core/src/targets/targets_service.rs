use chrono::{NaiveDateTime, Utc};
use log::{debug, warn};
use std::sync::Arc;

use super::targets_model::{NewTarget, Target, TargetStatus, TargetUpdate};
use super::targets_resolver::resolve_status;
use super::targets_traits::{TargetRepositoryTrait, TargetServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::workspaces::Role;

/// Service for managing targets.
///
/// All read paths funnel through [`TargetService::reconcile`], so a stale
/// stored status never escapes to a caller.
pub struct TargetService {
    repository: Arc<dyn TargetRepositoryTrait>,
}

impl TargetService {
    pub fn new(repository: Arc<dyn TargetRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn scoped(&self, workspace_id: &str, target_id: &str) -> Result<Target> {
        let target = self.repository.get_by_id(target_id)?;
        if target.workspace_id != workspace_id {
            return Err(Error::NotFound("Target".to_string()));
        }
        Ok(target)
    }

    /// Reconciles one target's stored status against the derived one,
    /// persisting the rewrite when they disagree. The rewrite is best-effort
    /// and not atomic with the read that triggered it; concurrent readers may
    /// race to the same idempotent write. A failed persist is logged and the
    /// derived status is still returned.
    async fn reconcile(&self, target: Target, now: NaiveDateTime) -> Target {
        let resolution = resolve_status(
            target.current_value,
            target.target_value,
            target.deadline,
            target.status,
            now,
        );
        if !resolution.should_update {
            return target;
        }

        // completed_at is stamped exactly once, on the first transition into
        // completed; later transitions leave it untouched.
        let completed_at = if resolution.status == TargetStatus::Completed
            && target.completed_at.is_none()
        {
            Some(now)
        } else {
            target.completed_at
        };

        debug!(
            "Target {} status {} -> {} ({})",
            target.id,
            target.status.as_str(),
            resolution.status.as_str(),
            resolution.reason
        );
        match self
            .repository
            .set_status(&target.id, resolution.status, completed_at)
            .await
        {
            Ok(updated) => updated,
            Err(e) => {
                warn!("Persisting status of target {} failed: {e}", target.id);
                Target {
                    status: resolution.status,
                    completed_at,
                    ..target
                }
            }
        }
    }

    async fn reconcile_all(&self, targets: Vec<Target>) -> Vec<Target> {
        let now = Utc::now().naive_utc();
        let mut out = Vec::with_capacity(targets.len());
        for target in targets {
            out.push(self.reconcile(target, now).await);
        }
        out
    }

    fn validate_values(target_value: f64, current_value: f64) -> Result<()> {
        if !target_value.is_finite() || target_value <= 0.0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "targetValue must be greater than zero".to_string(),
            )));
        }
        if !current_value.is_finite() || current_value < 0.0 || current_value > target_value {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "currentValue must be between 0 and targetValue".to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TargetServiceTrait for TargetService {
    async fn create_target(&self, new_target: NewTarget, created_by: &str) -> Result<Target> {
        if new_target.title.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "title".to_string(),
            )));
        }
        if new_target.assigned_to.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "assignedTo".to_string(),
            )));
        }
        // Bounds hold at assignment time; admins may edit past them later.
        Self::validate_values(new_target.target_value, new_target.current_value)?;
        self.repository.insert(new_target, created_by).await
    }

    async fn get_target(&self, workspace_id: &str, target_id: &str) -> Result<Target> {
        let target = self.scoped(workspace_id, target_id)?;
        Ok(self.reconcile(target, Utc::now().naive_utc()).await)
    }

    async fn list_targets(&self, workspace_id: &str) -> Result<Vec<Target>> {
        let targets = self.repository.list_for_workspace(workspace_id)?;
        Ok(self.reconcile_all(targets).await)
    }

    async fn list_targets_for_user(
        &self,
        workspace_id: &str,
        user_id: &str,
    ) -> Result<Vec<Target>> {
        let targets = self.repository.list_for_user(workspace_id, user_id)?;
        Ok(self.reconcile_all(targets).await)
    }

    async fn update_target(&self, workspace_id: &str, update: TargetUpdate) -> Result<Target> {
        let existing = self.scoped(workspace_id, &update.id)?;
        if !update.target_value.is_finite() || update.target_value <= 0.0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "targetValue must be greater than zero".to_string(),
            )));
        }
        if let Some(status) = update.status {
            // Only cancellation (and lifting one) is a meaningful manual
            // status write; everything else is derived anyway.
            if status == TargetStatus::Cancelled && existing.status != TargetStatus::Cancelled {
                debug!("Target {} manually cancelled", existing.id);
            }
        }
        let updated = self.repository.update(update).await?;
        Ok(self.reconcile(updated, Utc::now().naive_utc()).await)
    }

    async fn update_progress(
        &self,
        workspace_id: &str,
        target_id: &str,
        current_value: f64,
        actor_id: &str,
        actor_role: Role,
    ) -> Result<Target> {
        let target = self.scoped(workspace_id, target_id)?;
        if target.assigned_to != actor_id && !actor_role.is_admin() {
            return Err(Error::Forbidden(
                "Only the assignee updates target progress".to_string(),
            ));
        }
        if !current_value.is_finite() || current_value < 0.0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "currentValue must be zero or positive".to_string(),
            )));
        }
        let updated = self
            .repository
            .set_current_value(target_id, current_value)
            .await?;
        Ok(self.reconcile(updated, Utc::now().naive_utc()).await)
    }

    async fn delete_target(&self, workspace_id: &str, target_id: &str) -> Result<usize> {
        self.scoped(workspace_id, target_id)?;
        self.repository.delete(target_id).await
    }
}
