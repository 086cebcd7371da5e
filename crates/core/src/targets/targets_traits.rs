use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::targets_model::{NewTarget, Target, TargetStatus, TargetUpdate};
use crate::errors::Result;
use crate::workspaces::Role;

/// Trait for target repository operations
#[async_trait]
pub trait TargetRepositoryTrait: Send + Sync {
    fn get_by_id(&self, target_id: &str) -> Result<Target>;
    fn list_for_workspace(&self, workspace_id: &str) -> Result<Vec<Target>>;
    fn list_for_user(&self, workspace_id: &str, user_id: &str) -> Result<Vec<Target>>;
    async fn insert(&self, new_target: NewTarget, created_by: &str) -> Result<Target>;
    async fn update(&self, update: TargetUpdate) -> Result<Target>;
    async fn set_current_value(&self, target_id: &str, current_value: f64) -> Result<Target>;
    /// Persists a derived status together with the (possibly unchanged)
    /// completion timestamp.
    async fn set_status(
        &self,
        target_id: &str,
        status: TargetStatus,
        completed_at: Option<NaiveDateTime>,
    ) -> Result<Target>;
    async fn delete(&self, target_id: &str) -> Result<usize>;
}

/// Trait for target service operations.
///
/// Reads are `async` because every read lazily reconciles stored statuses
/// and may persist a rewrite.
#[async_trait]
pub trait TargetServiceTrait: Send + Sync {
    async fn create_target(&self, new_target: NewTarget, created_by: &str) -> Result<Target>;
    async fn get_target(&self, workspace_id: &str, target_id: &str) -> Result<Target>;
    async fn list_targets(&self, workspace_id: &str) -> Result<Vec<Target>>;
    async fn list_targets_for_user(&self, workspace_id: &str, user_id: &str)
        -> Result<Vec<Target>>;
    async fn update_target(&self, workspace_id: &str, update: TargetUpdate) -> Result<Target>;
    /// Assignee-facing progress update; admins may use it too.
    async fn update_progress(
        &self,
        workspace_id: &str,
        target_id: &str,
        current_value: f64,
        actor_id: &str,
        actor_role: Role,
    ) -> Result<Target>;
    async fn delete_target(&self, workspace_id: &str, target_id: &str) -> Result<usize>;
}
