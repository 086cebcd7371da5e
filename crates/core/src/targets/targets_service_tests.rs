//! Tests for lazy status reconciliation through the target service,
//! backed by an in-memory repository fake.

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::targets_model::{NewTarget, Target, TargetStatus, TargetUpdate};
use super::targets_service::TargetService;
use super::targets_traits::{TargetRepositoryTrait, TargetServiceTrait};
use crate::errors::{Error, Result};
use crate::workspaces::Role;

#[derive(Default)]
struct FakeTargetRepo {
    targets: Mutex<Vec<Target>>,
    status_writes: Mutex<u32>,
}

impl FakeTargetRepo {
    fn seed(&self, target: Target) {
        self.targets.lock().unwrap().push(target);
    }

    fn status_writes(&self) -> u32 {
        *self.status_writes.lock().unwrap()
    }
}

#[async_trait]
impl TargetRepositoryTrait for FakeTargetRepo {
    fn get_by_id(&self, target_id: &str) -> Result<Target> {
        self.targets
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == target_id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Target".to_string()))
    }

    fn list_for_workspace(&self, workspace_id: &str) -> Result<Vec<Target>> {
        Ok(self
            .targets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    fn list_for_user(&self, workspace_id: &str, user_id: &str) -> Result<Vec<Target>> {
        Ok(self
            .targets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.workspace_id == workspace_id && t.assigned_to == user_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, new_target: NewTarget, created_by: &str) -> Result<Target> {
        let now = Utc::now().naive_utc();
        let target = Target {
            id: new_target.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            workspace_id: new_target.workspace_id,
            title: new_target.title,
            description: new_target.description,
            assigned_to: new_target.assigned_to,
            project_id: new_target.project_id,
            created_by: created_by.to_string(),
            target_value: new_target.target_value,
            current_value: new_target.current_value,
            unit: new_target.unit,
            deadline: new_target.deadline,
            status: TargetStatus::Active,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        self.seed(target.clone());
        Ok(target)
    }

    async fn update(&self, update: TargetUpdate) -> Result<Target> {
        let mut targets = self.targets.lock().unwrap();
        let target = targets
            .iter_mut()
            .find(|t| t.id == update.id)
            .ok_or_else(|| Error::NotFound("Target".to_string()))?;
        target.title = update.title;
        target.description = update.description;
        target.assigned_to = update.assigned_to;
        target.project_id = update.project_id;
        target.target_value = update.target_value;
        target.current_value = update.current_value;
        target.unit = update.unit;
        target.deadline = update.deadline;
        if let Some(status) = update.status {
            target.status = status;
        }
        target.updated_at = Utc::now().naive_utc();
        Ok(target.clone())
    }

    async fn set_current_value(&self, target_id: &str, current_value: f64) -> Result<Target> {
        let mut targets = self.targets.lock().unwrap();
        let target = targets
            .iter_mut()
            .find(|t| t.id == target_id)
            .ok_or_else(|| Error::NotFound("Target".to_string()))?;
        target.current_value = current_value;
        Ok(target.clone())
    }

    async fn set_status(
        &self,
        target_id: &str,
        status: TargetStatus,
        completed_at: Option<NaiveDateTime>,
    ) -> Result<Target> {
        *self.status_writes.lock().unwrap() += 1;
        let mut targets = self.targets.lock().unwrap();
        let target = targets
            .iter_mut()
            .find(|t| t.id == target_id)
            .ok_or_else(|| Error::NotFound("Target".to_string()))?;
        target.status = status;
        target.completed_at = completed_at;
        Ok(target.clone())
    }

    async fn delete(&self, target_id: &str) -> Result<usize> {
        let mut targets = self.targets.lock().unwrap();
        let before = targets.len();
        targets.retain(|t| t.id != target_id);
        Ok(before - targets.len())
    }
}

fn make_target(repo: &FakeTargetRepo, current: f64, target: f64, deadline_days: i64) -> String {
    let now = Utc::now().naive_utc();
    let id = Uuid::new_v4().to_string();
    repo.seed(Target {
        id: id.clone(),
        workspace_id: "ws1".to_string(),
        title: "Close deals".to_string(),
        description: None,
        assigned_to: "user1".to_string(),
        project_id: None,
        created_by: "admin1".to_string(),
        target_value: target,
        current_value: current,
        unit: "deals".to_string(),
        deadline: now + Duration::days(deadline_days),
        status: TargetStatus::Active,
        completed_at: None,
        created_at: now,
        updated_at: now,
    });
    id
}

fn service(repo: &Arc<FakeTargetRepo>) -> TargetService {
    TargetService::new(repo.clone())
}

#[tokio::test]
async fn read_reconciles_and_persists_stale_status() {
    let repo = Arc::new(FakeTargetRepo::default());
    let id = make_target(&repo, 100.0, 100.0, -1);
    let svc = service(&repo);

    let target = svc.get_target("ws1", &id).await.unwrap();
    // Value check takes precedence over the deadline check.
    assert_eq!(target.status, TargetStatus::Completed);
    assert!(target.completed_at.is_some());
    assert_eq!(repo.status_writes(), 1);
}

#[tokio::test]
async fn past_deadline_under_target_fails_on_read() {
    let repo = Arc::new(FakeTargetRepo::default());
    let id = make_target(&repo, 50.0, 100.0, -1);
    let svc = service(&repo);

    let target = svc.get_target("ws1", &id).await.unwrap();
    assert_eq!(target.status, TargetStatus::Failed);
    assert!(target.completed_at.is_none());
}

#[tokio::test]
async fn completed_at_is_stamped_exactly_once() {
    let repo = Arc::new(FakeTargetRepo::default());
    let id = make_target(&repo, 100.0, 100.0, 10);
    let svc = service(&repo);

    let first = svc.get_target("ws1", &id).await.unwrap();
    let stamped = first.completed_at.unwrap();

    // Repeated resolution while already completed leaves the stamp alone.
    let second = svc.get_target("ws1", &id).await.unwrap();
    assert_eq!(second.completed_at, Some(stamped));
    assert_eq!(repo.status_writes(), 1);

    // Knock the value down (deadline still open): back to active, stamp kept.
    let third = svc
        .update_progress("ws1", &id, 10.0, "user1", Role::Member)
        .await
        .unwrap();
    assert_eq!(third.status, TargetStatus::Active);
    assert_eq!(third.completed_at, Some(stamped));

    // Re-complete: the original stamp survives.
    let fourth = svc
        .update_progress("ws1", &id, 150.0, "user1", Role::Member)
        .await
        .unwrap();
    assert_eq!(fourth.status, TargetStatus::Completed);
    assert_eq!(fourth.completed_at, Some(stamped));
}

#[tokio::test]
async fn cancelled_stays_cancelled_on_read() {
    let repo = Arc::new(FakeTargetRepo::default());
    let id = make_target(&repo, 100.0, 100.0, -1);
    {
        let mut targets = repo.targets.lock().unwrap();
        targets[0].status = TargetStatus::Cancelled;
    }
    let svc = service(&repo);

    let target = svc.get_target("ws1", &id).await.unwrap();
    assert_eq!(target.status, TargetStatus::Cancelled);
    assert_eq!(repo.status_writes(), 0);
}

#[tokio::test]
async fn only_assignee_or_admin_updates_progress() {
    let repo = Arc::new(FakeTargetRepo::default());
    let id = make_target(&repo, 0.0, 100.0, 10);
    let svc = service(&repo);

    let err = svc
        .update_progress("ws1", &id, 10.0, "someone-else", Role::Member)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    svc.update_progress("ws1", &id, 10.0, "user1", Role::Member)
        .await
        .unwrap();
    svc.update_progress("ws1", &id, 20.0, "someone-else", Role::Admin)
        .await
        .unwrap();
}

#[tokio::test]
async fn create_validates_bounds() {
    let repo = Arc::new(FakeTargetRepo::default());
    let svc = service(&repo);
    let now = Utc::now().naive_utc();

    let base = NewTarget {
        id: None,
        workspace_id: "ws1".to_string(),
        title: "Ship features".to_string(),
        description: None,
        assigned_to: "user1".to_string(),
        project_id: None,
        target_value: 10.0,
        current_value: 0.0,
        unit: "features".to_string(),
        deadline: now + Duration::days(30),
    };

    let err = svc
        .create_target(
            NewTarget {
                target_value: 0.0,
                ..base.clone()
            },
            "admin1",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = svc
        .create_target(
            NewTarget {
                current_value: 11.0,
                ..base.clone()
            },
            "admin1",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let target = svc.create_target(base, "admin1").await.unwrap();
    assert_eq!(target.status, TargetStatus::Active);
}

#[tokio::test]
async fn targets_scoped_to_workspace() {
    let repo = Arc::new(FakeTargetRepo::default());
    let id = make_target(&repo, 0.0, 100.0, 10);
    let svc = service(&repo);

    let err = svc.get_target("other-ws", &id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
