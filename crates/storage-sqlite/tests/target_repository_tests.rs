//! Round-trip tests for the target repository against a real SQLite file.

use chrono::{Duration, Utc};
use tempfile::tempdir;

use teamline_core::targets::{NewTarget, TargetRepositoryTrait, TargetStatus};
use teamline_storage_sqlite::targets::TargetRepository;
use teamline_storage_sqlite::{create_pool, run_migrations, spawn_writer};

fn new_target(workspace_id: &str, assigned_to: &str) -> NewTarget {
    NewTarget {
        id: None,
        workspace_id: workspace_id.to_string(),
        title: "Close ten deals".to_string(),
        description: Some("Quarterly sales push".to_string()),
        assigned_to: assigned_to.to_string(),
        project_id: None,
        target_value: 10.0,
        current_value: 0.0,
        unit: "deals".to_string(),
        deadline: Utc::now().naive_utc() + Duration::days(30),
    }
}

#[tokio::test]
async fn insert_get_set_status_delete() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("test.db");
    let pool = create_pool(db_path.to_str().unwrap()).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer(pool.clone());
    let repo = TargetRepository::new(pool, writer);

    let created = repo.insert(new_target("ws1", "user1"), "admin1").await.unwrap();
    assert_eq!(created.status, TargetStatus::Active);
    assert_eq!(created.created_by, "admin1");
    assert!(created.completed_at.is_none());

    let fetched = repo.get_by_id(&created.id).unwrap();
    assert_eq!(fetched, created);

    // Workspace and user scoping
    assert_eq!(repo.list_for_workspace("ws1").unwrap().len(), 1);
    assert_eq!(repo.list_for_workspace("ws2").unwrap().len(), 0);
    assert_eq!(repo.list_for_user("ws1", "user1").unwrap().len(), 1);
    assert_eq!(repo.list_for_user("ws1", "user2").unwrap().len(), 0);

    let stamp = Utc::now().naive_utc();
    let updated = repo
        .set_status(&created.id, TargetStatus::Completed, Some(stamp))
        .await
        .unwrap();
    assert_eq!(updated.status, TargetStatus::Completed);
    assert_eq!(updated.completed_at, Some(stamp));

    let progressed = repo.set_current_value(&created.id, 7.5).await.unwrap();
    assert_eq!(progressed.current_value, 7.5);
    // The stamp survives unrelated writes.
    assert_eq!(progressed.completed_at, Some(stamp));

    assert_eq!(repo.delete(&created.id).await.unwrap(), 1);
    assert!(repo.get_by_id(&created.id).is_err());
}

#[tokio::test]
async fn writes_are_serialized_through_the_actor() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("test.db");
    let pool = create_pool(db_path.to_str().unwrap()).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer(pool.clone());
    let repo = std::sync::Arc::new(TargetRepository::new(pool, writer));

    let mut handles = Vec::new();
    for i in 0..8 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.insert(new_target("ws1", &format!("user{i}")), "admin1")
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(repo.list_for_workspace("ws1").unwrap().len(), 8);
}
