//! Integration tests for the training-job repository: creation, atomic
//! transitions, progress clamping, and terminal immutability, exercised
//! against a real database.

mod common;

use common::{seed_dataset, submit_job};
use insights_db::models::status::JobStatus;
use insights_db::repositories::{JobRepo, ModelRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_starts_pending_with_zero_progress(pool: PgPool) {
    let dataset = seed_dataset(&pool).await;
    let job = submit_job(&pool, dataset.id).await;

    assert_eq!(job.status_id, JobStatus::Pending.id());
    assert_eq!(job.progress_percent, 0);
    assert!(job.result_ref.is_none());
    assert!(job.error_detail.is_none());
    assert!(job.started_at.is_none());
    assert!(job.completed_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn started_at_is_set_exactly_once(pool: PgPool) {
    let dataset = seed_dataset(&pool).await;
    let job = submit_job(&pool, dataset.id).await;

    let first = JobRepo::mark_running(&pool, job.id, 10)
        .await
        .unwrap()
        .unwrap();
    let started_at = first.started_at.expect("started_at set on first update");

    let second = JobRepo::mark_running(&pool, job.id, 20)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.started_at, Some(started_at));
    assert_eq!(second.progress_percent, 20);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_is_clamped_monotonic(pool: PgPool) {
    let dataset = seed_dataset(&pool).await;
    let job = submit_job(&pool, dataset.id).await;

    JobRepo::mark_running(&pool, job.id, 60).await.unwrap();

    // An out-of-order lower value must not move progress backward.
    let after = JobRepo::mark_running(&pool, job.id, 30)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.progress_percent, 60);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_progress_updates_keep_the_max(pool: PgPool) {
    let dataset = seed_dataset(&pool).await;
    let job = submit_job(&pool, dataset.id).await;

    let mut handles = Vec::new();
    for progress in [5_i16, 15, 25, 35, 45, 55, 65, 75, 85, 95] {
        let pool = pool.clone();
        let job_id = job.id;
        handles.push(tokio::spawn(async move {
            JobRepo::mark_running(&pool, job_id, progress).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let job = JobRepo::find_by_id(&pool, job.id).await.unwrap().unwrap();
    assert_eq!(job.status_id, JobStatus::Running.id());
    assert_eq!(job.progress_percent, 95);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn complete_creates_model_atomically(pool: PgPool) {
    let dataset = seed_dataset(&pool).await;
    let job = submit_job(&pool, dataset.id).await;
    JobRepo::mark_running(&pool, job.id, 50).await.unwrap();

    let metrics = serde_json::json!({ "accuracy": 0.9 });
    let importance = serde_json::json!([{ "name": "age", "weight": 0.5 }]);

    let (completed, model) = JobRepo::complete(&pool, job.id, "m1.bin", &metrics, &importance)
        .await
        .unwrap()
        .expect("first completion wins");

    assert_eq!(completed.status_id, JobStatus::Completed.id());
    assert_eq!(completed.progress_percent, 100);
    assert_eq!(completed.result_ref.as_deref(), Some("m1.bin"));
    assert!(completed.completed_at.is_some());

    assert_eq!(model.job_id, job.id);
    assert_eq!(model.artifact_path, "m1.bin");
    assert_eq!(model.algorithm, job.algorithm);
    assert_eq!(model.submitted_by, job.submitted_by);

    let found = ModelRepo::find_by_job_id(&pool, job.id).await.unwrap();
    assert!(found.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_completion_writes_nothing(pool: PgPool) {
    let dataset = seed_dataset(&pool).await;
    let job = submit_job(&pool, dataset.id).await;

    let metrics = serde_json::json!({});
    let importance = serde_json::json!([]);
    let (completed, _model) = JobRepo::complete(&pool, job.id, "m1.bin", &metrics, &importance)
        .await
        .unwrap()
        .expect("first completion wins");

    // The job never entered `running`, so started_at stays unset.
    assert!(completed.started_at.is_none());

    // The second application loses the compare-and-set and must not
    // insert a second model or touch the record.
    let second = JobRepo::complete(&pool, job.id, "m1.bin", &metrics, &importance)
        .await
        .unwrap();
    assert!(second.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn fail_preserves_progress_and_is_terminal(pool: PgPool) {
    let dataset = seed_dataset(&pool).await;
    let job = submit_job(&pool, dataset.id).await;
    JobRepo::mark_running(&pool, job.id, 40).await.unwrap();

    let failed = JobRepo::fail(&pool, job.id, "out of memory")
        .await
        .unwrap()
        .expect("failure transition applies");

    assert_eq!(failed.status_id, JobStatus::Failed.id());
    assert_eq!(failed.progress_percent, 40);
    assert_eq!(failed.error_detail.as_deref(), Some("out of memory"));
    assert!(failed.completed_at.is_some());

    // Terminal records reject further transitions at the storage layer.
    let running_again = JobRepo::mark_running(&pool, job.id, 50).await.unwrap();
    assert!(running_again.is_none());

    let completed_after = JobRepo::complete(
        &pool,
        job.id,
        "late.bin",
        &serde_json::json!({}),
        &serde_json::json!([]),
    )
    .await
    .unwrap();
    assert!(completed_after.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_by_submitter_filters_and_paginates(pool: PgPool) {
    use insights_db::models::job::JobListQuery;

    let dataset = seed_dataset(&pool).await;
    let first = submit_job(&pool, dataset.id).await;
    let second = submit_job(&pool, dataset.id).await;
    JobRepo::fail(&pool, first.id, "boom").await.unwrap();

    let failed_only = JobRepo::list_by_submitter(
        &pool,
        &first.submitted_by,
        &JobListQuery {
            status_id: Some(JobStatus::Failed.id()),
            limit: None,
            offset: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(failed_only.len(), 1);
    assert_eq!(failed_only[0].id, first.id);

    let all = JobRepo::list_by_submitter(
        &pool,
        &first.submitted_by,
        &JobListQuery {
            status_id: None,
            limit: Some(1),
            offset: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, second.id, "newest first");

    let other_user = JobRepo::list_by_submitter(
        &pool,
        "someone-else",
        &JobListQuery {
            status_id: None,
            limit: None,
            offset: None,
        },
    )
    .await
    .unwrap();
    assert!(other_user.is_empty());
}
