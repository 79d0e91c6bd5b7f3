//! Repository for the `training_jobs` table.
//!
//! Every mutation is a single compare-and-set statement guarded by the
//! current status, so concurrent updates for the same job cannot
//! interleave into an inconsistent record: a statement either wins the
//! row version it expected or affects nothing. Progress uses
//! `GREATEST` so late or out-of-order reports can never move it backward.

use sqlx::PgPool;
use uuid::Uuid;

use insights_core::types::EntityId;

use crate::models::job::{JobListQuery, SubmitTrainingJob, TrainingJob};
use crate::models::status::JobStatus;
use crate::models::trained_model::TrainedModel;

/// Column list for `training_jobs` queries.
const JOB_COLUMNS: &str = "\
    id, status_id, dataset_id, target_column, algorithm, problem_type, \
    hyperparameters, split_ratio, submitted_by, progress_percent, \
    result_ref, error_detail, created_at, started_at, completed_at, updated_at";

/// Column list for `trained_models` queries.
const MODEL_COLUMNS: &str = "\
    id, job_id, algorithm, problem_type, metrics, feature_importance, \
    artifact_path, submitted_by, created_at";

/// Maximum page size for job listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for job listing.
const DEFAULT_LIMIT: i64 = 50;

/// Provides CRUD and atomic state transitions for training jobs.
pub struct JobRepo;

impl JobRepo {
    /// Create a new pending job with progress 0.
    ///
    /// The id is generated here (UUID v7) and doubles as the idempotency
    /// key for executor dispatch.
    pub async fn create(
        pool: &PgPool,
        submitted_by: &str,
        input: &SubmitTrainingJob,
    ) -> Result<TrainingJob, sqlx::Error> {
        let hyperparameters = input
            .hyperparameters
            .clone()
            .unwrap_or_else(|| serde_json::json!({}));

        let query = format!(
            "INSERT INTO training_jobs \
                 (id, status_id, dataset_id, target_column, algorithm, problem_type, \
                  hyperparameters, split_ratio, submitted_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {JOB_COLUMNS}"
        );
        sqlx::query_as::<_, TrainingJob>(&query)
            .bind(Uuid::now_v7())
            .bind(JobStatus::Pending.id())
            .bind(input.dataset_id)
            .bind(&input.target_column)
            .bind(&input.algorithm)
            .bind(&input.problem_type)
            .bind(&hyperparameters)
            .bind(input.split_ratio)
            .bind(submitted_by)
            .fetch_one(pool)
            .await
    }

    /// Find a job by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<TrainingJob>, sqlx::Error> {
        let query = format!("SELECT {JOB_COLUMNS} FROM training_jobs WHERE id = $1");
        sqlx::query_as::<_, TrainingJob>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a running/progress update.
    ///
    /// Sets `started_at` on first entry into `running` (and never again),
    /// and raises progress to at most the reported value: a report lower
    /// than the stored progress is clamped away. Returns `None` when the
    /// guard misses, i.e. the job no longer exists in a non-terminal
    /// state; the caller re-reads and decides whether that is a duplicate
    /// delivery or an illegal transition.
    pub async fn mark_running(
        pool: &PgPool,
        id: EntityId,
        progress: i16,
    ) -> Result<Option<TrainingJob>, sqlx::Error> {
        let query = format!(
            "UPDATE training_jobs \
             SET status_id = $2, \
                 started_at = COALESCE(started_at, NOW()), \
                 progress_percent = GREATEST(progress_percent, $3), \
                 updated_at = NOW() \
             WHERE id = $1 AND status_id IN ($4, $5) \
             RETURNING {JOB_COLUMNS}"
        );
        sqlx::query_as::<_, TrainingJob>(&query)
            .bind(id)
            .bind(JobStatus::Running.id())
            .bind(progress)
            .bind(JobStatus::Pending.id())
            .bind(JobStatus::Running.id())
            .fetch_optional(pool)
            .await
    }

    /// Complete a job and persist its trained model in one transaction.
    ///
    /// The job transition and the `trained_models` insert commit together,
    /// so a completed job always has exactly one model record and a lost
    /// compare-and-set never leaves a dangling model. Returns `None` when
    /// the job was no longer in a non-terminal state (duplicate delivery
    /// lost the race); nothing is written in that case.
    pub async fn complete(
        pool: &PgPool,
        job_id: EntityId,
        result_ref: &str,
        metrics: &serde_json::Value,
        feature_importance: &serde_json::Value,
    ) -> Result<Option<(TrainingJob, TrainedModel)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update = format!(
            "UPDATE training_jobs \
             SET status_id = $2, \
                 progress_percent = 100, \
                 result_ref = $3, \
                 completed_at = NOW(), \
                 updated_at = NOW() \
             WHERE id = $1 AND status_id IN ($4, $5) \
             RETURNING {JOB_COLUMNS}"
        );
        let job = sqlx::query_as::<_, TrainingJob>(&update)
            .bind(job_id)
            .bind(JobStatus::Completed.id())
            .bind(result_ref)
            .bind(JobStatus::Pending.id())
            .bind(JobStatus::Running.id())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(job) = job else {
            tx.rollback().await?;
            return Ok(None);
        };

        let insert = format!(
            "INSERT INTO trained_models \
                 (id, job_id, algorithm, problem_type, metrics, feature_importance, \
                  artifact_path, submitted_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {MODEL_COLUMNS}"
        );
        let model = sqlx::query_as::<_, TrainedModel>(&insert)
            .bind(Uuid::now_v7())
            .bind(job.id)
            .bind(&job.algorithm)
            .bind(&job.problem_type)
            .bind(metrics)
            .bind(feature_importance)
            .bind(result_ref)
            .bind(&job.submitted_by)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((job, model)))
    }

    /// Fail a job with a human-readable reason.
    ///
    /// Progress is left at its last reported value to preserve how far
    /// training got. Returns `None` when the guard misses (see
    /// [`JobRepo::mark_running`]).
    pub async fn fail(
        pool: &PgPool,
        id: EntityId,
        error_detail: &str,
    ) -> Result<Option<TrainingJob>, sqlx::Error> {
        let query = format!(
            "UPDATE training_jobs \
             SET status_id = $2, \
                 error_detail = $3, \
                 completed_at = NOW(), \
                 updated_at = NOW() \
             WHERE id = $1 AND status_id IN ($4, $5) \
             RETURNING {JOB_COLUMNS}"
        );
        sqlx::query_as::<_, TrainingJob>(&query)
            .bind(id)
            .bind(JobStatus::Failed.id())
            .bind(error_detail)
            .bind(JobStatus::Pending.id())
            .bind(JobStatus::Running.id())
            .fetch_optional(pool)
            .await
    }

    /// List a submitter's jobs, newest first, with an optional status
    /// filter and pagination.
    pub async fn list_by_submitter(
        pool: &PgPool,
        submitted_by: &str,
        params: &JobListQuery,
    ) -> Result<Vec<TrainingJob>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);

        match params.status_id {
            Some(status_id) => {
                let query = format!(
                    "SELECT {JOB_COLUMNS} FROM training_jobs \
                     WHERE submitted_by = $1 AND status_id = $2 \
                     ORDER BY created_at DESC \
                     LIMIT $3 OFFSET $4"
                );
                sqlx::query_as::<_, TrainingJob>(&query)
                    .bind(submitted_by)
                    .bind(status_id)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {JOB_COLUMNS} FROM training_jobs \
                     WHERE submitted_by = $1 \
                     ORDER BY created_at DESC \
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, TrainingJob>(&query)
                    .bind(submitted_by)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }
}
