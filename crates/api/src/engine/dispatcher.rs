//! Training-job dispatcher.
//!
//! `submit` records durable job intent first, then attempts exactly one
//! hand-off to the executor. A hand-off transport failure does not roll
//! the job back: the record stays `pending` and the caller receives a
//! delivery warning alongside the job handle, so the job can be
//! re-dispatched later under the same id.

use std::sync::Arc;

use serde::Serialize;

use insights_core::error::CoreError;
use insights_core::types::EntityId;
use insights_core::{algorithms, spec};
use insights_db::models::dataset::Dataset;
use insights_db::models::job::{SubmitTrainingJob, TrainingJob};
use insights_db::models::status::JobStatus;
use insights_db::repositories::{DatasetRepo, JobRepo};
use insights_db::DbPool;
use insights_executor::{ExecutorApi, TrainingDispatch};

use crate::error::{AppError, AppResult};

/// Result of one hand-off attempt, reported to the submitting caller.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryOutcome {
    /// Whether the executor acknowledged the dispatch.
    pub delivered: bool,
    /// Present when the hand-off transport failed; the job itself is
    /// still recorded and pollable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_warning: Option<String>,
}

impl DeliveryOutcome {
    fn delivered() -> Self {
        Self {
            delivered: true,
            delivery_warning: None,
        }
    }

    fn warning(message: String) -> Self {
        Self {
            delivered: false,
            delivery_warning: Some(message),
        }
    }
}

/// Outbound side of the pipeline: validation, durable intent, hand-off.
pub struct JobDispatcher {
    pool: DbPool,
    executor: Arc<ExecutorApi>,
    callback_base_url: String,
}

impl JobDispatcher {
    pub fn new(pool: DbPool, executor: Arc<ExecutorApi>, callback_base_url: String) -> Self {
        Self {
            pool,
            executor,
            callback_base_url,
        }
    }

    /// Validate a specification, persist the job record, and hand it to
    /// the executor.
    ///
    /// Validation failures reject the request before any state exists.
    /// After the insert the caller always gets the job back, whatever
    /// the hand-off outcome.
    pub async fn submit(
        &self,
        submitted_by: &str,
        input: &SubmitTrainingJob,
    ) -> AppResult<(TrainingJob, DeliveryOutcome)> {
        let dataset = self.validate(input).await?;

        let job = JobRepo::create(&self.pool, submitted_by, input).await?;
        tracing::info!(
            job_id = %job.id,
            dataset_id = %dataset.id,
            algorithm = %job.algorithm,
            submitted_by = %job.submitted_by,
            "Training job created",
        );

        let outcome = self.hand_off(&job, &dataset).await;
        Ok((job, outcome))
    }

    /// Re-send a pending job's specification to the executor.
    ///
    /// Uses the stored specification and the original job id as the
    /// idempotency key, so a duplicate of an already-received dispatch is
    /// harmless. Only pending jobs are eligible.
    pub async fn redispatch(&self, job_id: EntityId) -> AppResult<(TrainingJob, DeliveryOutcome)> {
        let job = JobRepo::find_by_id(&self.pool, job_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "TrainingJob",
                id: job_id,
            }))?;

        if job.status_id != JobStatus::Pending.id() {
            return Err(AppError::Core(CoreError::Conflict(
                "Only pending jobs can be redispatched".into(),
            )));
        }

        let dataset = DatasetRepo::find_by_id(&self.pool, job.dataset_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Dataset",
                id: job.dataset_id,
            }))?;

        let outcome = self.hand_off(&job, &dataset).await;
        Ok((job, outcome))
    }

    /// Run the specification checks that need no state beyond the
    /// dataset schema. Returns the dataset so dispatch can reuse it.
    async fn validate(&self, input: &SubmitTrainingJob) -> AppResult<Dataset> {
        spec::validate_split_ratio(input.split_ratio)?;
        algorithms::validate_algorithm(&input.problem_type, &input.algorithm)?;
        if let Some(hyperparameters) = &input.hyperparameters {
            spec::validate_hyperparameters(hyperparameters)?;
        }

        let dataset = DatasetRepo::find_by_id(&self.pool, input.dataset_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Dataset",
                id: input.dataset_id,
            }))?;

        let columns = DatasetRepo::column_names(&self.pool, dataset.id).await?;
        spec::validate_target_column(&input.target_column, &columns)?;

        Ok(dataset)
    }

    /// One bounded hand-off attempt. Transport failures become a
    /// delivery warning, never an error: delivery is the dispatcher's
    /// job, completion is not.
    async fn hand_off(&self, job: &TrainingJob, dataset: &Dataset) -> DeliveryOutcome {
        let payload = TrainingDispatch {
            job_id: job.id,
            dataset_ref: dataset.storage_path.clone(),
            target_column: job.target_column.clone(),
            algorithm: job.algorithm.clone(),
            problem_type: job.problem_type.clone(),
            hyperparameters: job.hyperparameters.clone(),
            split_ratio: job.split_ratio,
            result_callback: format!("{}/api/v1/executor/updates", self.callback_base_url),
        };

        match self.executor.dispatch(&payload).await {
            Ok(()) => {
                tracing::info!(job_id = %job.id, "Training job handed to executor");
                DeliveryOutcome::delivered()
            }
            Err(e) => {
                tracing::warn!(
                    job_id = %job.id,
                    executor_url = self.executor.base_url(),
                    error = %e,
                    "Executor hand-off failed, job remains pending",
                );
                DeliveryOutcome::warning(format!("Executor hand-off failed: {e}"))
            }
        }
    }
}
