//! Status reconciler: applies executor-reported updates to job records.
//!
//! The executor delivers updates at least once and in no guaranteed
//! order. Reconciliation therefore never trusts an update at face value:
//! the stored record decides what the update may do, duplicates of a
//! terminal delivery are absorbed silently, and every write is a
//! compare-and-set in the repository so racing deliveries cannot
//! interleave.

use std::sync::Arc;

use insights_core::artifacts::ArtifactStore;
use insights_core::error::CoreError;
use insights_core::types::EntityId;
use insights_db::models::job::TrainingJob;
use insights_db::models::status::JobStatus;
use insights_db::repositories::JobRepo;
use insights_db::DbPool;
use insights_executor::{ExecutorUpdate, ReportedStatus};

use crate::error::{AppError, AppResult};

/// Failure reason recorded when a completion names an artifact the store
/// cannot resolve.
pub const ARTIFACT_MISSING_DETAIL: &str = "artifact missing";

/// Inbound side of the pipeline.
pub struct StatusReconciler {
    pool: DbPool,
    artifact_store: Arc<dyn ArtifactStore>,
}

impl StatusReconciler {
    pub fn new(pool: DbPool, artifact_store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            pool,
            artifact_store,
        }
    }

    /// Apply one executor update to its job record.
    ///
    /// Returns the record as stored after the update (which, for an
    /// absorbed duplicate, is the unchanged record). Rejections
    /// (`UnknownJob`, illegal transition, missing required fields) leave
    /// the stored record untouched and surface only to the update
    /// sender.
    pub async fn apply_update(&self, update: &ExecutorUpdate) -> AppResult<TrainingJob> {
        let job = JobRepo::find_by_id(&self.pool, update.job_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "TrainingJob",
                id: update.job_id,
            }))?;

        // Terminal records are immutable: a duplicate of the delivery
        // that terminated the job is absorbed, anything else is illegal.
        if let Some(absorbed) = Self::check_transition(&job, update.status)? {
            return Ok(absorbed);
        }

        let progress = update.progress.clamp(0, 100);

        match update.status {
            ReportedStatus::Running => self.apply_running(update.job_id, progress).await,
            ReportedStatus::Completed => self.apply_completed(update).await,
            ReportedStatus::Failed => self.apply_failed(update).await,
        }
    }

    /// Progress/running update: starts the job on first contact, clamps
    /// progress monotonically afterwards.
    async fn apply_running(&self, job_id: EntityId, progress: i16) -> AppResult<TrainingJob> {
        match JobRepo::mark_running(&self.pool, job_id, progress).await? {
            Some(job) => {
                tracing::debug!(
                    job_id = %job.id,
                    progress = job.progress_percent,
                    "Training job progress updated",
                );
                Ok(job)
            }
            None => self.resolve_lost_race(job_id, ReportedStatus::Running).await,
        }
    }

    /// Completion update: verifies the artifact reference resolves, then
    /// commits the terminal transition and the model record together. An
    /// unresolvable artifact converts the completion into a failure so a
    /// `completed` job can never point at missing bytes.
    async fn apply_completed(&self, update: &ExecutorUpdate) -> AppResult<TrainingJob> {
        let job_id = update.job_id;

        let result_ref = update.result_ref.as_deref().ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "completed update requires result_ref".into(),
            ))
        })?;

        let artifact_exists = self
            .artifact_store
            .exists(result_ref)
            .await
            .map_err(|e| {
                AppError::Core(CoreError::Internal(format!(
                    "Artifact store lookup failed: {e}"
                )))
            })?;

        if !artifact_exists {
            tracing::warn!(
                job_id = %job_id,
                result_ref,
                "Completion reported but artifact is unresolvable, failing job",
            );
            return match JobRepo::fail(&self.pool, job_id, ARTIFACT_MISSING_DETAIL).await? {
                Some(job) => Ok(job),
                None => self.resolve_lost_race(job_id, ReportedStatus::Failed).await,
            };
        }

        let metrics = match &update.metrics {
            Some(metrics) if !metrics.is_object() => {
                return Err(AppError::Core(CoreError::Validation(
                    "metrics must be a JSON object".into(),
                )));
            }
            Some(metrics) => metrics.clone(),
            None => serde_json::json!({}),
        };

        let feature_importance = update
            .feature_importance
            .as_ref()
            .map(|ranking| serde_json::to_value(ranking))
            .transpose()
            .map_err(|e| {
                AppError::Core(CoreError::Internal(format!(
                    "Invalid feature importance: {e}"
                )))
            })?
            .unwrap_or_else(|| serde_json::json!([]));

        match JobRepo::complete(&self.pool, job_id, result_ref, &metrics, &feature_importance)
            .await?
        {
            Some((job, model)) => {
                tracing::info!(
                    job_id = %job.id,
                    model_id = %model.id,
                    result_ref,
                    "Training job completed",
                );
                Ok(job)
            }
            None => {
                self.resolve_lost_race(job_id, ReportedStatus::Completed)
                    .await
            }
        }
    }

    /// Failure update: records the reason, keeps progress where it was.
    async fn apply_failed(&self, update: &ExecutorUpdate) -> AppResult<TrainingJob> {
        let job_id = update.job_id;

        let error_detail = update.error_detail.as_deref().ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "failed update requires error_detail".into(),
            ))
        })?;

        match JobRepo::fail(&self.pool, job_id, error_detail).await? {
            Some(job) => {
                tracing::info!(
                    job_id = %job.id,
                    error_detail,
                    progress = job.progress_percent,
                    "Training job failed",
                );
                Ok(job)
            }
            None => self.resolve_lost_race(job_id, ReportedStatus::Failed).await,
        }
    }

    /// A compare-and-set missed: some concurrent delivery moved the job
    /// into a terminal state between our read and our write. Re-read and
    /// apply the terminal rules against the fresh record.
    async fn resolve_lost_race(
        &self,
        job_id: EntityId,
        requested: ReportedStatus,
    ) -> AppResult<TrainingJob> {
        let job = JobRepo::find_by_id(&self.pool, job_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "TrainingJob",
                id: job_id,
            }))?;

        match Self::check_transition(&job, requested)? {
            Some(absorbed) => Ok(absorbed),
            None => Err(AppError::Core(CoreError::Internal(format!(
                "Job {job_id} was concurrently modified but is not terminal"
            )))),
        }
    }

    /// Gate an update against the state machine.
    ///
    /// `Ok(None)` means the transition is legal and should be applied;
    /// `Ok(Some)` absorbs a duplicate of the stored terminal status;
    /// `Err` rejects an illegal transition, leaving the record untouched.
    fn check_transition(
        job: &TrainingJob,
        requested: ReportedStatus,
    ) -> AppResult<Option<TrainingJob>> {
        let Some(current) = job.status() else {
            return Err(AppError::Core(CoreError::Internal(format!(
                "Job {} has unknown status id {}",
                job.id, job.status_id
            ))));
        };

        let target = match requested {
            ReportedStatus::Running => JobStatus::Running,
            ReportedStatus::Completed => JobStatus::Completed,
            ReportedStatus::Failed => JobStatus::Failed,
        };

        if current.can_transition_to(target) {
            return Ok(None);
        }

        if current.is_terminal() && current == target {
            tracing::debug!(
                job_id = %job.id,
                status = current.as_str(),
                "Duplicate terminal update absorbed",
            );
            Ok(Some(job.clone()))
        } else {
            tracing::warn!(
                job_id = %job.id,
                from = current.as_str(),
                to = target.as_str(),
                "Rejected illegal job transition",
            );
            Err(AppError::Core(CoreError::InvalidTransition {
                from: current.as_str(),
                to: target.as_str(),
            }))
        }
    }
}
