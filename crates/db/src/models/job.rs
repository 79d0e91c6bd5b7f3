//! Training job entity model and DTOs.

use insights_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::status::{status_name, JobStatus, StatusId};

/// A row from the `training_jobs` table: the authoritative job record.
///
/// The specification fields (`dataset_id` through `submitted_by`) are
/// immutable after creation; only status, progress, result and error
/// fields change, and only through the repository's transition queries.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingJob {
    pub id: EntityId,
    pub status_id: StatusId,
    pub dataset_id: EntityId,
    pub target_column: String,
    pub algorithm: String,
    pub problem_type: String,
    pub hyperparameters: serde_json::Value,
    pub split_ratio: f64,
    pub submitted_by: String,
    pub progress_percent: i16,
    pub result_ref: Option<String>,
    pub error_detail: Option<String>,
    pub created_at: Timestamp,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

impl TrainingJob {
    /// Decoded lifecycle status. `None` only if the row carries a status
    /// id outside the seed set, which the FK constraint prevents.
    pub fn status(&self) -> Option<JobStatus> {
        JobStatus::from_id(self.status_id)
    }
}

/// DTO for submitting a new training job via `POST /api/v1/jobs`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitTrainingJob {
    pub dataset_id: EntityId,
    #[validate(length(min = 1))]
    pub target_column: String,
    #[validate(length(min = 1))]
    pub algorithm: String,
    #[validate(length(min = 1))]
    pub problem_type: String,
    /// Opaque hyperparameter map, passed through to the executor.
    pub hyperparameters: Option<serde_json::Value>,
    /// Train fraction, strictly between 0 and 1 (enforced by the
    /// dispatcher's semantic validation).
    pub split_ratio: f64,
}

/// Query parameters for `GET /api/v1/jobs`.
#[derive(Debug, Deserialize)]
pub struct JobListQuery {
    /// Filter by status ID (e.g. 1 = pending, 4 = failed).
    pub status_id: Option<StatusId>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Point-in-time view returned by the polling endpoint
/// `GET /api/v1/jobs/{id}/status`.
///
/// A detached copy of the row, never a live reference, so a concurrent
/// reconciler write can only produce the pre- or post-update state.
#[derive(Debug, Serialize)]
pub struct JobStatusSnapshot {
    pub job_id: EntityId,
    pub status: &'static str,
    pub progress: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl From<&TrainingJob> for JobStatusSnapshot {
    fn from(job: &TrainingJob) -> Self {
        JobStatusSnapshot {
            job_id: job.id,
            status: status_name(job.status_id),
            progress: job.progress_percent,
            started_at: job.started_at,
            completed_at: job.completed_at,
            result_ref: job.result_ref.clone(),
            error_detail: job.error_detail.clone(),
        }
    }
}
