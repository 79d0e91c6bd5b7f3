//! Handlers for the `/jobs` resource.
//!
//! All endpoints require a principal via [`AuthUser`]. Callers only ever
//! see their own jobs.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use insights_core::error::CoreError;
use insights_core::types::EntityId;
use insights_db::models::job::{JobListQuery, JobStatusSnapshot, SubmitTrainingJob, TrainingJob};
use insights_db::repositories::JobRepo;

use crate::engine::DeliveryOutcome;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for submit and redispatch: the job plus the hand-off
/// outcome, so a caller can distinguish "accepted and delivered" from
/// "accepted, delivery pending".
#[derive(Debug, Serialize)]
pub struct DispatchedJob {
    pub job: TrainingJob,
    #[serde(flatten)]
    pub delivery: DeliveryOutcome,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a job by ID and verify the caller owns it.
///
/// Returns `NotFound` if the job does not exist, `Forbidden` if the
/// caller is not the submitter. `action` is used in the error message
/// (e.g. "view", "redispatch").
async fn find_and_authorize(
    pool: &sqlx::PgPool,
    job_id: EntityId,
    auth: &AuthUser,
    action: &str,
) -> AppResult<TrainingJob> {
    let job = JobRepo::find_by_id(pool, job_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrainingJob",
            id: job_id,
        }))?;

    if job.submitted_by != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Cannot {action} another user's job"
        ))));
    }

    Ok(job)
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /api/v1/jobs
///
/// Submit a new training job. Returns 201 with the created job and the
/// hand-off outcome. The job starts in `pending` status; a failed
/// hand-off is reported as a delivery warning, not an error, and the
/// job id can be polled either way.
pub async fn submit_job(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitTrainingJob>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let (job, delivery) = state.dispatcher.submit(&auth.user_id, &input).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: DispatchedJob { job, delivery },
        }),
    ))
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs
///
/// List the caller's jobs, newest first. Supports optional `status_id`,
/// `limit`, and `offset` query parameters.
pub async fn list_jobs(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> AppResult<impl IntoResponse> {
    let jobs = JobRepo::list_by_submitter(&state.pool, &auth.user_id, &params).await?;
    Ok(Json(DataResponse { data: jobs }))
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs/{id}
///
/// Get a single job record, including its full specification.
pub async fn get_job(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let job = find_and_authorize(&state.pool, job_id, &auth, "view").await?;
    Ok(Json(DataResponse { data: job }))
}

// ---------------------------------------------------------------------------
// Poll status
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs/{id}/status
///
/// Point-in-time status snapshot, designed for short-interval polling:
/// one keyed lookup, no side effects, no server-held subscription state.
/// Clients keep polling while `status` is `pending` or `running` and
/// stop on a terminal status; on `completed` the snapshot carries the
/// `result_ref` needed to fetch the model.
pub async fn get_job_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let job = find_and_authorize(&state.pool, job_id, &auth, "poll").await?;
    Ok(Json(DataResponse {
        data: JobStatusSnapshot::from(&job),
    }))
}

// ---------------------------------------------------------------------------
// Redispatch
// ---------------------------------------------------------------------------

/// POST /api/v1/jobs/{id}/redispatch
///
/// Re-send a pending job's specification to the executor, reusing the
/// job id as the idempotency key. Intended for jobs whose original
/// hand-off failed. Returns 409 if the job is no longer pending.
pub async fn redispatch_job(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    find_and_authorize(&state.pool, job_id, &auth, "redispatch").await?;

    let (job, delivery) = state.dispatcher.redispatch(job_id).await?;

    tracing::info!(
        job_id = %job.id,
        delivered = delivery.delivered,
        user_id = %auth.user_id,
        "Training job redispatched",
    );

    Ok(Json(DataResponse {
        data: DispatchedJob { job, delivery },
    }))
}
