//! Inbound update channel from the training executor.
//!
//! The executor POSTs progress and result updates here (the URL is handed
//! to it as `result_callback` at dispatch time). Rejections surface only
//! to the executor; end users observe the job record itself via polling.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use insights_db::models::job::JobStatusSnapshot;
use insights_executor::ExecutorUpdate;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/executor/updates
///
/// Apply one executor-reported update to its job record. Returns the
/// stored record's snapshot after the update, so the executor can
/// observe what the orchestrator accepted. Duplicate deliveries of a
/// terminal update return 200 with the unchanged record; unknown jobs
/// return 404; illegal transitions return 409.
pub async fn apply_update(
    State(state): State<AppState>,
    Json(update): Json<ExecutorUpdate>,
) -> AppResult<impl IntoResponse> {
    let job = state.reconciler.apply_update(&update).await?;
    Ok(Json(DataResponse {
        data: JobStatusSnapshot::from(&job),
    }))
}
