//! Trained model entity model.

use insights_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `trained_models` table.
///
/// Created atomically with the owning job's `completed` transition and
/// read-only afterward.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainedModel {
    pub id: EntityId,
    pub job_id: EntityId,
    pub algorithm: String,
    pub problem_type: String,
    /// Evaluation metrics keyed by metric name; the key set differs
    /// between classification and regression runs.
    pub metrics: serde_json::Value,
    /// Ordered `[{ "name", "weight" }]` ranking, possibly empty.
    pub feature_importance: serde_json::Value,
    pub artifact_path: String,
    pub submitted_by: String,
    pub created_at: Timestamp,
}

/// Query parameters for `GET /api/v1/models`.
#[derive(Debug, Deserialize)]
pub struct ModelListQuery {
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}
