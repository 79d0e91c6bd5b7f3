//! Wire payloads exchanged with the training executor.

use insights_core::types::EntityId;
use serde::{Deserialize, Serialize};

/// Payload POSTed to the executor's `/train` endpoint.
///
/// `job_id` is the idempotency key: a redispatch re-sends the identical
/// payload, and the executor is expected to deduplicate on it. The
/// executor reports progress and results to `result_callback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingDispatch {
    pub job_id: EntityId,
    /// Storage path of the raw dataset bytes.
    pub dataset_ref: String,
    pub target_column: String,
    pub algorithm: String,
    pub problem_type: String,
    pub hyperparameters: serde_json::Value,
    pub split_ratio: f64,
    /// Absolute URL the executor POSTs [`ExecutorUpdate`]s to.
    pub result_callback: String,
}

/// Job status as reported by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportedStatus {
    Running,
    Completed,
    Failed,
}

/// One entry in the feature-importance ranking of a trained model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureWeight {
    pub name: String,
    pub weight: f64,
}

/// Inbound update POSTed by the executor to the result callback.
///
/// Delivery is at-least-once: the same update may arrive multiple times
/// and updates may arrive out of order. The reconciler absorbs
/// duplicates and clamps regressing progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorUpdate {
    pub job_id: EntityId,
    pub status: ReportedStatus,
    /// Progress in percent, 0-100.
    pub progress: i16,
    /// Artifact reference; required on `completed`.
    pub result_ref: Option<String>,
    /// Evaluation metrics keyed by metric name; `completed` only.
    pub metrics: Option<serde_json::Value>,
    /// Ordered feature-importance ranking; `completed` only.
    pub feature_importance: Option<Vec<FeatureWeight>>,
    /// Failure reason; required on `failed`.
    pub error_detail: Option<String>,
}
