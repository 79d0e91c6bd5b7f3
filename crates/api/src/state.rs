use std::sync::Arc;

use insights_core::artifacts::ArtifactStore;

use crate::config::ServerConfig;
use crate::engine::{JobDispatcher, StatusReconciler};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: insights_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Artifact store backing `result_ref` resolution.
    pub artifact_store: Arc<dyn ArtifactStore>,
    /// Outbound side of the pipeline: validation, durable intent, hand-off.
    pub dispatcher: Arc<JobDispatcher>,
    /// Inbound side of the pipeline: executor update reconciliation.
    pub reconciler: Arc<StatusReconciler>,
}
