//! Repository for the `trained_models` table.
//!
//! Models are inserted by [`JobRepo::complete`] as part of the completion
//! transaction; this repository is read-only.
//!
//! [`JobRepo::complete`]: crate::repositories::JobRepo::complete

use sqlx::PgPool;

use insights_core::types::EntityId;

use crate::models::trained_model::{ModelListQuery, TrainedModel};

/// Column list for `trained_models` queries.
const MODEL_COLUMNS: &str = "\
    id, job_id, algorithm, problem_type, metrics, feature_importance, \
    artifact_path, submitted_by, created_at";

/// Maximum page size for model listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for model listing.
const DEFAULT_LIMIT: i64 = 50;

/// Read access to trained model records.
pub struct ModelRepo;

impl ModelRepo {
    /// Find a model by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<TrainedModel>, sqlx::Error> {
        let query = format!("SELECT {MODEL_COLUMNS} FROM trained_models WHERE id = $1");
        sqlx::query_as::<_, TrainedModel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the model produced by a specific job, if any.
    pub async fn find_by_job_id(
        pool: &PgPool,
        job_id: EntityId,
    ) -> Result<Option<TrainedModel>, sqlx::Error> {
        let query = format!("SELECT {MODEL_COLUMNS} FROM trained_models WHERE job_id = $1");
        sqlx::query_as::<_, TrainedModel>(&query)
            .bind(job_id)
            .fetch_optional(pool)
            .await
    }

    /// List a submitter's models, newest first, with pagination.
    pub async fn list_by_submitter(
        pool: &PgPool,
        submitted_by: &str,
        params: &ModelListQuery,
    ) -> Result<Vec<TrainedModel>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);

        let query = format!(
            "SELECT {MODEL_COLUMNS} FROM trained_models \
             WHERE submitted_by = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, TrainedModel>(&query)
            .bind(submitted_by)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
