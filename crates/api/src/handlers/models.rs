//! Handlers for the `/models` resource.
//!
//! Trained model records are created by the reconciler as part of the
//! `completed` transition and are read-only here.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use insights_core::error::CoreError;
use insights_core::types::EntityId;
use insights_db::models::trained_model::ModelListQuery;
use insights_db::repositories::ModelRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/models
///
/// List the caller's trained models, newest first.
pub async fn list_models(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ModelListQuery>,
) -> AppResult<impl IntoResponse> {
    let models = ModelRepo::list_by_submitter(&state.pool, &auth.user_id, &params).await?;
    Ok(Json(DataResponse { data: models }))
}

/// GET /api/v1/models/{id}
///
/// Get a trained model record, including its evaluation metrics and
/// feature-importance ranking.
pub async fn get_model(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(model_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let model = ModelRepo::find_by_id(&state.pool, model_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrainedModel",
            id: model_id,
        }))?;

    if model.submitted_by != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot view another user's model".into(),
        )));
    }

    Ok(Json(DataResponse { data: model }))
}
