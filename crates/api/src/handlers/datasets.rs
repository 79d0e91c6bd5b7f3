//! Handlers for the `/datasets` resource.
//!
//! The dataset store itself (upload, parsing, byte storage) lives
//! upstream; this surface registers a stored dataset's location and
//! column schema so training jobs can be validated against it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use insights_core::error::CoreError;
use insights_core::types::EntityId;
use insights_db::models::dataset::{DatasetWithColumns, RegisterDataset};
use insights_db::repositories::DatasetRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{clamp_limit, clamp_offset, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/datasets
///
/// Register a dataset and its column schema. Returns 201 with the
/// dataset and columns; 409 if the name is already taken.
pub async fn register_dataset(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RegisterDataset>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let (dataset, columns) = DatasetRepo::register(&state.pool, &input).await?;

    tracing::info!(
        dataset_id = %dataset.id,
        name = %dataset.name,
        column_count = columns.len(),
        user_id = %auth.user_id,
        "Dataset registered",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: DatasetWithColumns { dataset, columns },
        }),
    ))
}

/// GET /api/v1/datasets
///
/// List registered datasets, newest first.
pub async fn list_datasets(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, 50, 100);
    let offset = clamp_offset(params.offset);

    let datasets = DatasetRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: datasets }))
}

/// GET /api/v1/datasets/{id}
///
/// Get a dataset together with its column schema.
pub async fn get_dataset(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(dataset_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let dataset = DatasetRepo::find_by_id(&state.pool, dataset_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dataset",
            id: dataset_id,
        }))?;

    let columns = DatasetRepo::list_columns(&state.pool, dataset_id).await?;

    Ok(Json(DataResponse {
        data: DatasetWithColumns { dataset, columns },
    }))
}
