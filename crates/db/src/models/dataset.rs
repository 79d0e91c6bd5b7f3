//! Dataset entity models and DTOs.
//!
//! The dataset store holds uploaded tabular files by storage path plus
//! their column schema. The orchestration core only reads the schema (for
//! target-column validation) and the storage path (handed to the executor
//! as the dataset reference).

use insights_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `datasets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dataset {
    pub id: EntityId,
    pub name: String,
    pub storage_path: String,
    pub row_count: Option<i64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `dataset_columns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DatasetColumn {
    pub id: EntityId,
    pub dataset_id: EntityId,
    pub name: String,
    pub data_type: String,
    pub ordinal: i32,
}

/// One column in a dataset registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterDatasetColumn {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub data_type: String,
}

/// DTO for registering a dataset via `POST /api/v1/datasets`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterDataset {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub storage_path: String,
    pub row_count: Option<i64>,
    #[validate(length(min = 1), nested)]
    pub columns: Vec<RegisterDatasetColumn>,
}

/// A dataset together with its column schema.
#[derive(Debug, Serialize)]
pub struct DatasetWithColumns {
    #[serde(flatten)]
    pub dataset: Dataset,
    pub columns: Vec<DatasetColumn>,
}
