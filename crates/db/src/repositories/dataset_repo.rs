//! Repository for the `datasets` and `dataset_columns` tables.

use sqlx::PgPool;
use uuid::Uuid;

use insights_core::types::EntityId;

use crate::models::dataset::{Dataset, DatasetColumn, RegisterDataset};

/// Column list for `datasets` queries.
const DATASET_COLUMNS: &str = "id, name, storage_path, row_count, created_at, updated_at";

/// Column list for `dataset_columns` queries.
const COLUMN_COLUMNS: &str = "id, dataset_id, name, data_type, ordinal";

/// Provides CRUD operations for datasets and their column schemas.
pub struct DatasetRepo;

impl DatasetRepo {
    /// Register a dataset together with its column schema in one
    /// transaction. Column ordinals follow the submitted order.
    pub async fn register(
        pool: &PgPool,
        input: &RegisterDataset,
    ) -> Result<(Dataset, Vec<DatasetColumn>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_dataset = format!(
            "INSERT INTO datasets (id, name, storage_path, row_count) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {DATASET_COLUMNS}"
        );
        let dataset = sqlx::query_as::<_, Dataset>(&insert_dataset)
            .bind(Uuid::now_v7())
            .bind(&input.name)
            .bind(&input.storage_path)
            .bind(input.row_count)
            .fetch_one(&mut *tx)
            .await?;

        let insert_column = format!(
            "INSERT INTO dataset_columns (id, dataset_id, name, data_type, ordinal) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMN_COLUMNS}"
        );
        let mut columns = Vec::with_capacity(input.columns.len());
        for (ordinal, column) in input.columns.iter().enumerate() {
            let row = sqlx::query_as::<_, DatasetColumn>(&insert_column)
                .bind(Uuid::now_v7())
                .bind(dataset.id)
                .bind(&column.name)
                .bind(&column.data_type)
                .bind(ordinal as i32)
                .fetch_one(&mut *tx)
                .await?;
            columns.push(row);
        }

        tx.commit().await?;
        Ok((dataset, columns))
    }

    /// Find a dataset by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: EntityId,
    ) -> Result<Option<Dataset>, sqlx::Error> {
        let query = format!("SELECT {DATASET_COLUMNS} FROM datasets WHERE id = $1");
        sqlx::query_as::<_, Dataset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a dataset's column schema in ordinal order.
    pub async fn list_columns(
        pool: &PgPool,
        dataset_id: EntityId,
    ) -> Result<Vec<DatasetColumn>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMN_COLUMNS} FROM dataset_columns \
             WHERE dataset_id = $1 \
             ORDER BY ordinal"
        );
        sqlx::query_as::<_, DatasetColumn>(&query)
            .bind(dataset_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch only the column names, in ordinal order.
    pub async fn column_names(
        pool: &PgPool,
        dataset_id: EntityId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT name FROM dataset_columns WHERE dataset_id = $1 ORDER BY ordinal",
        )
        .bind(dataset_id)
        .fetch_all(pool)
        .await
    }

    /// List datasets, newest first. Callers clamp `limit`/`offset`.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Dataset>, sqlx::Error> {
        let query = format!(
            "SELECT {DATASET_COLUMNS} FROM datasets \
             ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Dataset>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
