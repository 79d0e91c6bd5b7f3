//! Shared fixtures for database integration tests.

use insights_db::models::dataset::{Dataset, RegisterDataset, RegisterDatasetColumn};
use insights_db::models::job::{SubmitTrainingJob, TrainingJob};
use insights_db::repositories::{DatasetRepo, JobRepo};
use sqlx::PgPool;

/// Register a minimal dataset (columns: age, income, label).
pub async fn seed_dataset(pool: &PgPool) -> Dataset {
    let input = RegisterDataset {
        name: "churn".to_string(),
        storage_path: "datasets/churn.csv".to_string(),
        row_count: Some(1000),
        columns: vec![
            RegisterDatasetColumn {
                name: "age".to_string(),
                data_type: "float".to_string(),
            },
            RegisterDatasetColumn {
                name: "income".to_string(),
                data_type: "float".to_string(),
            },
            RegisterDatasetColumn {
                name: "label".to_string(),
                data_type: "string".to_string(),
            },
        ],
    };

    let (dataset, _columns) = DatasetRepo::register(pool, &input).await.unwrap();
    dataset
}

/// Create a pending classification job against `dataset_id`.
pub async fn submit_job(pool: &PgPool, dataset_id: insights_core::types::EntityId) -> TrainingJob {
    let input = SubmitTrainingJob {
        dataset_id,
        target_column: "label".to_string(),
        algorithm: "random_forest".to_string(),
        problem_type: "classification".to_string(),
        hyperparameters: Some(serde_json::json!({ "n_estimators": 100 })),
        split_ratio: 0.8,
    };

    JobRepo::create(pool, "user-1", &input).await.unwrap()
}
