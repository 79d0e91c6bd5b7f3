//! Training specification validation.
//!
//! The dispatcher runs these checks before a job record is created, so a
//! rejected specification leaves no state behind.

use crate::error::CoreError;

/// Validate that the train/test split ratio lies strictly between 0 and 1.
pub fn validate_split_ratio(split_ratio: f64) -> Result<(), CoreError> {
    if split_ratio > 0.0 && split_ratio < 1.0 {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "split_ratio must be strictly between 0 and 1, got {split_ratio}"
        )))
    }
}

/// Validate that the target column is one of the dataset's known columns.
pub fn validate_target_column(target: &str, columns: &[String]) -> Result<(), CoreError> {
    if target.trim().is_empty() {
        return Err(CoreError::Validation(
            "target_column must not be empty".into(),
        ));
    }
    if columns.iter().any(|c| c == target) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Target column '{target}' is not a column of the dataset"
        )))
    }
}

/// Validate that the hyperparameter map, when provided, is a JSON object.
///
/// The executor interprets the individual keys; the orchestrator only
/// guarantees the container shape.
pub fn validate_hyperparameters(hyperparameters: &serde_json::Value) -> Result<(), CoreError> {
    if hyperparameters.is_object() {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "hyperparameters must be a JSON object".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn split_ratio_bounds_are_exclusive() {
        assert!(validate_split_ratio(0.8).is_ok());
        assert!(validate_split_ratio(0.0).is_err());
        assert!(validate_split_ratio(1.0).is_err());
        assert!(validate_split_ratio(-0.1).is_err());
        assert!(validate_split_ratio(1.5).is_err());
    }

    #[test]
    fn target_column_must_exist_in_schema() {
        let cols = columns(&["age", "income", "label"]);
        assert!(validate_target_column("label", &cols).is_ok());
        assert!(validate_target_column("churn", &cols).is_err());
    }

    #[test]
    fn empty_target_column_is_rejected() {
        let cols = columns(&["label"]);
        assert!(validate_target_column("", &cols).is_err());
        assert!(validate_target_column("   ", &cols).is_err());
    }

    #[test]
    fn hyperparameters_must_be_an_object() {
        assert!(validate_hyperparameters(&serde_json::json!({})).is_ok());
        assert!(validate_hyperparameters(&serde_json::json!({"n_estimators": 100})).is_ok());
        assert!(validate_hyperparameters(&serde_json::json!([1, 2])).is_err());
        assert!(validate_hyperparameters(&serde_json::json!("42")).is_err());
    }
}
