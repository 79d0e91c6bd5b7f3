//! Algorithm registry for the training executor.
//!
//! The executor selects the concrete estimator from these identifiers;
//! this module only answers "is this a known algorithm for this problem
//! type" so the dispatcher can reject bad specifications before a job
//! record is created.

use crate::error::CoreError;

/// Classification problem type identifier.
pub const PROBLEM_CLASSIFICATION: &str = "classification";

/// Regression problem type identifier.
pub const PROBLEM_REGRESSION: &str = "regression";

/// Valid problem type values.
const VALID_PROBLEM_TYPES: &[&str] = &[PROBLEM_CLASSIFICATION, PROBLEM_REGRESSION];

/// Algorithms the executor supports for classification targets.
pub const CLASSIFICATION_ALGORITHMS: &[&str] = &[
    "logistic_regression",
    "random_forest",
    "gradient_boosting",
    "knn",
];

/// Algorithms the executor supports for regression targets.
pub const REGRESSION_ALGORITHMS: &[&str] = &[
    "linear_regression",
    "random_forest",
    "gradient_boosting",
    "knn",
];

/// Validate that `problem_type` is either `"classification"` or `"regression"`.
pub fn validate_problem_type(problem_type: &str) -> Result<(), CoreError> {
    if VALID_PROBLEM_TYPES.contains(&problem_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown problem type '{problem_type}'. Must be one of: {VALID_PROBLEM_TYPES:?}"
        )))
    }
}

/// Validate that `algorithm` is known and supported for `problem_type`.
pub fn validate_algorithm(problem_type: &str, algorithm: &str) -> Result<(), CoreError> {
    validate_problem_type(problem_type)?;

    let supported = if problem_type == PROBLEM_CLASSIFICATION {
        CLASSIFICATION_ALGORITHMS
    } else {
        REGRESSION_ALGORITHMS
    };

    if supported.contains(&algorithm) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown algorithm '{algorithm}' for problem type '{problem_type}'. \
             Must be one of: {supported:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_classification_algorithms_pass() {
        for algo in CLASSIFICATION_ALGORITHMS {
            assert!(validate_algorithm(PROBLEM_CLASSIFICATION, algo).is_ok());
        }
    }

    #[test]
    fn known_regression_algorithms_pass() {
        for algo in REGRESSION_ALGORITHMS {
            assert!(validate_algorithm(PROBLEM_REGRESSION, algo).is_ok());
        }
    }

    #[test]
    fn linear_regression_is_not_a_classifier() {
        let err = validate_algorithm(PROBLEM_CLASSIFICATION, "linear_regression");
        assert!(err.is_err());
    }

    #[test]
    fn logistic_regression_is_not_a_regressor() {
        let err = validate_algorithm(PROBLEM_REGRESSION, "logistic_regression");
        assert!(err.is_err());
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        assert!(validate_algorithm(PROBLEM_CLASSIFICATION, "svm").is_err());
    }

    #[test]
    fn unknown_problem_type_is_rejected() {
        assert!(validate_problem_type("clustering").is_err());
        assert!(validate_algorithm("clustering", "random_forest").is_err());
    }
}
