//! Well-known evaluation metric names.
//!
//! These must match the keys the executor reports in the `metrics` bag of
//! a completion update. The bag is polymorphic: classification and
//! regression runs produce different sets.

/// Fraction of correct predictions.
pub const METRIC_ACCURACY: &str = "accuracy";

/// Positive predictive value.
pub const METRIC_PRECISION: &str = "precision";

/// True positive rate.
pub const METRIC_RECALL: &str = "recall";

/// Harmonic mean of precision and recall.
pub const METRIC_F1_SCORE: &str = "f1_score";

/// Area under the ROC curve (binary classification only, may be null).
pub const METRIC_ROC_AUC: &str = "roc_auc";

/// Row-major confusion matrix (classification only).
pub const METRIC_CONFUSION_MATRIX: &str = "confusion_matrix";

/// Root mean squared error.
pub const METRIC_RMSE: &str = "rmse";

/// Mean absolute error.
pub const METRIC_MAE: &str = "mae";

/// Coefficient of determination.
pub const METRIC_R2: &str = "r2";

/// Metric keys reported for classification runs.
pub const CLASSIFICATION_METRICS: &[&str] = &[
    METRIC_ACCURACY,
    METRIC_PRECISION,
    METRIC_RECALL,
    METRIC_F1_SCORE,
    METRIC_ROC_AUC,
    METRIC_CONFUSION_MATRIX,
];

/// Metric keys reported for regression runs.
pub const REGRESSION_METRICS: &[&str] = &[METRIC_RMSE, METRIC_MAE, METRIC_R2];
