pub mod datasets;
pub mod executor_updates;
pub mod jobs;
pub mod models;
