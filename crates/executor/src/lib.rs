//! Client and wire types for the external training executor.
//!
//! The executor is an opaque compute service: the orchestrator hands it a
//! training specification over HTTP and later receives status updates on
//! a callback endpoint. This crate owns both payload shapes and the
//! outbound client; it knows nothing about persistence.

pub mod api;
pub mod payload;

pub use api::{ExecutorApi, ExecutorApiError};
pub use payload::{ExecutorUpdate, FeatureWeight, ReportedStatus, TrainingDispatch};
