pub mod dataset;
pub mod job;
pub mod status;
pub mod trained_model;
