/// All primary keys are UUIDs, generated as v7 (time-ordered) at insert.
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
