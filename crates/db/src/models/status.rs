//! Job status enum mapping to the `job_statuses` lookup table.
//!
//! The variant discriminants match the seed data in the initial migration.
//! Transition legality lives here so every status rule is checked against
//! one table.

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

/// Training job lifecycle status.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending = 1,
    Running = 2,
    Completed = 3,
    Failed = 4,
}

impl JobStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Decode a database status ID.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(JobStatus::Pending),
            2 => Some(JobStatus::Running),
            3 => Some(JobStatus::Completed),
            4 => Some(JobStatus::Failed),
            _ => None,
        }
    }

    /// Wire name of the status, as exposed in API responses.
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Whether this status admits no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Whether the state machine permits moving from `self` to `next`.
    ///
    /// `Running -> Running` is legal and carries progress-only updates.
    pub fn can_transition_to(self, next: JobStatus) -> bool {
        use JobStatus::*;
        matches!(
            (self, next),
            (Pending, Running)
                | (Pending, Completed)
                | (Pending, Failed)
                | (Running, Running)
                | (Running, Completed)
                | (Running, Failed)
        )
    }
}

impl From<JobStatus> for StatusId {
    fn from(value: JobStatus) -> Self {
        value as StatusId
    }
}

/// Wire name for a raw status ID; `"unknown"` for ids outside the seed set.
pub fn status_name(id: StatusId) -> &'static str {
    JobStatus::from_id(id).map_or("unknown", JobStatus::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ids_match_seed_data() {
        assert_eq!(JobStatus::Pending.id(), 1);
        assert_eq!(JobStatus::Running.id(), 2);
        assert_eq!(JobStatus::Completed.id(), 3);
        assert_eq!(JobStatus::Failed.id(), 4);
    }

    #[test]
    fn from_id_round_trips() {
        for status in [
            JobStatus::Pending,
            JobStatus::Running,
            JobStatus::Completed,
            JobStatus::Failed,
        ] {
            assert_eq!(JobStatus::from_id(status.id()), Some(status));
        }
        assert_eq!(JobStatus::from_id(0), None);
        assert_eq!(JobStatus::from_id(99), None);
    }

    #[test]
    fn terminal_statuses() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn legal_transitions() {
        use JobStatus::*;
        assert!(Pending.can_transition_to(Running));
        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Failed));
        assert!(Running.can_transition_to(Running));
        assert!(Running.can_transition_to(Completed));
        assert!(Running.can_transition_to(Failed));
    }

    #[test]
    fn terminal_states_admit_no_transitions() {
        use JobStatus::*;
        for next in [Pending, Running, Completed, Failed] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Failed.can_transition_to(next));
        }
    }

    #[test]
    fn no_transition_back_to_pending() {
        assert!(!JobStatus::Running.can_transition_to(JobStatus::Pending));
        assert!(!JobStatus::Pending.can_transition_to(JobStatus::Pending));
    }

    #[test]
    fn status_name_falls_back_to_unknown() {
        assert_eq!(status_name(2), "running");
        assert_eq!(status_name(42), "unknown");
    }
}
