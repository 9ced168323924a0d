//! Client-side job state

use std::fmt;

/// Where a generation job is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// No job; the wizard is editable
    Idle,
    /// Submission request in flight, not yet acknowledged
    Submitting,
    /// Acknowledged by the service; polling for progress
    Running,
    /// The service reported completion; the deck is downloadable
    Succeeded,
    /// Submission failed, or the service reported a terminal failure
    Failed,
}

impl JobStatus {
    /// Whether a job currently occupies the single active slot
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Submitting | JobStatus::Running)
    }

    /// Whether the job reached an end state
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::Idle
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobStatus::Idle => "idle",
            JobStatus::Submitting => "submitting",
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
        };
        write!(f, "{}", label)
    }
}

/// Snapshot of the active job
#[derive(Debug, Clone, Default)]
pub struct JobState {
    /// Lifecycle position
    pub status: JobStatus,

    /// Identifier assigned by the service; set exactly once per job
    pub job_id: Option<String>,

    /// Last progress label reported by the service. Retained on failure
    /// as historical context only.
    pub current_step: Option<String>,

    /// Failure message; present only while `Failed`
    pub error: Option<String>,
}

impl JobState {
    /// Fresh job entering submission
    pub(crate) fn submitting() -> Self {
        Self {
            status: JobStatus::Submitting,
            job_id: None,
            current_step: None,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(JobStatus::Submitting.is_active());
        assert!(JobStatus::Running.is_active());
        assert!(!JobStatus::Idle.is_active());
        assert!(!JobStatus::Succeeded.is_active());

        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
    }

    #[test]
    fn test_default_state_is_idle() {
        let state = JobState::default();
        assert_eq!(state.status, JobStatus::Idle);
        assert!(state.job_id.is_none());
        assert!(state.current_step.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(JobStatus::Running.to_string(), "running");
        assert_eq!(JobStatus::Succeeded.to_string(), "succeeded");
    }
}
