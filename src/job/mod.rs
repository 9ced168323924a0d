//! Generation job lifecycle
//!
//! [`JobController`] owns at most one active job and drives it through
//! submit → poll → terminal outcome, with the polling task as a
//! first-class cancellable object.

mod controller;
mod state;

pub use controller::{JobController, JobControllerConfig, JobEvent};
pub use state::{JobState, JobStatus};
