//! Job controller
//!
//! Drives a single generation job through the
//! `Idle → Submitting → Running → Succeeded/Failed` state machine.
//!
//! The polling task is owned by the controller and tied to a job epoch:
//! `reset` cancels the task and bumps the epoch, and every poll response
//! is checked against the epoch it was started under before it may touch
//! state. A response for a superseded job is discarded even if it arrives
//! after a newer job has started.
//!
//! Transport failures on individual poll ticks are logged and swallowed;
//! only an explicit terminal payload from the service ends the job.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::api::{DeckService, DeckSpec, SourceArtifact};
use crate::error::{Error, Result};

use super::state::{JobState, JobStatus};

// ─────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────

/// Configuration for the job controller
#[derive(Debug, Clone)]
pub struct JobControllerConfig {
    /// Interval between job status requests
    pub poll_interval: Duration,

    /// Event channel capacity
    pub event_queue_size: usize,
}

impl Default for JobControllerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            event_queue_size: 32,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────

/// Progress notifications emitted while a job runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    /// The service acknowledged the submission
    Submitted { job_id: String },

    /// The progress label changed
    Progress { step: String },

    /// Terminal success
    Completed,

    /// Terminal failure (submission or generation)
    Failed { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Controller
// ─────────────────────────────────────────────────────────────────

/// Internal mutable state, shared with the polling task
struct Inner {
    state: JobState,

    /// Current job generation; bumped on every reset
    epoch: u64,

    /// Cancellation handle of the active polling task
    cancel_tx: Option<oneshot::Sender<()>>,
}

/// Owns the lifecycle of at most one active generation job
pub struct JobController {
    config: JobControllerConfig,
    service: Arc<dyn DeckService>,
    inner: Arc<RwLock<Inner>>,
    event_tx: mpsc::Sender<JobEvent>,
}

impl JobController {
    /// Create a controller and the receiving end of its event stream
    pub fn new(
        config: JobControllerConfig,
        service: Arc<dyn DeckService>,
    ) -> (Self, mpsc::Receiver<JobEvent>) {
        let (event_tx, event_rx) = mpsc::channel(config.event_queue_size);

        (
            Self {
                config,
                service,
                inner: Arc::new(RwLock::new(Inner {
                    state: JobState::default(),
                    epoch: 0,
                    cancel_tx: None,
                })),
                event_tx,
            },
            event_rx,
        )
    }

    /// Snapshot of the current job state
    pub fn state(&self) -> JobState {
        self.inner.read().state.clone()
    }

    /// Submit a document for generation and begin polling.
    ///
    /// At most one job may be submitting or running; a second submission
    /// is rejected. When `artifact` is `None` a placeholder document is
    /// substituted, so an empty wizard still satisfies the submission
    /// contract.
    pub async fn submit(
        &self,
        artifact: Option<SourceArtifact>,
        spec: DeckSpec,
    ) -> Result<String> {
        let epoch = {
            let mut inner = self.inner.write();
            if inner.state.status.is_active() {
                return Err(Error::submission_rejected(
                    "A generation job is already in progress",
                ));
            }
            inner.state = JobState::submitting();
            inner.epoch
        };

        let artifact = artifact.unwrap_or_else(SourceArtifact::placeholder);
        info!(file = %artifact.file_name, "Submitting document for generation");

        match self.service.submit_document(&artifact, &spec).await {
            Ok(response) => {
                {
                    let mut inner = self.inner.write();
                    if inner.epoch != epoch {
                        debug!(job_id = %response.job_id, "Submission acknowledged after reset, discarding");
                        return Err(Error::submission_rejected("Submission superseded by reset"));
                    }
                    inner.state.status = JobStatus::Running;
                    inner.state.job_id = Some(response.job_id.clone());
                    inner.state.current_step = Some("Parsing Context".to_string());
                    self.spawn_poller(&mut inner, response.job_id.clone(), epoch);
                }

                info!(job_id = %response.job_id, "Job acknowledged, polling started");
                let _ = self
                    .event_tx
                    .send(JobEvent::Submitted { job_id: response.job_id.clone() })
                    .await;
                Ok(response.job_id)
            }
            Err(e) => {
                let message = match &e {
                    Error::SubmissionRejected { message } => message.clone(),
                    _ => "Failed to start generation.".to_string(),
                };
                let superseded = {
                    let mut inner = self.inner.write();
                    if inner.epoch == epoch {
                        inner.state.status = JobStatus::Failed;
                        inner.state.error = Some(message.clone());
                        false
                    } else {
                        true
                    }
                };
                debug!(error = %e, "Submission failed");
                if !superseded {
                    let _ = self.event_tx.send(JobEvent::Failed { message }).await;
                }
                Err(e)
            }
        }
    }

    /// Discard the current job from any state.
    ///
    /// Cancels the outstanding polling task before clearing job identity,
    /// so a late response for the discarded job can never leak into a new
    /// one.
    pub fn reset(&self) {
        let mut inner = self.inner.write();
        if let Some(cancel) = inner.cancel_tx.take() {
            let _ = cancel.send(());
        }
        inner.epoch += 1;
        inner.state = JobState::default();
        debug!("Job reset");
    }

    /// Start the polling task for an acknowledged job
    fn spawn_poller(&self, inner: &mut Inner, job_id: String, epoch: u64) {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        inner.cancel_tx = Some(cancel_tx);

        let service = self.service.clone();
        let shared = self.inner.clone();
        let event_tx = self.event_tx.clone();
        let interval = self.config.poll_interval;

        tokio::spawn(async move {
            poll_job(service, shared, event_tx, job_id, epoch, interval, cancel_rx).await;
        });
    }
}

// ─────────────────────────────────────────────────────────────────
// Polling Task
// ─────────────────────────────────────────────────────────────────

/// Outcome of applying one status payload to shared state
enum TickOutcome {
    /// Keep polling; carries a progress label change to publish
    Continue(Option<String>),
    /// Terminal state reached or job superseded; stop polling
    Stop(Option<JobEvent>),
}

/// Poll the service until a terminal status or cancellation.
///
/// One request per tick, ticks strictly sequential: the request is
/// awaited inside the loop, so a slow response delays the next tick
/// instead of overlapping it.
async fn poll_job(
    service: Arc<dyn DeckService>,
    inner: Arc<RwLock<Inner>>,
    event_tx: mpsc::Sender<JobEvent>,
    job_id: String,
    epoch: u64,
    interval: Duration,
    mut cancel_rx: oneshot::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // interval() fires immediately; consume that tick so the first
    // request goes out one full interval after acknowledgement
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = &mut cancel_rx => {
                debug!(job_id = %job_id, "Polling cancelled");
                return;
            }

            _ = ticker.tick() => {
                let response = match service.job_status(&job_id).await {
                    Ok(response) => response,
                    Err(e) => {
                        // Transient hiccup: never escalates to job failure
                        debug!(job_id = %job_id, error = %e, "Status poll failed, retrying next tick");
                        continue;
                    }
                };

                let outcome = {
                    let mut guard = inner.write();
                    if guard.epoch != epoch {
                        debug!(job_id = %job_id, "Discarding status for superseded job");
                        TickOutcome::Stop(None)
                    } else {
                        apply_status(&mut guard, &response)
                    }
                };

                match outcome {
                    TickOutcome::Continue(step) => {
                        if let Some(step) = step {
                            let _ = event_tx.send(JobEvent::Progress { step }).await;
                        }
                    }
                    TickOutcome::Stop(event) => {
                        if let Some(event) = event {
                            let _ = event_tx.send(event).await;
                        }
                        return;
                    }
                }
            }
        }
    }
}

/// Fold one status payload into the job state. Caller holds the lock and
/// has already verified the epoch.
fn apply_status(inner: &mut Inner, response: &crate::api::JobStatusResponse) -> TickOutcome {
    use crate::api::RemoteJobStatus;

    match response.status {
        RemoteJobStatus::Completed => {
            inner.state.status = JobStatus::Succeeded;
            inner.state.current_step = Some("Completed".to_string());
            inner.cancel_tx = None;
            info!(job_id = ?inner.state.job_id, "Generation completed");
            TickOutcome::Stop(Some(JobEvent::Completed))
        }
        RemoteJobStatus::Error => {
            let message = response
                .error_msg
                .clone()
                .unwrap_or_else(|| "Generation failed.".to_string());
            inner.state.status = JobStatus::Failed;
            // current_step keeps its last value as historical context
            inner.state.error = Some(message.clone());
            inner.cancel_tx = None;
            info!(job_id = ?inner.state.job_id, "Generation failed");
            TickOutcome::Stop(Some(JobEvent::Failed { message }))
        }
        _ => {
            let changed = inner.state.current_step.as_deref() != Some(response.current_step.as_str())
                && !response.current_step.is_empty();
            if changed {
                inner.state.current_step = Some(response.current_step.clone());
                TickOutcome::Continue(Some(response.current_step.clone()))
            } else {
                TickOutcome::Continue(None)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
