//! Scripted in-process DeckService used by unit tests
//!
//! Behavior is configured up front (which profile exists, which token
//! login hands out, a queue of scripted status replies) and every call
//! is recorded so tests can assert on call counts and payloads.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};

use super::service::DeckService;
use super::types::{
    DeckSpec, JobStatusResponse, LoginResponse, PersonaUpdateResponse, RegisterRequest,
    RemoteJobStatus, SourceArtifact, SubmitResponse, UserProfile,
};

/// One scripted reply for `job_status`
pub enum ScriptedStatus {
    /// A well-formed status payload
    Reply(JobStatusResponse),
    /// A transport-level failure (connection refused, timeout, ...)
    TransportError,
}

/// Configurable fake DeckGen service
#[derive(Default)]
pub struct MockDeckService {
    /// Profile backing `current_user`; `None` means the token is rejected
    profile: Mutex<Option<UserProfile>>,
    /// Token handed out by `login`; `None` means credentials are rejected
    login_token: Mutex<Option<String>>,
    /// Job id handed out by `submit_document`; `None` rejects the submission
    submit_job_id: Mutex<Option<String>>,
    /// Whether `set_persona` succeeds
    accept_persona: AtomicBool,
    /// Scripted `job_status` replies, consumed one per call
    status_script: Mutex<VecDeque<ScriptedStatus>>,
    /// Delay applied before every `job_status` reply resolves
    status_delay: Mutex<Duration>,
    /// Bytes returned by `download_deck`
    deck_bytes: Mutex<Vec<u8>>,

    // Call recording
    pub login_calls: AtomicUsize,
    pub me_calls: AtomicUsize,
    pub persona_calls: AtomicUsize,
    pub submit_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub last_artifact: Mutex<Option<SourceArtifact>>,
    pub last_spec: Mutex<Option<DeckSpec>>,
    pub last_persona: Mutex<Option<String>>,
}

impl MockDeckService {
    pub fn new() -> Self {
        let mock = Self::default();
        mock.accept_persona.store(true, Ordering::SeqCst);
        mock
    }

    /// A minimal profile for tests
    pub fn sample_profile(persona: Option<&str>) -> UserProfile {
        UserProfile {
            id: 1,
            email: "ada@acme.com".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            company_name: Some("Acme".to_string()),
            persona: persona.map(str::to_string),
        }
    }

    pub fn with_profile(self, profile: UserProfile) -> Self {
        *self.profile.lock() = Some(profile);
        self
    }

    pub fn with_login_token(self, token: &str) -> Self {
        *self.login_token.lock() = Some(token.to_string());
        self
    }

    pub fn with_job(self, job_id: &str) -> Self {
        *self.submit_job_id.lock() = Some(job_id.to_string());
        self
    }

    pub fn rejecting_persona(self) -> Self {
        self.accept_persona.store(false, Ordering::SeqCst);
        self
    }

    pub fn with_deck_bytes(self, bytes: Vec<u8>) -> Self {
        *self.deck_bytes.lock() = bytes;
        self
    }

    /// Queue a scripted status reply
    pub fn push_status(&self, status: ScriptedStatus) {
        self.status_script.lock().push_back(status);
    }

    /// Queue a transport failure for the next poll tick
    pub fn push_transport_error(&self) {
        self.push_status(ScriptedStatus::TransportError);
    }

    /// Queue a `processing` reply with the given step label
    pub fn push_processing(&self, step: &str) {
        self.push_status(ScriptedStatus::Reply(JobStatusResponse {
            job_id: "scripted".to_string(),
            status: RemoteJobStatus::Processing,
            current_step: step.to_string(),
            error_msg: None,
        }));
    }

    /// Queue a terminal `completed` reply
    pub fn push_completed(&self) {
        self.push_status(ScriptedStatus::Reply(JobStatusResponse {
            job_id: "scripted".to_string(),
            status: RemoteJobStatus::Completed,
            current_step: "Completed".to_string(),
            error_msg: None,
        }));
    }

    /// Queue a terminal `error` reply
    pub fn push_errored(&self, message: &str) {
        self.push_status(ScriptedStatus::Reply(JobStatusResponse {
            job_id: "scripted".to_string(),
            status: RemoteJobStatus::Error,
            current_step: "Structuring Narrative".to_string(),
            error_msg: Some(message.to_string()),
        }));
    }

    /// Delay every status reply, to simulate slow responses in flight
    pub fn set_status_delay(&self, delay: Duration) {
        *self.status_delay.lock() = delay;
    }
}

#[async_trait]
impl DeckService for MockDeckService {
    async fn login(&self, _email: &str, _password: &str) -> Result<LoginResponse> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        match self.login_token.lock().clone() {
            Some(token) => Ok(LoginResponse {
                access_token: token,
                token_type: "bearer".to_string(),
                persona: self.profile.lock().as_ref().and_then(|p| p.persona.clone()),
            }),
            None => Err(Error::auth_failed("Incorrect email or password")),
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<UserProfile> {
        let profile = UserProfile {
            id: 1,
            email: request.email.clone(),
            first_name: Some(request.first_name.clone()),
            last_name: Some(request.last_name.clone()),
            company_name: Some(request.company_name.clone()),
            persona: None,
        };
        *self.profile.lock() = Some(profile.clone());
        Ok(profile)
    }

    async fn current_user(&self) -> Result<UserProfile> {
        self.me_calls.fetch_add(1, Ordering::SeqCst);
        self.profile
            .lock()
            .clone()
            .ok_or_else(|| Error::token_rejected("Could not validate credentials"))
    }

    async fn set_persona(&self, persona: &str) -> Result<PersonaUpdateResponse> {
        self.persona_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_persona.lock() = Some(persona.to_string());

        if !self.accept_persona.load(Ordering::SeqCst) {
            return Err(Error::persona_rejected("Failed to update persona"));
        }

        if let Some(profile) = self.profile.lock().as_mut() {
            profile.persona = Some(persona.to_string());
        }
        Ok(PersonaUpdateResponse {
            status: "success".to_string(),
            persona: Some(persona.to_string()),
        })
    }

    async fn submit_document(
        &self,
        artifact: &SourceArtifact,
        spec: &DeckSpec,
    ) -> Result<SubmitResponse> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_artifact.lock() = Some(artifact.clone());
        *self.last_spec.lock() = Some(spec.clone());

        match self.submit_job_id.lock().clone() {
            Some(job_id) => Ok(SubmitResponse {
                job_id,
                status: "processing".to_string(),
            }),
            None => Err(Error::submission_rejected("Only .zip or .md files are supported")),
        }
    }

    async fn job_status(&self, job_id: &str) -> Result<JobStatusResponse> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.status_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match self.status_script.lock().pop_front() {
            Some(ScriptedStatus::Reply(mut reply)) => {
                reply.job_id = job_id.to_string();
                Ok(reply)
            }
            Some(ScriptedStatus::TransportError) => Err(Error::connection_failed(
                "http://localhost:8000/api/status",
                "connection refused",
            )),
            // Script exhausted: keep reporting progress
            None => Ok(JobStatusResponse {
                job_id: job_id.to_string(),
                status: RemoteJobStatus::Processing,
                current_step: "Working".to_string(),
                error_msg: None,
            }),
        }
    }

    async fn download_deck(&self, _job_id: &str) -> Result<Vec<u8>> {
        Ok(self.deck_bytes.lock().clone())
    }
}
