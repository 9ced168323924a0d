//! The DeckGen service trait and the shared bearer-token slot

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::Result;

use super::types::{
    DeckSpec, JobStatusResponse, LoginResponse, PersonaUpdateResponse, RegisterRequest,
    SourceArtifact, SubmitResponse, UserProfile,
};

// ─────────────────────────────────────────────────────────────────
// Auth Token Slot
// ─────────────────────────────────────────────────────────────────

/// Shared bearer-token slot.
///
/// Authenticated requests read the slot at send time; an empty slot
/// simply omits the Authorization header rather than failing locally.
/// The session store writes the slot on login/bootstrap and clears it
/// on logout or token rejection.
#[derive(Debug, Clone, Default)]
pub struct AuthToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl AuthToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token, if any
    pub fn get(&self) -> Option<String> {
        self.inner.read().clone()
    }

    /// Install a token
    pub fn set(&self, token: impl Into<String>) {
        *self.inner.write() = Some(token.into());
    }

    /// Remove the token
    pub fn clear(&self) {
        *self.inner.write() = None;
    }

    /// Whether a token is currently installed
    pub fn is_present(&self) -> bool {
        self.inner.read().is_some()
    }
}

// ─────────────────────────────────────────────────────────────────
// Service Trait
// ─────────────────────────────────────────────────────────────────

/// Request/response contract of the DeckGen service.
///
/// All the orchestration layers (session, job controller) depend on this
/// trait only, never on the HTTP client directly.
#[async_trait]
pub trait DeckService: Send + Sync {
    /// Exchange credentials for a bearer token
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse>;

    /// Create an account; does not sign in
    async fn register(&self, request: &RegisterRequest) -> Result<UserProfile>;

    /// Fetch the profile of the user the current token belongs to
    async fn current_user(&self) -> Result<UserProfile>;

    /// Store a persona on the remote profile
    async fn set_persona(&self, persona: &str) -> Result<PersonaUpdateResponse>;

    /// Submit a source document for deck generation
    async fn submit_document(
        &self,
        artifact: &SourceArtifact,
        spec: &DeckSpec,
    ) -> Result<SubmitResponse>;

    /// Fetch the current status of a generation job
    async fn job_status(&self, job_id: &str) -> Result<JobStatusResponse>;

    /// Download the finished deck for a job
    async fn download_deck(&self, job_id: &str) -> Result<Vec<u8>>;
}
