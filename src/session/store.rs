//! Session store
//!
//! Owns the in-memory session (token + profile) and keeps it consistent
//! with the shared auth slot and the persisted credentials: a session
//! value exists exactly when a validated token exists, and an invalid
//! token always collapses to the signed-out state with the persisted
//! token purged.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::api::{AuthToken, DeckService, RegisterRequest, UserProfile};
use crate::error::{Error, Result};

use super::credentials::CredentialStore;

/// An authenticated session
#[derive(Debug, Clone)]
pub struct Session {
    /// The validated bearer token
    pub token: String,
    /// Profile of the signed-in user
    pub user: UserProfile,
}

/// Owns authentication state for the lifetime of the process
pub struct SessionStore {
    service: Arc<dyn DeckService>,
    credentials: Box<dyn CredentialStore>,
    auth: AuthToken,
    session: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new(
        service: Arc<dyn DeckService>,
        credentials: Box<dyn CredentialStore>,
        auth: AuthToken,
    ) -> Self {
        Self {
            service,
            credentials,
            auth,
            session: RwLock::new(None),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Restore a session from a persisted token, if one exists and still
    /// validates.
    ///
    /// Never fails: an expired or rejected token is expected at startup,
    /// so every failure path lands in the signed-out state with the
    /// stale token purged. Returns whether a session was established.
    pub async fn bootstrap(&self) -> bool {
        let token = match self.credentials.load_token() {
            Some(token) => token,
            None => {
                debug!("No persisted token, starting signed out");
                return false;
            }
        };

        self.auth.set(token.clone());
        match self.service.current_user().await {
            Ok(user) => {
                debug!(email = %user.email, "Session restored from persisted token");
                *self.session.write() = Some(Session { token, user });
                true
            }
            Err(e) => {
                debug!(error = %e, "Persisted token rejected, discarding");
                self.auth.clear();
                if let Err(e) = self.credentials.clear_token() {
                    warn!(error = %e, "Failed to remove stale token");
                }
                *self.session.write() = None;
                false
            }
        }
    }

    /// Exchange credentials for a session.
    ///
    /// On success the token is persisted and the fresh profile returned.
    /// Every failure surfaces as an authentication error carrying the
    /// server-provided detail when available.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        let response = match self.service.login(email, password).await {
            Ok(response) => response,
            Err(e) if e.is_auth() => return Err(e),
            Err(e) => {
                debug!(error = %e, "Login transport failure");
                return Err(Error::auth_failed("Authentication failed"));
            }
        };

        self.auth.set(response.access_token.clone());
        if let Err(e) = self.credentials.save_token(&response.access_token) {
            warn!(error = %e, "Failed to persist session token");
        }

        // The login response only carries the persona; fetch the full
        // profile while the token is known fresh
        match self.service.current_user().await {
            Ok(user) => {
                *self.session.write() = Some(Session {
                    token: response.access_token,
                    user: user.clone(),
                });
                Ok(user)
            }
            Err(e) => {
                debug!(error = %e, "Profile fetch failed right after login");
                self.auth.clear();
                if let Err(e) = self.credentials.clear_token() {
                    warn!(error = %e, "Failed to remove token");
                }
                *self.session.write() = None;
                Err(Error::auth_failed("Authentication failed"))
            }
        }
    }

    /// Create an account, then sign in with the same credentials.
    ///
    /// The fresh account has no persona, so the caller always proceeds
    /// to persona selection next.
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        company_name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile> {
        let request = RegisterRequest {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            company_name: company_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.service.register(&request).await {
            Ok(_) => {}
            Err(e) if e.is_auth() => return Err(e),
            Err(e) => {
                debug!(error = %e, "Registration transport failure");
                return Err(Error::auth_failed("Authentication failed"));
            }
        }

        self.login(email, password).await
    }

    /// Update the persona remotely, then mutate the local profile in
    /// place without a full session reload.
    pub async fn set_persona(&self, persona_id: &str) -> Result<()> {
        if self.session.read().is_none() {
            return Err(Error::NotSignedIn);
        }

        match self.service.set_persona(persona_id).await {
            Ok(_) => {}
            Err(e @ Error::PersonaRejected { .. }) => return Err(e),
            Err(e) => {
                debug!(error = %e, "Persona update failed");
                return Err(Error::persona_rejected("Failed to update persona"));
            }
        }

        if let Some(session) = self.session.write().as_mut() {
            session.user.persona = Some(persona_id.to_string());
        }
        Ok(())
    }

    /// Drop the session and the persisted token. Always succeeds and has
    /// no remote side effect.
    pub fn logout(&self) {
        self.auth.clear();
        if let Err(e) = self.credentials.clear_token() {
            warn!(error = %e, "Failed to remove persisted token");
        }
        *self.session.write() = None;
        debug!("Signed out");
    }

    // ─────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────

    /// Snapshot of the current session, if signed in
    pub fn current(&self) -> Option<Session> {
        self.session.read().clone()
    }

    /// Whether a validated session exists
    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    /// Persona stored on the signed-in profile, if any
    pub fn persona(&self) -> Option<String> {
        self.session.read().as_ref().and_then(|s| s.user.persona.clone())
    }

    // ─────────────────────────────────────────────────────────────
    // First-Run Tour
    // ─────────────────────────────────────────────────────────────

    /// Whether the first-run tour was already shown
    pub fn tour_seen(&self) -> bool {
        self.credentials.tour_seen()
    }

    /// Record that the first-run tour was shown
    pub fn mark_tour_seen(&self) {
        if let Err(e) = self.credentials.mark_tour_seen() {
            warn!(error = %e, "Failed to persist tour marker");
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockDeckService;
    use crate::session::MemoryCredentialStore;

    fn store_with(
        mock: MockDeckService,
        credentials: MemoryCredentialStore,
    ) -> (SessionStore, AuthToken) {
        let auth = AuthToken::new();
        let store = SessionStore::new(Arc::new(mock), Box::new(credentials), auth.clone());
        (store, auth)
    }

    #[tokio::test]
    async fn test_bootstrap_without_token_stays_signed_out() {
        let mock = MockDeckService::new();
        let (store, auth) = store_with(mock, MemoryCredentialStore::new());

        assert!(!store.bootstrap().await);
        assert!(!store.is_authenticated());
        assert!(!auth.is_present());
    }

    #[tokio::test]
    async fn test_bootstrap_restores_valid_session() {
        let mock = MockDeckService::new()
            .with_profile(MockDeckService::sample_profile(Some("cto")));
        let (store, auth) = store_with(mock, MemoryCredentialStore::with_token("tok-1"));

        assert!(store.bootstrap().await);
        assert!(store.is_authenticated());
        assert_eq!(store.persona().as_deref(), Some("cto"));
        assert_eq!(auth.get().as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_bootstrap_with_rejected_token_purges_it() {
        // No profile configured: the token is rejected
        let mock = MockDeckService::new();
        let credentials = MemoryCredentialStore::with_token("tok-expired");
        let auth = AuthToken::new();
        let store = SessionStore::new(Arc::new(mock), Box::new(credentials), auth.clone());

        assert!(!store.bootstrap().await);
        assert!(!store.is_authenticated());
        assert!(!auth.is_present());

        // The stale token must be gone: a second bootstrap does not even
        // attempt validation
        assert!(!store.bootstrap().await);
    }

    #[tokio::test]
    async fn test_login_persists_token_and_fetches_profile() {
        let mock = MockDeckService::new()
            .with_profile(MockDeckService::sample_profile(None))
            .with_login_token("tok-fresh");
        let (store, auth) = store_with(mock, MemoryCredentialStore::new());

        let user = store.login("ada@acme.com", "pw").await.unwrap();
        assert_eq!(user.email, "ada@acme.com");
        assert!(user.persona.is_none());
        assert!(store.is_authenticated());
        assert_eq!(auth.get().as_deref(), Some("tok-fresh"));
    }

    #[tokio::test]
    async fn test_login_rejection_surfaces_auth_error() {
        let mock = MockDeckService::new(); // no login token: credentials rejected
        let (store, auth) = store_with(mock, MemoryCredentialStore::new());

        let err = store.login("ada@acme.com", "wrong").await.unwrap_err();
        assert!(err.is_auth());
        assert!(err.to_string().contains("Incorrect email or password"));
        assert!(!store.is_authenticated());
        assert!(!auth.is_present());
    }

    #[tokio::test]
    async fn test_register_signs_in_without_persona() {
        let mock = MockDeckService::new().with_login_token("tok-new");
        let (store, _) = store_with(mock, MemoryCredentialStore::new());

        let user = store
            .register("Grace", "Hopper", "Navy", "grace@navy.mil", "pw")
            .await
            .unwrap();

        assert!(store.is_authenticated());
        assert!(user.persona.is_none(), "a fresh account has no persona");
    }

    #[tokio::test]
    async fn test_set_persona_mutates_profile_in_place() {
        let mock = Arc::new(
            MockDeckService::new()
                .with_profile(MockDeckService::sample_profile(None))
                .with_login_token("tok-1"),
        );
        let auth = AuthToken::new();
        let store = SessionStore::new(
            mock.clone(),
            Box::new(MemoryCredentialStore::new()),
            auth,
        );

        store.login("ada@acme.com", "pw").await.unwrap();
        assert!(store.persona().is_none());
        let profile_fetches = mock.me_calls.load(std::sync::atomic::Ordering::SeqCst);

        store.set_persona("cto").await.unwrap();
        assert_eq!(store.persona().as_deref(), Some("cto"));

        // Exactly one remote update, no profile re-fetch
        assert_eq!(mock.persona_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(
            mock.me_calls.load(std::sync::atomic::Ordering::SeqCst),
            profile_fetches,
            "set_persona must mutate locally, not reload the profile"
        );
    }

    #[tokio::test]
    async fn test_set_persona_rejection_leaves_session_untouched() {
        let mock = MockDeckService::new()
            .with_profile(MockDeckService::sample_profile(None))
            .with_login_token("tok-1")
            .rejecting_persona();
        let (store, _) = store_with(mock, MemoryCredentialStore::new());

        store.login("ada@acme.com", "pw").await.unwrap();
        let err = store.set_persona("cto").await.unwrap_err();

        assert!(matches!(err, Error::PersonaRejected { .. }));
        assert!(store.is_authenticated());
        assert!(store.persona().is_none());
    }

    #[tokio::test]
    async fn test_set_persona_without_session() {
        let mock = MockDeckService::new();
        let (store, _) = store_with(mock, MemoryCredentialStore::new());

        let err = store.set_persona("cto").await.unwrap_err();
        assert!(matches!(err, Error::NotSignedIn));
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let mock = MockDeckService::new()
            .with_profile(MockDeckService::sample_profile(Some("cto")));
        let credentials = MemoryCredentialStore::with_token("tok-1");
        let auth = AuthToken::new();
        let store = SessionStore::new(Arc::new(mock), Box::new(credentials), auth.clone());

        assert!(store.bootstrap().await);
        store.logout();

        assert!(!store.is_authenticated());
        assert!(!auth.is_present());
        // Persisted token removed: the next bootstrap starts signed out
        assert!(!store.bootstrap().await);
    }

    #[tokio::test]
    async fn test_tour_flag_round_trip() {
        let mock = MockDeckService::new();
        let (store, _) = store_with(mock, MemoryCredentialStore::new());

        assert!(!store.tour_seen());
        store.mark_tour_seen();
        assert!(store.tour_seen());
    }
}
