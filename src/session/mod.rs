//! Authenticated session management
//!
//! [`SessionStore`] owns the bearer token and the signed-in user profile.
//! Durable state (the token and the one-time tour marker) lives behind the
//! [`CredentialStore`] port so tests can substitute an in-memory store.

mod credentials;
mod store;

pub use credentials::{CredentialStore, FsCredentialStore, MemoryCredentialStore};
pub use store::{Session, SessionStore};
