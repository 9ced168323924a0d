//! HTTP gateway to the DeckGen service
//!
//! The service contract is expressed as the [`DeckService`] trait so that
//! session and job logic can be exercised against an in-process fake. The
//! production implementation is [`HttpDeckService`], a thin reqwest client
//! that attaches the bearer token from the shared [`AuthToken`] slot on
//! every request.

mod http;
mod service;
mod types;

pub use http::HttpDeckService;
pub use service::{AuthToken, DeckService};
pub use types::{
    DeckSpec, JobStatusResponse, LoginResponse, PersonaUpdateResponse, RegisterRequest,
    RemoteJobStatus, SourceArtifact, SubmitResponse, UserProfile,
};

#[cfg(test)]
pub mod mock;
