//! reqwest implementation of the DeckGen service contract

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::StatusCode;
use tracing::debug;

use crate::config::ServiceSettings;
use crate::error::{Error, Result};

use super::service::{AuthToken, DeckService};
use super::types::{
    DeckSpec, JobStatusResponse, LoginResponse, PersonaUpdateResponse, RegisterRequest,
    SourceArtifact, SubmitResponse, UserProfile,
};

/// HTTP client for the DeckGen service
pub struct HttpDeckService {
    base_url: String,
    client: reqwest::Client,
    auth: AuthToken,
}

impl HttpDeckService {
    /// Create a new client from service settings
    pub fn new(settings: &ServiceSettings, auth: AuthToken) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(settings.connect_timeout_ms))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client,
            auth,
        })
    }

    /// Build a full endpoint URL
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token when one is installed
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Extract the FastAPI-style `detail` field from an error response body,
/// falling back to the given message
async fn error_detail(response: reqwest::Response, fallback: &str) -> String {
    #[derive(serde::Deserialize)]
    struct Detail {
        detail: String,
    }

    match response.json::<Detail>().await {
        Ok(body) if !body.detail.is_empty() => body.detail,
        _ => fallback.to_string(),
    }
}

#[async_trait]
impl DeckService for HttpDeckService {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = self.endpoint("/api/auth/login");
        // OAuth2 password flow: form-encoded, email goes in the username field
        let form = [("username", email), ("password", password)];

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::connection_failed(&url, e.to_string()))?;

        if !response.status().is_success() {
            let detail = error_detail(response, "Authentication failed").await;
            return Err(Error::auth_failed(detail));
        }

        response
            .json::<LoginResponse>()
            .await
            .map_err(|e| Error::Connection(format!("Invalid login response: {}", e)))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<UserProfile> {
        let url = self.endpoint("/api/auth/register");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::connection_failed(&url, e.to_string()))?;

        if !response.status().is_success() {
            let detail = error_detail(response, "Registration failed").await;
            return Err(Error::auth_failed(detail));
        }

        response
            .json::<UserProfile>()
            .await
            .map_err(|e| Error::Connection(format!("Invalid register response: {}", e)))
    }

    async fn current_user(&self) -> Result<UserProfile> {
        let url = self.endpoint("/api/auth/me");

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::connection_failed(&url, e.to_string()))?;

        if !response.status().is_success() {
            let detail = error_detail(response, "Could not validate credentials").await;
            return Err(Error::token_rejected(detail));
        }

        response
            .json::<UserProfile>()
            .await
            .map_err(|e| Error::Connection(format!("Invalid profile response: {}", e)))
    }

    async fn set_persona(&self, persona: &str) -> Result<PersonaUpdateResponse> {
        let url = self.endpoint("/api/auth/persona");
        let body = serde_json::json!({ "persona": persona });

        let response = self
            .authorize(self.client.put(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::connection_failed(&url, e.to_string()))?;

        if !response.status().is_success() {
            let detail = error_detail(response, "Failed to update persona").await;
            return Err(Error::persona_rejected(detail));
        }

        response
            .json::<PersonaUpdateResponse>()
            .await
            .map_err(|e| Error::Connection(format!("Invalid persona response: {}", e)))
    }

    async fn submit_document(
        &self,
        artifact: &SourceArtifact,
        spec: &DeckSpec,
    ) -> Result<SubmitResponse> {
        let url = self.endpoint("/api/upload");

        let file_part = multipart::Part::bytes(artifact.bytes.clone())
            .file_name(artifact.file_name.clone())
            .mime_str(artifact.mime_type())
            .map_err(|e| Error::Internal(format!("Invalid MIME type: {}", e)))?;

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("org_name", spec.org_name.clone())
            .text("purpose", spec.purpose.clone())
            .text("target_audience", spec.target_audience.clone())
            .text("key_message", spec.key_message.clone())
            .text("design_vibe", spec.design_vibe.clone());

        debug!(file = %artifact.file_name, bytes = artifact.bytes.len(), "Submitting document");

        let response = self
            .authorize(self.client.post(&url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::connection_failed(&url, e.to_string()))?;

        if !response.status().is_success() {
            let detail = error_detail(response, "Failed to start generation").await;
            return Err(Error::submission_rejected(detail));
        }

        response
            .json::<SubmitResponse>()
            .await
            .map_err(|e| Error::Connection(format!("Invalid upload response: {}", e)))
    }

    async fn job_status(&self, job_id: &str) -> Result<JobStatusResponse> {
        let url = self.endpoint(&format!("/api/status/{}", job_id));

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::connection_failed(&url, e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::job_not_found(job_id));
        }
        if !response.status().is_success() {
            let detail = error_detail(response, "Status request failed").await;
            return Err(Error::Connection(detail));
        }

        response
            .json::<JobStatusResponse>()
            .await
            .map_err(|e| Error::Connection(format!("Invalid status response: {}", e)))
    }

    async fn download_deck(&self, job_id: &str) -> Result<Vec<u8>> {
        let url = self.endpoint(&format!("/api/download/{}", job_id));

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::connection_failed(&url, e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(Error::job_not_found(job_id)),
            StatusCode::BAD_REQUEST => {
                return Err(Error::ResultNotReady { job_id: job_id.to_string() });
            }
            status if !status.is_success() => {
                let detail = error_detail(response, "Download failed").await;
                return Err(Error::Connection(detail));
            }
            _ => {}
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Connection(format!("Download interrupted: {}", e)))?;

        Ok(bytes.to_vec())
    }
}
