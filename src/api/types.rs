//! Wire types for the DeckGen service API

use std::fmt;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────
// Authentication
// ─────────────────────────────────────────────────────────────────

/// Profile of the signed-in user, as returned by `GET /api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
}

impl UserProfile {
    /// Name to address the user by: first name when known, else the email
    pub fn display_name(&self) -> &str {
        self.first_name.as_deref().unwrap_or(&self.email)
    }
}

/// Response of `POST /api/auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    /// Persona already stored on the account, if any
    pub persona: Option<String>,
}

/// Body of `POST /api/auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub email: String,
    pub password: String,
}

/// Response of `PUT /api/auth/persona`
#[derive(Debug, Clone, Deserialize)]
pub struct PersonaUpdateResponse {
    pub status: String,
    pub persona: Option<String>,
}

// ─────────────────────────────────────────────────────────────────
// Job Submission & Status
// ─────────────────────────────────────────────────────────────────

/// Free-text metadata describing the deck to generate
#[derive(Debug, Clone, Default)]
pub struct DeckSpec {
    /// Organization or topic the deck is about
    pub org_name: String,

    /// Purpose of the presentation
    pub purpose: String,

    /// Target audience
    pub target_audience: String,

    /// Key message to land
    pub key_message: String,

    /// Tone / design descriptor
    pub design_vibe: String,
}

/// The uploaded source document
#[derive(Debug, Clone)]
pub struct SourceArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SourceArtifact {
    /// Non-empty stand-in used when the caller supplies no file.
    ///
    /// The submission endpoint requires a multipart file part, so an
    /// empty wizard still produces a valid request.
    pub fn placeholder() -> Self {
        Self {
            file_name: "dummy.txt".to_string(),
            bytes: b"No data".to_vec(),
        }
    }

    /// MIME type derived from the file extension
    pub fn mime_type(&self) -> &'static str {
        let lower = self.file_name.to_lowercase();
        if lower.ends_with(".zip") {
            "application/zip"
        } else if lower.ends_with(".md") {
            "text/markdown"
        } else {
            "text/plain"
        }
    }
}

/// Response of `POST /api/upload`
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub job_id: String,
    pub status: String,
}

/// Job state as reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteJobStatus {
    Uploading,
    Processing,
    Completed,
    Error,
    /// Forward compatibility: treat anything unrecognized as still running
    #[serde(other)]
    Unknown,
}

impl RemoteJobStatus {
    /// Whether this status ends the job (polling must stop permanently)
    pub fn is_terminal(&self) -> bool {
        matches!(self, RemoteJobStatus::Completed | RemoteJobStatus::Error)
    }
}

impl fmt::Display for RemoteJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RemoteJobStatus::Uploading => "uploading",
            RemoteJobStatus::Processing => "processing",
            RemoteJobStatus::Completed => "completed",
            RemoteJobStatus::Error => "error",
            RemoteJobStatus::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

/// Response of `GET /api/status/{job_id}`
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    pub job_id: String,
    pub status: RemoteJobStatus,
    #[serde(default)]
    pub current_step: String,
    pub error_msg: Option<String>,
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_artifact_is_non_empty() {
        let artifact = SourceArtifact::placeholder();
        assert_eq!(artifact.file_name, "dummy.txt");
        assert!(!artifact.bytes.is_empty());
        assert_eq!(artifact.mime_type(), "text/plain");
    }

    #[test]
    fn test_mime_type_by_extension() {
        let zip = SourceArtifact { file_name: "Repo.ZIP".into(), bytes: vec![1] };
        assert_eq!(zip.mime_type(), "application/zip");

        let md = SourceArtifact { file_name: "notes.md".into(), bytes: vec![1] };
        assert_eq!(md.mime_type(), "text/markdown");
    }

    #[test]
    fn test_remote_status_parsing() {
        let resp: JobStatusResponse = serde_json::from_str(
            r#"{"job_id":"j1","status":"processing","current_step":"Structuring Narrative","error_msg":null}"#,
        )
        .unwrap();
        assert_eq!(resp.status, RemoteJobStatus::Processing);
        assert!(!resp.status.is_terminal());
        assert_eq!(resp.current_step, "Structuring Narrative");
        assert!(resp.error_msg.is_none());
    }

    #[test]
    fn test_remote_status_terminal() {
        assert!(RemoteJobStatus::Completed.is_terminal());
        assert!(RemoteJobStatus::Error.is_terminal());
        assert!(!RemoteJobStatus::Uploading.is_terminal());
        assert!(!RemoteJobStatus::Unknown.is_terminal());
    }

    #[test]
    fn test_unknown_status_tolerated() {
        let resp: JobStatusResponse =
            serde_json::from_str(r#"{"job_id":"j1","status":"queued","error_msg":null}"#).unwrap();
        assert_eq!(resp.status, RemoteJobStatus::Unknown);
        assert_eq!(resp.current_step, "");
    }

    #[test]
    fn test_profile_display_name() {
        let mut profile = UserProfile {
            id: 1,
            email: "ada@acme.com".into(),
            first_name: None,
            last_name: None,
            company_name: None,
            persona: None,
        };
        assert_eq!(profile.display_name(), "ada@acme.com");

        profile.first_name = Some("Ada".into());
        assert_eq!(profile.display_name(), "Ada");
    }
}
