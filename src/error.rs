//! Error types for the DeckGen client
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Error context and chaining
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoPermission = 202,
    IoNotFound = 203,

    // Connection errors (3xx)
    ConnectionFailed = 300,

    // Authentication errors (4xx)
    AuthenticationFailed = 400,
    TokenRejected = 401,
    PersonaRejected = 402,
    NotSignedIn = 403,

    // Submission errors (5xx)
    SubmissionRejected = 500,
    JobNotFound = 501,
    ResultNotReady = 502,
    GenerationFailed = 503,

    // Internal errors (9xx)
    InternalError = 900,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Config errors
            200..=299 => 20, // IO errors
            300..=399 => 30, // Connection errors
            400..=499 => 40, // Authentication errors
            500..=599 => 50, // Submission errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for the client
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    // ─────────────────────────────────────────────────────────────
    // Connection Errors
    // ─────────────────────────────────────────────────────────────

    /// Request to the service failed at the transport level
    #[error("Failed to reach {url}: {message}")]
    ConnectionFailed { url: String, message: String },

    /// Generic connection error
    #[error("Connection error: {0}")]
    Connection(String),

    // ─────────────────────────────────────────────────────────────
    // Authentication Errors
    // ─────────────────────────────────────────────────────────────

    /// Credentials were rejected by the service
    #[error("Authentication failed: {message}")]
    AuthFailed { message: String },

    /// A stored bearer token was rejected (expired or revoked)
    #[error("Session token rejected: {message}")]
    TokenRejected { message: String },

    /// The service refused a persona update
    #[error("Persona update rejected: {message}")]
    PersonaRejected { message: String },

    /// An operation requiring a session was attempted without one
    #[error("Not signed in")]
    NotSignedIn,

    // ─────────────────────────────────────────────────────────────
    // Submission Errors
    // ─────────────────────────────────────────────────────────────

    /// The service refused to create a generation job
    #[error("Submission rejected: {message}")]
    SubmissionRejected { message: String },

    /// The service does not know the given job id
    #[error("Unknown job: {job_id}")]
    JobNotFound { job_id: String },

    /// The generated deck is not ready for download yet
    #[error("Result not ready for job {job_id}")]
    ResultNotReady { job_id: String },

    /// The service reported a terminal failure for an acknowledged job
    #[error("Generation failed: {message}")]
    GenerationFailed { message: String },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,
            Error::Config(_) => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Toml(_) => ErrorCode::ConfigParseError,

            Error::ConnectionFailed { .. } => ErrorCode::ConnectionFailed,
            Error::Connection(_) => ErrorCode::ConnectionFailed,

            Error::AuthFailed { .. } => ErrorCode::AuthenticationFailed,
            Error::TokenRejected { .. } => ErrorCode::TokenRejected,
            Error::PersonaRejected { .. } => ErrorCode::PersonaRejected,
            Error::NotSignedIn => ErrorCode::NotSignedIn,

            Error::SubmissionRejected { .. } => ErrorCode::SubmissionRejected,
            Error::JobNotFound { .. } => ErrorCode::JobNotFound,
            Error::ResultNotReady { .. } => ErrorCode::ResultNotReady,
            Error::GenerationFailed { .. } => ErrorCode::GenerationFailed,

            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::ConnectionFailed { .. }
                | Error::Connection(_)
                | Error::ResultNotReady { .. }
                | Error::Io(_)
                | Error::IoRead { .. }
                | Error::IoWrite { .. }
        )
    }

    /// Check if the error is an authentication problem, i.e. recoverable
    /// by signing in again
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Error::AuthFailed { .. }
                | Error::TokenRejected { .. }
                | Error::PersonaRejected { .. }
                | Error::NotSignedIn
        )
    }

    /// Check if the error is fatal (the command should exit)
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ConfigNotFound { .. }
                | Error::ConfigValidation { .. }
                | Error::Config(_)
                | Error::Internal(_)
        )
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'deckgen config init' to create a default configuration file."
            ),
            Error::ConfigValidation { .. } | Error::Config(_) => Some(
                "Review the configuration file and fix the invalid values. Run 'deckgen config validate' to see details."
            ),

            Error::ConnectionFailed { .. } | Error::Connection(_) => Some(
                "Check your network connection and verify the service URL in the configuration."
            ),

            Error::AuthFailed { .. } => Some(
                "Verify your email and password, or create an account with 'deckgen register'."
            ),
            Error::TokenRejected { .. } | Error::NotSignedIn => Some(
                "Your session has expired or is missing. Run 'deckgen login' to sign in."
            ),
            Error::PersonaRejected { .. } => Some(
                "Pick a persona from 'deckgen persona list' and try again."
            ),

            Error::SubmissionRejected { .. } => Some(
                "Only .zip and .md source documents are accepted. Check the file and try again."
            ),
            Error::JobNotFound { .. } => Some(
                "The job id is unknown to the service. It may have been restarted; submit again."
            ),
            Error::ResultNotReady { .. } => Some(
                "The deck is still being generated. Check progress with 'deckgen status <job-id>'."
            ),
            Error::GenerationFailed { .. } => Some(
                "Adjust the source document or metadata and submit again."
            ),

            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let code = self.code();
        let suggestion = self.suggestion();

        let mut output = format!(
            "\x1b[31mError [{}]\x1b[0m: {}\n",
            code.as_str(),
            self
        );

        if let Some(hint) = suggestion {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        let code = self.code();
        format!("[{}] {}", code.as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors (for ergonomic error creation)
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a config validation error
    pub fn config_validation(message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a config validation error with field name
    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a connection failed error
    pub fn connection_failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConnectionFailed {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an authentication failure
    pub fn auth_failed(message: impl Into<String>) -> Self {
        Error::AuthFailed {
            message: message.into(),
        }
    }

    /// Create a token rejection error
    pub fn token_rejected(message: impl Into<String>) -> Self {
        Error::TokenRejected {
            message: message.into(),
        }
    }

    /// Create a persona rejection error
    pub fn persona_rejected(message: impl Into<String>) -> Self {
        Error::PersonaRejected {
            message: message.into(),
        }
    }

    /// Create a submission rejection error
    pub fn submission_rejected(message: impl Into<String>) -> Self {
        Error::SubmissionRejected {
            message: message.into(),
        }
    }

    /// Create a job not found error
    pub fn job_not_found(job_id: impl Into<String>) -> Self {
        Error::JobNotFound {
            job_id: job_id.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
