//! Error types for the VenueX core library.
//!
//! Every fallible operation in the library returns [`VenuexResult`]. At the UI
//! boundary all API failures collapse into a single apology message, so the
//! variants below exist for logging and tests rather than for display.
//!
//! # Error Codes Reference
//!
//! | Code Range | Category | Description |
//! |------------|----------|-------------|
//! | E2001-E2099 | Config | Config file, environment and validation errors |
//! | E3001-E3099 | Agent | Agent lookup errors |
//! | E5001-E5099 | API | Chat backend transport, status and decoding errors |
//! | E6001-E6099 | Link | Booking/detail URL validation and opening errors |
//! | E9001-E9099 | General | Internal, IO, serialization and validation errors |

use std::fmt;
use thiserror::Error;
use tracing::{error, warn};

/// The main error type for the VenueX core library.
#[derive(Debug, Error)]
pub enum VenuexError {
    // ========================================================================
    // Configuration Errors (E2001-E2099)
    // ========================================================================
    /// Configuration file could not be parsed
    #[error("[E2001] Failed to parse configuration: {0}")]
    ConfigParseError(String),

    /// Configuration value failed validation
    #[error("[E2002] Invalid configuration value for '{key}': {message}")]
    InvalidConfigValue { key: String, message: String },

    /// Generic configuration error from the config crate
    #[error("[E2003] Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // Agent Errors (E3001-E3099)
    // ========================================================================
    /// Agent not found in the catalog
    #[error("[E3001] Agent not found: {0}")]
    AgentNotFound(String),

    // ========================================================================
    // API Errors (E5001-E5099)
    // ========================================================================
    /// Request could not be sent or the connection broke mid-flight
    #[error("[E5001] API request failed: {0}")]
    ApiRequestFailed(String),

    /// Response body was not the expected JSON shape
    #[error("[E5002] Failed to parse API response: {0}")]
    ApiParseError(String),

    /// Backend answered with a non-success status
    #[error("[E5003] API returned status {status}: {message}")]
    ApiStatus { status: u16, message: String },

    /// Backend could not be reached at all
    #[error("[E5004] API service unavailable: {0}")]
    ApiServiceUnavailable(String),

    /// Request exceeded the configured timeout
    #[error("[E5005] API request timed out after {0} seconds")]
    ApiTimeout(u64),

    // ========================================================================
    // Link Errors (E6001-E6099)
    // ========================================================================
    /// URL rejected before opening
    #[error("[E6001] Refusing to open link '{url}': {reason}")]
    UnsafeLink { url: String, reason: String },

    /// The system browser could not be launched
    #[error("[E6002] Failed to open link '{url}': {message}")]
    LinkOpenFailed { url: String, message: String },

    // ========================================================================
    // General Errors (E9001-E9099)
    // ========================================================================
    /// Internal error (catch-all for unexpected conditions)
    #[error("[E9001] Internal error: {0}")]
    Internal(String),

    /// Validation error
    #[error("[E9002] Validation error: {0}")]
    ValidationError(String),

    /// IO error
    #[error("[E9003] IO error: {0}")]
    IoError(String),

    /// Serialization/deserialization error
    #[error("[E9004] Serialization error: {0}")]
    SerializationError(String),
}

pub type VenuexResult<T> = Result<T, VenuexError>;

// ============================================================================
// From trait implementations for seamless error propagation
// ============================================================================

impl From<reqwest::Error> for VenuexError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            VenuexError::ApiTimeout(30)
        } else if err.is_connect() {
            VenuexError::ApiServiceUnavailable(err.to_string())
        } else if err.is_status() {
            match err.status() {
                Some(status) => VenuexError::ApiStatus {
                    status: status.as_u16(),
                    message: status
                        .canonical_reason()
                        .unwrap_or("unknown status")
                        .to_string(),
                },
                None => VenuexError::ApiRequestFailed(err.to_string()),
            }
        } else if err.is_decode() {
            VenuexError::ApiParseError(err.to_string())
        } else {
            VenuexError::ApiRequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for VenuexError {
    fn from(err: serde_json::Error) -> Self {
        VenuexError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for VenuexError {
    fn from(err: std::io::Error) -> Self {
        VenuexError::IoError(err.to_string())
    }
}

impl From<crate::config::ConfigLoadError> for VenuexError {
    fn from(err: crate::config::ConfigLoadError) -> Self {
        use crate::config::ConfigLoadError;
        match err {
            ConfigLoadError::Config(inner @ config::ConfigError::FileParse { .. }) => {
                VenuexError::ConfigParseError(inner.to_string())
            }
            ConfigLoadError::InvalidValue { key, message } => {
                VenuexError::InvalidConfigValue { key, message }
            }
            other => VenuexError::Config(other.to_string()),
        }
    }
}

// ============================================================================
// Error categorization helpers
// ============================================================================

impl VenuexError {
    /// Returns true if the backend could not be reached or the exchange broke
    /// off, as opposed to the backend answering with something unusable.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            VenuexError::ApiRequestFailed(_)
                | VenuexError::ApiServiceUnavailable(_)
                | VenuexError::ApiTimeout(_)
        )
    }

    /// Returns true if the same request might succeed later.
    pub fn is_transient(&self) -> bool {
        match self {
            VenuexError::ApiServiceUnavailable(_) | VenuexError::ApiTimeout(_) => true,
            VenuexError::ApiStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns an error code suitable for logging or external reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            VenuexError::ConfigParseError(_) => "E2001",
            VenuexError::InvalidConfigValue { .. } => "E2002",
            VenuexError::Config(_) => "E2003",
            VenuexError::AgentNotFound(_) => "E3001",
            VenuexError::ApiRequestFailed(_) => "E5001",
            VenuexError::ApiParseError(_) => "E5002",
            VenuexError::ApiStatus { .. } => "E5003",
            VenuexError::ApiServiceUnavailable(_) => "E5004",
            VenuexError::ApiTimeout(_) => "E5005",
            VenuexError::UnsafeLink { .. } => "E6001",
            VenuexError::LinkOpenFailed { .. } => "E6002",
            VenuexError::Internal(_) => "E9001",
            VenuexError::ValidationError(_) => "E9002",
            VenuexError::IoError(_) => "E9003",
            VenuexError::SerializationError(_) => "E9004",
        }
    }

    /// Returns a user-friendly suggestion for how to resolve this error.
    pub fn user_suggestion(&self) -> Option<&'static str> {
        match self {
            VenuexError::ApiServiceUnavailable(_) => {
                Some("Make sure the backend is running on localhost:8000")
            }
            VenuexError::ApiTimeout(_) => {
                Some("The backend is slow to respond. Raise api.timeout_secs or try again")
            }
            VenuexError::ConfigParseError(_) => {
                Some("Check venuex.toml or ~/.venuex/config.toml for syntax errors")
            }
            VenuexError::UnsafeLink { .. } => {
                Some("Only http and https links can be opened")
            }
            _ => None,
        }
    }

    /// Log this error with appropriate severity level.
    pub fn log(&self) {
        let code = self.error_code();
        let suggestion = self.user_suggestion();

        if self.is_transient() {
            warn!(
                error_code = %code,
                suggestion = suggestion,
                "Transient error occurred: {}",
                self
            );
        } else {
            error!(
                error_code = %code,
                suggestion = suggestion,
                "Error occurred: {}",
                self
            );
        }
    }
}

/// Renders an error for terminal output, optionally with its code and a hint.
pub struct CliErrorDisplay<'a> {
    error: &'a VenuexError,
    show_code: bool,
    show_suggestion: bool,
}

impl<'a> CliErrorDisplay<'a> {
    pub fn new(error: &'a VenuexError) -> Self {
        Self {
            error,
            show_code: true,
            show_suggestion: true,
        }
    }

    pub fn without_code(mut self) -> Self {
        self.show_code = false;
        self
    }

    pub fn without_suggestion(mut self) -> Self {
        self.show_suggestion = false;
        self
    }
}

impl<'a> fmt::Display for CliErrorDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.error.to_string();
        if self.show_code {
            write!(f, "Error: {}", message)?;
        } else {
            // Strip the leading "[E1234] " tag
            let stripped = message
                .split_once("] ")
                .map(|(_, rest)| rest)
                .unwrap_or(&message);
            write!(f, "Error: {}", stripped)?;
        }

        if self.show_suggestion {
            if let Some(suggestion) = self.error.user_suggestion() {
                write!(f, "\n  Suggestion: {}", suggestion)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VenuexError::ApiStatus {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert!(err.to_string().contains("E5003"));
        assert!(err.to_string().contains("500"));

        let err = VenuexError::UnsafeLink {
            url: "javascript:alert(1)".to_string(),
            reason: "scheme 'javascript' is not allowed".to_string(),
        };
        assert!(err.to_string().contains("E6001"));
        assert!(err.to_string().contains("javascript"));
    }

    #[test]
    fn test_connection_errors() {
        assert!(VenuexError::ApiServiceUnavailable("refused".to_string()).is_connection_error());
        assert!(VenuexError::ApiRequestFailed("reset".to_string()).is_connection_error());
        assert!(VenuexError::ApiTimeout(30).is_connection_error());

        assert!(!VenuexError::ApiStatus {
            status: 500,
            message: "Internal Server Error".to_string()
        }
        .is_connection_error());
        assert!(!VenuexError::ApiParseError("missing field".to_string()).is_connection_error());
    }

    #[test]
    fn test_from_config_load_error() {
        use crate::config::ConfigLoadError;

        let err: VenuexError = ConfigLoadError::InvalidValue {
            key: "api.timeout_secs".to_string(),
            message: "Must be greater than 0".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "E2002");
        assert!(err.to_string().contains("api.timeout_secs"));

        let err: VenuexError = ConfigLoadError::MissingRequired("api.base_url".to_string()).into();
        assert_eq!(err.error_code(), "E2003");
    }

    #[test]
    fn test_bad_config_file_maps_to_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("venuex.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let err: VenuexError = crate::config::VenuexConfig::load_from_paths(vec![path])
            .unwrap_err()
            .into();
        assert_eq!(err.error_code(), "E2001");
        assert!(err.user_suggestion().is_some());
    }

    #[test]
    fn test_is_transient() {
        assert!(VenuexError::ApiServiceUnavailable("refused".to_string()).is_transient());
        assert!(VenuexError::ApiTimeout(10).is_transient());
        assert!(VenuexError::ApiStatus {
            status: 503,
            message: "Service Unavailable".to_string()
        }
        .is_transient());

        assert!(!VenuexError::ApiStatus {
            status: 404,
            message: "Not Found".to_string()
        }
        .is_transient());
        assert!(!VenuexError::AgentNotFound("agent".to_string()).is_transient());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            VenuexError::Config("err".to_string()).error_code(),
            "E2003"
        );
        assert_eq!(
            VenuexError::AgentNotFound("a".to_string()).error_code(),
            "E3001"
        );
        assert_eq!(
            VenuexError::ApiRequestFailed("err".to_string()).error_code(),
            "E5001"
        );
        assert_eq!(
            VenuexError::LinkOpenFailed {
                url: "https://playo.co".to_string(),
                message: "no browser".to_string()
            }
            .error_code(),
            "E6002"
        );
        assert_eq!(
            VenuexError::Internal("err".to_string()).error_code(),
            "E9001"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VenuexError = io_err.into();
        assert!(matches!(err, VenuexError::IoError(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_result: Result<serde_json::Value, _> = serde_json::from_str("invalid json");
        let err: VenuexError = json_result.unwrap_err().into();
        assert!(matches!(err, VenuexError::SerializationError(_)));
    }

    #[test]
    fn test_cli_error_display() {
        let err = VenuexError::ApiServiceUnavailable("connection refused".to_string());
        let output = CliErrorDisplay::new(&err).to_string();
        assert!(output.contains("E5004"));
        assert!(output.contains("Suggestion"));

        let output = CliErrorDisplay::new(&err)
            .without_code()
            .without_suggestion()
            .to_string();
        assert_eq!(output, "Error: API service unavailable: connection refused");
    }
}
