//! Error handling for the admin client
//!
//! Every API failure is mapped to one `ClientError` variant at the
//! transport boundary; the action layer converts errors into a dismissible
//! `Alert` plus state-flag resets, so views only ever observe flags.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Client error taxonomy
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure: DNS, refused connection, timeout
    #[error("Failed to connect to server")]
    Network(#[source] reqwest::Error),

    /// Non-2xx API response with the server's `{message, code}` body
    #[error("{message}")]
    Api {
        status: u16,
        code: u16,
        message: String,
    },

    /// 403 from the server; suppresses the view instead of alerting
    #[error("Access denied")]
    Forbidden,

    /// Token renewal exhausted; the session must be torn down
    #[error("Session expired")]
    AuthExpired,

    /// Response body did not match the expected shape
    #[error("Invalid server response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// True for failures that set the `forbidden` flag on a slice
    pub fn is_forbidden(&self) -> bool {
        matches!(self, ClientError::Forbidden)
    }

    /// The server-provided code, where one exists
    pub fn code(&self) -> Option<u16> {
        match self {
            ClientError::Api { code, .. } => Some(*code),
            ClientError::Forbidden => Some(403),
            _ => None,
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Severity of a user-facing alert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Error,
}

/// A single-slot, dismissible notification shown by the dashboard shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub severity: AlertSeverity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Alerts raised for transient info may auto-dismiss; errors stay
    pub auto_dismiss: bool,
}

impl Alert {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            severity: AlertSeverity::Info,
            message: message.into(),
            code: None,
            auto_dismiss: true,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            severity: AlertSeverity::Error,
            message: message.into(),
            code: None,
            auto_dismiss: false,
        }
    }

    /// Surface a failure verbatim, carrying the server code when present
    pub fn from_error(err: &ClientError) -> Self {
        Self {
            id: Uuid::new_v4(),
            severity: AlertSeverity::Error,
            message: err.to_string(),
            code: err.code(),
            auto_dismiss: false,
        }
    }
}
