// ABOUTME: Defines all error types for the authoring library using thiserror.
// ABOUTME: Each component has its own error enum, unified under LuisError.

use std::time::Duration;

/// Top-level error type for the authoring library.
#[derive(Debug, thiserror::Error)]
pub enum LuisError {
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),
}

/// Errors acquiring the API credential.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("please set/export the following environment variable: {var}")]
    Missing { var: String },

    #[error("environment variable {var} is set but empty")]
    Empty { var: String },
}

impl CredentialError {
    /// Name of the configuration key that could not be resolved.
    pub fn key(&self) -> &str {
        match self {
            CredentialError::Missing { var } | CredentialError::Empty { var } => var,
        }
    }
}

/// Errors from resource client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Remote service error ({status}): {message}")]
    RemoteService { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Returns true for transport-level failures (network or timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Network(_) | ClientError::Timeout { .. })
    }

    /// HTTP status carried by the error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::RemoteService { status, .. } => Some(*status),
            ClientError::NotFound(_) => Some(404),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Errors that abort a whole workflow.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("application creation failed: {0}")]
    ApplicationCreation(#[source] ClientError),
}
