// ABOUTME: Runtime configuration for the authoring client and orchestrator.
// ABOUTME: Defaults match the public westus endpoint; env vars can override them.

use std::time::Duration;

use serde::Deserialize;

use crate::client::{DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT, LuisClient};
use crate::credential::{CredentialProvider, DEFAULT_KEY_VAR, EnvCredentialProvider};
use crate::error::{ClientError, LuisError};
use crate::orchestrator::DEFAULT_TASK_TIMEOUT;

/// Overrides the service endpoint.
pub const ENDPOINT_VAR: &str = "LUIS_ENDPOINT";
/// Overrides the per-request timeout, in whole seconds.
pub const TIMEOUT_VAR: &str = "LUIS_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthoringConfig {
    pub endpoint: String,
    pub key_var: String,
    pub request_timeout: Duration,
    pub task_timeout: Duration,
}

impl Default for AuthoringConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            key_var: DEFAULT_KEY_VAR.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            task_timeout: DEFAULT_TASK_TIMEOUT,
        }
    }
}

impl AuthoringConfig {
    /// Defaults with `LUIS_ENDPOINT` and `LUIS_TIMEOUT_SECS` applied.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a lookup function. Unset or empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = lookup(ENDPOINT_VAR) {
            self.endpoint = endpoint;
        }
        if let Some(secs) = lookup(TIMEOUT_VAR) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ClientError::Configuration(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    TIMEOUT_VAR, secs
                ))
            })?;
            if secs == 0 {
                return Err(ClientError::Configuration(format!(
                    "{} must be greater than zero",
                    TIMEOUT_VAR
                )));
            }
            self.request_timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }

    /// Read the credential named by `key_var` from the environment.
    pub fn credential_provider(&self) -> Result<EnvCredentialProvider, LuisError> {
        Ok(EnvCredentialProvider::from_var(&self.key_var)?)
    }

    /// Build an HTTP client for this configuration.
    pub fn build_client(&self, provider: &dyn CredentialProvider) -> Result<LuisClient, LuisError> {
        let client = LuisClient::from_provider(provider)?
            .with_endpoint(&self.endpoint)?
            .with_timeout(self.request_timeout);
        Ok(client)
    }
}
