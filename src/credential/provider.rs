// ABOUTME: Credential acquisition - the single point where the API key is read.
// ABOUTME: The key is read once at construction and is immutable afterwards.

use std::fmt;
use std::sync::Arc;

use crate::error::CredentialError;

/// Environment variable holding the authoring key.
pub const DEFAULT_KEY_VAR: &str = "AZURE_LUIS_KEY";

/// Opaque authoring key. Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(Arc<str>);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Arc::from(secret.into()))
    }

    /// Raw secret, for populating the auth header only.
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Source of the credential used by a resource client.
pub trait CredentialProvider: Send + Sync {
    /// Return the credential, or a configuration error if none is configured.
    fn get(&self) -> Result<Credential, CredentialError>;
}

/// Provider that reads an environment variable once, at construction.
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    var: String,
    credential: Credential,
}

impl EnvCredentialProvider {
    /// Read the credential from the named environment variable.
    pub fn from_var(var: impl Into<String>) -> Result<Self, CredentialError> {
        let var = var.into();
        let value = std::env::var(&var).ok();
        Self::from_value(var, value)
    }

    /// Build from an already-looked-up value. An empty value counts as missing.
    pub fn from_value(
        var: impl Into<String>,
        value: Option<String>,
    ) -> Result<Self, CredentialError> {
        let var = var.into();
        match value {
            None => Err(CredentialError::Missing { var }),
            Some(v) if v.trim().is_empty() => Err(CredentialError::Empty { var }),
            Some(v) => Ok(Self {
                var,
                credential: Credential::new(v),
            }),
        }
    }

    /// Name of the variable the credential was read from.
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn get(&self) -> Result<Credential, CredentialError> {
        Ok(self.credential.clone())
    }
}

/// Provider wrapping a fixed credential.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider(Credential);

impl StaticCredentialProvider {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Credential::new(secret))
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn get(&self) -> Result<Credential, CredentialError> {
        Ok(self.0.clone())
    }
}
