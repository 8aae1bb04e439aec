// ABOUTME: LUIS authoring API client implementation over HTTPS.
// ABOUTME: Implements ResourceClient with per-request timeouts and error mapping.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::types::{validate_children, validate_entity_name};
use super::{AppId, ApplicationInfo, ApplicationSpec, EntityId};
use crate::credential::{Credential, CredentialProvider};
use crate::error::{ClientError, CredentialError};

/// Regional endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://westus.api.cognitive.microsoft.com";

/// Default bound on a single request, including reading the body.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const API_PATH: &str = "luis/api/v2.0";
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Body for creating an entity. `children` is only sent for hierarchical entities.
#[derive(Debug, Serialize)]
pub struct EntityCreateObject<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<&'a [String]>,
}

/// Identifier payload. The service answers with a bare JSON string; stubs
/// and proxies often wrap it in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IdResponse {
    Bare(String),
    Object {
        #[serde(alias = "appId", alias = "entityId")]
        id: String,
    },
}

impl IdResponse {
    fn into_inner(self) -> String {
        match self {
            IdResponse::Bare(id) | IdResponse::Object { id } => id,
        }
    }
}

/// Service error body.
#[derive(Debug, Deserialize)]
pub struct ServiceError {
    pub error: ServiceErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ServiceErrorDetail {
    #[serde(default)]
    pub code: String,
    pub message: String,
}

/// Extract a human-readable message from an error body.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ServiceError>(body) {
        if err.error.code.is_empty() {
            return err.error.message;
        }
        return format!("{}: {}", err.error.code, err.error.message);
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

/// Treat a 404 on a child resource as the parent app or version being absent.
fn missing_parent(operation: &'static str, err: ClientError) -> ClientError {
    match err {
        ClientError::RemoteService {
            status: 404,
            message,
        } => ClientError::NotFound(format!("{}: {}", operation, message)),
        other => other,
    }
}

/// Client for the LUIS authoring API.
#[derive(Debug, Clone)]
pub struct LuisClient {
    credential: Credential,
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl LuisClient {
    /// Create a client for the default endpoint with the given credential.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            base_url: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            http: reqwest::Client::new(),
        }
    }

    /// Create a client, acquiring the credential from a provider.
    pub fn from_provider(provider: &dyn CredentialProvider) -> Result<Self, CredentialError> {
        Ok(Self::new(provider.get()?))
    }

    /// Point the client at a different endpoint (regional host or test server).
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, ClientError> {
        let url = Url::parse(endpoint).map_err(|e| {
            ClientError::Configuration(format!("invalid endpoint '{}': {}", endpoint, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "endpoint '{}' must use http or https",
                endpoint
            )));
        }
        self.base_url = endpoint.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Bound each request to `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn apps_url(&self) -> String {
        format!("{}/{}/apps/", self.base_url, API_PATH)
    }

    fn app_url(&self, app_id: &AppId) -> String {
        format!(
            "{}/{}/apps/{}",
            self.base_url,
            API_PATH,
            urlencoding::encode(app_id.as_str())
        )
    }

    fn version_url(&self, app_id: &AppId, version_id: &str, collection: &str) -> String {
        format!(
            "{}/versions/{}/{}",
            self.app_url(app_id),
            urlencoding::encode(version_id),
            collection
        )
    }

    /// Issue one request and return the status and raw body.
    ///
    /// Both sending and reading the body count against the timeout.
    async fn execute<B: Serialize + Sync + ?Sized>(
        &self,
        operation: &'static str,
        method: Method,
        url: String,
        body: Option<&B>,
    ) -> Result<String, ClientError> {
        let mut request = self
            .http
            .request(method, &url)
            .header(SUBSCRIPTION_KEY_HEADER, self.credential.expose());
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(operation, url = %url, "sending authoring request");

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        };

        let (status, text) = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(Ok(pair)) => pair,
            Ok(Err(e)) if e.is_timeout() => {
                warn!(operation, "authoring request timed out");
                return Err(ClientError::Timeout {
                    operation,
                    after: self.timeout,
                });
            }
            Ok(Err(e)) => {
                warn!(operation, error = %e, "authoring request failed");
                return Err(ClientError::Network(e));
            }
            Err(_) => {
                warn!(operation, after = ?self.timeout, "authoring request timed out");
                return Err(ClientError::Timeout {
                    operation,
                    after: self.timeout,
                });
            }
        };

        debug!(operation, status = status.as_u16(), "authoring response");

        if !status.is_success() {
            warn!(operation, status = status.as_u16(), "authoring request rejected");
            return Err(ClientError::RemoteService {
                status: status.as_u16(),
                message: error_message(status, &text),
            });
        }

        Ok(text)
    }

    async fn create_id<B: Serialize + Sync + ?Sized>(
        &self,
        operation: &'static str,
        url: String,
        body: &B,
    ) -> Result<String, ClientError> {
        let text = self.execute(operation, Method::POST, url, Some(body)).await?;
        let id = serde_json::from_str::<IdResponse>(&text)?.into_inner();
        if id.trim().is_empty() {
            return Err(ClientError::RemoteService {
                status: StatusCode::OK.as_u16(),
                message: format!("{} returned an empty identifier", operation),
            });
        }
        Ok(id)
    }
}

#[async_trait]
impl super::client::ResourceClient for LuisClient {
    async fn create_application(&self, spec: &ApplicationSpec) -> Result<AppId, ClientError> {
        spec.validate()?;
        let id = self
            .create_id("create_application", self.apps_url(), spec)
            .await?;
        Ok(AppId::new(id))
    }

    async fn add_simple_entity(
        &self,
        app_id: &AppId,
        version_id: &str,
        name: &str,
    ) -> Result<EntityId, ClientError> {
        validate_entity_name(name)?;
        let body = EntityCreateObject {
            name,
            children: None,
        };
        let url = self.version_url(app_id, version_id, "entities");
        let id = self
            .create_id("add_simple_entity", url, &body)
            .await
            .map_err(|e| missing_parent("add_simple_entity", e))?;
        Ok(EntityId::new(id))
    }

    async fn add_hierarchical_entity(
        &self,
        app_id: &AppId,
        version_id: &str,
        name: &str,
        children: &[String],
    ) -> Result<EntityId, ClientError> {
        validate_entity_name(name)?;
        validate_children(children)?;
        let body = EntityCreateObject {
            name,
            children: Some(children),
        };
        let url = self.version_url(app_id, version_id, "hierarchicalentities");
        let id = self
            .create_id("add_hierarchical_entity", url, &body)
            .await
            .map_err(|e| missing_parent("add_hierarchical_entity", e))?;
        Ok(EntityId::new(id))
    }

    async fn get_application(&self, app_id: &AppId) -> Result<ApplicationInfo, ClientError> {
        let text = self
            .execute::<()>("get_application", Method::GET, self.app_url(app_id), None)
            .await
            .map_err(|e| missing_parent("get_application", e))?;
        Ok(serde_json::from_str(&text)?)
    }
}
