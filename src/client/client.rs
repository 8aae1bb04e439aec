// ABOUTME: Defines the ResourceClient trait - the abstraction the orchestrator
// ABOUTME: drives, implemented by the HTTP client and by test doubles.

use async_trait::async_trait;

use super::{AppId, ApplicationInfo, ApplicationSpec, EntityId, EntitySpec};
use crate::error::ClientError;

/// Typed create/read operations against the authoring service.
///
/// Creation calls are not idempotent: the server assigns a fresh identifier on
/// every call, so calling twice creates two resources. Callers must not retry
/// them blindly.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Create an application and return its server-assigned identifier.
    async fn create_application(&self, spec: &ApplicationSpec) -> Result<AppId, ClientError>;

    /// Add a simple entity to an application version.
    async fn add_simple_entity(
        &self,
        app_id: &AppId,
        version_id: &str,
        name: &str,
    ) -> Result<EntityId, ClientError>;

    /// Add a hierarchical entity with ordered child labels.
    ///
    /// Fails with `ClientError::Validation` before any request if `children` is empty.
    async fn add_hierarchical_entity(
        &self,
        app_id: &AppId,
        version_id: &str,
        name: &str,
        children: &[String],
    ) -> Result<EntityId, ClientError>;

    /// Fetch application details.
    async fn get_application(&self, app_id: &AppId) -> Result<ApplicationInfo, ClientError>;

    /// Dispatch an entity spec to the matching operation.
    async fn add_entity(
        &self,
        app_id: &AppId,
        version_id: &str,
        entity: &EntitySpec,
    ) -> Result<EntityId, ClientError> {
        match entity {
            EntitySpec::Simple { name } => self.add_simple_entity(app_id, version_id, name).await,
            EntitySpec::Hierarchical { name, children } => {
                self.add_hierarchical_entity(app_id, version_id, name, children)
                    .await
            }
        }
    }
}
