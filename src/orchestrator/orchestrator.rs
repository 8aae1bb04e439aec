// ABOUTME: Workflow orchestrator - creates an application, then fans out
// ABOUTME: independent entity creations and joins them into one report.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::debug;

use super::events::{EventSink, Operation, TracingSink, WorkflowEvent};
use crate::client::{AppId, ApplicationSpec, EntityId, EntityKind, EntitySpec, ResourceClient};
use crate::error::{ClientError, WorkflowError};

/// Default bound on each sub-task, on top of the client's own request timeout.
pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(60);

/// What to create in one workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowPlan {
    pub base_name: String,
    pub culture: String,
    pub version_id: String,
    pub description: String,
    pub entities: Vec<EntitySpec>,
    /// Fixed uniqueness suffix. The current time is used when unset.
    pub timestamp_millis: Option<i64>,
}

impl Default for WorkflowPlan {
    fn default() -> Self {
        Self {
            base_name: "Contoso".to_string(),
            culture: "en-us".to_string(),
            version_id: "0.1".to_string(),
            description: "New App created with LUIS Rust sample".to_string(),
            entities: vec![
                EntitySpec::simple("Destination"),
                EntitySpec::hierarchical("Class", ["First", "Business", "Economy"]),
            ],
            timestamp_millis: None,
        }
    }
}

impl WorkflowPlan {
    /// Create a plan with no entities.
    pub fn new(base_name: impl Into<String>, version_id: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            version_id: version_id.into(),
            entities: Vec::new(),
            ..Self::default()
        }
    }

    pub fn culture(mut self, culture: impl Into<String>) -> Self {
        self.culture = culture.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn entity(mut self, entity: EntitySpec) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn timestamp_millis(mut self, millis: i64) -> Self {
        self.timestamp_millis = Some(millis);
        self
    }

    /// Build the application spec, stamping the name for uniqueness.
    pub fn application_spec(&self) -> ApplicationSpec {
        let stamp = self
            .timestamp_millis
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
        ApplicationSpec::timestamped(&self.base_name, stamp, self.version_id.clone())
            .culture(self.culture.clone())
            .description(self.description.clone())
    }
}

/// How one entity sub-task settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubTaskOutcome {
    Succeeded(EntityId),
    Failed(String),
}

/// One entity sub-task and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityOutcome {
    pub kind: EntityKind,
    pub name: String,
    pub outcome: SubTaskOutcome,
}

impl EntityOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, SubTaskOutcome::Succeeded(_))
    }

    pub fn entity_id(&self) -> Option<&EntityId> {
        match &self.outcome {
            SubTaskOutcome::Succeeded(id) => Some(id),
            SubTaskOutcome::Failed(_) => None,
        }
    }
}

/// Result of a workflow that got as far as creating the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    pub app_name: String,
    pub app_id: AppId,
    /// Outcomes in plan order, regardless of completion order.
    pub entities: Vec<EntityOutcome>,
}

impl WorkflowReport {
    /// True if every entity was created.
    pub fn is_success(&self) -> bool {
        self.entities.iter().all(EntityOutcome::is_success)
    }

    pub fn successes(&self) -> impl Iterator<Item = &EntityOutcome> {
        self.entities.iter().filter(|e| e.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &EntityOutcome> {
        self.entities.iter().filter(|e| !e.is_success())
    }
}

/// Sequences application creation and the dependent entity creations.
///
/// Entity calls are only dispatched once the application identifier is known.
/// They run concurrently on the calling task, and a failed entity never cancels
/// its siblings. Application failure is fatal and no entity work is attempted.
pub struct Orchestrator {
    client: Arc<dyn ResourceClient>,
    sink: Arc<dyn EventSink>,
    task_timeout: Duration,
}

impl Orchestrator {
    /// Create an orchestrator that reports events through `tracing`.
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self {
            client,
            sink: Arc::new(TracingSink),
            task_timeout: DEFAULT_TASK_TIMEOUT,
        }
    }

    /// Report events to `sink` instead.
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Bound each sub-task (application creation and every entity) to `timeout`.
    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = timeout;
        self
    }

    /// Run the workflow to completion.
    ///
    /// Returns `Err` only if the application could not be created. Entity
    /// failures are reported per entity in the returned report.
    pub async fn run(&self, plan: &WorkflowPlan) -> Result<WorkflowReport, WorkflowError> {
        let spec = plan.application_spec();
        self.sink.emit(&WorkflowEvent::AppRequested {
            name: spec.name.clone(),
            version_id: spec.version_id.clone(),
        });

        let created = self
            .bounded("create_application", self.client.create_application(&spec))
            .await;
        let app_id = match created {
            Ok(id) => id,
            Err(e) => {
                self.sink.emit(&WorkflowEvent::OperationFailed {
                    op: Operation::CreateApplication,
                    reason: e.to_string(),
                });
                return Err(WorkflowError::ApplicationCreation(e));
            }
        };
        self.sink.emit(&WorkflowEvent::AppCreated { id: app_id.clone() });

        debug!(app_id = %app_id, count = plan.entities.len(), "dispatching entity sub-tasks");
        let tasks = plan
            .entities
            .iter()
            .map(|entity| self.create_entity(&app_id, &spec.version_id, entity));
        let entities = join_all(tasks).await;

        let succeeded = entities.iter().filter(|e| e.is_success()).count();
        self.sink.emit(&WorkflowEvent::Done {
            succeeded,
            failed: entities.len() - succeeded,
        });

        Ok(WorkflowReport {
            app_name: spec.name,
            app_id,
            entities,
        })
    }

    async fn create_entity(
        &self,
        app_id: &AppId,
        version_id: &str,
        entity: &EntitySpec,
    ) -> EntityOutcome {
        let kind = entity.kind();
        let name = entity.name().to_string();
        self.sink.emit(&WorkflowEvent::EntityRequested {
            kind,
            name: name.clone(),
        });

        let result = self
            .bounded("add_entity", self.client.add_entity(app_id, version_id, entity))
            .await;

        let outcome = match result {
            Ok(id) => {
                self.sink.emit(&WorkflowEvent::EntityCreated {
                    kind,
                    name: name.clone(),
                    id: id.clone(),
                });
                SubTaskOutcome::Succeeded(id)
            }
            Err(e) => {
                let reason = e.to_string();
                self.sink.emit(&WorkflowEvent::OperationFailed {
                    op: Operation::AddEntity {
                        kind,
                        name: name.clone(),
                    },
                    reason: reason.clone(),
                });
                SubTaskOutcome::Failed(reason)
            }
        };

        EntityOutcome {
            kind,
            name,
            outcome,
        }
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, ClientError>
    where
        F: std::future::Future<Output = Result<T, ClientError>>,
    {
        match tokio::time::timeout(self.task_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout {
                operation,
                after: self.task_timeout,
            }),
        }
    }
}
