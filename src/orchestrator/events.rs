// ABOUTME: Structured workflow events and the sinks that receive them.
// ABOUTME: Sinks cover tracing, tokio channels, in-memory recording, and closures.

use std::fmt;
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::client::{AppId, EntityId, EntityKind};

/// A remote operation performed by the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateApplication,
    AddEntity { kind: EntityKind, name: String },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::CreateApplication => write!(f, "create application"),
            Operation::AddEntity { kind, name } => write!(f, "add {} entity '{}'", kind, name),
        }
    }
}

/// Progress reported while a workflow runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// Application creation is about to be requested.
    AppRequested { name: String, version_id: String },

    /// The server assigned an application identifier.
    AppCreated { id: AppId },

    /// An entity creation sub-task was dispatched.
    EntityRequested { kind: EntityKind, name: String },

    /// An entity was created.
    EntityCreated {
        kind: EntityKind,
        name: String,
        id: EntityId,
    },

    /// An operation failed. Entity failures do not stop sibling entities.
    OperationFailed { op: Operation, reason: String },

    /// Every sub-task has settled.
    Done { succeeded: usize, failed: usize },
}

/// Receiver of workflow events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &WorkflowEvent);
}

/// Sink that forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &WorkflowEvent) {
        match event {
            WorkflowEvent::AppRequested { name, version_id } => {
                info!(app = %name, version = %version_id, "creating application")
            }
            WorkflowEvent::AppCreated { id } => info!(app_id = %id, "application created"),
            WorkflowEvent::EntityRequested { kind, name } => {
                debug!(%kind, entity = %name, "creating entity")
            }
            WorkflowEvent::EntityCreated { kind, name, id } => {
                info!(%kind, entity = %name, entity_id = %id, "entity created")
            }
            WorkflowEvent::OperationFailed { op, reason } => {
                warn!(operation = %op, %reason, "operation failed")
            }
            WorkflowEvent::Done { succeeded, failed } => {
                info!(succeeded, failed, "workflow done")
            }
        }
    }
}

/// Sink that sends events down an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<WorkflowEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiver that observes its events.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<WorkflowEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: &WorkflowEvent) {
        if self.tx.send(event.clone()).is_err() {
            debug!("event receiver dropped");
        }
    }
}

/// Sink that records every event in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<WorkflowEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<WorkflowEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: &WorkflowEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}

/// Sink that calls a closure for each event.
pub struct FnSink<F>(pub F);

impl<F> EventSink for FnSink<F>
where
    F: Fn(&WorkflowEvent) + Send + Sync,
{
    fn emit(&self, event: &WorkflowEvent) {
        (self.0)(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        let op = Operation::AddEntity {
            kind: EntityKind::Hierarchical,
            name: "Class".into(),
        };
        assert_eq!(op.to_string(), "add hierarchical entity 'Class'");
        assert_eq!(Operation::CreateApplication.to_string(), "create application");
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.emit(&WorkflowEvent::AppCreated {
            id: AppId::new("A1"),
        });
        sink.emit(&WorkflowEvent::Done {
            succeeded: 0,
            failed: 0,
        });
        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            WorkflowEvent::AppCreated {
                id: AppId::new("A1")
            }
        );
    }

    #[tokio::test]
    async fn test_channel_sink_delivers() {
        let (sink, mut rx) = ChannelSink::new();
        sink.emit(&WorkflowEvent::Done {
            succeeded: 2,
            failed: 0,
        });
        drop(sink);
        assert_eq!(
            rx.recv().await,
            Some(WorkflowEvent::Done {
                succeeded: 2,
                failed: 0
            })
        );
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn test_channel_sink_tolerates_dropped_receiver() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        sink.emit(&WorkflowEvent::Done {
            succeeded: 0,
            failed: 0,
        });
    }

    #[test]
    fn test_fn_sink() {
        let count = std::sync::atomic::AtomicUsize::new(0);
        let sink = FnSink(|_: &WorkflowEvent| {
            count.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });
        sink.emit(&WorkflowEvent::Done {
            succeeded: 0,
            failed: 0,
        });
        assert_eq!(count.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
