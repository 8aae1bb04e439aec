// ABOUTME: Orchestrator module - runs the create-then-decorate workflow.
// ABOUTME: Contains the orchestrator, workflow plan and report, and event sinks.

mod events;
mod orchestrator;

pub use events::{
    ChannelSink, EventSink, FnSink, MemorySink, Operation, TracingSink, WorkflowEvent,
};
pub use orchestrator::{
    DEFAULT_TASK_TIMEOUT, EntityOutcome, Orchestrator, SubTaskOutcome, WorkflowPlan,
    WorkflowReport,
};
