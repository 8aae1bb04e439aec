// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use luis_authoring::prelude::*;` to get started quickly.

pub use crate::client::{
    AppId, ApplicationInfo, ApplicationSpec, EntityId, EntityKind, EntitySpec, LuisClient,
    ResourceClient,
};
pub use crate::config::AuthoringConfig;
pub use crate::credential::{
    Credential, CredentialProvider, EnvCredentialProvider, StaticCredentialProvider,
};
pub use crate::error::{ClientError, CredentialError, LuisError, WorkflowError};
pub use crate::orchestrator::{
    ChannelSink, EntityOutcome, EventSink, FnSink, MemorySink, Operation, Orchestrator,
    SubTaskOutcome, TracingSink, WorkflowEvent, WorkflowPlan, WorkflowReport,
};
