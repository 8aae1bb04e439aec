// ABOUTME: Sample that creates a LUIS app with a simple and a hierarchical entity.
// ABOUTME: Reads AZURE_LUIS_KEY, prints progress to stdout, and exits non-zero on failure.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use luis_authoring::prelude::*;

/// Prints workflow progress the way a person following along wants to read it.
struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&self, event: &WorkflowEvent) {
        match event {
            WorkflowEvent::AppRequested { name, version_id } => {
                println!("Creating App {}, version {}", name, version_id)
            }
            WorkflowEvent::AppCreated { id } => {
                println!("Created app {}", id);
                println!("We'll create two new entities.");
                println!("The \"Destination\" simple entity will hold the flight destination.");
                println!(
                    "The \"Class\" hierarchical entity will accept \"First\", \"Business\" and \"Economy\" values."
                );
            }
            WorkflowEvent::EntityRequested { .. } => {}
            WorkflowEvent::EntityCreated { kind, name, id } => {
                println!("{} {} entity created with id {}", name, kind, id)
            }
            WorkflowEvent::OperationFailed { op, reason } => {
                eprintln!("Failed to {}: {}", op, reason)
            }
            WorkflowEvent::Done { succeeded, failed } => {
                println!("Done: {} entities created, {} failed", succeeded, failed)
            }
        }
    }
}

async fn run(config: AuthoringConfig) -> Result<bool> {
    let provider = config.credential_provider()?;
    let client = config.build_client(&provider)?;

    let orchestrator = Orchestrator::new(Arc::new(client))
        .with_sink(Arc::new(ConsoleSink))
        .with_task_timeout(config.task_timeout);

    match orchestrator.run(&WorkflowPlan::default()).await {
        Ok(report) => Ok(report.is_success()),
        // Already reported through the sink.
        Err(WorkflowError::ApplicationCreation(_)) => Ok(false),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let outcome = match AuthoringConfig::from_env() {
        Ok(config) => run(config).await,
        Err(e) => Err(e.into()),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
