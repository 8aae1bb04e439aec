// ABOUTME: Root module for luis-authoring - async client for the LUIS authoring API.
// ABOUTME: Re-exports the credential, client, orchestrator, and config modules.

pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod orchestrator;
pub mod prelude;

pub use error::LuisError;
