// ABOUTME: Credential module - supplies the API key attached to outgoing requests.
// ABOUTME: Defines the Credential type, the provider trait, and an env-backed provider.

mod provider;

pub use provider::*;
