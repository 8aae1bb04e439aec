// ABOUTME: Client module - typed operations against the authoring service.
// ABOUTME: Defines types, the ResourceClient trait, and the HTTP implementation.

mod client;
mod luis;
mod types;

pub use client::*;
pub use luis::*;
pub use types::*;

#[cfg(test)]
mod types_test;
