//! # lodestar-core
//!
//! Core types and error definitions for the Lodestar registry client.
//!
//! This crate provides:
//! - Error types (`LodestarError`, `ConfigError`, `EndpointError`)
//! - The transport-level `Endpoint` address

mod endpoint;
mod error;

pub use endpoint::Endpoint;
pub use error::{ConfigError, EndpointError, LodestarError};
