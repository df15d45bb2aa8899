//! # lodestar-client
//!
//! Registry address management for the Lodestar registry client.
//!
//! This crate provides:
//! - `RegistryConfig` for bootstrap addresses, transport and auto-discovery
//! - `AddressManager`, which selects the registry address to use and
//!   fails over between bootstrap and discovered registry endpoints

mod address;
mod config;

pub use address::AddressManager;
pub use config::{DEFAULT_TRANSPORT, RegistryConfig};
