//! # Lodestar
//!
//! Client-side address management for service registry consumers.
//!
//! Lodestar provides:
//! - **Failover** between statically configured registry addresses
//! - **Auto-discovery** of further registry endpoints from the registry's own
//!   self-registration, merged into the same rotation
//! - **Lock-free selection**: the hot path is a single atomic load
//!
//! ## Quick Start
//!
//! ```rust
//! use lodestar::prelude::*;
//! use std::sync::Arc;
//!
//! let cache = Arc::new(StaticInstanceCacheManager::new());
//! let config = RegistryConfig::from_addresses("rest://10.0.0.1:30100")
//!     .unwrap()
//!     .auto_discovery(true);
//!
//! let manager = AddressManager::new(&config, Arc::clone(&cache)).unwrap();
//!
//! // After the first successful exchange with the bootstrap address
//! manager.activate_discovery();
//!
//! let address = manager.current_address();
//! assert_eq!(address.address(), "10.0.0.1:30100");
//! ```
//!
//! ## Architecture
//!
//! Lodestar is composed of several crates:
//!
//! - [`lodestar-core`] - Error types and the `Endpoint` address
//! - [`lodestar-discovery`] - Registry instance cache contract
//! - [`lodestar-client`] - Configuration and address selection

// Re-export core types
pub use lodestar_core::{ConfigError, Endpoint, EndpointError, LodestarError};

// Re-export discovery
pub use lodestar_discovery::{
    CacheEndpoint, InstanceCache, InstanceCacheManager, MicroserviceInstance, REGISTRY_APP_ID,
    REGISTRY_SERVICE_NAME, ServiceKey, StaticInstanceCacheManager, VERSION_RULE_LATEST,
};

// Re-export client
pub use lodestar_client::{AddressManager, DEFAULT_TRANSPORT, RegistryConfig};

/// Prelude module for convenient imports.
///
/// ```rust
/// use lodestar::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        AddressManager, Endpoint, InstanceCacheManager, RegistryConfig,
        StaticInstanceCacheManager,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
