//! # lodestar-discovery
//!
//! Registry instance cache for the Lodestar registry client.
//!
//! This crate provides:
//! - `InstanceCacheManager` trait, the lookup contract address selection relies on
//! - `InstanceCache` snapshots grouped by transport
//! - `StaticInstanceCacheManager` for in-memory caches and testing
//! - The well-known key of the registry's own self-registration

mod cache;
mod manager;

pub use cache::{
    CacheEndpoint, InstanceCache, MicroserviceInstance, REGISTRY_APP_ID, REGISTRY_SERVICE_NAME,
    ServiceKey, VERSION_RULE_LATEST,
};
pub use manager::{InstanceCacheManager, StaticInstanceCacheManager};
