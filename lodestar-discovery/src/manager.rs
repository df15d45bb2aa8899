//! Instance cache manager trait and an in-memory implementation.

use std::sync::Arc;

use dashmap::DashMap;

use crate::cache::{InstanceCache, ServiceKey};

/// Source of cached registry instances.
///
/// `get_or_create` is called on the address-selection path, so
/// implementations should answer from memory. `None` means the cache for
/// that key is not ready yet; callers treat it as an empty instance list.
pub trait InstanceCacheManager: Send + Sync + 'static {
    /// Look up the cached instances for a service key.
    fn get_or_create(&self, key: &ServiceKey) -> Option<Arc<InstanceCache>>;
}

impl<M: InstanceCacheManager> InstanceCacheManager for Arc<M> {
    fn get_or_create(&self, key: &ServiceKey) -> Option<Arc<InstanceCache>> {
        (**self).get_or_create(key)
    }
}

/// An instance cache manager holding pre-loaded snapshots.
///
/// Useful for testing, or when another component pushes registry updates
/// in through [`update`](Self::update).
///
/// ## Example
///
/// ```rust
/// use lodestar_discovery::{
///     InstanceCache, InstanceCacheManager, MicroserviceInstance, ServiceKey,
///     StaticInstanceCacheManager,
/// };
///
/// let manager = StaticInstanceCacheManager::new();
/// manager.update(InstanceCache::new(
///     ServiceKey::registry(),
///     vec![MicroserviceInstance::new("sc-1").with_endpoint("rest://10.0.0.1:30100")],
/// ));
///
/// let cache = manager.get_or_create(&ServiceKey::registry()).unwrap();
/// assert_eq!(cache.endpoints("rest").len(), 1);
/// ```
pub struct StaticInstanceCacheManager {
    caches: DashMap<ServiceKey, Arc<InstanceCache>>,
}

impl StaticInstanceCacheManager {
    /// Create a new empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self {
            caches: DashMap::new(),
        }
    }

    /// Replace the snapshot stored under the cache's key.
    pub fn update(&self, cache: InstanceCache) {
        let key = cache.key().clone();
        tracing::debug!(
            app_id = %key.app_id,
            service = %key.service_name,
            version_rule = %key.version_rule,
            instances = cache.instances().len(),
            "Updating instance cache"
        );
        self.caches.insert(key, Arc::new(cache));
    }

    /// Drop the snapshot for a key.
    pub fn remove(&self, key: &ServiceKey) {
        self.caches.remove(key);
    }
}

impl Default for StaticInstanceCacheManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InstanceCacheManager for StaticInstanceCacheManager {
    fn get_or_create(&self, key: &ServiceKey) -> Option<Arc<InstanceCache>> {
        self.caches.get(key).map(|e| Arc::clone(e.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MicroserviceInstance;

    fn registry_cache(endpoints: &[&str]) -> InstanceCache {
        let instances = endpoints
            .iter()
            .enumerate()
            .map(|(i, e)| MicroserviceInstance::new(format!("sc-{i}")).with_endpoint(*e))
            .collect();
        InstanceCache::new(ServiceKey::registry(), instances)
    }

    #[test]
    fn test_unknown_key_is_absent() {
        let manager = StaticInstanceCacheManager::new();
        assert!(manager.get_or_create(&ServiceKey::registry()).is_none());
    }

    #[test]
    fn test_update_replaces_snapshot() {
        let manager = StaticInstanceCacheManager::new();
        manager.update(registry_cache(&["rest://10.0.0.1:30100", "rest://10.0.0.2:30100"]));
        let first = manager.get_or_create(&ServiceKey::registry()).unwrap();
        assert_eq!(first.endpoints("rest").len(), 2);

        manager.update(registry_cache(&["rest://10.0.0.3:30100"]));
        let second = manager.get_or_create(&ServiceKey::registry()).unwrap();
        assert_eq!(second.endpoints("rest").len(), 1);

        // Earlier snapshots stay valid for holders
        assert_eq!(first.endpoints("rest").len(), 2);
    }

    #[test]
    fn test_remove() {
        let manager = StaticInstanceCacheManager::new();
        manager.update(registry_cache(&["rest://10.0.0.1:30100"]));
        manager.remove(&ServiceKey::registry());
        assert!(manager.get_or_create(&ServiceKey::registry()).is_none());
    }

    #[test]
    fn test_shared_handle() {
        let manager = Arc::new(StaticInstanceCacheManager::new());
        manager.update(registry_cache(&["rest://10.0.0.1:30100"]));

        let handle: &dyn InstanceCacheManager = &manager;
        assert!(handle.get_or_create(&ServiceKey::registry()).is_some());
    }
}
