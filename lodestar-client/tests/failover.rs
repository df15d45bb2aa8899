//! End-to-end failover across bootstrap and discovered registry endpoints.

use std::sync::Arc;

use lodestar_client::{AddressManager, RegistryConfig};
use lodestar_core::Endpoint;
use lodestar_discovery::{
    InstanceCache, MicroserviceInstance, ServiceKey, StaticInstanceCacheManager,
};

const A: &str = "rest://10.0.0.1:30100";
const B: &str = "rest://10.0.0.2:30100";
const C: &str = "rest://10.0.1.1:30100";
const D: &str = "rest://10.0.1.2:30100";

fn ep(s: &str) -> Endpoint {
    s.parse().unwrap()
}

fn publish(cache: &StaticInstanceCacheManager, endpoints: &[&str]) {
    let instances = endpoints
        .iter()
        .enumerate()
        .map(|(i, e)| MicroserviceInstance::new(format!("sc-{i}")).with_endpoint(*e))
        .collect();
    cache.update(InstanceCache::new(ServiceKey::registry(), instances));
}

#[test]
fn test_bootstrap_rotation_without_discovery() {
    let config = RegistryConfig::from_addresses(&format!("{A},{B}")).unwrap();
    let manager = AddressManager::new(&config, StaticInstanceCacheManager::new()).unwrap();

    let first = manager.current_address();
    let second = if first == ep(A) { ep(B) } else { ep(A) };

    assert_eq!(manager.next_address(&first), second);
    if second == ep(B) {
        // Stepping past B wraps back to the first bootstrap address
        assert_eq!(manager.next_address(&second), ep(A));
        assert_eq!(manager.cursor(), 0);
    }
}

#[test]
fn test_rotation_through_discovered_endpoints() {
    let cache = Arc::new(StaticInstanceCacheManager::new());
    publish(&cache, &[C, D]);

    let config = RegistryConfig::from_addresses(A).unwrap().auto_discovery(true);
    let manager = AddressManager::new(&config, Arc::clone(&cache)).unwrap();
    manager.activate_discovery();

    assert_eq!(manager.current_address(), ep(A));
    assert_eq!(manager.next_address(&ep(A)), ep(C));
    assert_eq!(manager.next_address(&ep(C)), ep(D));
    assert_eq!(manager.next_address(&ep(D)), ep(A));
    assert_eq!(manager.cursor(), 0);
}

#[test]
fn test_discovered_set_shrinks_under_cursor() {
    let cache = Arc::new(StaticInstanceCacheManager::new());
    publish(&cache, &[C, D]);

    let config = RegistryConfig::from_addresses(A).unwrap().auto_discovery(true);
    let manager = AddressManager::new(&config, Arc::clone(&cache)).unwrap();
    manager.activate_discovery();

    manager.next_address(&ep(A));
    assert_eq!(manager.next_address(&ep(C)), ep(D));
    assert_eq!(manager.cursor(), 2);

    publish(&cache, &[C]);

    // D is gone; the cursor resets and the stale report does not advance it
    assert_eq!(manager.next_address(&ep(D)), ep(A));
    assert_eq!(manager.cursor(), 0);
}

#[test]
fn test_discovered_set_grows_without_failover() {
    let cache = Arc::new(StaticInstanceCacheManager::new());
    publish(&cache, &[C]);

    let config = RegistryConfig::from_addresses(A).unwrap().auto_discovery(true);
    let manager = AddressManager::new(&config, Arc::clone(&cache)).unwrap();
    manager.activate_discovery();

    assert_eq!(manager.next_address(&ep(A)), ep(C));

    // Mapping is recomputed on every read
    publish(&cache, &[D, C]);
    assert_eq!(manager.current_address(), ep(D));
}

#[test]
fn test_concurrent_failure_reports() {
    let cache = Arc::new(StaticInstanceCacheManager::new());
    publish(&cache, &[C, D]);

    let config = RegistryConfig::from_addresses(A).unwrap().auto_discovery(true);
    let manager = AddressManager::new(&config, Arc::clone(&cache)).unwrap();
    manager.activate_discovery();

    let candidates = [ep(A), ep(C), ep(D)];
    let failed = ep(A);

    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..100 {
                    let next = manager.next_address(&failed);
                    assert!(candidates.contains(&next));
                }
            });
        }
    });

    assert!(manager.cursor() <= 3);
    assert!(candidates.contains(&manager.current_address()));
}

#[test]
fn test_concurrent_activation_primes_once() {
    let cache = Arc::new(StaticInstanceCacheManager::new());
    publish(&cache, &[C]);

    let config = RegistryConfig::from_addresses(A).unwrap().auto_discovery(true);
    let manager = AddressManager::new(&config, Arc::clone(&cache)).unwrap();

    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| manager.activate_discovery());
        }
    });

    assert!(manager.is_discovery_active());
    assert_eq!(manager.next_address(&ep(A)), ep(C));
}
