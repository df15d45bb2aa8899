//! Registry address selection and failover.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use lodestar_core::{ConfigError, Endpoint};
use lodestar_discovery::{InstanceCacheManager, ServiceKey};
use rand::Rng;

use crate::config::RegistryConfig;

/// Hands out the registry address to connect to and rotates on failure.
///
/// Candidates are the configured bootstrap addresses followed by the
/// registry endpoints discovered from the registry's own self-registration.
/// A single cursor indexes that concatenation. Discovered endpoints are
/// fetched from the instance cache on every lookup and never kept here, so
/// the candidate list follows the cache as it grows or shrinks. A cursor that
/// lands past the end resets to the first bootstrap address.
///
/// Discovered endpoints are only consulted once auto-discovery is enabled in
/// the config and [`activate_discovery`](Self::activate_discovery) has been
/// called, which must happen after the first exchange with a bootstrap
/// address has succeeded.
///
/// ## Example
///
/// ```rust
/// use lodestar_client::{AddressManager, RegistryConfig};
/// use lodestar_discovery::StaticInstanceCacheManager;
///
/// let config = RegistryConfig::from_addresses("rest://10.0.0.1:30100").unwrap();
/// let manager = AddressManager::new(&config, StaticInstanceCacheManager::new()).unwrap();
///
/// let current = manager.current_address();
/// assert_eq!(current.address(), "10.0.0.1:30100");
///
/// // A single bootstrap address wraps back to itself
/// assert_eq!(manager.next_address(&current), current);
/// ```
pub struct AddressManager<M> {
    bootstrap: Vec<Endpoint>,
    transport: String,
    auto_discovery: bool,
    cache: M,
    cursor: AtomicUsize,
    discovery_active: AtomicBool,
}

impl<M: InstanceCacheManager> AddressManager<M> {
    /// Create a manager, starting at a random bootstrap address.
    ///
    /// Fails with [`ConfigError::NoRegistryAddress`] if no bootstrap address
    /// is configured.
    pub fn new(config: &RegistryConfig, cache: M) -> Result<Self, ConfigError> {
        config.validate()?;
        let start = rand::thread_rng().gen_range(0..config.addresses.len());
        Ok(Self::with_cursor(config, cache, start))
    }

    fn with_cursor(config: &RegistryConfig, cache: M, cursor: usize) -> Self {
        Self {
            bootstrap: config.addresses.clone(),
            transport: config.transport.clone(),
            auto_discovery: config.auto_discovery,
            cache,
            cursor: AtomicUsize::new(cursor),
            discovery_active: AtomicBool::new(false),
        }
    }

    /// Allow discovered registry endpoints to be used.
    ///
    /// No-op when auto-discovery is disabled. Otherwise the first call primes
    /// the instance cache for the registry's own service key; later calls do
    /// nothing.
    pub fn activate_discovery(&self) {
        if !self.auto_discovery {
            return;
        }
        if self
            .discovery_active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        let primed = self.cache.get_or_create(&ServiceKey::registry()).is_some();
        tracing::debug!(
            transport = %self.transport,
            primed,
            "Registry auto-discovery activated"
        );
    }

    /// The currently selected registry address.
    #[must_use]
    pub fn current_address(&self) -> Endpoint {
        self.resolve(self.cursor.load(Ordering::Acquire))
    }

    /// Report `failed` as unreachable and get the address to use instead.
    ///
    /// The cursor only advances when `failed` is still the current address.
    /// A report against an address that has already been rotated away from
    /// returns the current address unchanged.
    pub fn next_address(&self, failed: &Endpoint) -> Endpoint {
        let current = self.current_address();
        if current != *failed {
            return current;
        }

        self.cursor.fetch_add(1, Ordering::AcqRel);
        let next = self.current_address();
        tracing::info!(from = %failed, to = %next, "Changed registry address");
        next
    }

    /// Raw cursor value.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_discovery_active(&self) -> bool {
        self.discovery_active.load(Ordering::Acquire)
    }

    /// Configured bootstrap addresses.
    #[must_use]
    pub fn bootstrap(&self) -> &[Endpoint] {
        &self.bootstrap
    }

    /// Transport name used to select discovered endpoints.
    #[must_use]
    pub fn transport(&self) -> &str {
        &self.transport
    }

    fn resolve(&self, index: usize) -> Endpoint {
        if let Some(endpoint) = self.bootstrap.get(index) {
            return endpoint.clone();
        }

        let discovered = self.discovered();
        match discovered.into_iter().nth(index - self.bootstrap.len()) {
            Some(endpoint) => endpoint,
            None => {
                // Full reset rather than modulo: the discovered list may have shrunk
                tracing::debug!(index, "Registry address cursor out of range, resetting");
                self.cursor.store(0, Ordering::Release);
                self.bootstrap[0].clone()
            }
        }
    }

    fn discovered(&self) -> Vec<Endpoint> {
        if !self.auto_discovery || !self.is_discovery_active() {
            return Vec::new();
        }
        let Some(cache) = self.cache.get_or_create(&ServiceKey::registry()) else {
            return Vec::new();
        };

        cache
            .endpoints(&self.transport)
            .iter()
            .filter_map(|record| match Endpoint::parse(record.endpoint()) {
                Ok(endpoint) => Some(endpoint),
                Err(e) => {
                    tracing::warn!(
                        instance = record.instance_id(),
                        error = %e,
                        "Skipping unparseable registry endpoint"
                    );
                    None
                }
            })
            .collect()
    }
}
