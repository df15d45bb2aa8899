//! Cached registry instances and the lookup key that identifies them.

use std::collections::HashMap;

/// Application id under which the registry registers itself.
pub const REGISTRY_APP_ID: &str = "default";

/// Service name under which the registry registers itself.
pub const REGISTRY_SERVICE_NAME: &str = "SERVICECENTER";

/// Version rule matching the newest registered version.
pub const VERSION_RULE_LATEST: &str = "latest";

/// Logical address of a cached service: app id, service name, version rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceKey {
    pub app_id: String,
    pub service_name: String,
    pub version_rule: String,
}

impl ServiceKey {
    /// Create a new key.
    #[must_use]
    pub fn new(
        app_id: impl Into<String>,
        service_name: impl Into<String>,
        version_rule: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            service_name: service_name.into(),
            version_rule: version_rule.into(),
        }
    }

    /// Key of the registry's own self-registration, latest version.
    #[must_use]
    pub fn registry() -> Self {
        Self::new(REGISTRY_APP_ID, REGISTRY_SERVICE_NAME, VERSION_RULE_LATEST)
    }
}

/// A registered instance and the endpoints it advertises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MicroserviceInstance {
    pub instance_id: String,

    /// Raw endpoint URIs, e.g. `rest://10.0.0.1:30100?sslEnabled=false`.
    pub endpoints: Vec<String>,
}

impl MicroserviceInstance {
    #[must_use]
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            endpoints: Vec::new(),
        }
    }

    /// Add an advertised endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoints.push(endpoint.into());
        self
    }
}

/// One advertised endpoint of a cached instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEndpoint {
    endpoint: String,
    instance_id: String,
}

impl CacheEndpoint {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, instance_id: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            instance_id: instance_id.into(),
        }
    }

    /// Raw address string, parseable into an `Endpoint`.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Id of the instance advertising this endpoint.
    #[must_use]
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }
}

/// Snapshot of the instances registered under one [`ServiceKey`].
///
/// Endpoints are grouped by transport name, which is the scheme of each
/// advertised URI. Within a transport, order follows instance order and then
/// the order each instance lists its endpoints.
#[derive(Debug, Clone)]
pub struct InstanceCache {
    key: ServiceKey,
    instances: Vec<MicroserviceInstance>,
    transport_map: HashMap<String, Vec<CacheEndpoint>>,
}

impl InstanceCache {
    /// Build a cache snapshot from a list of instances.
    #[must_use]
    pub fn new(key: ServiceKey, instances: Vec<MicroserviceInstance>) -> Self {
        let mut transport_map: HashMap<String, Vec<CacheEndpoint>> = HashMap::new();

        for instance in &instances {
            for endpoint in &instance.endpoints {
                let Some((scheme, _)) = endpoint.split_once("://") else {
                    continue;
                };
                if scheme.is_empty() {
                    continue;
                }
                transport_map
                    .entry(scheme.to_ascii_lowercase())
                    .or_default()
                    .push(CacheEndpoint::new(endpoint.as_str(), instance.instance_id.as_str()));
            }
        }

        Self {
            key,
            instances,
            transport_map,
        }
    }

    /// Empty snapshot for a key.
    #[must_use]
    pub fn empty(key: ServiceKey) -> Self {
        Self::new(key, Vec::new())
    }

    #[must_use]
    pub fn key(&self) -> &ServiceKey {
        &self.key
    }

    #[must_use]
    pub fn instances(&self) -> &[MicroserviceInstance] {
        &self.instances
    }

    /// Transport name to ordered endpoints.
    #[must_use]
    pub fn transport_map(&self) -> &HashMap<String, Vec<CacheEndpoint>> {
        &self.transport_map
    }

    /// Endpoints for one transport, empty if none are advertised.
    #[must_use]
    pub fn endpoints(&self, transport: &str) -> &[CacheEndpoint] {
        self.transport_map
            .get(transport)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
