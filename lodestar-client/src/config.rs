//! Registry client configuration.

use lodestar_core::{ConfigError, Endpoint};
use serde::Deserialize;

/// Transport used to pick discovered registry endpoints when none is configured.
pub const DEFAULT_TRANSPORT: &str = "rest";

/// Configuration for the registry client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Bootstrap registry addresses, in rotation order.
    pub addresses: Vec<Endpoint>,

    /// Transport name selecting which discovered endpoints to use.
    pub transport: String,

    /// Whether registry endpoints discovered from the registry itself are used.
    pub auto_discovery: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            addresses: Vec::new(),
            transport: DEFAULT_TRANSPORT.to_string(),
            auto_discovery: false,
        }
    }
}

impl RegistryConfig {
    /// Create a new config with no addresses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from a comma-separated address list.
    ///
    /// Blank segments are ignored.
    pub fn from_addresses(addresses: &str) -> Result<Self, ConfigError> {
        let addresses = parse_address_list(addresses.split(','))?;
        Ok(Self {
            addresses,
            ..Default::default()
        })
    }

    /// Load a config from a JSON document.
    ///
    /// ```json
    /// { "address": "rest://10.0.0.1:30100,rest://10.0.0.2:30100",
    ///   "transport": "rest",
    ///   "autoDiscovery": true }
    /// ```
    ///
    /// `address` may also be an array of strings.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let document: RegistryConfigDocument =
            serde_json::from_str(document).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let addresses = match &document.address {
            AddressList::Joined(joined) => parse_address_list(joined.split(','))?,
            AddressList::List(list) => parse_address_list(list.iter().map(String::as_str))?,
        };

        Ok(Self {
            addresses,
            transport: document
                .transport
                .unwrap_or_else(|| DEFAULT_TRANSPORT.to_string()),
            auto_discovery: document.auto_discovery,
        })
    }

    /// Append a bootstrap address.
    #[must_use]
    pub fn address(mut self, endpoint: Endpoint) -> Self {
        self.addresses.push(endpoint);
        self
    }

    /// Set the transport name.
    #[must_use]
    pub fn transport(mut self, transport: impl Into<String>) -> Self {
        self.transport = transport.into();
        self
    }

    /// Enable or disable registry auto-discovery.
    #[must_use]
    pub fn auto_discovery(mut self, enabled: bool) -> Self {
        self.auto_discovery = enabled;
        self
    }

    /// Check that at least one bootstrap address is configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.addresses.is_empty() {
            return Err(ConfigError::NoRegistryAddress);
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryConfigDocument {
    address: AddressList,
    #[serde(default)]
    transport: Option<String>,
    #[serde(default)]
    auto_discovery: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AddressList {
    Joined(String),
    List(Vec<String>),
}

fn parse_address_list<'a>(
    entries: impl Iterator<Item = &'a str>,
) -> Result<Vec<Endpoint>, ConfigError> {
    entries
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| Endpoint::parse(entry).map_err(ConfigError::from))
        .collect()
}
