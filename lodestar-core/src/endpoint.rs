//! Transport-level registry endpoint.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use url::Url;

use crate::error::EndpointError;

/// Query parameter that marks an endpoint as TLS-enabled.
const SSL_ENABLED_PARAM: &str = "sslEnabled";

/// A registry endpoint parsed from a `scheme://host:port[?query]` URI.
///
/// Two endpoints are equal when their normalized `host:port` match. The
/// scheme and TLS flag are carried along for the transport layer but play
/// no part in equality, so an endpoint reported as failed matches the
/// selected one regardless of how either was spelled.
///
/// ## Example
///
/// ```rust
/// use lodestar_core::Endpoint;
///
/// let a: Endpoint = "rest://10.0.0.1:30100?sslEnabled=true".parse().unwrap();
/// let b: Endpoint = "http://10.0.0.1:30100".parse().unwrap();
///
/// assert!(a.ssl_enabled());
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct Endpoint {
    scheme: String,
    host: String,
    port: u16,
    ssl_enabled: bool,
}

impl Endpoint {
    /// Parse an endpoint from its URI form.
    pub fn parse(address: &str) -> Result<Self, EndpointError> {
        let address = address.trim();
        let url = Url::parse(address).map_err(|e| EndpointError::Parse {
            address: address.to_string(),
            reason: e.to_string(),
        })?;

        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| EndpointError::MissingHost(address.to_string()))?
            .to_ascii_lowercase();

        // Special schemes report their default port as None from `port()`
        let port = url
            .port_or_known_default()
            .ok_or_else(|| EndpointError::MissingPort(address.to_string()))?;

        let ssl_enabled = url.scheme() == "https"
            || url
                .query_pairs()
                .any(|(key, value)| key == SSL_ENABLED_PARAM && value.eq_ignore_ascii_case("true"));

        Ok(Self {
            scheme: url.scheme().to_string(),
            host,
            port,
            ssl_enabled,
        })
    }

    /// URI scheme, e.g. `rest` or `http`.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Lower-cased host name or IP literal. IPv6 literals keep their brackets.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether the endpoint expects TLS.
    #[must_use]
    pub fn ssl_enabled(&self) -> bool {
        self.ssl_enabled
    }

    /// Normalized `host:port`, the key used for equality.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Socket address, if the host is an IP literal.
    #[must_use]
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        let ip = self
            .host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .ok()?;
        Some(SocketAddr::new(ip, self.port))
    }
}

impl PartialEq for Endpoint {
    fn eq(&self, other: &Self) -> bool {
        self.port == other.port && self.host == other.host
    }
}

impl Eq for Endpoint {}

impl Hash for Endpoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.host.hash(state);
        self.port.hash(state);
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.scheme, self.host, self.port)
    }
}
