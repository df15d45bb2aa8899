//! Error types for the Lodestar registry client.

/// Main error type for Lodestar operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LodestarError {
    /// Configuration error (missing or malformed registry settings)
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Endpoint error (address could not be parsed)
    #[error("endpoint error: {0}")]
    Endpoint(#[from] EndpointError),
}

/// Errors raised while parsing a registry endpoint address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    /// The address is not a valid URI
    #[error("invalid endpoint {address:?}: {reason}")]
    Parse {
        /// The rejected address
        address: String,
        /// Why the parser rejected it
        reason: String,
    },

    /// The address has no host component
    #[error("endpoint has no host: {0}")]
    MissingHost(String),

    /// The address has no port and its scheme has no known default
    #[error("endpoint has no port: {0}")]
    MissingPort(String),
}

/// Errors raised while building the registry client configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No bootstrap registry address was configured
    #[error("registry address is required to start the application")]
    NoRegistryAddress,

    /// A configured registry address could not be parsed
    #[error("invalid registry address: {0}")]
    InvalidAddress(#[from] EndpointError),

    /// The configuration document itself is malformed
    #[error("malformed configuration: {0}")]
    Parse(String),
}

impl LodestarError {
    /// Check if this error must abort startup.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
