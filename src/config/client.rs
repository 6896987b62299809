//! Validated connection settings.

// ============================================================================
// Imports
// ============================================================================

use url::Url;

use super::builder::ClientConfigBuilder;

// ============================================================================
// Constants
// ============================================================================

/// Endpoint dialed when no URL is given.
pub const DEFAULT_URL: &str = "ws://localhost:1337/ws";

/// Origin header sent when no origin is given.
pub const DEFAULT_ORIGIN: &str = "http://localhost/";

// ============================================================================
// ClientConfig
// ============================================================================

/// Connection settings for a single session.
///
/// Only constructed through [`ClientConfigBuilder::build`], so every
/// instance holds a parsed `ws`/`wss` URL and a non-empty origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Target endpoint.
    pub(crate) url: Url,
    /// Origin header value.
    pub(crate) origin: String,
    /// Subprotocol to negotiate, if any.
    pub(crate) protocol: Option<String>,
    /// Skip TLS certificate and hostname validation.
    pub(crate) insecure_skip_verify: bool,
}

impl ClientConfig {
    /// Creates a new configuration builder.
    #[inline]
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the target endpoint.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the Origin header value.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the subprotocol to negotiate.
    #[inline]
    #[must_use]
    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    /// Returns `true` if TLS verification is disabled.
    #[inline]
    #[must_use]
    pub const fn insecure_skip_verify(&self) -> bool {
        self.insecure_skip_verify
    }

    /// Returns `true` for `wss` endpoints.
    #[inline]
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.url.scheme() == "wss"
    }
}

// ============================================================================
// Tests
// ============================================================================
