//! Builder pattern for client configuration.
//!
//! Provides a fluent API for configuring and validating [`ClientConfig`]
//! instances.
//!
//! # Example
//!
//! ```no_run
//! use wsd::ClientConfig;
//!
//! # fn example() -> wsd::Result<()> {
//! let config = ClientConfig::builder()
//!     .url("ws://127.0.0.1:8080/echo")
//!     .insecure_skip_verify(true)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use url::Url;

use crate::error::{Error, Result};

use super::client::{ClientConfig, DEFAULT_ORIGIN, DEFAULT_URL};

// ============================================================================
// ClientConfigBuilder
// ============================================================================

/// Builder for configuring a [`ClientConfig`] instance.
///
/// Use [`ClientConfig::builder()`] to create a new builder. Unset fields
/// fall back to [`DEFAULT_URL`] and [`DEFAULT_ORIGIN`].
#[derive(Debug, Default, Clone)]
pub struct ClientConfigBuilder {
    /// Target endpoint.
    url: Option<String>,
    /// Origin header value.
    origin: Option<String>,
    /// Subprotocol to negotiate.
    protocol: Option<String>,
    /// Skip TLS verification.
    insecure_skip_verify: bool,
}

// ============================================================================
// ClientConfigBuilder Implementation
// ============================================================================

impl ClientConfigBuilder {
    /// Creates a new builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the WebSocket endpoint to connect to.
    ///
    /// # Arguments
    ///
    /// * `url` - `ws://` or `wss://` URL
    #[inline]
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the Origin header sent during the handshake.
    #[inline]
    #[must_use]
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Sets the subprotocol to negotiate.
    ///
    /// A blank value means no subprotocol.
    #[inline]
    #[must_use]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Disables TLS certificate validation on `wss` connections.
    #[inline]
    #[must_use]
    pub fn insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = skip;
        self
    }

    /// Builds the configuration with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] if the URL or origin does not parse
    /// - [`Error::Config`] if the URL scheme is not `ws`/`wss`
    /// - [`Error::Config`] if the origin is empty
    pub fn build(self) -> Result<ClientConfig> {
        let url = self.validate_url()?;
        let origin = self.validate_origin()?;
        let protocol = self
            .protocol
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(ClientConfig {
            url,
            origin,
            protocol,
            insecure_skip_verify: self.insecure_skip_verify,
        })
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ClientConfigBuilder {
    /// Validates the endpoint URL.
    fn validate_url(&self) -> Result<Url> {
        let raw = self.url.as_deref().unwrap_or(DEFAULT_URL);
        let url = Url::parse(raw)?;

        match url.scheme() {
            "ws" | "wss" => Ok(url),
            other => Err(Error::config(format!(
                "Unsupported URL scheme '{other}' in {raw}\n\
                 Expected ws:// or wss://"
            ))),
        }
    }

    /// Validates the Origin header value.
    fn validate_origin(&self) -> Result<String> {
        let origin = self.origin.as_deref().unwrap_or(DEFAULT_ORIGIN).trim();

        if origin.is_empty() {
            return Err(Error::config("Origin must not be empty"));
        }

        Url::parse(origin)?;
        Ok(origin.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
