//! Client configuration.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ClientConfig`] | Validated connection settings for one session |
//! | [`ClientConfigBuilder`] | Fluent configuration builder |
//!
//! # Example
//!
//! ```no_run
//! use wsd::{ClientConfig, Result};
//!
//! # fn example() -> Result<()> {
//! let config = ClientConfig::builder()
//!     .url("wss://echo.example.com/ws")
//!     .origin("https://example.com/")
//!     .protocol("chat")
//!     .build()?;
//!
//! assert!(config.is_secure());
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for client configuration.
pub mod builder;

/// Validated client configuration.
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ClientConfigBuilder;
pub use client::{ClientConfig, DEFAULT_ORIGIN, DEFAULT_URL};
