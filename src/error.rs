//! Error types for the WebSocket client.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use wsd::{ClientConfig, Result};
//!
//! async fn example() -> Result<()> {
//!     let config = ClientConfig::builder().url("ws://localhost:1337/ws").build()?;
//!     let (source, sink) = wsd::transport::dial(&config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants | Handling |
//! |----------|----------|----------|
//! | Configuration | [`Error::Config`], [`Error::InvalidUrl`] | fatal, before dial |
//! | Dial | [`Error::Dial`], [`Error::Tls`] | fatal, before the pipeline starts |
//! | Session end | [`Error::ConnectionClosed`] | terminal, exits with success |
//! | Transport | [`Error::WebSocket`] | reported, session continues |
//! | Input | [`Error::Io`] | reported, ends input |
//! | Runtime | [`Error::Task`] | fatal |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio::task::JoinError;
use tokio_tungstenite::tungstenite::Error as WsError;
use tokio_tungstenite::tungstenite::error::ProtocolError;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// In-session transport failures travel through the pipeline as values of
/// this type and are handled centrally by the error reporter.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when client configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ========================================================================
    // Dial Errors
    // ========================================================================
    /// WebSocket handshake failed.
    ///
    /// Returned when the connection to the endpoint cannot be established.
    #[error("Failed to connect to {url}: {source}")]
    Dial {
        /// Endpoint that was dialed.
        url: String,
        /// Underlying handshake error.
        #[source]
        source: WsError,
    },

    /// TLS connector could not be built.
    #[error("TLS error: {0}")]
    Tls(#[from] native_tls::Error),

    // ========================================================================
    // Session Errors
    // ========================================================================
    /// Connection closed by the remote end.
    ///
    /// The clean end-of-stream condition. Ends the session successfully.
    #[error("EOF")]
    ConnectionClosed,

    /// WebSocket error during the session.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),

    /// IO error.
    ///
    /// Raised when standard input cannot be read.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// A pipeline task panicked or was cancelled.
    #[error("Task failed: {0}")]
    Task(#[from] JoinError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a dial error for the given endpoint.
    #[inline]
    pub fn dial(url: impl Into<String>, source: WsError) -> Self {
        Self::Dial {
            url: url.into(),
            source,
        }
    }

    /// Classifies an error returned by the WebSocket stream.
    ///
    /// Closure conditions collapse into [`Error::ConnectionClosed`]; every
    /// other failure stays a [`Error::WebSocket`].
    pub fn from_transport(err: WsError) -> Self {
        match err {
            WsError::ConnectionClosed
            | WsError::AlreadyClosed
            | WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake) => {
                Self::ConnectionClosed
            }
            WsError::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
                Self::ConnectionClosed
            }
            other => Self::WebSocket(other),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is the clean remote-close condition.
    #[inline]
    #[must_use]
    pub fn is_clean_close(&self) -> bool {
        matches!(self, Self::ConnectionClosed)
    }

    /// Returns `true` if this error aborts the process with a failure status.
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::InvalidUrl(_) | Self::Dial { .. } | Self::Tls(_) | Self::Task(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
