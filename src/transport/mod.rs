//! WebSocket transport layer.
//!
//! The pipeline only sees the transport through two halves: a
//! [`FrameSource`] owned by the inbound reader and a [`FrameSink`] owned by
//! the outbound writer. Neither half is shared, so no locking is needed.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   FrameSink    ┌─────────────────┐
//! │ Outbound     │───────────────►│                 │
//! │ Writer       │                │  WebSocket      │
//! └──────────────┘                │  endpoint       │
//! ┌──────────────┐   FrameSource  │  (ws / wss)     │
//! │ Inbound      │◄───────────────│                 │
//! │ Reader       │                │                 │
//! └──────────────┘                └─────────────────┘
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `websocket` | `tokio-tungstenite` dialer and stream halves |

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;

use crate::error::Result;
use crate::frame::Frame;

// ============================================================================
// Submodules
// ============================================================================

/// `tokio-tungstenite` backed transport.
pub mod websocket;

/// In-memory transport for pipeline tests.
#[cfg(test)]
pub(crate) mod memory;

// ============================================================================
// Re-exports
// ============================================================================

pub use websocket::{WsSink, WsSource, dial};

// ============================================================================
// Traits
// ============================================================================

/// Read half of a connected transport.
#[async_trait]
pub trait FrameSource: Send + 'static {
    /// Blocks until the next whole frame arrives.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionClosed`](crate::Error::ConnectionClosed) when the
    ///   remote end closed the connection
    /// - any other variant for a failed read; the caller may read again
    async fn read_frame(&mut self) -> Result<Frame>;
}

/// Write half of a connected transport.
#[async_trait]
pub trait FrameSink: Send + 'static {
    /// Writes one whole frame.
    async fn write_frame(&mut self, frame: Frame) -> Result<()>;

    /// Closes the connection.
    async fn close(&mut self) -> Result<()>;
}
