//! wsd - interactive command-line WebSocket client.
//!
//! Opens one full-duplex connection to a WebSocket endpoint, sends lines
//! read from standard input as messages, and prints inbound messages as
//! they arrive.
//!
//! # Architecture
//!
//! The session runs a small pipeline of tokio tasks joined by hand-off
//! queues:
//!
//! - **Inbound reader**: transport → printer (frames) / reporter (errors)
//! - **Outbound writer**: dispatcher → transport
//! - **Console printer**: prints frames, raises completion signals
//! - **Error reporter**: prints errors, ends the session on remote close
//! - **Input dispatcher**: stdin → writer, lock-step when input is piped
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tokio::io::BufReader;
//! use wsd::{ClientConfig, Console, InteractionMode, Palette, Result, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::builder()
//!         .url("ws://localhost:1337/ws")
//!         .build()?;
//!
//!     let mode = InteractionMode::detect();
//!     let console = Arc::new(Console::stdio(Palette::detect(), mode));
//!
//!     let session = Session::connect(config, mode, console).await?;
//!     let outcome = session.run(BufReader::new(tokio::io::stdin())).await?;
//!     println!("{outcome:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cli`] | Command-line flags |
//! | [`config`] | Validated connection settings |
//! | [`console`] | User-visible output and colors |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`frame`] | Whole-message [`Frame`] type |
//! | [`session`] | The task pipeline |
//! | [`transport`] | WebSocket transport halves |

// ============================================================================
// Modules
// ============================================================================

/// Command-line interface.
pub mod cli;

/// Client configuration and builder.
pub mod config;

/// Console output.
pub mod console;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Whole-message frame type.
pub mod frame;

/// Session pipeline: reader, writer, printer, reporter, dispatcher.
pub mod session;

/// WebSocket transport layer.
pub mod transport;

// ============================================================================
// Constants
// ============================================================================

/// Crate version, printed by `-version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::Cli;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use console::{Console, Palette};
pub use error::{Error, Result};
pub use frame::Frame;
pub use session::{Completion, InteractionMode, Outcome, Session};
pub use transport::{FrameSink, FrameSource};
