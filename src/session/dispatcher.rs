//! Input dispatcher.
//!
//! Turns lines of standard input into outbound frames.
//!
//! # States
//!
//! ```text
//! Idle ──line──► Sending ──interactive──► Idle
//!   │                │
//!   │                └──piped──► AwaitingCompletion ──signal──► Idle
//!   │
//!   └──end of input──► Closed
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::io;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::console::Console;
use crate::error::Error;
use crate::frame::Frame;

use super::{Completion, InteractionMode};

// ============================================================================
// Dispatcher
// ============================================================================

/// Reads input lines and hands them to the outbound writer.
pub(crate) struct Dispatcher {
    mode: InteractionMode,
    console: Arc<Console>,
    completion: Completion,
    outbound: mpsc::Sender<Frame>,
}

impl Dispatcher {
    pub(crate) fn new(
        mode: InteractionMode,
        console: Arc<Console>,
        completion: Completion,
        outbound: mpsc::Sender<Frame>,
    ) -> Self {
        Self {
            mode,
            console,
            completion,
            outbound,
        }
    }

    /// Dispatches lines until end of input.
    ///
    /// Lines are raw bytes; nothing is decoded before sending. Returns the
    /// number of lines handed to the writer. A read error on the input is
    /// reported and ends the input.
    pub(crate) async fn run<R>(self, mut input: R) -> usize
    where
        R: AsyncBufRead + Unpin,
    {
        let mut dispatched = 0;

        self.console.prompt();

        loop {
            let line = match read_line(&mut input).await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to read input");
                    self.console.error(&Error::Io(e));
                    break;
                }
            };

            self.console.echo(&String::from_utf8_lossy(&line));

            if self.outbound.send(Frame::from(line)).await.is_err() {
                debug!("Outbound writer gone");
                break;
            }
            dispatched += 1;

            match self.mode {
                InteractionMode::Interactive => self.console.prompt(),
                InteractionMode::Piped => {
                    trace!(dispatched, "Awaiting completion");
                    if !self.completion.wait().await {
                        debug!("Completion closed while waiting");
                        break;
                    }
                }
            }
        }

        debug!(dispatched, "End of input");
        dispatched
    }
}

/// Reads one line without its `\n` or `\r\n` terminator.
///
/// Returns `None` at end of input.
async fn read_line<R>(input: &mut R) -> io::Result<Option<Vec<u8>>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    if input.read_until(b'\n', &mut line).await? == 0 {
        return Ok(None);
    }

    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }

    Ok(Some(line))
}

// ============================================================================
// Tests
// ============================================================================
