//! Error reporter loop.
//!
//! The single place where in-session transport errors are handled. The
//! classification is binary: a clean remote close ends the session with
//! success; anything else is printed and the session goes on.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::console::Console;
use crate::error::Error;

use super::Completion;

/// Why the error reporter stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReportEnd {
    /// The remote end closed the connection.
    RemoteClosed,
    /// Every error producer went away.
    Drained,
}

/// Reports errors until a clean remote close or until the queue closes.
///
/// Non-terminal errors raise one completion signal so a piped dispatcher
/// waiting on the failed exchange is released.
pub(crate) async fn run(
    mut errors: mpsc::Receiver<Error>,
    console: Arc<Console>,
    completion: Completion,
) -> ReportEnd {
    while let Some(err) = errors.recv().await {
        if err.is_clean_close() {
            info!("Connection closed by remote");
            console.remote_closed(&err);
            return ReportEnd::RemoteClosed;
        }

        console.error(&err);
        completion.raise();
    }

    debug!("Error queue closed, reporter drained");
    ReportEnd::Drained
}
