//! Inbound reader loop.
//!
//! Reads whole frames from the transport for the lifetime of the session.
//! Frames go to the printer, read errors go to the error reporter. A failed
//! read never ends the loop; it stops only when a consumer queue is gone.

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::error::Error;
use crate::frame::Frame;
use crate::transport::FrameSource;

/// Runs the inbound reader until the printer or the reporter goes away.
pub(crate) async fn run<S: FrameSource>(
    mut source: S,
    inbound: mpsc::Sender<Frame>,
    errors: mpsc::Sender<Error>,
) {
    debug!("Inbound reader started");

    loop {
        let delivered = match source.read_frame().await {
            Ok(frame) => {
                trace!(len = frame.len(), "Frame read");
                inbound.send(frame).await.is_ok()
            }
            Err(err) => {
                debug!(error = %err, "Read failed");
                errors.send(err).await.is_ok()
            }
        };

        if !delivered {
            break;
        }
    }

    debug!("Inbound reader stopped");
}
