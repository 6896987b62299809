//! Outbound writer loop.
//!
//! Writes queued frames to the transport in FIFO order. A failed write is
//! handed to the error reporter and the loop moves on; nothing is retried.

use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::error::Error;
use crate::frame::Frame;
use crate::transport::FrameSink;

/// Runs the outbound writer until the outbound queue closes.
///
/// Returns the sink once every queued frame has been written, so the
/// caller can close the connection.
pub(crate) async fn run<K: FrameSink>(
    mut sink: K,
    mut outbound: mpsc::Receiver<Frame>,
    errors: mpsc::Sender<Error>,
) -> K {
    debug!("Outbound writer started");

    while let Some(frame) = outbound.recv().await {
        let len = frame.len();

        match sink.write_frame(frame).await {
            Ok(()) => trace!(len, "Frame written"),
            Err(err) => {
                warn!(error = %err, len, "Write failed");
                if errors.send(err).await.is_err() {
                    debug!("Error reporter gone, write error dropped");
                }
            }
        }
    }

    debug!("Outbound queue closed, writer drained");
    sink
}
