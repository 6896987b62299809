//! Console printer loop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::console::Console;
use crate::frame::Frame;

use super::Completion;

/// Prints received frames in arrival order, raising one completion signal
/// after each.
pub(crate) async fn run(
    mut inbound: mpsc::Receiver<Frame>,
    console: Arc<Console>,
    completion: Completion,
) {
    while let Some(frame) = inbound.recv().await {
        console.received(&frame);
        completion.raise();
    }

    debug!("Inbound queue closed, printer drained");
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::console::Capture;
    use crate::session::InteractionMode;

    #[tokio::test]
    async fn test_prints_in_order_and_signals_each() {
        let (console, out, _) = Capture::console(InteractionMode::Piped);
        let completion = Completion::new();
        let (tx, rx) = mpsc::channel(1);
        let printer = tokio::spawn(run(rx, Arc::new(console), completion.clone()));

        tx.send(Frame::from("hello")).await.expect("queued");
        tx.send(Frame::from("world")).await.expect("queued");
        drop(tx);
        printer.await.expect("printer task");

        assert_eq!(out.text(), "hello\nworld\n");
        assert_eq!(completion.pending(), 2);
    }

    #[tokio::test]
    async fn test_interactive_frames_leave_no_signals() {
        let (console, out, _) = Capture::console(InteractionMode::Interactive);
        let completion = Completion::for_mode(InteractionMode::Interactive);
        let (tx, rx) = mpsc::channel(1);
        let printer = tokio::spawn(run(rx, Arc::new(console), completion.clone()));

        for _ in 0..5 {
            tx.send(Frame::from("tick")).await.expect("queued");
        }
        drop(tx);
        printer.await.expect("printer task");

        assert_eq!(out.text().lines().count(), 5);
        assert_eq!(completion.pending(), 0);
    }
}
