//! The session pipeline.
//!
//! A [`Session`] owns one connected transport and runs the tasks that move
//! frames between it and the console.
//!
//! # Tasks
//!
//! ```text
//!                 outbound                         inbound
//! Dispatcher ───────────────► Writer ─► Transport ─► Reader ─────────► Printer
//!     ▲                          │                     │                  │
//!     │                          │ errors              │ errors           │
//!     │                          └──────────┬──────────┘                  │
//!     │                                     ▼                             │
//!     │                                  Reporter                         │
//!     │                                     │                             │
//!     └──────────── completion (piped) ─────┴─────────────────────────────┘
//! ```
//!
//! Every queue is a hand-off of capacity one: a producer waits while the
//! previous item is still in flight.
//!
//! # Shutdown
//!
//! - The reporter sees a clean remote close: the session ends at once with
//!   [`Outcome::RemoteClosed`], whatever is still queued.
//! - Input reaches its end: the writer drains, the reader stops, printer
//!   and reporter drain, the connection is closed, and the session ends
//!   with [`Outcome::InputClosed`].

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tokio::io::AsyncBufRead;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::console::Console;
use crate::error::Result;
use crate::transport::{self, FrameSink, FrameSource, WsSink, WsSource};

use self::dispatcher::Dispatcher;
use self::reporter::ReportEnd;

// ============================================================================
// Submodules
// ============================================================================

mod completion;
mod dispatcher;
mod mode;
mod printer;
mod reader;
mod reporter;
mod writer;

// ============================================================================
// Re-exports
// ============================================================================

pub use completion::Completion;
pub use mode::InteractionMode;

// ============================================================================
// Constants
// ============================================================================

/// Capacity of every pipeline queue.
///
/// One is the smallest tokio channel, the nearest thing to a rendezvous.
const HANDOFF_CAPACITY: usize = 1;

// ============================================================================
// Outcome
// ============================================================================

/// How a session ended. Both are successful endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The remote end closed the connection.
    RemoteClosed,
    /// Input ended and the pipeline drained.
    InputClosed,
}

// ============================================================================
// Session
// ============================================================================

/// The single active connection.
pub struct Session<S, K> {
    config: ClientConfig,
    source: S,
    sink: K,
    mode: InteractionMode,
    console: Arc<Console>,
}

impl Session<WsSource, WsSink> {
    /// Dials the configured endpoint and prints the status lines.
    ///
    /// # Errors
    ///
    /// Any dial error; these are fatal for the process.
    pub async fn connect(
        config: ClientConfig,
        mode: InteractionMode,
        console: Arc<Console>,
    ) -> Result<Self> {
        console.connecting(&config);
        let (source, sink) = transport::dial(&config).await?;
        console.connected(&config);

        Ok(Self::new(config, source, sink, mode, console))
    }
}

impl<S: FrameSource, K: FrameSink> Session<S, K> {
    /// Creates a session over an already connected transport.
    pub fn new(
        config: ClientConfig,
        source: S,
        sink: K,
        mode: InteractionMode,
        console: Arc<Console>,
    ) -> Self {
        Self {
            config,
            source,
            sink,
            mode,
            console,
        }
    }

    /// Runs the pipeline until the remote closes or `input` ends.
    ///
    /// # Errors
    ///
    /// - [`Error::Task`](crate::Error::Task) if a pipeline task panicked
    pub async fn run<R>(self, input: R) -> Result<Outcome>
    where
        R: AsyncBufRead + Unpin,
    {
        let Self {
            config,
            source,
            sink,
            mode,
            console,
        } = self;

        info!(url = %config.url(), ?mode, "Session started");

        let (inbound_tx, inbound_rx) = mpsc::channel(HANDOFF_CAPACITY);
        let (errors_tx, errors_rx) = mpsc::channel(HANDOFF_CAPACITY);
        let (outbound_tx, outbound_rx) = mpsc::channel(HANDOFF_CAPACITY);
        let completion = Completion::for_mode(mode);

        let reader = tokio::spawn(reader::run(source, inbound_tx, errors_tx.clone()));
        let writer = tokio::spawn(writer::run(sink, outbound_rx, errors_tx));
        let printer = tokio::spawn(printer::run(
            inbound_rx,
            Arc::clone(&console),
            completion.clone(),
        ));
        let mut reporter = tokio::spawn(reporter::run(
            errors_rx,
            Arc::clone(&console),
            completion.clone(),
        ));

        let dispatch = Dispatcher::new(mode, console, completion.clone(), outbound_tx).run(input);
        tokio::pin!(dispatch);

        let mut reporter_done = false;
        let dispatched = loop {
            tokio::select! {
                end = &mut reporter, if !reporter_done => match end? {
                    ReportEnd::RemoteClosed => {
                        completion.close();
                        reader.abort();
                        writer.abort();
                        printer.abort();
                        info!("Session ended by remote");
                        return Ok(Outcome::RemoteClosed);
                    }
                    ReportEnd::Drained => reporter_done = true,
                },

                dispatched = &mut dispatch => break dispatched,
            }
        };

        debug!(dispatched, "Draining pipeline");

        let mut sink = writer.await?;

        reader.abort();
        if let Err(e) = reader.await
            && !e.is_cancelled()
        {
            return Err(e.into());
        }

        printer.await?;

        if !reporter_done && reporter.await? == ReportEnd::RemoteClosed {
            info!("Session ended by remote while draining");
            return Ok(Outcome::RemoteClosed);
        }

        if let Err(e) = sink.close().await {
            debug!(error = %e, "Close failed");
        }

        info!(dispatched, "Session ended at end of input");
        Ok(Outcome::InputClosed)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use tokio::io::{AsyncWriteExt, BufReader};
    use tokio::time::timeout;

    use crate::console::Capture;
    use crate::error::Error;
    use crate::frame::Frame;
    use crate::transport::memory::{MemorySink, MemorySource};

    const TEST_TIMEOUT: Duration = Duration::from_secs(5);

    fn config() -> ClientConfig {
        ClientConfig::builder().build().expect("valid config")
    }

    #[tokio::test]
    async fn test_interactive_lines_written_in_order() {
        let (source, _script) = MemorySource::new();
        let (sink, mut written) = MemorySink::new();
        let closed = sink.closed();
        let (console, _, _) = Capture::console(InteractionMode::Interactive);
        let session = Session::new(
            config(),
            source,
            sink,
            InteractionMode::Interactive,
            Arc::new(console),
        );

        let outcome = timeout(TEST_TIMEOUT, session.run(&b"ping\nsecond\n"[..]))
            .await
            .expect("session finished");

        assert_eq!(outcome.expect("session ok"), Outcome::InputClosed);
        assert_eq!(written.recv().await.expect("first").as_bytes(), b"ping");
        assert_eq!(written.recv().await.expect("second").as_bytes(), b"second");
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_non_utf8_line_does_not_end_input() {
        let (source, _script) = MemorySource::new();
        let (sink, mut written) = MemorySink::new();
        let (console, _, _) = Capture::console(InteractionMode::Interactive);
        let session = Session::new(
            config(),
            source,
            sink,
            InteractionMode::Interactive,
            Arc::new(console),
        );

        let outcome = timeout(TEST_TIMEOUT, session.run(&b"first\ncaf\xe9\nthird\n"[..]))
            .await
            .expect("session finished");

        assert_eq!(outcome.expect("session ok"), Outcome::InputClosed);
        assert_eq!(written.recv().await.expect("first").as_bytes(), b"first");
        assert_eq!(written.recv().await.expect("second").as_bytes(), b"caf\xe9");
        assert_eq!(written.recv().await.expect("third").as_bytes(), b"third");
    }

    #[tokio::test]
    async fn test_piped_lock_step() {
        let (source, script) = MemorySource::new();
        let (sink, mut written) = MemorySink::new();
        let (console, out, _) = Capture::console(InteractionMode::Piped);
        let session = Session::new(
            config(),
            source,
            sink,
            InteractionMode::Piped,
            Arc::new(console),
        );

        let (mut input_tx, input_rx) = tokio::io::duplex(64);
        let task = tokio::spawn(session.run(BufReader::new(input_rx)));

        input_tx.write_all(b"one\ntwo\n").await.expect("input");
        input_tx.shutdown().await.expect("input closed");

        assert_eq!(written.recv().await, Some(Frame::from("one")));
        let early = timeout(Duration::from_millis(50), written.recv()).await;
        assert!(early.is_err(), "second line sent before a reply");

        script.send(Ok(Frame::from("hello"))).expect("script");
        assert_eq!(written.recv().await, Some(Frame::from("two")));

        script.send(Ok(Frame::from("world"))).expect("script");
        let outcome = timeout(TEST_TIMEOUT, task)
            .await
            .expect("session finished")
            .expect("session task");

        assert_eq!(outcome.expect("session ok"), Outcome::InputClosed);
        assert_eq!(out.text(), "> one\nhello\n> two\nworld\n");
    }

    #[tokio::test]
    async fn test_piped_error_releases_dispatcher() {
        let (source, script) = MemorySource::new();
        let (sink, mut written) = MemorySink::new();
        let (console, _, err) = Capture::console(InteractionMode::Piped);
        let session = Session::new(
            config(),
            source,
            sink,
            InteractionMode::Piped,
            Arc::new(console),
        );

        let task = tokio::spawn(session.run(&b"one\ntwo\n"[..]));

        assert_eq!(written.recv().await, Some(Frame::from("one")));
        script.send(Err(Error::config("garbled"))).expect("script");
        assert_eq!(written.recv().await, Some(Frame::from("two")));

        script.send(Ok(Frame::from("ok"))).expect("script");
        let outcome = timeout(TEST_TIMEOUT, task)
            .await
            .expect("session finished")
            .expect("session task");

        assert_eq!(outcome.expect("session ok"), Outcome::InputClosed);
        assert!(err.text().contains("err Configuration error: garbled"));
    }

    #[tokio::test]
    async fn test_remote_close_without_messages() {
        let (source, script) = MemorySource::new();
        let (sink, _written) = MemorySink::new();
        let (console, _, err) = Capture::console(InteractionMode::Piped);
        let session = Session::new(
            config(),
            source,
            sink,
            InteractionMode::Piped,
            Arc::new(console),
        );

        let (_input_tx, input_rx) = tokio::io::duplex(64);
        script.send(Err(Error::ConnectionClosed)).expect("script");

        let outcome = timeout(TEST_TIMEOUT, session.run(BufReader::new(input_rx)))
            .await
            .expect("session finished");

        assert_eq!(outcome.expect("session ok"), Outcome::RemoteClosed);
        assert!(err.text().contains("connection closed by remote"));
    }

    #[tokio::test]
    async fn test_remote_close_after_frames() {
        let (source, script) = MemorySource::new();
        let (sink, _written) = MemorySink::new();
        let (console, _, _) = Capture::console(InteractionMode::Piped);
        let session = Session::new(
            config(),
            source,
            sink,
            InteractionMode::Piped,
            Arc::new(console),
        );

        let (mut input_tx, input_rx) = tokio::io::duplex(64);
        input_tx.write_all(b"stuck\n").await.expect("input");

        for i in 0..4 {
            script.send(Ok(Frame::from(format!("frame {i}")))).expect("script");
        }
        script.send(Err(Error::ConnectionClosed)).expect("script");

        let outcome = timeout(TEST_TIMEOUT, session.run(BufReader::new(input_rx)))
            .await
            .expect("session finished");

        assert_eq!(outcome.expect("session ok"), Outcome::RemoteClosed);
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let (source, _script) = MemorySource::new();
        let (sink, _written) = MemorySink::new();
        let sink = sink.with_failures([true]);
        let (console, _, err) = Capture::console(InteractionMode::Interactive);
        let session = Session::new(
            config(),
            source,
            sink,
            InteractionMode::Interactive,
            Arc::new(console),
        );

        let outcome = timeout(TEST_TIMEOUT, session.run(&b"lost\n"[..]))
            .await
            .expect("session finished");

        assert_eq!(outcome.expect("session ok"), Outcome::InputClosed);
        assert!(err.text().contains("\rerr IO error: write failed"));
    }

    proptest::proptest! {
        #[test]
        fn prop_interactive_lines_written_once_in_order(
            lines in proptest::collection::vec("[a-z0-9 ]{0,12}", 0..16)
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("runtime");

            let input: String = lines.iter().map(|line| format!("{line}\n")).collect();

            let written = runtime.block_on(async move {
                let (source, _script) = MemorySource::new();
                let (sink, mut written) = MemorySink::new();
                let (console, _, _) = Capture::console(InteractionMode::Interactive);
                let session = Session::new(
                    config(),
                    source,
                    sink,
                    InteractionMode::Interactive,
                    Arc::new(console),
                );

                let outcome = session.run(input.as_bytes()).await.expect("session ok");
                assert_eq!(outcome, Outcome::InputClosed);

                let mut frames = Vec::new();
                while let Some(frame) = written.recv().await {
                    frames.push(frame.to_text_lossy().into_owned());
                }
                frames
            });

            proptest::prop_assert_eq!(written, lines);
        }
    }
}
