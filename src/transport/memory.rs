//! In-memory transport halves driven by test code.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::frame::Frame;

use super::{FrameSink, FrameSource};

/// Read half fed through a channel.
///
/// Once the script is exhausted and the feeder dropped, reads block forever,
/// like a socket with nothing to say.
pub(crate) struct MemorySource {
    script: mpsc::UnboundedReceiver<Result<Frame>>,
    reads: Arc<AtomicUsize>,
}

impl MemorySource {
    pub(crate) fn new() -> (Self, mpsc::UnboundedSender<Result<Frame>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let source = Self {
            script: rx,
            reads: Arc::new(AtomicUsize::new(0)),
        };
        (source, tx)
    }

    /// Counter of read attempts, including the blocked one.
    pub(crate) fn reads(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.reads)
    }
}

#[async_trait]
impl FrameSource for MemorySource {
    async fn read_frame(&mut self) -> Result<Frame> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match self.script.recv().await {
            Some(item) => item,
            None => std::future::pending().await,
        }
    }
}

/// Write half that forwards every written frame to the test.
pub(crate) struct MemorySink {
    written: mpsc::UnboundedSender<Frame>,
    failures: VecDeque<bool>,
    closed: Arc<AtomicBool>,
}

impl MemorySink {
    pub(crate) fn new() -> (Self, mpsc::UnboundedReceiver<Frame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = Self {
            written: tx,
            failures: VecDeque::new(),
            closed: Arc::new(AtomicBool::new(false)),
        };
        (sink, rx)
    }

    /// Makes the next writes fail or succeed in the given order.
    pub(crate) fn with_failures(mut self, failures: impl IntoIterator<Item = bool>) -> Self {
        self.failures = failures.into_iter().collect();
        self
    }

    pub(crate) fn closed(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }
}

#[async_trait]
impl FrameSink for MemorySink {
    async fn write_frame(&mut self, frame: Frame) -> Result<()> {
        if self.failures.pop_front().unwrap_or(false) {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "write failed",
            )));
        }
        let _ = self.written.send(frame);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
