//! User-visible console output.
//!
//! Received payloads go to stdout; prompts, status lines and errors go to
//! stderr, so stdout stays a clean transcript of the session.
//!
//! # Layout
//!
//! | Event | stderr | stdout |
//! |-------|--------|--------|
//! | Prompt (interactive) | `> ` | |
//! | Echo (piped) | | `> line` |
//! | Frame received | `\r< ` | payload (cyan) |
//! | Transport error | `\rerr <error>` (red) | |
//! | Remote close | `\r✕ <error> - connection closed by remote` (magenta) | |

// ============================================================================
// Imports
// ============================================================================

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

use parking_lot::Mutex;
use tracing::trace;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::frame::Frame;
use crate::session::InteractionMode;

// ============================================================================
// Constants
// ============================================================================

const RED: &str = "31";
const GREEN: &str = "32";
const YELLOW: &str = "33";
const MAGENTA: &str = "35";
const CYAN: &str = "36";

// ============================================================================
// Palette
// ============================================================================

/// ANSI color helper.
///
/// Disabled palettes return text unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Enables color only when both stdout and stderr are terminals.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            enabled: io::stdout().is_terminal() && io::stderr().is_terminal(),
        }
    }

    /// Palette that never emits escape codes.
    #[inline]
    #[must_use]
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    /// Palette that always emits escape codes.
    #[inline]
    #[must_use]
    pub const fn colored() -> Self {
        Self { enabled: true }
    }

    /// Returns `true` if escape codes are emitted.
    #[inline]
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn paint(&self, code: &str, text: impl Display) -> String {
        if self.enabled {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    /// Errors.
    pub fn red(&self, text: impl Display) -> String {
        self.paint(RED, text)
    }

    /// Successful connection.
    pub fn green(&self, text: impl Display) -> String {
        self.paint(GREEN, text)
    }

    /// Connection parameters.
    pub fn yellow(&self, text: impl Display) -> String {
        self.paint(YELLOW, text)
    }

    /// Remote close.
    pub fn magenta(&self, text: impl Display) -> String {
        self.paint(MAGENTA, text)
    }

    /// Received payloads.
    pub fn cyan(&self, text: impl Display) -> String {
        self.paint(CYAN, text)
    }
}

// ============================================================================
// Console
// ============================================================================

/// Output writer type.
type Output = Box<dyn Write + Send>;

/// Shared console used by every pipeline task.
///
/// Each stream sits behind its own lock; a single event never holds both.
pub struct Console {
    out: Mutex<Output>,
    err: Mutex<Output>,
    palette: Palette,
    mode: InteractionMode,
}

impl Console {
    /// Creates a console over arbitrary writers.
    pub fn new(
        out: impl Write + Send + 'static,
        err: impl Write + Send + 'static,
        palette: Palette,
        mode: InteractionMode,
    ) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
            err: Mutex::new(Box::new(err)),
            palette,
            mode,
        }
    }

    /// Creates a console over the process stdout and stderr.
    #[must_use]
    pub fn stdio(palette: Palette, mode: InteractionMode) -> Self {
        Self::new(io::stdout(), io::stderr(), palette, mode)
    }

    // ========================================================================
    // Connection Status
    // ========================================================================

    /// Prints the connecting status line.
    pub fn connecting(&self, config: &ClientConfig) {
        let p = self.palette;
        let line = match config.protocol() {
            Some(protocol) => format!(
                "connecting to {} via {} from {}...\n",
                p.yellow(config.url()),
                p.yellow(protocol),
                p.yellow(config.origin())
            ),
            None => format!(
                "connecting to {} from {}...\n",
                p.yellow(config.url()),
                p.yellow(config.origin())
            ),
        };
        self.write_err(&line);
    }

    /// Prints the connected status line.
    pub fn connected(&self, config: &ClientConfig) {
        self.write_err(&format!(
            "successfully connected to {}\n\n",
            self.palette.green(config.url())
        ));
    }

    /// Prints an error that aborts the process.
    pub fn fatal(&self, error: &Error) {
        self.write_err(&format!("{}\n", self.palette.red(error)));
    }

    // ========================================================================
    // Session Events
    // ========================================================================

    /// Prints the input prompt in interactive mode.
    pub fn prompt(&self) {
        if !self.mode.is_piped() {
            self.write_err("> ");
        }
    }

    /// Echoes a dispatched line in piped mode.
    pub fn echo(&self, line: &str) {
        if self.mode.is_piped() {
            self.write_out(&format!("> {line}\n"));
        }
    }

    /// Prints a received frame.
    pub fn received(&self, frame: &Frame) {
        self.write_err("\r< ");
        self.write_out(&format!("{}\n", self.palette.cyan(frame.to_text_lossy())));
        self.prompt();
    }

    /// Prints an in-session error.
    pub fn error(&self, error: &Error) {
        self.write_err(&format!("\rerr {}\n", self.palette.red(error)));
        self.prompt();
    }

    /// Prints the remote close notice.
    pub fn remote_closed(&self, error: &Error) {
        self.write_err(&format!(
            "\r✕ {} - connection closed by remote\n",
            self.palette.magenta(error)
        ));
    }

    // ========================================================================
    // Writers
    // ========================================================================

    fn write_out(&self, text: &str) {
        let mut out = self.out.lock();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            trace!(error = %e, "stdout write failed");
        }
    }

    fn write_err(&self, text: &str) {
        let mut err = self.err.lock();
        if let Err(e) = err.write_all(text.as_bytes()).and_then(|()| err.flush()) {
            trace!(error = %e, "stderr write failed");
        }
    }
}

// ============================================================================
// Capture
// ============================================================================

/// In-memory writer for asserting on console output.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct Capture(std::sync::Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl Capture {
    pub(crate) fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    /// Plain console over two captures: `(console, stdout, stderr)`.
    pub(crate) fn console(mode: InteractionMode) -> (Console, Self, Self) {
        let out = Self::default();
        let err = Self::default();
        let console = Console::new(out.clone(), err.clone(), Palette::plain(), mode);
        (console, out, err)
    }
}

#[cfg(test)]
impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
