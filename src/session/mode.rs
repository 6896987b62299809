//! Interaction mode classification.

use std::io::{self, IsTerminal};

/// How standard input is attached, decided once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    /// A person is typing; lines are sent without waiting for replies.
    Interactive,
    /// Input is redirected; each line waits for one reply before the next.
    Piped,
}

impl InteractionMode {
    /// Classifies the process stdin.
    #[must_use]
    pub fn detect() -> Self {
        if io::stdin().is_terminal() {
            Self::Interactive
        } else {
            Self::Piped
        }
    }

    /// Returns `true` in piped mode.
    #[inline]
    #[must_use]
    pub const fn is_piped(self) -> bool {
        matches!(self, Self::Piped)
    }
}
