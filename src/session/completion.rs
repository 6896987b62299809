//! Lock-step signal between the inbound handlers and the input dispatcher.
//!
//! The printer and the error reporter raise one signal per handled inbound
//! event. In piped mode the dispatcher consumes one signal after every line
//! it sends. In interactive mode nobody waits, so raising is a no-op.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tokio::sync::Semaphore;

use super::InteractionMode;

// ============================================================================
// Completion
// ============================================================================

/// Zero-information completion token counter.
#[derive(Debug, Clone)]
pub struct Completion {
    permits: Arc<Semaphore>,
    enabled: bool,
}

impl Completion {
    /// Creates a signal with nothing raised.
    #[must_use]
    pub fn new() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(0)),
            enabled: true,
        }
    }

    /// Creates a signal for the given mode; disabled unless piped.
    #[must_use]
    pub fn for_mode(mode: InteractionMode) -> Self {
        Self {
            enabled: mode.is_piped(),
            ..Self::new()
        }
    }

    /// Raises one signal.
    pub fn raise(&self) {
        if self.enabled {
            self.permits.add_permits(1);
        }
    }

    /// Waits for and consumes one signal.
    ///
    /// Returns `false` if the signal was closed while waiting.
    pub async fn wait(&self) -> bool {
        match self.permits.acquire().await {
            Ok(permit) => {
                permit.forget();
                true
            }
            Err(_) => false,
        }
    }

    /// Releases every current and future waiter with `false`.
    pub fn close(&self) {
        self.permits.close();
    }

    /// Number of raised signals not yet consumed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.permits.available_permits()
    }
}

impl Default for Completion {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use tokio::time::timeout;

    #[tokio::test]
    async fn test_wait_consumes_one_signal() {
        let completion = Completion::new();
        completion.raise();
        completion.raise();

        assert!(completion.wait().await);
        assert_eq!(completion.pending(), 1);
    }

    #[test]
    fn test_interactive_raise_is_noop() {
        let completion = Completion::for_mode(InteractionMode::Interactive);
        for _ in 0..3 {
            completion.raise();
        }
        assert_eq!(completion.pending(), 0);
    }

    #[test]
    fn test_piped_raise_counts() {
        let completion = Completion::for_mode(InteractionMode::Piped);
        completion.raise();
        assert_eq!(completion.pending(), 1);
    }

    #[tokio::test]
    async fn test_wait_blocks_without_signal() {
        let completion = Completion::new();
        let waited = timeout(Duration::from_millis(50), completion.wait()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_raise_releases_waiter() {
        let completion = Completion::new();
        let waiter = tokio::spawn({
            let completion = completion.clone();
            async move { completion.wait().await }
        });

        completion.raise();
        assert!(waiter.await.expect("waiter task"));
        assert_eq!(completion.pending(), 0);
    }

    #[tokio::test]
    async fn test_close_releases_waiter() {
        let completion = Completion::new();
        let waiter = tokio::spawn({
            let completion = completion.clone();
            async move { completion.wait().await }
        });

        completion.close();
        assert!(!waiter.await.expect("waiter task"));
    }
}
