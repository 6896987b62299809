//! Whole-message frame type.
//!
//! A [`Frame`] is one complete WebSocket message moving through the
//! pipeline in either direction. Frames are immutable and cheap to clone.

// ============================================================================
// Imports
// ============================================================================

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;

// ============================================================================
// Frame
// ============================================================================

/// One inbound or outbound WebSocket message.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Frame(Bytes);

impl Frame {
    /// Creates a frame from raw bytes.
    #[inline]
    #[must_use]
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self(payload.into())
    }

    /// Returns the payload bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the payload length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the payload is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the payload as text, replacing invalid UTF-8 sequences.
    #[inline]
    #[must_use]
    pub fn to_text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Consumes the frame, returning the payload.
    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl From<String> for Frame {
    fn from(text: String) -> Self {
        Self(Bytes::from(text))
    }
}

impl From<&'static str> for Frame {
    fn from(text: &'static str) -> Self {
        Self(Bytes::from_static(text.as_bytes()))
    }
}

impl From<Vec<u8>> for Frame {
    fn from(data: Vec<u8>) -> Self {
        Self(Bytes::from(data))
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Frame").field(&self.to_text_lossy()).finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_keeps_exact_bytes() {
        let frame = Frame::from("ping");
        assert_eq!(frame.as_bytes(), b"ping");
        assert_eq!(frame.len(), 4);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_lossy_text() {
        let frame = Frame::from(vec![b'o', b'k', 0xff]);
        assert_eq!(frame.to_text_lossy(), "ok\u{fffd}");
    }

    #[test]
    fn test_default_is_empty() {
        assert!(Frame::default().is_empty());
    }
}
