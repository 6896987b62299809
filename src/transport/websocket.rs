//! `tokio-tungstenite` backed transport.
//!
//! [`dial`] performs the opening handshake and splits the stream into a
//! [`WsSource`] for the inbound reader and a [`WsSink`] for the outbound
//! writer.
//!
//! # Message Mapping
//!
//! | WebSocket message | Pipeline view |
//! |-------------------|---------------|
//! | Text / Binary | [`Frame`] with the exact payload bytes |
//! | Ping / Pong / raw frame | skipped, handled by tungstenite |
//! | Close / end of stream | [`Error::ConnectionClosed`] |

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{Message, Utf8Bytes};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::{ORIGIN, SEC_WEBSOCKET_PROTOCOL};
use tokio_tungstenite::{Connector, MaybeTlsStream, WebSocketStream, connect_async_tls_with_config};
use tracing::{debug, info, trace, warn};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::frame::Frame;

use super::{FrameSink, FrameSource};

// ============================================================================
// Types
// ============================================================================

/// Type alias for the client WebSocket stream.
type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ============================================================================
// Dial
// ============================================================================

/// Connects to the configured endpoint.
///
/// Sends the configured Origin header and, if set, the subprotocol. For
/// `wss` endpoints with `insecure_skip_verify`, certificate and hostname
/// validation are disabled.
///
/// # Errors
///
/// - [`Error::Config`] if the origin or protocol is not a valid header value
/// - [`Error::Tls`] if the TLS connector cannot be built
/// - [`Error::Dial`] if the TCP connect or the handshake fails
pub async fn dial(config: &ClientConfig) -> Result<(WsSource, WsSink)> {
    let request = build_request(config)?;
    let connector = tls_connector(config)?;

    debug!(url = %config.url(), origin = config.origin(), "Dialing");

    let (ws_stream, response) = connect_async_tls_with_config(request, None, false, connector)
        .await
        .map_err(|e| Error::dial(config.url().as_str(), e))?;

    let negotiated = response
        .headers()
        .get(SEC_WEBSOCKET_PROTOCOL)
        .and_then(|v| v.to_str().ok());

    info!(
        url = %config.url(),
        status = %response.status(),
        protocol = ?negotiated,
        "WebSocket connection established"
    );

    let (sink, stream) = ws_stream.split();

    Ok((WsSource { stream }, WsSink { sink }))
}

/// Builds the handshake request with Origin and subprotocol headers.
fn build_request(config: &ClientConfig) -> Result<Request> {
    let mut request = config
        .url()
        .as_str()
        .into_client_request()
        .map_err(|e| Error::dial(config.url().as_str(), e))?;

    let headers = request.headers_mut();

    let origin = HeaderValue::from_str(config.origin())
        .map_err(|e| Error::config(format!("Invalid origin header: {e}")))?;
    headers.insert(ORIGIN, origin);

    if let Some(protocol) = config.protocol() {
        let protocol = HeaderValue::from_str(protocol)
            .map_err(|e| Error::config(format!("Invalid protocol header: {e}")))?;
        headers.insert(SEC_WEBSOCKET_PROTOCOL, protocol);
    }

    Ok(request)
}

/// Returns a permissive TLS connector when verification is disabled.
///
/// `None` selects tokio-tungstenite's default verifying connector.
fn tls_connector(config: &ClientConfig) -> Result<Option<Connector>> {
    if !(config.is_secure() && config.insecure_skip_verify()) {
        return Ok(None);
    }

    warn!(url = %config.url(), "TLS certificate verification disabled");

    let connector = native_tls::TlsConnector::builder()
        .danger_accept_invalid_certs(true)
        .danger_accept_invalid_hostnames(true)
        .build()?;

    Ok(Some(Connector::NativeTls(connector)))
}

// ============================================================================
// WsSource
// ============================================================================

/// Read half of a dialed WebSocket connection.
pub struct WsSource {
    stream: SplitStream<WsStream>,
}

#[async_trait]
impl FrameSource for WsSource {
    async fn read_frame(&mut self) -> Result<Frame> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Frame::new(Bytes::from(text))),

                Some(Ok(Message::Binary(data))) => return Ok(Frame::new(data)),

                Some(Ok(Message::Close(close))) => {
                    debug!(?close, "Close frame received");
                    return Err(Error::ConnectionClosed);
                }

                // Ping, Pong, raw frames
                Some(Ok(other)) => {
                    trace!(len = other.len(), "Control message skipped");
                }

                Some(Err(e)) => return Err(Error::from_transport(e)),

                None => {
                    debug!("WebSocket stream ended");
                    return Err(Error::ConnectionClosed);
                }
            }
        }
    }
}

// ============================================================================
// WsSink
// ============================================================================

/// Write half of a dialed WebSocket connection.
pub struct WsSink {
    sink: SplitSink<WsStream, Message>,
}

#[async_trait]
impl FrameSink for WsSink {
    async fn write_frame(&mut self, frame: Frame) -> Result<()> {
        self.sink.send(to_message(frame)).await.map_err(Error::from_transport)
    }

    async fn close(&mut self) -> Result<()> {
        self.sink.close().await.map_err(Error::from_transport)
    }
}

/// Text message when the payload is UTF-8, binary otherwise.
fn to_message(frame: Frame) -> Message {
    let payload = frame.into_bytes();
    match Utf8Bytes::try_from(payload.clone()) {
        Ok(text) => Message::Text(text),
        Err(_) => Message::Binary(payload),
    }
}

// ============================================================================
// Tests
// ============================================================================
