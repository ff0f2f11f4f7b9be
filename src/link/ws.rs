//! WebSocket connector.
//!
//! Each open link spawns a tokio task that handles:
//!
//! - Outgoing text frames from the manager
//! - Incoming frames from the device
//! - Close and error signals, forwarded as [`TransportEvent`]s

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, trace, warn};
use url::Url;

use crate::error::{Error, Result};

use super::transport::{Channel, Connector, EventSender, TransportEvent};

// ============================================================================
// Types
// ============================================================================

type DeviceStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Internal commands for the event loop.
enum ChannelCommand {
    /// Write one text frame.
    Send(String),
    /// Close the WebSocket.
    Shutdown,
}

// ============================================================================
// WsConnector
// ============================================================================

/// Opens plain WebSocket links with `tokio-tungstenite`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self, url: &Url, events: EventSender) -> Result<Box<dyn Channel>> {
        let (ws_stream, response) = tokio_tungstenite::connect_async(url.as_str()).await?;

        info!(url = %url, status = %response.status(), "WebSocket connection established");

        Ok(Box::new(WsChannel::spawn(ws_stream, events)))
    }
}

// ============================================================================
// WsChannel
// ============================================================================

/// Handle to a running WebSocket event loop.
struct WsChannel {
    command_tx: mpsc::UnboundedSender<ChannelCommand>,
}

impl WsChannel {
    fn spawn(ws_stream: DeviceStream, events: EventSender) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_event_loop(ws_stream, command_rx, events));
        Self { command_tx }
    }
}

impl Channel for WsChannel {
    fn send_text(&self, text: String) -> Result<()> {
        self.command_tx
            .send(ChannelCommand::Send(text))
            .map_err(|_| Error::ConnectionClosed)
    }

    fn close(&self) {
        let _ = self.command_tx.send(ChannelCommand::Shutdown);
    }
}

// ============================================================================
// Event Loop
// ============================================================================

async fn run_event_loop(
    ws_stream: DeviceStream,
    mut command_rx: mpsc::UnboundedReceiver<ChannelCommand>,
    events: EventSender,
) {
    let (mut ws_write, mut ws_read) = ws_stream.split();

    loop {
        tokio::select! {
            message = ws_read.next() => {
                match message {
                    Some(Ok(Message::Text(text))) => {
                        let _ = events.send(TransportEvent::Message(text.as_str().to_owned()));
                    }

                    Some(Ok(Message::Close(frame))) => {
                        let reason = frame
                            .map(|f| f.reason.as_str().to_owned())
                            .filter(|r| !r.is_empty());
                        debug!(?reason, "WebSocket closed by device");
                        let _ = events.send(TransportEvent::Closed(reason));
                        break;
                    }

                    Some(Err(e)) => {
                        error!(error = %e, "WebSocket error");
                        let _ = events.send(TransportEvent::Error(e.to_string()));
                        break;
                    }

                    None => {
                        debug!("WebSocket stream ended");
                        let _ = events.send(TransportEvent::Closed(None));
                        break;
                    }

                    // Ignore Binary, Ping, Pong
                    _ => {}
                }
            }

            command = command_rx.recv() => {
                match command {
                    Some(ChannelCommand::Send(text)) => {
                        let cells = text.chars().count();
                        if let Err(e) = ws_write.send(Message::Text(text.into())).await {
                            warn!(error = %e, "Failed to send frame");
                            let _ = events.send(TransportEvent::Error(e.to_string()));
                            break;
                        }
                        trace!(cells, "Frame sent");
                    }

                    Some(ChannelCommand::Shutdown) | None => {
                        debug!("Shutdown requested");
                        let _ = ws_write.close().await;
                        break;
                    }
                }
            }
        }
    }

    debug!("Event loop terminated");
}

// ============================================================================
// Tests
// ============================================================================
