//! Transport seam between the link manager and the network.
//!
//! A [`Connector`] opens one link per call and returns a [`Channel`] for
//! outbound frames. Everything the link does afterwards (inbound frames,
//! failure, closure) arrives as [`TransportEvent`]s on the sender handed to
//! `connect`. Dropping that sender counts as a closure.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use tokio::sync::mpsc;
use url::Url;

use crate::error::Result;

// ============================================================================
// Types
// ============================================================================

/// Sender half the transport reports lifecycle events on.
pub type EventSender = mpsc::UnboundedSender<TransportEvent>;

/// Asynchronous notification from an open transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The device sent a text frame.
    Message(String),
    /// The transport failed.
    Error(String),
    /// The transport closed, with the peer's reason if it gave one.
    Closed(Option<String>),
}

// ============================================================================
// Traits
// ============================================================================

/// Outbound half of an open link.
pub trait Channel: Send + Sync {
    /// Queues one text frame for delivery.
    ///
    /// # Errors
    ///
    /// [`Error::ConnectionClosed`](crate::Error::ConnectionClosed) if the
    /// link is already gone.
    fn send_text(&self, text: String) -> Result<()>;

    /// Closes the link. Idempotent.
    fn close(&self);
}

/// Opens links to the device.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Opens one link to `url`.
    ///
    /// Resolves once the link is ready for delivery.
    ///
    /// # Errors
    ///
    /// Any error means the attempt failed and no link exists.
    async fn connect(&self, url: &Url, events: EventSender) -> Result<Box<dyn Channel>>;
}
