//! Link manager.
//!
//! Owns the single device connection and drives [`LinkMachine`] with events
//! from callers and from the transport.
//!
//! # Attempt Lifecycle
//!
//! 1. `send_*` validates the address and feeds `Send` to the machine
//! 2. On `Connect`, a tokio task runs [`Connector::connect`]
//! 3. Success installs the channel and feeds `Opened` (pending is delivered)
//! 4. The task then forwards transport events until failure or closure
//!
//! Every attempt carries a generation number. Events from an attempt that is
//! no longer current are dropped.

// ============================================================================
// Imports
// ============================================================================

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::braille::transcode;
use crate::error::{Error, Result};

use super::builder::LinkBuilder;
use super::config::LinkConfig;
use super::endpoint::Endpoint;
use super::machine::{LinkAction, LinkEvent, LinkMachine};
use super::state::{LinkState, StatusEvent};
use super::transport::{Channel, Connector, TransportEvent};

// ============================================================================
// Types
// ============================================================================

/// Status handler callback type.
///
/// Called once per state transition, in transition order, with no manager
/// lock held. The handler may call back into the manager.
pub type StatusHandler = Box<dyn Fn(&StatusEvent) + Send + Sync>;

/// Inbound message callback type.
///
/// Called for each text frame the device sends, with no manager lock held.
pub type InboundHandler = Box<dyn Fn(&str) + Send + Sync>;

/// State guarded by the link lock.
struct LinkSlot {
    machine: LinkMachine,
    channel: Option<Box<dyn Channel>>,
    generation: u64,
}

/// Statuses waiting for the handler.
///
/// Filled under the link lock, so the queue order is the transition order.
/// Only one thread drains it at a time; statuses raised by a handler are
/// appended and picked up by the same drain.
#[derive(Default)]
struct StatusOutbox {
    queue: VecDeque<StatusEvent>,
    draining: bool,
}

/// Shared state for a manager and its attempt tasks.
struct LinkInner {
    config: LinkConfig,
    connector: Arc<dyn Connector>,
    runtime: Handle,
    slot: Mutex<LinkSlot>,
    outbox: Mutex<StatusOutbox>,
    status_handler: Mutex<Option<Arc<dyn Fn(&StatusEvent) + Send + Sync>>>,
    inbound_handler: Mutex<Option<Arc<dyn Fn(&str) + Send + Sync>>>,
}

// ============================================================================
// LinkManager
// ============================================================================

/// Delivers coded messages to the tactile device.
///
/// At most one connection exists at any time. Sends never block: if the
/// link is not open, a connection attempt is started and the message waits
/// in a one-slot buffer. A later send during the same attempt replaces it.
///
/// # Example
///
/// ```no_run
/// use braille_link::LinkManager;
///
/// # async fn example() -> braille_link::Result<()> {
/// let link = LinkManager::builder().build()?;
/// link.set_status_handler(Box::new(|status| println!("{}", status.label())));
///
/// link.send_text("Olá 2024", "192.168.4.1")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LinkManager {
    inner: Arc<LinkInner>,
}

impl fmt::Debug for LinkManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.inner.slot.lock();
        f.debug_struct("LinkManager")
            .field("state", &slot.machine.state())
            .field("generation", &slot.generation)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// LinkManager - Constructor
// ============================================================================

impl LinkManager {
    /// Creates a configuration builder.
    #[inline]
    #[must_use]
    pub fn builder() -> LinkBuilder {
        LinkBuilder::new()
    }

    pub(crate) fn new(config: LinkConfig, connector: Arc<dyn Connector>, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(LinkInner {
                config,
                connector,
                runtime,
                slot: Mutex::new(LinkSlot {
                    machine: LinkMachine::new(),
                    channel: None,
                    generation: 0,
                }),
                outbox: Mutex::new(StatusOutbox::default()),
                status_handler: Mutex::new(None),
                inbound_handler: Mutex::new(None),
            }),
        }
    }
}

// ============================================================================
// LinkManager - Public API
// ============================================================================

impl LinkManager {
    /// Delivers an already coded message to the device at `address`.
    ///
    /// Returns as soon as the message is delivered, queued for an attempt
    /// in flight, or an attempt has been started.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidEndpoint`] if `address` is not a valid host. The link
    /// state is not changed.
    pub fn send_transcoded(&self, message: impl Into<String>, address: &str) -> Result<()> {
        let endpoint = Endpoint::new(address, &self.inner.config).inspect_err(|e| {
            warn!(error = %e, "Rejected device address");
        })?;

        let message = message.into();
        debug!(cells = message.chars().count(), url = %endpoint, "Send requested");

        self.inner.submit(LinkEvent::Send { message, endpoint });
        Ok(())
    }

    /// Transcodes `text` and delivers it to the device at `address`.
    ///
    /// # Errors
    ///
    /// See [`send_transcoded`](Self::send_transcoded).
    pub fn send_text(&self, text: &str, address: &str) -> Result<()> {
        self.send_transcoded(transcode(text), address)
    }

    /// Closes the link locally.
    ///
    /// An attempt in flight is abandoned and its pending message dropped.
    /// No-op when nothing is live.
    pub fn close(&self) {
        {
            let mut slot = self.inner.slot.lock();
            if !slot.machine.state().is_live() {
                return;
            }
            slot.generation += 1;
            info!(generation = slot.generation, "Closing link");
            let reason = Some("closed locally".to_string());
            self.inner.run(&mut slot, LinkEvent::Closed(reason));
        }
        self.inner.flush_statuses();
    }

    /// Returns the current link state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> LinkState {
        self.inner.slot.lock().machine.state()
    }

    /// Returns a copy of the message waiting for the link to open.
    #[must_use]
    pub fn pending_message(&self) -> Option<String> {
        self.inner.slot.lock().machine.pending().map(str::to_owned)
    }

    /// Returns the link configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &LinkConfig {
        &self.inner.config
    }

    /// Sets the status handler.
    pub fn set_status_handler(&self, handler: StatusHandler) {
        *self.inner.status_handler.lock() = Some(Arc::from(handler));
    }

    /// Clears the status handler.
    pub fn clear_status_handler(&self) {
        *self.inner.status_handler.lock() = None;
    }

    /// Sets the inbound message handler.
    ///
    /// Without one, device messages are logged at `info`.
    pub fn set_inbound_handler(&self, handler: InboundHandler) {
        *self.inner.inbound_handler.lock() = Some(Arc::from(handler));
    }

    /// Clears the inbound message handler.
    pub fn clear_inbound_handler(&self) {
        *self.inner.inbound_handler.lock() = None;
    }
}

// ============================================================================
// LinkInner - Event Handling
// ============================================================================

impl LinkInner {
    /// Applies a caller event.
    fn submit(self: &Arc<Self>, event: LinkEvent) {
        {
            let mut slot = self.slot.lock();
            self.run(&mut slot, event);
        }
        self.flush_statuses();
    }

    /// Applies an event from attempt `generation`, if it is still current.
    fn submit_from(self: &Arc<Self>, generation: u64, event: LinkEvent) {
        {
            let mut slot = self.slot.lock();
            if slot.generation != generation {
                debug!(
                    generation,
                    current = slot.generation,
                    "Ignoring event from superseded attempt"
                );
                return;
            }
            self.run(&mut slot, event);
        }
        self.flush_statuses();
    }

    /// Installs the channel of attempt `generation` and marks the link open.
    fn opened(self: &Arc<Self>, generation: u64, channel: Box<dyn Channel>) {
        {
            let mut slot = self.slot.lock();
            if slot.generation != generation {
                debug!(
                    generation,
                    current = slot.generation,
                    "Closing channel of superseded attempt"
                );
                channel.close();
                return;
            }
            slot.channel = Some(channel);
            self.run(&mut slot, LinkEvent::Opened);
        }
        self.flush_statuses();
    }

    /// Runs the machine to quiescence and queues the statuses it raises.
    ///
    /// Deliveries happen here, under the lock, so they keep the order in
    /// which sends were accepted.
    fn run(self: &Arc<Self>, slot: &mut LinkSlot, event: LinkEvent) {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            for action in slot.machine.handle(event) {
                match action {
                    LinkAction::Connect(endpoint) => {
                        slot.generation += 1;
                        if let Some(stale) = slot.channel.take() {
                            stale.close();
                        }
                        self.spawn_attempt(slot.generation, endpoint);
                    }

                    LinkAction::Deliver(message) => {
                        let cells = message.chars().count();
                        let result = match slot.channel.as_ref() {
                            Some(channel) => channel.send_text(message),
                            None => Err(Error::ConnectionClosed),
                        };
                        match result {
                            Ok(()) => debug!(cells, "Message delivered"),
                            Err(e) => {
                                warn!(error = %e, cells, "Delivery failed");
                                queue.push_back(LinkEvent::Failed(e.to_string()));
                            }
                        }
                    }

                    LinkAction::Report(status) => self.outbox.lock().queue.push_back(status),
                }
            }

            if !slot.machine.state().is_live()
                && let Some(channel) = slot.channel.take()
            {
                channel.close();
            }
        }
    }

    /// Hands queued statuses to the handler, oldest first.
    ///
    /// Returns at once if another call is already draining; that call
    /// delivers whatever was queued here.
    fn flush_statuses(&self) {
        {
            let mut outbox = self.outbox.lock();
            if outbox.draining || outbox.queue.is_empty() {
                return;
            }
            outbox.draining = true;
        }

        loop {
            let status = {
                let mut outbox = self.outbox.lock();
                match outbox.queue.pop_front() {
                    Some(status) => status,
                    None => {
                        outbox.draining = false;
                        return;
                    }
                }
            };

            debug!(state = ?status.state, detail = ?status.detail, "Link status");
            let handler = self.status_handler.lock().clone();
            if let Some(handler) = handler {
                handler(&status);
            }
        }
    }

    /// Forwards a device message.
    fn inbound(&self, text: &str) {
        let handler = self.inbound_handler.lock().clone();
        match handler {
            Some(handler) => handler(text),
            None => info!(message = %text, "Device message"),
        }
    }
}

// ============================================================================
// LinkInner - Attempts
// ============================================================================

impl LinkInner {
    fn spawn_attempt(self: &Arc<Self>, generation: u64, endpoint: Endpoint) {
        let inner = Arc::clone(self);
        self.runtime.spawn(async move {
            inner.run_attempt(generation, endpoint).await;
        });
    }

    /// Connects, then forwards transport events until the link ends.
    async fn run_attempt(self: Arc<Self>, generation: u64, endpoint: Endpoint) {
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();

        info!(generation, url = %endpoint, "Connecting to device");

        let connect = self.connector.connect(endpoint.url(), events_tx);
        let result = match self.config.connect_timeout() {
            Some(limit) => timeout(limit, connect).await.unwrap_or_else(|_| {
                Err(Error::transport(format!(
                    "connect timed out after {}ms",
                    limit.as_millis()
                )))
            }),
            None => connect.await,
        };

        match result {
            Ok(channel) => {
                info!(generation, url = %endpoint, "Device link open");
                self.opened(generation, channel);
            }
            Err(e) => {
                warn!(generation, error = %e, "Connection attempt failed");
                self.submit_from(generation, LinkEvent::Failed(e.to_string()));
                return;
            }
        }

        while let Some(event) = events_rx.recv().await {
            match event {
                TransportEvent::Message(text) => self.inbound(&text),
                TransportEvent::Error(message) => {
                    warn!(generation, error = %message, "Device link failed");
                    self.submit_from(generation, LinkEvent::Failed(message));
                    return;
                }
                TransportEvent::Closed(reason) => {
                    info!(generation, ?reason, "Device link closed");
                    self.submit_from(generation, LinkEvent::Closed(reason));
                    return;
                }
            }
        }

        debug!(generation, "Transport dropped its event sender");
        self.submit_from(generation, LinkEvent::Closed(None));
    }
}

// ============================================================================
// Tests
// ============================================================================
