//! Device link layer.
//!
//! Delivers coded messages to the tactile device over one WebSocket.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  LinkManager    │                              │  Device         │
//! │                 │         WebSocket            │  (ESP32)        │
//! │  LinkMachine    │─────────────────────────────►│                 │
//! │  → Connector    │      {address}:81/ws         │  WebSocket      │
//! │  → Channel      │◄─────────────────────────────│  Server         │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `builder` | [`LinkBuilder`] fluent configuration |
//! | `config` | [`LinkConfig`] and device defaults |
//! | `endpoint` | Address validation into [`Endpoint`] |
//! | `machine` | Pure [`LinkMachine`] transitions |
//! | `manager` | [`LinkManager`] driving the machine |
//! | `state` | [`LinkState`] and [`StatusEvent`] |
//! | `transport` | [`Connector`] / [`Channel`] seam |
//! | `ws` | [`WsConnector`] over `tokio-tungstenite` |

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder for [`LinkManager`].
pub mod builder;

/// Link configuration.
pub mod config;

/// Device endpoint construction.
pub mod endpoint;

/// Link state machine.
pub mod machine;

/// Connection lifecycle manager.
pub mod manager;

/// Link states and status events.
pub mod state;

/// Transport abstraction.
pub mod transport;

/// WebSocket transport.
pub mod ws;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::LinkBuilder;
pub use config::{DEFAULT_PATH, DEFAULT_PORT, LinkConfig};
pub use endpoint::Endpoint;
pub use machine::{LinkAction, LinkEvent, LinkMachine};
pub use manager::{InboundHandler, LinkManager, StatusHandler};
pub use state::{LinkState, StatusEvent};
pub use transport::{Channel, Connector, EventSender, TransportEvent};
pub use ws::WsConnector;
