//! braille-link - Grade 1 Braille transcoder with a device link.
//!
//! Converts text into six-dot Unicode Braille and streams it to a tactile
//! display (an ESP32 running a WebSocket server).
//!
//! # Architecture
//!
//! ```text
//! caller ──► transcode() ──► coded string ──► LinkManager ──► ws://{device}:81/ws
//! ```
//!
//! - **Transcoder**: pure, total, never fails
//! - **Link Manager**: one connection, reused while open, re-created after
//!   failure or closure on the next send
//!
//! # Quick Start
//!
//! ```no_run
//! use braille_link::{LinkManager, Result, transcode};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     assert_eq!(transcode("a5b"), "⠁⠼⠑⠃");
//!
//!     let link = LinkManager::builder().build()?;
//!     link.set_status_handler(Box::new(|status| println!("{}", status.label())));
//!     link.send_text("Olá mundo", "192.168.4.1")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`braille`] | [`Cell`], symbol table, [`transcode`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`link`] | [`LinkManager`], state machine, transports |

// ============================================================================
// Modules
// ============================================================================

/// Text to Braille transcoding.
pub mod braille;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Device link: connection lifecycle and WebSocket transport.
pub mod link;

// ============================================================================
// Re-exports
// ============================================================================

// Transcoder
pub use braille::{Cell, cells, transcode};

// Error types
pub use error::{Error, Result};

// Link types
pub use link::{
    Channel, Connector, Endpoint, LinkBuilder, LinkConfig, LinkManager, LinkState, StatusEvent,
    TransportEvent, WsConnector,
};
