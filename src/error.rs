//! Error types for braille-link.
//!
//! Transcoding never fails, so every variant here belongs to the link layer
//! or its configuration.
//!
//! # Usage
//!
//! ```ignore
//! use braille_link::{Error, LinkManager, Result};
//!
//! fn push(link: &LinkManager, text: &str) -> Result<()> {
//!     link.send_text(text, "192.168.4.1")?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Endpoint | [`Error::InvalidEndpoint`] |
//! | Link | [`Error::Transport`], [`Error::RemoteClosed`], [`Error::ConnectionClosed`] |
//! | External | [`Error::WebSocket`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned by [`LinkBuilder::build`](crate::link::LinkBuilder::build)
    /// when a setting is invalid or no Tokio runtime is available.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Endpoint Errors
    // ========================================================================
    /// The device address cannot be formed into a connection target.
    ///
    /// Reported synchronously; the link state is left untouched.
    #[error("Invalid endpoint '{address}': {reason}")]
    InvalidEndpoint {
        /// Address as supplied by the caller.
        address: String,
        /// Why it was rejected.
        reason: String,
    },

    // ========================================================================
    // Link Errors
    // ========================================================================
    /// Transport-level failure while connecting or open.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the failure.
        message: String,
    },

    /// The link was closed, by the device or by the network.
    #[error("Remote closed{}", .reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default())]
    RemoteClosed {
        /// Close reason, when the peer sent one.
        reason: Option<String>,
    },

    /// Delivery attempted on a channel whose event loop has ended.
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // External Errors
    // ========================================================================
    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid endpoint error.
    #[inline]
    pub fn invalid_endpoint(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Creates a transport error.
    #[inline]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a remote closed error.
    #[inline]
    pub fn remote_closed(reason: Option<String>) -> Self {
        Self::RemoteClosed { reason }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this error came from the link rather than the caller.
    ///
    /// Link failures reset the manager, so a later send reconnects.
    #[inline]
    #[must_use]
    pub fn is_link_error(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. }
                | Self::RemoteClosed { .. }
                | Self::ConnectionClosed
                | Self::WebSocket(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
