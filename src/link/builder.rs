//! Builder pattern for link configuration.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use braille_link::LinkManager;
//!
//! # async fn example() -> braille_link::Result<()> {
//! let link = LinkManager::builder()
//!     .port(81)
//!     .path("ws")
//!     .connect_timeout(Duration::from_secs(5))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;

use crate::error::{Error, Result};

use super::config::{DEFAULT_PATH, DEFAULT_PORT, LinkConfig};
use super::manager::LinkManager;
use super::transport::Connector;
use super::ws::WsConnector;

// ============================================================================
// LinkBuilder
// ============================================================================

/// Builder for configuring a [`LinkManager`].
///
/// Use [`LinkManager::builder()`] to create a new builder.
#[derive(Default, Clone)]
pub struct LinkBuilder {
    /// Device port.
    port: Option<u16>,
    /// WebSocket path.
    path: Option<String>,
    /// Limit on a single connection attempt.
    connect_timeout: Option<Duration>,
    /// Transport used to open links.
    connector: Option<Arc<dyn Connector>>,
}

impl fmt::Debug for LinkBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkBuilder")
            .field("port", &self.port)
            .field("path", &self.path)
            .field("connect_timeout", &self.connect_timeout)
            .field("custom_connector", &self.connector.is_some())
            .finish()
    }
}

// ============================================================================
// LinkBuilder Implementation
// ============================================================================

impl LinkBuilder {
    /// Creates a builder with the device defaults.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the device port (default 81).
    #[inline]
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the WebSocket path (default `ws`). A leading `/` is accepted.
    #[inline]
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Limits how long one connection attempt may take.
    ///
    /// Without a limit, an attempt runs until the transport reports success
    /// or failure.
    #[inline]
    #[must_use]
    pub fn connect_timeout(mut self, limit: Duration) -> Self {
        self.connect_timeout = Some(limit);
        self
    }

    /// Replaces the WebSocket transport.
    #[inline]
    #[must_use]
    pub fn connector(mut self, connector: impl Connector) -> Self {
        self.connector = Some(Arc::new(connector));
        self
    }

    /// Builds the manager with validation.
    ///
    /// Must be called from within a Tokio runtime; connection attempts are
    /// spawned on it.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the port is 0, the path is invalid, the
    ///   timeout is zero, or no Tokio runtime is running
    pub fn build(self) -> Result<LinkManager> {
        let config = self.validate()?;
        let runtime = Handle::try_current().map_err(|_| {
            Error::config(
                "LinkManager must be built inside a Tokio runtime.\n\
                 Example: call build() from an async fn under #[tokio::main]",
            )
        })?;
        let connector: Arc<dyn Connector> = match self.connector {
            Some(connector) => connector,
            None => Arc::new(WsConnector),
        };

        Ok(LinkManager::new(config, connector, runtime))
    }
}

// ============================================================================
// Validation
// ============================================================================

impl LinkBuilder {
    /// Validates settings into a [`LinkConfig`].
    fn validate(&self) -> Result<LinkConfig> {
        let port = self.port.unwrap_or(DEFAULT_PORT);
        if port == 0 {
            return Err(Error::config("Port must be non-zero"));
        }

        let path = self.validate_path()?;

        if self.connect_timeout.is_some_and(|limit| limit.is_zero()) {
            return Err(Error::config("Connect timeout must be greater than zero"));
        }

        Ok(LinkConfig::new(port, path, self.connect_timeout))
    }

    fn validate_path(&self) -> Result<String> {
        let raw = self.path.as_deref().unwrap_or(DEFAULT_PATH).trim();
        let path = raw.strip_prefix('/').unwrap_or(raw);

        if path.is_empty() {
            return Err(Error::config("WebSocket path must not be empty"));
        }
        if path.chars().any(|c| c.is_whitespace() || c == '?' || c == '#') {
            return Err(Error::config(format!(
                "WebSocket path contains an invalid character: {path}"
            )));
        }

        Ok(path.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
