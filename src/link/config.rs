//! Link configuration.

use std::time::Duration;

// ============================================================================
// Constants
// ============================================================================

/// Port the device firmware listens on.
pub const DEFAULT_PORT: u16 = 81;

/// WebSocket path on the device.
pub const DEFAULT_PATH: &str = "ws";

// ============================================================================
// LinkConfig
// ============================================================================

/// Validated, immutable link settings.
///
/// Built by [`LinkBuilder`](super::LinkBuilder); [`Default`] gives the
/// device's fixed port and path with no connect timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    port: u16,
    path: String,
    connect_timeout: Option<Duration>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
            connect_timeout: None,
        }
    }
}

impl LinkConfig {
    /// Creates a configuration without validation.
    pub(crate) fn new(
        port: u16,
        path: impl Into<String>,
        connect_timeout: Option<Duration>,
    ) -> Self {
        Self {
            port,
            path: path.into(),
            connect_timeout,
        }
    }

    /// Returns the device port.
    #[inline]
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the WebSocket path, without a leading slash.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the connect timeout, if one is set.
    #[inline]
    #[must_use]
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }
}
