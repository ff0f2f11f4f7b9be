//! Link states and the status events pushed to the presentation layer.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::error::Error;

// ============================================================================
// LinkState
// ============================================================================

/// Lifecycle state of the device link.
///
/// `Closed` and `Errored` behave like `Absent` for the next send: the handle
/// is gone and a fresh connection attempt is made.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    /// No connection has been attempted yet.
    #[default]
    Absent,
    /// A connection attempt is in flight.
    Connecting,
    /// The link is ready for delivery.
    Open,
    /// The link was closed.
    Closed,
    /// The link failed.
    Errored,
}

impl LinkState {
    /// Returns `true` while a connection handle exists or is being created.
    #[inline]
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Connecting | Self::Open)
    }

    /// Returns the human label for a status display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Absent => "Not connected",
            Self::Connecting => "Connecting...",
            Self::Open => "Connected",
            Self::Closed => "Disconnected",
            Self::Errored => "Connection error",
        }
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// StatusEvent
// ============================================================================

/// One state transition, as reported to the status handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEvent {
    /// State entered.
    pub state: LinkState,
    /// Failure detail or close reason, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl StatusEvent {
    /// Creates a status event.
    #[inline]
    #[must_use]
    pub fn new(state: LinkState, detail: Option<String>) -> Self {
        Self { state, detail }
    }

    /// Returns the human label for the entered state.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.state.label()
    }

    /// Returns the error this transition represents, if any.
    ///
    /// `Errored` maps to [`Error::Transport`], `Closed` to
    /// [`Error::RemoteClosed`].
    #[must_use]
    pub fn error(&self) -> Option<Error> {
        match self.state {
            LinkState::Errored => Some(Error::transport(
                self.detail.clone().unwrap_or_else(|| "unknown failure".to_string()),
            )),
            LinkState::Closed => Some(Error::remote_closed(self.detail.clone())),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_absent() {
        assert_eq!(LinkState::default(), LinkState::Absent);
    }

    #[test]
    fn test_is_live() {
        assert!(LinkState::Connecting.is_live());
        assert!(LinkState::Open.is_live());
        assert!(!LinkState::Absent.is_live());
        assert!(!LinkState::Closed.is_live());
        assert!(!LinkState::Errored.is_live());
    }

    #[test]
    fn test_status_serializes_lowercase_state() {
        let event = StatusEvent::new(LinkState::Open, None);
        let json = serde_json::to_string(&event).expect("serialize");
        assert_eq!(json, r#"{"state":"open"}"#);

        let event = StatusEvent::new(LinkState::Errored, Some("refused".into()));
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["state"], "errored");
        assert_eq!(json["detail"], "refused");
    }

    #[test]
    fn test_status_error_mapping() {
        let errored = StatusEvent::new(LinkState::Errored, Some("reset".into()));
        assert!(matches!(errored.error(), Some(Error::Transport { .. })));

        let closed = StatusEvent::new(LinkState::Closed, None);
        assert!(matches!(closed.error(), Some(Error::RemoteClosed { reason: None })));

        assert!(StatusEvent::new(LinkState::Open, None).error().is_none());
    }

    #[test]
    fn test_labels() {
        assert_eq!(LinkState::Connecting.to_string(), "Connecting...");
        assert_eq!(StatusEvent::new(LinkState::Closed, None).label(), "Disconnected");
    }
}
