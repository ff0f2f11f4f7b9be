//! Link state machine.
//!
//! Pure transition logic: the manager feeds [`LinkEvent`]s in and executes
//! the returned [`LinkAction`]s. Nothing here touches the network.
//!
//! ```text
//!            send                 opened
//!  Absent ──────────► Connecting ────────► Open
//!    ▲                    │                 │
//!    │   send             │ failed/closed   │ failed/closed
//!    └──────── Closed / Errored ◄───────────┘
//! ```
//!
//! The pending slot holds one message. A send while `Connecting` replaces it.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, warn};

use super::endpoint::Endpoint;
use super::state::{LinkState, StatusEvent};

// ============================================================================
// Events & Actions
// ============================================================================

/// Input to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// The caller asked for a coded message to be delivered.
    Send {
        /// Coded payload.
        message: String,
        /// Target for a new connection, if one is needed.
        endpoint: Endpoint,
    },
    /// The transport finished opening.
    Opened,
    /// The transport failed.
    Failed(String),
    /// The transport closed, with an optional reason.
    Closed(Option<String>),
}

/// Side effect requested by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Start one connection attempt.
    Connect(Endpoint),
    /// Write one text frame on the open link.
    Deliver(String),
    /// Push a status event to the presentation layer.
    Report(StatusEvent),
}

// ============================================================================
// LinkMachine
// ============================================================================

/// Connect-or-reuse state machine with a one-slot pending buffer.
#[derive(Debug, Default)]
pub struct LinkMachine {
    state: LinkState,
    pending: Option<String>,
}

impl LinkMachine {
    /// Creates a machine in the `Absent` state.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Returns the message waiting for the link to open.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Applies one event and returns the actions to perform, in order.
    pub fn handle(&mut self, event: LinkEvent) -> Vec<LinkAction> {
        match event {
            LinkEvent::Send { message, endpoint } => self.on_send(message, endpoint),
            LinkEvent::Opened => self.on_opened(),
            LinkEvent::Failed(detail) => self.on_terminal(LinkState::Errored, Some(detail)),
            LinkEvent::Closed(reason) => self.on_terminal(LinkState::Closed, reason),
        }
    }

    fn on_send(&mut self, message: String, endpoint: Endpoint) -> Vec<LinkAction> {
        match self.state {
            LinkState::Open => vec![LinkAction::Deliver(message)],

            LinkState::Connecting => {
                if let Some(replaced) = self.pending.replace(message) {
                    warn!(
                        replaced_cells = replaced.chars().count(),
                        "Pending message replaced while connecting"
                    );
                }
                Vec::new()
            }

            LinkState::Absent | LinkState::Closed | LinkState::Errored => {
                self.pending = Some(message);
                self.enter(LinkState::Connecting);
                vec![
                    LinkAction::Report(StatusEvent::new(LinkState::Connecting, None)),
                    LinkAction::Connect(endpoint),
                ]
            }
        }
    }

    fn on_opened(&mut self) -> Vec<LinkAction> {
        if self.state != LinkState::Connecting {
            debug!(state = ?self.state, "Ignoring open outside of Connecting");
            return Vec::new();
        }

        self.enter(LinkState::Open);
        let mut actions = vec![LinkAction::Report(StatusEvent::new(LinkState::Open, None))];
        if let Some(message) = self.pending.take() {
            actions.push(LinkAction::Deliver(message));
        }
        actions
    }

    fn on_terminal(&mut self, state: LinkState, detail: Option<String>) -> Vec<LinkAction> {
        if !self.state.is_live() {
            debug!(state = ?self.state, next = ?state, "Ignoring terminal event on dead link");
            return Vec::new();
        }

        if let Some(dropped) = self.pending.take() {
            warn!(
                dropped_cells = dropped.chars().count(),
                "Pending message dropped, link never opened"
            );
        }
        self.enter(state);
        vec![LinkAction::Report(StatusEvent::new(state, detail))]
    }

    fn enter(&mut self, next: LinkState) {
        debug!(from = ?self.state, to = ?next, "Link transition");
        self.state = next;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::link::LinkConfig;

    fn endpoint() -> Endpoint {
        Endpoint::new("192.168.4.1", &LinkConfig::default()).expect("valid endpoint")
    }

    fn send(message: &str) -> LinkEvent {
        LinkEvent::Send {
            message: message.to_string(),
            endpoint: endpoint(),
        }
    }

    fn connects(actions: &[LinkAction]) -> usize {
        actions
            .iter()
            .filter(|a| matches!(a, LinkAction::Connect(_)))
            .count()
    }

    #[test]
    fn test_first_send_connects() {
        let mut machine = LinkMachine::new();
        let actions = machine.handle(send("⠁"));

        assert_eq!(machine.state(), LinkState::Connecting);
        assert_eq!(machine.pending(), Some("⠁"));
        assert_eq!(connects(&actions), 1);
        assert_eq!(
            actions[0],
            LinkAction::Report(StatusEvent::new(LinkState::Connecting, None))
        );
    }

    #[test]
    fn test_open_delivers_pending_once() {
        let mut machine = LinkMachine::new();
        machine.handle(send("⠁"));
        let actions = machine.handle(LinkEvent::Opened);

        assert_eq!(machine.state(), LinkState::Open);
        assert_eq!(machine.pending(), None);
        assert_eq!(
            actions,
            vec![
                LinkAction::Report(StatusEvent::new(LinkState::Open, None)),
                LinkAction::Deliver("⠁".to_string()),
            ]
        );
    }

    #[test]
    fn test_send_while_open_delivers_without_connect() {
        let mut machine = LinkMachine::new();
        machine.handle(send("⠁"));
        machine.handle(LinkEvent::Opened);

        let actions = machine.handle(send("⠃"));
        assert_eq!(actions, vec![LinkAction::Deliver("⠃".to_string())]);
        assert_eq!(machine.state(), LinkState::Open);
    }

    #[test]
    fn test_send_while_connecting_replaces_pending() {
        let mut machine = LinkMachine::new();
        machine.handle(send("first"));
        let actions = machine.handle(send("second"));

        assert!(actions.is_empty());
        assert_eq!(machine.pending(), Some("second"));

        let actions = machine.handle(LinkEvent::Opened);
        assert!(actions.contains(&LinkAction::Deliver("second".to_string())));
        assert!(!actions.contains(&LinkAction::Deliver("first".to_string())));
    }

    #[test]
    fn test_failure_while_connecting_drops_pending() {
        let mut machine = LinkMachine::new();
        machine.handle(send("⠁"));
        let actions = machine.handle(LinkEvent::Failed("refused".into()));

        assert_eq!(machine.state(), LinkState::Errored);
        assert_eq!(machine.pending(), None);
        assert_eq!(
            actions,
            vec![LinkAction::Report(StatusEvent::new(
                LinkState::Errored,
                Some("refused".into())
            ))]
        );
    }

    #[test]
    fn test_close_then_send_reconnects() {
        let mut machine = LinkMachine::new();
        machine.handle(send("⠁"));
        machine.handle(LinkEvent::Opened);
        machine.handle(LinkEvent::Closed(None));
        assert_eq!(machine.state(), LinkState::Closed);

        let actions = machine.handle(send("⠃"));
        assert_eq!(connects(&actions), 1);
        assert_eq!(machine.state(), LinkState::Connecting);
    }

    #[test]
    fn test_errored_then_send_reconnects() {
        let mut machine = LinkMachine::new();
        machine.handle(send("⠁"));
        machine.handle(LinkEvent::Failed("timeout".into()));

        let actions = machine.handle(send("⠃"));
        assert_eq!(connects(&actions), 1);
    }

    #[test]
    fn test_stray_events_are_ignored() {
        let mut machine = LinkMachine::new();
        assert!(machine.handle(LinkEvent::Opened).is_empty());
        assert!(machine.handle(LinkEvent::Closed(None)).is_empty());
        assert!(machine.handle(LinkEvent::Failed("late".into())).is_empty());
        assert_eq!(machine.state(), LinkState::Absent);

        machine.handle(send("⠁"));
        machine.handle(LinkEvent::Opened);
        assert!(machine.handle(LinkEvent::Opened).is_empty());
    }
}
