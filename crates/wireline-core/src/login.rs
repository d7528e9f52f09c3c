//! Login negotiation state machine.
//!
//! Drives the server-owned handshake that must complete before any chat
//! traffic is allowed. Uses the action pattern: inputs are inbound server
//! messages and locally read reply lines, outputs are actions for the
//! driver to execute. This keeps the machine pure (no I/O) and makes every
//! handshake path testable without a connection.
//!
//! # State Machine
//!
//! ```text
//! ┌────────────────┐ prompt  ┌───────────────────┐ reply ┌─────────────────────────┐
//! │ AwaitingPrompt │────────>│ AwaitingUserReply │──────>│ AwaitingSuccessOrError  │
//! └────────────────┘         └───────────────────┘       └─────────────────────────┘
//!         │                            ▲      prompt │ error │        │
//!         │ success                    └─────────────┴───────┘        │ success
//!         ↓                                                           ↓
//! ┌──────────────────┐   any message   ┌───────────────────┐  ready marker
//! │ AwaitingLoginAck │────────────────>│ AwaitingChatReady │───────────────> Ready
//! └──────────────────┘                 └───────────────────┘
//! ```
//!
//! Connection closure is not an input here; the driver maps it to a
//! connection-lost failure using [`LoginState::phase`] for reporting.

use crate::{
    error::LoginError,
    marker::{self, MessageKind},
};

/// Actions returned by the negotiation state machine.
///
/// The driver (session runtime or test harness) executes these:
/// - `Display`: print the text to the local console
/// - `RequestReply`: read one local line, feed it to
///   [`Negotiation::handle_reply`]
/// - `Send`: transmit the text to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    /// Print this text to the local console.
    Display(String),
    /// Read one local input line and feed it to
    /// [`Negotiation::handle_reply`].
    RequestReply,
    /// Send this text to the server.
    Send(String),
}

/// Negotiation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    /// Waiting for the server to prompt for a username.
    AwaitingPrompt,
    /// Prompt received; waiting for a locally read reply line.
    AwaitingUserReply,
    /// Reply sent; waiting for the server's verdict.
    AwaitingSuccessOrError,
    /// Login accepted; waiting for the acknowledgement message.
    AwaitingLoginAck,
    /// Acknowledged; waiting for a chat-ready marker.
    AwaitingChatReady,
    /// Negotiation complete; chat traffic is permitted.
    Ready,
}

impl LoginState {
    /// Human-readable phase name, used in connection-loss reporting.
    pub fn phase(self) -> &'static str {
        match self {
            Self::AwaitingPrompt | Self::AwaitingUserReply | Self::AwaitingSuccessOrError => {
                "login"
            },
            Self::AwaitingLoginAck => "login acknowledgement",
            Self::AwaitingChatReady => "the wait for chat start",
            Self::Ready => "chat",
        }
    }
}

/// Login negotiation state machine.
///
/// Pure state machine managing the pre-chat handshake over one connection.
/// The only entity that mutates [`LoginState`]; transitions are driven
/// solely by inbound message content and, in the reply state, by a locally
/// supplied line. A `Send` action is only ever emitted from the reply
/// state, which is what keeps chat traffic impossible before `Ready`.
#[derive(Debug, Clone)]
pub struct Negotiation {
    state: LoginState,
}

impl Default for Negotiation {
    fn default() -> Self {
        Self::new()
    }
}

impl Negotiation {
    /// Create a machine in [`LoginState::AwaitingPrompt`].
    pub fn new() -> Self {
        Self { state: LoginState::AwaitingPrompt }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> LoginState {
        self.state
    }

    /// True once negotiation has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == LoginState::Ready
    }

    /// Process one inbound server message.
    ///
    /// # Errors
    ///
    /// - `LoginError::InvalidState` if a message arrives while a local
    ///   reply is pending or after negotiation completed
    pub fn handle_message(&mut self, text: &str) -> Result<Vec<LoginAction>, LoginError> {
        match self.state {
            LoginState::AwaitingPrompt | LoginState::AwaitingSuccessOrError => {
                Ok(self.handle_verdict(text))
            },

            // The acknowledgement is expected to be empty; its content is
            // dropped either way, never displayed.
            LoginState::AwaitingLoginAck => {
                self.state = LoginState::AwaitingChatReady;
                Ok(vec![])
            },

            LoginState::AwaitingChatReady => {
                if marker::is_chat_ready(text) {
                    self.state = LoginState::Ready;
                }
                Ok(vec![LoginAction::Display(text.to_string())])
            },

            LoginState::AwaitingUserReply | LoginState::Ready => Err(LoginError::InvalidState {
                state: self.state,
                operation: "handle_message",
            }),
        }
    }

    /// Feed the locally read reply line. Sent verbatim.
    ///
    /// # Errors
    ///
    /// - `LoginError::InvalidState` unless a prompt reply is pending
    pub fn handle_reply(&mut self, line: &str) -> Result<Vec<LoginAction>, LoginError> {
        if self.state != LoginState::AwaitingUserReply {
            return Err(LoginError::InvalidState {
                state: self.state,
                operation: "handle_reply",
            });
        }

        self.state = LoginState::AwaitingSuccessOrError;
        Ok(vec![LoginAction::Send(line.to_string())])
    }

    /// Shared verdict matching for the reply-loop states.
    ///
    /// Priority: success > error > prompt > unrecognized. Every message is
    /// displayed regardless of category.
    fn handle_verdict(&mut self, text: &str) -> Vec<LoginAction> {
        let mut actions = vec![LoginAction::Display(text.to_string())];

        match marker::classify(text) {
            MessageKind::Success => {
                self.state = LoginState::AwaitingLoginAck;
            },
            MessageKind::Error => {
                // No reply; the server re-prompts.
                self.state = LoginState::AwaitingPrompt;
            },
            MessageKind::UsernamePrompt => {
                self.state = LoginState::AwaitingUserReply;
                actions.push(LoginAction::RequestReply);
            },
            MessageKind::Unrecognized => {},
        }

        actions
    }
}
