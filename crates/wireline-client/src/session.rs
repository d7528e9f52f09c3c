//! Session orchestration.
//!
//! A [`Session`] owns one [`ServerLink`] end-to-end: it drives login
//! negotiation to completion, then hands the link to the chat relay. Any
//! negotiation failure ends the session before a single chat line can flow,
//! and the link pump is stopped exactly once on every exit path.

use thiserror::Error;
use tokio::sync::mpsc;
use wireline_core::{LoginAction, LoginError, Negotiation};

use crate::{
    console::Console,
    relay,
    transport::{LinkEvent, ServerLink},
};

/// Errors that end a session before or during negotiation.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The server closed the connection before negotiation completed.
    #[error("connection lost during {phase}")]
    ConnectionLost {
        /// Negotiation phase the loss was observed in.
        phase: &'static str,
    },

    /// The connection failed mid-stream before negotiation completed.
    #[error("transport failure during {phase}: {detail}")]
    Transport {
        /// Negotiation phase the failure was observed in.
        phase: &'static str,
        /// Failure description.
        detail: String,
    },

    /// Local input ended while the server was waiting for a reply.
    #[error("local input closed during login")]
    InputClosed,

    /// The negotiation machine rejected an input ordering.
    #[error(transparent)]
    Login(#[from] LoginError),
}

/// One client session over one connection.
///
/// Constructed with an established link, a local-line source and a console,
/// then [`run`](Self::run) to completion. Nothing is retried: every failure
/// is terminal for the run.
pub struct Session<C: Console> {
    link: ServerLink,
    local_lines: mpsc::Receiver<String>,
    console: C,
    peer: String,
}

impl<C: Console> Session<C> {
    /// Create a session over an established link.
    ///
    /// `peer` identifies the remote end on inbound display lines.
    pub fn new(
        link: ServerLink,
        local_lines: mpsc::Receiver<String>,
        console: C,
        peer: String,
    ) -> Self {
        Self { link, local_lines, console, peer }
    }

    /// Run the session to completion: negotiate login, then relay chat.
    ///
    /// # Errors
    ///
    /// Returns an error if negotiation fails; the chat phase is never
    /// entered in that case. Chat-phase terminations (closure, transport
    /// failure, input end) are reported through the console and complete
    /// normally.
    pub async fn run(self) -> Result<(), SessionError> {
        let Self { mut link, mut local_lines, mut console, peer } = self;

        if let Err(e) = negotiate(&mut link, &mut local_lines, &mut console).await {
            link.stop();
            return Err(e);
        }
        tracing::debug!("login negotiation complete, entering chat phase");

        relay::run(&mut link, local_lines, &mut console, &peer).await;
        link.stop();
        Ok(())
    }
}

/// Drive the negotiation machine until it reports ready.
async fn negotiate<C: Console>(
    link: &mut ServerLink,
    local_lines: &mut mpsc::Receiver<String>,
    console: &mut C,
) -> Result<(), SessionError> {
    let mut negotiation = Negotiation::new();

    while !negotiation.is_ready() {
        let phase = negotiation.state().phase();
        let text = match link.from_server.recv().await {
            Some(LinkEvent::Line(text)) => text,
            Some(LinkEvent::Closed { .. }) | None => {
                return Err(SessionError::ConnectionLost { phase });
            },
            Some(LinkEvent::Failed { detail }) => {
                return Err(SessionError::Transport { phase, detail });
            },
        };

        let actions = negotiation.handle_message(&text)?;
        run_actions(actions, &mut negotiation, link, local_lines, console).await?;
    }

    Ok(())
}

/// Execute negotiation actions, feeding reply lines back into the machine.
async fn run_actions<C: Console>(
    initial_actions: Vec<LoginAction>,
    negotiation: &mut Negotiation,
    link: &mut ServerLink,
    local_lines: &mut mpsc::Receiver<String>,
    console: &mut C,
) -> Result<(), SessionError> {
    let mut pending = initial_actions;

    while !pending.is_empty() {
        let actions = std::mem::take(&mut pending);

        for action in actions {
            match action {
                LoginAction::Display(text) => console.line(&text),
                LoginAction::RequestReply => {
                    let line = local_lines.recv().await.ok_or(SessionError::InputClosed)?;
                    pending.extend(negotiation.handle_reply(&line)?);
                },
                LoginAction::Send(text) => {
                    if link.to_server.send(text).await.is_err() {
                        return Err(SessionError::ConnectionLost {
                            phase: negotiation.state().phase(),
                        });
                    }
                },
            }
        }
    }

    Ok(())
}
