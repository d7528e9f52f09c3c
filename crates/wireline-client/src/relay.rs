//! Chat-phase relay loops.
//!
//! Two directions share one link: the inbound loop displays server lines,
//! the outbound loop stamps and transmits local lines. The loops are
//! independent - an idle keyboard never delays inbound display - and the
//! first one to stop ends the relay; the survivor is aborted rather than
//! drained.

use chrono::Local;
use tokio::sync::mpsc;
use wireline_core::message;

use crate::{
    console::Console,
    transport::{LinkEvent, ServerLink},
};

/// Run the chat phase until either direction stops.
///
/// The inbound side owns closure and failure reporting; the outbound side
/// stops silently when the link is gone so closure is never announced
/// twice.
pub async fn run<C: Console>(
    link: &mut ServerLink,
    local_lines: mpsc::Receiver<String>,
    console: &mut C,
    peer: &str,
) {
    let mut outbound = tokio::spawn(outbound_relay(link.to_server.clone(), local_lines));

    loop {
        tokio::select! {
            incoming = link.from_server.recv() => match incoming {
                Some(LinkEvent::Line(text)) => {
                    console.line(&message::inbound_line(peer, Local::now(), &text));
                },
                Some(LinkEvent::Closed { reason }) => {
                    match reason {
                        Some(reason) => {
                            console.line(&format!("Connection closed by server: {reason}"));
                        },
                        None => console.line("Connection closed by server."),
                    }
                    break;
                },
                Some(LinkEvent::Failed { detail }) => {
                    console.error(&format!("Receive failed: {detail}"));
                    break;
                },
                None => break,
            },
            // Local input ended or the link is gone; either way the relay
            // is over.
            _ = &mut outbound => break,
        }
    }

    outbound.abort();
}

/// Stamp and transmit local lines until the link or the input ends.
async fn outbound_relay(to_server: mpsc::Sender<String>, mut local_lines: mpsc::Receiver<String>) {
    while let Some(line) = local_lines.recv().await {
        let framed = message::outbound_line(Local::now(), &line);
        if to_server.send(framed).await.is_err() {
            break;
        }
    }
}
