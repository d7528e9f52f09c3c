//! Terminal-backed console and local input pump.
//!
//! The stdin reader lives on its own task feeding a channel, so a user who
//! has not typed anything never delays inbound message display.

use std::io::{self, Write};

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use wireline_client::Console;

/// Console writing to the process stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutConsole;

impl StdoutConsole {
    /// Create a stdout console.
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdoutConsole {
    fn line(&mut self, text: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }

    fn error(&mut self, text: &str) {
        let mut out = io::stderr().lock();
        let _ = writeln!(out, "{text}");
        let _ = out.flush();
    }
}

/// Spawn the stdin pump and return the line channel.
///
/// The pump ends, closing the channel, on stdin EOF or a read failure.
pub fn spawn_stdin_pump() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(8);

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).await.is_err() {
                        break;
                    }
                },
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("stdin read failed: {e}");
                    break;
                },
            }
        }
    });

    rx
}
