//! Wireline chat client entry point.
//!
//! # Usage
//!
//! ```bash
//! # Connect to the local default server
//! wireline
//!
//! # Connect to a remote server; http(s) schemes are rewritten
//! wireline https://example.com
//! ```

mod console;
mod target;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use wireline_client::{
    Console, Session,
    transport::{self, TransportError},
};

/// Wireline chat client
#[derive(Parser, Debug)]
#[command(name = "wireline")]
#[command(about = "Text chat client for Wireline servers")]
#[command(version)]
struct Args {
    /// Server to connect to (bare host, http(s) or ws(s) URL)
    ///
    /// If not provided, connects to the local default server.
    target: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let target = target::normalize(args.target.as_deref());
    let mut console = console::StdoutConsole::new();
    console.line(&format!("Connecting to {target} ..."));

    // One attempt; no retry on any failure.
    let link = match transport::connect(&target).await {
        Ok(link) => link,
        Err(TransportError::Refused(detail)) => {
            console.error("Server is unreachable (not started?)");
            tracing::debug!("connect refused: {detail}");
            return ExitCode::FAILURE;
        },
        Err(e) => {
            console.error(&format!("Unexpected connection error: {e}"));
            return ExitCode::FAILURE;
        },
    };

    let local_lines = console::spawn_stdin_pump();
    let session = Session::new(link, local_lines, console, target);

    match session.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let mut console = console::StdoutConsole::new();
            console.error(&format!("Session failed: {e}"));
            ExitCode::FAILURE
        },
    }
}
