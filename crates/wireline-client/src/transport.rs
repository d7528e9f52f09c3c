//! WebSocket transport for the client.
//!
//! Provides [`ServerLink`], a handle over one established connection. This
//! is a thin layer that pumps text lines between channels and the socket -
//! handshake and relay logic stay outside it.

use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, Message},
};

/// Connection establishment errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The target actively refused the connection.
    #[error("connection refused: {0}")]
    Refused(String),

    /// Any other establishment failure.
    #[error("connection failed: {0}")]
    Connection(String),
}

/// One inbound observation from the connection pump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// A text message from the server.
    Line(String),

    /// The connection closed cleanly.
    Closed {
        /// Close reason supplied by the server, if any.
        reason: Option<String>,
    },

    /// The connection failed mid-stream.
    Failed {
        /// Failure description.
        detail: String,
    },
}

/// Handle to one established server connection.
///
/// Text lines are sent and received via the channels; an internal task
/// handles the WebSocket I/O. A link belongs to exactly one session and is
/// never reused after closure.
pub struct ServerLink {
    /// Send text lines to the server.
    pub to_server: mpsc::Sender<String>,
    /// Receive inbound observations from the server.
    pub from_server: mpsc::Receiver<LinkEvent>,
    /// Abort handle for the pump task. `None` for channel-only links.
    abort_handle: Option<tokio::task::AbortHandle>,
}

impl ServerLink {
    /// Build a link over raw channels, with no I/O task behind it.
    ///
    /// Used by tests to script a server without a socket; the production
    /// pump speaks the same channel contract.
    pub fn from_channels(
        to_server: mpsc::Sender<String>,
        from_server: mpsc::Receiver<LinkEvent>,
    ) -> Self {
        Self { to_server, from_server, abort_handle: None }
    }

    /// Stop the connection pump.
    pub fn stop(&self) {
        if let Some(handle) = &self.abort_handle {
            handle.abort();
        }
    }
}

/// Connect to a chat server over WebSocket.
///
/// Makes exactly one attempt; a refused target is reported distinctly from
/// other establishment failures. No retry happens anywhere in the client.
pub async fn connect(url: &str) -> Result<ServerLink, TransportError> {
    let (stream, _) = connect_async(url).await.map_err(establishment_error)?;
    tracing::debug!("connected to {url}");

    let (to_server_tx, to_server_rx) = mpsc::channel::<String>(32);
    let (from_server_tx, from_server_rx) = mpsc::channel::<LinkEvent>(32);

    let handle = tokio::spawn(run_link(stream, to_server_rx, from_server_tx));

    Ok(ServerLink {
        to_server: to_server_tx,
        from_server: from_server_rx,
        abort_handle: Some(handle.abort_handle()),
    })
}

fn establishment_error(err: tungstenite::Error) -> TransportError {
    match &err {
        tungstenite::Error::Io(io) if io.kind() == std::io::ErrorKind::ConnectionRefused => {
            TransportError::Refused(io.to_string())
        },
        _ => TransportError::Connection(err.to_string()),
    }
}

/// Run the connection, bridging between channels and the socket.
///
/// Exits on close, failure, or when the session drops its channel ends; a
/// Close frame is sent on outbound teardown.
async fn run_link(
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    mut to_server: mpsc::Receiver<String>,
    from_server: mpsc::Sender<LinkEvent>,
) {
    let (mut writer, mut reader) = stream.split();

    loop {
        tokio::select! {
            incoming = reader.next() => match incoming {
                Some(Ok(Message::Text(raw))) => {
                    if from_server.send(LinkEvent::Line(raw.as_str().to_owned())).await.is_err() {
                        break;
                    }
                },
                Some(Ok(Message::Ping(payload))) => {
                    if let Err(e) = writer.send(Message::Pong(payload)).await {
                        tracing::debug!("pong failed: {e}");
                    }
                },
                Some(Ok(Message::Close(frame))) => {
                    let reason = frame
                        .map(|f| f.reason.as_str().to_owned())
                        .filter(|r| !r.is_empty());
                    let _ = from_server.send(LinkEvent::Closed { reason }).await;
                    break;
                },
                Some(Ok(_)) => {},
                Some(Err(e)) => {
                    let _ = from_server.send(LinkEvent::Failed { detail: e.to_string() }).await;
                    break;
                },
                None => {
                    let _ = from_server.send(LinkEvent::Closed { reason: None }).await;
                    break;
                },
            },
            outgoing = to_server.recv() => match outgoing {
                Some(text) => {
                    if let Err(e) = writer.send(Message::Text(text.into())).await {
                        let _ = from_server.send(LinkEvent::Failed { detail: e.to_string() }).await;
                        break;
                    }
                },
                None => {
                    let _ = writer.send(Message::Close(None)).await;
                    break;
                },
            },
        }
    }
}
