//! Connection - Handles an individual client connection.
//!
//! Each Connection runs in its own Tokio task, reading newline-framed
//! commands and writing reply lines. A session starts unidentified;
//! `HELLO <name>` binds it to a requester identity, after which the
//! registrar commands are available.

use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{debug, info, warn};

use crate::error::HandlerError;
use crate::platform::Requester;
use crate::services::Registrar;

/// Cap on inbound line length; anything longer is a protocol error.
const MAX_LINE_LEN: usize = 1024;

/// A single client session.
pub struct Connection {
    framed: Framed<TcpStream, LinesCodec>,
    peer: SocketAddr,
    registrar: Arc<Registrar>,
    requester: Option<Requester>,
}

impl Connection {
    /// Wrap an accepted stream.
    pub fn new(stream: TcpStream, peer: SocketAddr, registrar: Arc<Registrar>) -> Self {
        Self {
            framed: Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LEN)),
            peer,
            registrar,
            requester: None,
        }
    }

    /// Drive the session until the client disconnects.
    pub async fn run(mut self) {
        while let Some(line) = self.framed.next().await {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!(peer = %self.peer, error = %e, "Read failed, closing");
                    return;
                }
            };

            match self.handle_line(&line).await {
                Ok(true) => {}
                Ok(false) => {
                    debug!(peer = %self.peer, "Client quit");
                    return;
                }
                Err(e) => {
                    debug!(peer = %self.peer, code = e.error_code(), "Protocol error");
                    if let Some(reply) = e.reply_line() {
                        if self.send(&reply).await.is_err() {
                            return;
                        }
                    }
                }
            }
        }

        debug!(peer = %self.peer, "Connection closed");
    }

    /// Handle one inbound line. Returns `Ok(false)` when the session
    /// should end.
    async fn handle_line(&mut self, line: &str) -> Result<bool, HandlerError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(HandlerError::EmptyCommand);
        }

        let (command, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (trimmed, ""),
        };

        match command.to_uppercase().as_str() {
            "HELLO" => {
                if arg.is_empty() {
                    return Err(HandlerError::NeedMoreParams);
                }
                let requester = Requester::from_name(arg);
                info!(peer = %self.peer, user = %requester.name, "Session identified");
                self.send(&format!(
                    "Hi {}! Use HELP to see what I can do.",
                    requester.name
                ))
                .await
                .map_err(|_| HandlerError::Closed)?;
                self.requester = Some(requester);
                Ok(true)
            }
            "QUIT" => Ok(false),
            _ => {
                let requester = self
                    .requester
                    .as_ref()
                    .ok_or(HandlerError::NotIdentified)?
                    .clone();

                let replies = self.registrar.handle(&requester, trimmed).await;
                for reply in replies {
                    self.send(&reply)
                        .await
                        .map_err(|_| HandlerError::Closed)?;
                }
                Ok(true)
            }
        }
    }

    async fn send(&mut self, line: &str) -> Result<(), tokio_util::codec::LinesCodecError> {
        self.framed.send(line).await
    }
}
