//! Client for the hosts daemon.
//!
//! The daemon owns the system's host name database. It listens on a ZeroMQ
//! REP socket and takes one JSON request per message:
//!
//! - `{"type": "hosts", "op": "add", "data": {...}}` stages host entries
//! - `{"op": "apply"}` commits everything staged so far
//!
//! Every reply is a JSON object holding either `data` or `error`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use zeromq::{ReqSocket, Socket, SocketRecv, SocketSend, ZmqMessage};

use crate::hosts::{HostEntries, HostsStore};

/// Errors reported by or while talking to the hosts daemon.
#[derive(Debug, thiserror::Error)]
pub enum HostsdError {
    /// The daemon rejected the request; the message is the daemon's.
    #[error("{0}")]
    Daemon(String),

    #[error("hosts daemon transport error: {0}")]
    Transport(#[from] zeromq::ZmqError),

    #[error("hosts daemon JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("hosts daemon did not reply within {0:?}")]
    Timeout(Duration),

    #[error("hosts daemon sent an empty reply")]
    EmptyReply,
}

#[derive(Debug, Serialize)]
struct Request<'a> {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'a str>,
    op: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a HostEntries>,
}

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

/// [`HostsStore`] backed by the hosts daemon.
///
/// The connection is opened on the first request, so constructing a client
/// touches nothing.
pub struct HostsdClient {
    endpoint: String,
    timeout: Duration,
    socket: Option<ReqSocket>,
}

impl HostsdClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
            socket: None,
        }
    }

    async fn communicate(&mut self, request: &Request<'_>) -> Result<Option<Value>, HostsdError> {
        let payload = serde_json::to_string(request)?;
        let timeout = self.timeout;

        let socket = match self.socket.take() {
            Some(socket) => socket,
            None => {
                let mut socket = ReqSocket::new();
                socket.connect(&self.endpoint).await?;
                debug!("Connected to hosts daemon at {}", self.endpoint);
                socket
            }
        };
        let socket = self.socket.insert(socket);

        socket.send(ZmqMessage::from(payload)).await?;
        let message = tokio::time::timeout(timeout, socket.recv())
            .await
            .map_err(|_| HostsdError::Timeout(timeout))??;

        let frame = message.get(0).ok_or(HostsdError::EmptyReply)?;
        let reply: Reply = serde_json::from_slice(frame)?;

        match reply.error {
            Some(Value::String(message)) => Err(HostsdError::Daemon(message)),
            Some(other) => Err(HostsdError::Daemon(other.to_string())),
            None => Ok(reply.data),
        }
    }
}

#[async_trait]
impl HostsStore for HostsdClient {
    type Error = HostsdError;

    async fn add_hosts(&mut self, entries: HostEntries) -> Result<(), HostsdError> {
        let request = Request {
            kind: Some("hosts"),
            op: "add",
            data: Some(&entries),
        };
        self.communicate(&request).await?;
        Ok(())
    }

    async fn apply(&mut self) -> Result<(), HostsdError> {
        let request = Request {
            kind: None,
            op: "apply",
            data: None,
        };
        self.communicate(&request).await?;
        Ok(())
    }
}
