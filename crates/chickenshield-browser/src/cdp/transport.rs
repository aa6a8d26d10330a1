//! Command channel shared by the browser client and its page sessions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::SplitSink;
use futures::SinkExt;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::trace;

use super::error::CdpError;
use super::protocol::CdpRequest;

pub(crate) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;

/// Where the receive loop delivers the answer to command `id`.
pub(crate) type Reply = oneshot::Sender<Result<Value, CdpError>>;
pub(crate) type PendingMap = Arc<Mutex<HashMap<u64, Reply>>>;

const CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Writes commands to the browser socket and waits for their replies.
///
/// Sessions attach in flat mode, so one socket carries every session's
/// commands, told apart by `sessionId`.
#[derive(Clone)]
pub(crate) struct Transport {
    sink: Arc<tokio::sync::Mutex<WsSink>>,
    pending: PendingMap,
    next_id: Arc<AtomicU64>,
}

impl Transport {
    pub(crate) fn new(sink: WsSink, pending: PendingMap) -> Self {
        Self {
            sink: Arc::new(tokio::sync::Mutex::new(sink)),
            pending,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Send `method` at browser level (`session_id` of `None`) or to one
    /// session, and wait for the result.
    pub(crate) async fn send(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(str::to_string),
        };
        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        if let Err(e) = self.sink.lock().await.send(Message::Text(json.into())).await {
            self.pending.lock().remove(&id);
            return Err(e.into());
        }

        match tokio::time::timeout(CALL_TIMEOUT, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("{} got no reply within {:?}", method, CALL_TIMEOUT)))
            }
        }
    }
}
