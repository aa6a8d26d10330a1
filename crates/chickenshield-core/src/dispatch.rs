//! Message dispatch from the page side to the background service.

use tokio::sync::{mpsc, oneshot};
use tracing::trace;

use chickenshield_protocols::{ExtensionMessage, MessageResponse};

use crate::error::CoreError;

/// A message plus the channel its reply goes to, if anyone is waiting.
#[derive(Debug)]
pub struct Envelope {
    pub message: ExtensionMessage,
    pub reply: Option<oneshot::Sender<MessageResponse>>,
}

/// Cloneable handle for sending messages to the background service.
#[derive(Debug, Clone)]
pub struct MessageSender {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl MessageSender {
    /// Create a sender and the receiving end the background service drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Envelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Send without waiting for a reply.
    pub fn send(&self, message: ExtensionMessage) -> Result<(), CoreError> {
        trace!("Dispatching {}", message.action());
        self.tx
            .send(Envelope { message, reply: None })
            .map_err(|_| CoreError::ChannelClosed)
    }

    /// Send and wait for the reply.
    pub async fn request(&self, message: ExtensionMessage) -> Result<MessageResponse, CoreError> {
        let action = message.action();
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope {
                message,
                reply: Some(reply_tx),
            })
            .map_err(|_| CoreError::ChannelClosed)?;
        reply_rx.await.map_err(|_| CoreError::NoReply(action))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_does_not_wait() {
        let (sender, mut rx) = MessageSender::channel();
        sender.send(ExtensionMessage::GetLastResult).unwrap();
        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.message, ExtensionMessage::GetLastResult);
        assert!(envelope.reply.is_none());
    }

    #[tokio::test]
    async fn test_request_gets_reply() {
        let (sender, mut rx) = MessageSender::channel();
        tokio::spawn(async move {
            let envelope = rx.recv().await.unwrap();
            let _ = envelope.reply.unwrap().send(MessageResponse::LastResult(None));
        });
        let response = sender.request(ExtensionMessage::GetLastResult).await.unwrap();
        assert_eq!(response, MessageResponse::LastResult(None));
    }

    #[tokio::test]
    async fn test_send_after_receiver_dropped() {
        let (sender, rx) = MessageSender::channel();
        drop(rx);
        assert!(sender.is_closed());
        assert!(matches!(
            sender.send(ExtensionMessage::GetLastResult),
            Err(CoreError::ChannelClosed)
        ));
    }

    #[tokio::test]
    async fn test_request_dropped_without_reply() {
        let (sender, mut rx) = MessageSender::channel();
        tokio::spawn(async move {
            let envelope = rx.recv().await.unwrap();
            drop(envelope);
        });
        let result = sender.request(ExtensionMessage::GetLastResult).await;
        assert!(matches!(result, Err(CoreError::NoReply("GET_LAST_RESULT"))));
    }
}
