//! Push Channel Adapter
//!
//! Wraps the bidirectional websocket push channel. After connecting, the
//! adapter subscribes to the topic named after the session token and hands
//! every matching envelope to the consumer in receipt order. There is no
//! retry or replay buffer: envelopes emitted while disconnected are lost,
//! and reconnection policy belongs to the caller.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message;
use url::Url;

use crate::shared::error::ChatError;
use crate::shared::messaging::{Envelope, PushFrame};

/// Connection factory for the push channel
pub struct PushTransport {
    socket_url: String,
}

impl PushTransport {
    pub fn new(socket_url: impl Into<String>) -> Self {
        Self {
            socket_url: socket_url.into(),
        }
    }

    /// Connect and subscribe to the token-named topic.
    ///
    /// Spawns a read task that forwards envelopes until the server closes
    /// the connection or the returned channel is dropped.
    pub async fn connect(&self, token: &str) -> Result<PushChannel, ChatError> {
        let url = Url::parse(&self.socket_url)
            .map_err(|e| ChatError::validation("socket_url", e.to_string()))?;
        let (stream, _) = connect_async(url.as_str())
            .await
            .map_err(|e| ChatError::network(format!("websocket connect failed: {}", e)))?;
        tracing::info!(url = %self.socket_url, "push channel connected");

        let (mut write, mut read) = stream.split();
        let subscribe = serde_json::json!({ "subscribe": token });
        write
            .send(Message::Text(subscribe.to_string()))
            .await
            .map_err(|e| ChatError::network(format!("websocket subscribe failed: {}", e)))?;

        let (sender, receiver) = mpsc::unbounded_channel();
        let topic = token.to_string();
        let task = tokio::spawn(async move {
            while let Some(frame) = read.next().await {
                match frame {
                    Ok(Message::Text(text)) => match serde_json::from_str::<PushFrame>(&text) {
                        Ok(frame) if frame.event == topic => {
                            tracing::debug!(from = %frame.from, "push envelope received");
                            if sender.send(frame.into_envelope()).is_err() {
                                // Consumer dropped the channel.
                                return;
                            }
                        }
                        Ok(frame) => {
                            tracing::debug!(event = %frame.event, "ignoring frame for foreign topic");
                        }
                        Err(e) => {
                            tracing::warn!("unparseable push frame: {}", e);
                        }
                    },
                    Ok(Message::Ping(payload)) => {
                        let _ = write.send(Message::Pong(payload)).await;
                    }
                    Ok(Message::Close(_)) => {
                        tracing::info!("push channel closed by server");
                        return;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!("push channel read error: {}", e);
                        return;
                    }
                }
            }
        });

        Ok(PushChannel {
            receiver,
            task: Some(task),
        })
    }
}

/// Receiving end of an established push channel
#[derive(Debug)]
pub struct PushChannel {
    receiver: mpsc::UnboundedReceiver<Envelope>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl PushChannel {
    /// Next envelope in receipt order; `None` once the channel is closed
    pub async fn recv(&mut self) -> Option<Envelope> {
        self.receiver.recv().await
    }

    /// Non-blocking variant of [`recv`](Self::recv)
    pub fn try_recv(&mut self) -> Option<Envelope> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for PushChannel {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
