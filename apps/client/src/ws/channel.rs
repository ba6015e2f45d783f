//! Channel to the game engine: an outbound frame queue plus inbound frames.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ClientError;
use crate::protocol::ClientEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    Text(String),
    Closed,
}

/// Cloneable write handle for one open channel.
#[derive(Debug, Clone)]
pub struct Outbox {
    conn_id: Uuid,
    tx: mpsc::UnboundedSender<String>,
}

impl Outbox {
    pub fn new(conn_id: Uuid, tx: mpsc::UnboundedSender<String>) -> Self {
        Self { conn_id, tx }
    }

    /// Outbox paired with the receiver its frames land in.
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(Uuid::new_v4(), tx), rx)
    }

    pub fn conn_id(&self) -> Uuid {
        self.conn_id
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    pub fn send(&self, event: &ClientEvent) -> Result<(), ClientError> {
        let frame = event.encode()?;
        self.tx
            .send(frame)
            .map_err(|_| ClientError::ChannelClosed)?;
        debug!(conn_id = %self.conn_id, event = event.name(), "[WS CLIENT] sent");
        Ok(())
    }
}

pub struct Connection {
    pub outbox: Outbox,
    pub inbound: mpsc::UnboundedReceiver<InboundFrame>,
}

#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, url: &str) -> Result<Connection, ClientError>;
}

/// WebSocket connector; each connection gets a reader and a writer task.
#[derive(Debug, Clone)]
pub struct WsConnector {
    connect_timeout: Duration,
}

impl WsConnector {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Default for WsConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self, url: &str) -> Result<Connection, ClientError> {
        let (stream, _) = tokio::time::timeout(self.connect_timeout, connect_async(url))
            .await
            .map_err(|_| ClientError::connect(format!("timed out connecting to {url}")))??;

        let conn_id = Uuid::new_v4();
        let (mut sink, mut source) = stream.split();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();
        let (in_tx, in_rx) = mpsc::unbounded_channel::<InboundFrame>();

        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        // The writer owns the outbound receiver; dropping it when the reader
        // stops is what marks every Outbox for this connection closed.
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    frame = out_rx.recv() => {
                        let Some(frame) = frame else { break };
                        if let Err(err) = sink.send(Message::Text(frame.into())).await {
                            warn!(conn_id = %conn_id, error = %err, "[WS CLIENT] write failed");
                            break;
                        }
                    }
                    _ = &mut stop_rx => break,
                }
            }
            drop(out_rx);
            let _ = sink.close().await;
            debug!(conn_id = %conn_id, "[WS CLIENT] writer stopped");
        });

        tokio::spawn(async move {
            while let Some(msg) = source.next().await {
                match msg {
                    Ok(Message::Text(text)) => {
                        if in_tx.send(InboundFrame::Text(text.as_str().to_owned())).is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) => break,
                    Ok(Message::Binary(_)) => {
                        warn!(conn_id = %conn_id, "[WS CLIENT] binary frame ignored");
                    }
                    Ok(_) => {}
                    Err(err) => {
                        warn!(conn_id = %conn_id, error = %err, "[WS CLIENT] protocol error");
                        break;
                    }
                }
            }
            let _ = in_tx.send(InboundFrame::Closed);
            let _ = stop_tx.send(());
            info!(conn_id = %conn_id, "[WS CLIENT] reader stopped");
        });

        Ok(Connection {
            outbox: Outbox::new(conn_id, out_tx),
            inbound: in_rx,
        })
    }
}
