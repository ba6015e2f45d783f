// Loopback game server for driving the client over a real socket

use std::time::Duration;

use client::ClientEvent;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async, WebSocketStream};

type TestResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Accepts websocket connections and hands each one to the test.
pub struct MockServer {
    url: String,
    accepted: mpsc::UnboundedReceiver<ServerConn>,
    accept_task: JoinHandle<()>,
}

impl MockServer {
    pub async fn start() -> TestResult<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("ws://{}/ws", listener.local_addr()?);
        let (tx, accepted) = mpsc::unbounded_channel();

        let accept_task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let Ok(ws) = accept_async(stream).await else {
                    continue;
                };
                if tx.send(ServerConn { ws }).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            url,
            accepted,
            accept_task,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn next_connection(&mut self, timeout: Duration) -> TestResult<ServerConn> {
        tokio::time::timeout(timeout, self.accepted.recv())
            .await
            .map_err(|_| "timeout waiting for a connection")?
            .ok_or_else(|| "accept loop stopped".into())
    }

    /// True when no further connection has been accepted.
    pub fn no_pending_connections(&mut self) -> bool {
        self.accepted.try_recv().is_err()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

/// Server end of one client connection.
pub struct ServerConn {
    ws: WebSocketStream<TcpStream>,
}

impl ServerConn {
    pub async fn send(&mut self, text: &str) -> TestResult<()> {
        self.ws.send(Message::Text(text.into())).await?;
        Ok(())
    }

    /// Next text frame, skipping control frames. `None` once the client
    /// has closed.
    pub async fn recv_text(&mut self, timeout: Duration) -> TestResult<Option<String>> {
        loop {
            let next = tokio::time::timeout(timeout, self.ws.next())
                .await
                .map_err(|_| "timeout waiting for client frame")?;
            match next {
                Some(Ok(Message::Text(text))) => return Ok(Some(text.as_str().to_owned())),
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    pub async fn recv_event(&mut self, timeout: Duration) -> TestResult<ClientEvent> {
        let text = self
            .recv_text(timeout)
            .await?
            .ok_or("client closed before sending")?;
        Ok(ClientEvent::decode(&text)?)
    }

    pub async fn close(mut self) -> TestResult<()> {
        self.ws.close(None).await?;
        Ok(())
    }
}
