//! Mock WebSocket stream server for integration tests.
//!
//! Accepts connections, acknowledges the subscribe request, then plays a
//! per-connection script: push notifications, optionally close. Records
//! every received message.

use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::{accept_async, tungstenite::Message};

/// What one accepted connection does after acknowledging the subscription.
#[derive(Debug, Clone, Default)]
pub struct ConnectionScript {
    /// Messages pushed once the subscription is acknowledged.
    pub notifications: Vec<String>,
    /// Close the connection after pushing the scripted messages.
    pub close_after_send: bool,
}

/// A scripted mock stream server.
pub struct MockStreamServer {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    messages: Arc<Mutex<Vec<String>>>,
    connections: Arc<Mutex<u32>>,
}

impl MockStreamServer {
    /// Start a server on an available port.
    ///
    /// Connection `n` runs `scripts[n]`; connections past the end reuse the
    /// last script.
    pub async fn start(scripts: Vec<ConnectionScript>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let connections: Arc<Mutex<u32>> = Arc::new(Mutex::new(0));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let messages_clone = messages.clone();
        let connections_clone = connections.clone();

        tokio::spawn(async move {
            let mut accepted = 0usize;
            loop {
                tokio::select! {
                    Ok((stream, _)) = listener.accept() => {
                        let script = scripts
                            .get(accepted)
                            .or_else(|| scripts.last())
                            .cloned()
                            .unwrap_or_default();
                        accepted += 1;
                        let messages = messages_clone.clone();
                        let connections = connections_clone.clone();
                        tokio::spawn(handle_connection(stream, script, messages, connections));
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            shutdown_tx,
            messages,
            connections,
        }
    }

    /// Get the server's WebSocket URL.
    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Get the number of connections received.
    pub async fn connection_count(&self) -> u32 {
        *self.connections.lock().await
    }

    /// Get all received messages.
    pub async fn received_messages(&self) -> Vec<String> {
        self.messages.lock().await.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

async fn handle_connection(
    stream: TcpStream,
    script: ConnectionScript,
    messages: Arc<Mutex<Vec<String>>>,
    connections: Arc<Mutex<u32>>,
) {
    {
        let mut count = connections.lock().await;
        *count += 1;
    }

    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            eprintln!("WebSocket handshake failed: {e}");
            return;
        }
    };

    let (mut write, mut read) = ws_stream.split();

    // First text frame is the subscribe request; acknowledge it.
    loop {
        match read.next().await {
            Some(Ok(Message::Text(text))) => {
                messages.lock().await.push(text);
                let ack = serde_json::json!({
                    "jsonrpc": "2.0",
                    "result": 4242,
                    "id": 1
                });
                let _ = write.send(Message::Text(ack.to_string())).await;
                break;
            }
            Some(Ok(Message::Ping(data))) => {
                let _ = write.send(Message::Pong(data)).await;
            }
            Some(Ok(_)) => {}
            _ => return,
        }
    }

    for notification in &script.notifications {
        if write
            .send(Message::Text(notification.clone()))
            .await
            .is_err()
        {
            return;
        }
    }

    if script.close_after_send {
        let _ = write.send(Message::Close(None)).await;
        return;
    }

    // Hold the connection open: record messages, answer pings.
    while let Some(msg) = read.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                messages.lock().await.push(text);
            }
            Ok(Message::Ping(data)) => {
                let _ = write.send(Message::Pong(data)).await;
            }
            Ok(Message::Close(_)) => break,
            Err(_) => break,
            _ => {}
        }
    }
}
