//! HTTP + WebSocket server for the browser client.

use crate::input::{map_browser_key, HostAction};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, mpsc, Mutex};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// Channel for sending display strings to all connected clients
pub type FrameSender = broadcast::Sender<String>;

pub type ActionReceiver = mpsc::Receiver<HostAction>;
pub type ActionSender = mpsc::Sender<HostAction>;

/// Messages the browser page sends.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ClientMessage {
    Key { key: String },
    Focus,
    Blur,
}

/// Shared server state.
pub struct WebServer {
    /// Broadcast channel for frames
    pub frames_tx: FrameSender,
    /// Actions from any client, drained by the game loop
    actions_rx: Mutex<ActionReceiver>,
    actions_tx: ActionSender,
    port: u16,
}

impl WebServer {
    fn new(port: u16) -> Self {
        let (frames_tx, _) = broadcast::channel(64);
        let (actions_tx, actions_rx) = mpsc::channel(64);

        Self {
            frames_tx,
            actions_rx: Mutex::new(actions_rx),
            actions_tx,
            port,
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Take every action received since the last call, without blocking.
    pub fn drain_actions(&self) -> Vec<HostAction> {
        let mut actions = Vec::new();
        if let Ok(mut rx) = self.actions_rx.try_lock() {
            while let Ok(action) = rx.try_recv() {
                actions.push(action);
            }
        }
        actions
    }
}

/// Bind `port` and serve on a background thread with its own tokio runtime.
///
/// Binding happens before returning so a busy port is reported to the caller.
pub fn spawn_web_server(port: u16) -> std::io::Result<Arc<WebServer>> {
    let listener = std::net::TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port)))?;
    listener.set_nonblocking(true)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let server = Arc::new(WebServer::new(port));
    let shared = Arc::clone(&server);
    std::thread::Builder::new()
        .name("urlsnake-web".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                match TcpListener::from_std(listener) {
                    Ok(listener) => accept_loop(listener, shared).await,
                    Err(err) => warn!(%err, "could not hand listener to tokio"),
                }
            });
        })?;

    info!(port, "web client available at http://localhost:{}", port);
    Ok(server)
}

async fn accept_loop(listener: TcpListener, server: Arc<WebServer>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let server = Arc::clone(&server);
                tokio::spawn(async move {
                    if let Err(err) = handle_connection(stream, addr, server).await {
                        debug!(%addr, %err, "connection ended with error");
                    }
                });
            }
            Err(err) => {
                warn!(%err, "accept error");
            }
        }
    }
}

/// Serve the page for plain GETs, otherwise upgrade to a WebSocket.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    server: Arc<WebServer>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut peek_buf = [0u8; 512];
    let n = stream.peek(&mut peek_buf).await?;
    let request = String::from_utf8_lossy(&peek_buf[..n]);
    if request.starts_with("GET ") && !request.to_ascii_lowercase().contains("upgrade: websocket")
    {
        serve_html(stream).await?;
        return Ok(());
    }

    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    info!(%addr, "browser connected");

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let mut frames_rx = server.frames_tx.subscribe();
    let actions_tx = server.actions_tx.clone();

    let send_task = tokio::spawn(async move {
        loop {
            match frames_rx.recv().await {
                Ok(text) => {
                    if ws_sender.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
                // A slow browser only needs the newest frame.
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
            }
        }
    });

    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                if let Some(action) = parse_client_message(&text) {
                    let _ = actions_tx.send(action).await;
                }
            }
            Ok(Message::Close(_)) | Err(_) => break,
            _ => {}
        }
    }

    send_task.abort();
    info!(%addr, "browser disconnected");
    Ok(())
}

async fn serve_html(mut stream: TcpStream) -> std::io::Result<()> {
    use tokio::io::AsyncWriteExt;

    let html = include_str!("../../web/index.html");
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        html.len(),
        html
    );

    stream.write_all(response.as_bytes()).await?;
    Ok(())
}

/// Translate a JSON message from the page into a host action.
///
/// `{"type":"key","key":"ArrowUp"}`, `{"type":"focus"}` or `{"type":"blur"}`.
pub fn parse_client_message(json: &str) -> Option<HostAction> {
    match serde_json::from_str::<ClientMessage>(json).ok()? {
        ClientMessage::Key { key } => map_browser_key(&key),
        ClientMessage::Focus => Some(HostAction::Resume),
        ClientMessage::Blur => Some(HostAction::Pause),
    }
}
