//! Native feed client over `tokio-tungstenite`.
//!
//! A background tokio task owns the socket, the active channel set, and
//! the listener registry. The public API communicates with it via an mpsc
//! command channel; commands issued before `connect()` are buffered and
//! flushed once the task starts. Because attach/detach travel the same
//! channel as everything else, listener mutations always land between
//! dispatch steps, never inside one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::FeedError;
use crate::ws::dispatch::{Dispatcher, Listener, ListenerId};
use crate::ws::{FeedConfig, Frame, MessageOut};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ─── Commands from public API to background task ─────────────────────────────

enum Command {
    /// Replace the active channel set and subscribe to the new set.
    Subscribe(Vec<String>),
    /// Clear the active channel set.
    Unsubscribe,
    Attach(ListenerId, Listener),
    Detach(ListenerId),
    Disconnect,
}

/// What a command asks the connected loop to put on the wire.
enum Effect {
    None,
    Send(MessageOut),
    Disconnect,
}

// ─── Background task state ───────────────────────────────────────────────────

struct TaskState {
    config: FeedConfig,
    cmd_rx: mpsc::Receiver<Command>,
    dispatcher: Dispatcher,
    active_channels: Vec<String>,
    reconnect_attempts: u32,
}

impl TaskState {
    fn should_reconnect(&self) -> bool {
        self.config.reconnect && self.reconnect_attempts < self.config.max_reconnect_attempts
    }
}

/// Apply one command to the channel set and listener registry.
fn apply_command(
    dispatcher: &mut Dispatcher,
    active_channels: &mut Vec<String>,
    cmd: Command,
) -> Effect {
    match cmd {
        Command::Subscribe(channels) => {
            *active_channels = channels.clone();
            Effect::Send(MessageOut::Subscribe { channels })
        }
        Command::Unsubscribe => {
            let channels = std::mem::take(active_channels);
            if channels.is_empty() {
                Effect::None
            } else {
                Effect::Send(MessageOut::Unsubscribe { channels })
            }
        }
        Command::Attach(id, listener) => {
            dispatcher.attach(id, listener);
            Effect::None
        }
        Command::Detach(id) => {
            dispatcher.detach(id);
            Effect::None
        }
        Command::Disconnect => Effect::Disconnect,
    }
}

// ─── Public FeedClient ───────────────────────────────────────────────────────

/// Feed client managing one multiplexed push connection.
pub struct FeedClient {
    config: FeedConfig,
    cmd_tx: Option<mpsc::Sender<Command>>,
    task_handle: Option<JoinHandle<()>>,
    /// Commands issued before `connect()`, flushed when the task starts.
    pending: Vec<Command>,
    next_listener: AtomicU64,
}

impl FeedClient {
    /// Create a new feed client. Does not connect yet.
    pub fn new(config: FeedConfig) -> Self {
        Self {
            config,
            cmd_tx: None,
            task_handle: None,
            pending: Vec::new(),
            next_listener: AtomicU64::new(1),
        }
    }

    /// Spawn the background task that manages the connection.
    pub fn connect(&mut self) {
        if self.cmd_tx.is_some() {
            return;
        }

        let (cmd_tx, cmd_rx) = mpsc::channel(64);
        for cmd in self.pending.drain(..) {
            let _ = cmd_tx.try_send(cmd);
        }
        self.cmd_tx = Some(cmd_tx);

        let state = TaskState {
            config: self.config.clone(),
            cmd_rx,
            dispatcher: Dispatcher::new(),
            active_channels: Vec::new(),
            reconnect_attempts: 0,
        };
        self.task_handle = Some(tokio::spawn(run_task(state)));
    }

    /// Close the connection and wait briefly for the task to finish.
    pub async fn disconnect(&mut self) {
        if let Some(tx) = self.cmd_tx.take() {
            let _ = tx.send(Command::Disconnect).await;
        }
        if let Some(handle) = self.task_handle.take() {
            let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        }
    }

    /// Replace the active channel set. One subscribe call is issued for
    /// the new set; previous subscriptions are not carried over.
    pub fn subscribe<I, S>(&mut self, channels: I) -> Result<(), FeedError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let channels = channels.into_iter().map(Into::into).collect();
        self.send_cmd(Command::Subscribe(channels))
    }

    /// Clear the active channel set.
    pub fn unsubscribe(&mut self) -> Result<(), FeedError> {
        self.send_cmd(Command::Unsubscribe)
    }

    /// Attach a listener, independent of subscription state. Listeners
    /// are invoked in attachment order.
    pub fn attach(&mut self, listener: Listener) -> Result<ListenerId, FeedError> {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::SeqCst));
        self.send_cmd(Command::Attach(id, listener))?;
        Ok(id)
    }

    /// Detach a listener; a no-op if it was never attached.
    pub fn detach(&mut self, id: ListenerId) -> Result<(), FeedError> {
        self.send_cmd(Command::Detach(id))
    }

    fn send_cmd(&mut self, cmd: Command) -> Result<(), FeedError> {
        match &self.cmd_tx {
            Some(tx) => tx.try_send(cmd).map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => {
                    FeedError::SendFailed("command channel full".into())
                }
                mpsc::error::TrySendError::Closed(_) => FeedError::NotConnected,
            }),
            None => {
                self.pending.push(cmd);
                Ok(())
            }
        }
    }
}

impl Drop for FeedClient {
    fn drop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}

// ─── Background task ─────────────────────────────────────────────────────────

async fn run_task(mut state: TaskState) {
    loop {
        let (sink, stream) = match attempt_connect(&state.config.connect_url()).await {
            Ok(parts) => parts,
            Err(e) => {
                tracing::error!("feed connection failed: {}", e);
                if state.should_reconnect() {
                    if backoff_sleep(&mut state).await {
                        return; // disconnect requested during backoff
                    }
                    continue;
                }
                return;
            }
        };

        state.reconnect_attempts = 0;
        let mut sink = sink;

        // Re-issue the active channel set after a reconnect.
        if !state.active_channels.is_empty() {
            let msg = MessageOut::Subscribe {
                channels: state.active_channels.clone(),
            };
            if let Err(e) = send_msg(&mut sink, &msg).await {
                tracing::warn!("resubscribe failed: {}", e);
            }
        }

        if run_connected(&mut state, sink, stream).await {
            return;
        }

        if state.should_reconnect() {
            if backoff_sleep(&mut state).await {
                return;
            }
        } else {
            return;
        }
    }
}

/// The connected loop. Returns true when the task should exit for good.
async fn run_connected(
    state: &mut TaskState,
    mut sink: SplitSink<WsStream, Message>,
    mut stream: SplitStream<WsStream>,
) -> bool {
    loop {
        tokio::select! {
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        // Malformed frames are not an error: drop silently.
                        match serde_json::from_str::<Frame>(text.as_ref()) {
                            Ok(frame) => state.dispatcher.dispatch(&frame),
                            Err(e) => {
                                tracing::debug!("dropping undecodable frame: {}", e);
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(frame))) => {
                        tracing::info!(?frame, "feed closed by server");
                        return false;
                    }
                    Some(Ok(_)) => {} // Binary, Pong, Frame — ignore
                    Some(Err(e)) => {
                        tracing::error!("feed error: {}", e);
                        return false;
                    }
                    None => {
                        tracing::info!("feed stream ended");
                        return false;
                    }
                }
            }

            cmd = state.cmd_rx.recv() => {
                let Some(cmd) = cmd else {
                    // FeedClient dropped — clean exit.
                    return true;
                };
                match apply_command(&mut state.dispatcher, &mut state.active_channels, cmd) {
                    Effect::None => {}
                    Effect::Send(msg) => {
                        if let Err(e) = send_msg(&mut sink, &msg).await {
                            tracing::warn!("send failed: {}", e);
                        }
                    }
                    Effect::Disconnect => {
                        let _ = sink.send(Message::Close(Some(CloseFrame {
                            code: CloseCode::Normal,
                            reason: "client disconnect".into(),
                        }))).await;
                        return true;
                    }
                }
            }
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

async fn attempt_connect(
    url: &str,
) -> Result<(SplitSink<WsStream, Message>, SplitStream<WsStream>), String> {
    let (ws_stream, _) = tokio::time::timeout(Duration::from_secs(30), connect_async(url))
        .await
        .map_err(|_| "connection timeout".to_string())?
        .map_err(|e| e.to_string())?;
    Ok(ws_stream.split())
}

async fn send_msg(sink: &mut SplitSink<WsStream, Message>, msg: &MessageOut) -> Result<(), String> {
    let json = serde_json::to_string(msg).map_err(|e| e.to_string())?;
    sink.send(Message::Text(json.into()))
        .await
        .map_err(|e| e.to_string())
}

/// Fixed-delay sleep between reconnect attempts; processes a disconnect
/// request arriving during the wait. Returns true when the task should
/// exit.
async fn backoff_sleep(state: &mut TaskState) -> bool {
    state.reconnect_attempts += 1;
    tracing::info!(
        "reconnect attempt {}/{} in {}ms",
        state.reconnect_attempts,
        state.config.max_reconnect_attempts,
        state.config.reconnect_delay_ms
    );
    let delay = tokio::time::sleep(Duration::from_millis(state.config.reconnect_delay_ms));
    tokio::pin!(delay);
    loop {
        tokio::select! {
            () = &mut delay => return false,
            cmd = state.cmd_rx.recv() => {
                match cmd {
                    None | Some(Command::Disconnect) => return true,
                    Some(cmd) => {
                        // Channel/listener changes take effect now and are
                        // re-issued on the next successful connect.
                        apply_command(&mut state.dispatcher, &mut state.active_channels, cmd);
                    }
                }
            }
        }
    }
}
