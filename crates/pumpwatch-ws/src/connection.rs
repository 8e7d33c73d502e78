//! Stream client connection manager.
//!
//! Owns the persistent connection for its lifetime: subscribe, discard the
//! one-time acknowledgement, then a receive loop interleaving message
//! arrival with keepalive pings. Connection-level failures reconnect after a
//! fixed delay with the original subscription parameters; per-message decode
//! failures are logged and skipped.

use crate::error::{WsError, WsResult};
use crate::message::{
    parse_stream_message, program_data_payload, BlockValue, LogsValue, StreamMessage,
};
use crate::subscription::{Commitment, StreamKind, SubscribeRequest, SUBSCRIBE_REQUEST_ID};
use crate::transaction::TransactionDecoder;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use futures_util::{SinkExt, StreamExt};
use parking_lot::RwLock;
use pumpwatch_core::{CreateEvent, Pubkey};
use pumpwatch_decode::{
    classify_discriminator, decode_create_event, screen_instruction, InstructionKind,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::CloseFrame, tungstenite::Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

type WsSink = futures_util::stream::SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsSource = futures_util::stream::SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Stream client configuration.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// WebSocket URL.
    pub url: String,
    /// Program whose activity is watched.
    pub program: Pubkey,
    /// Commitment level for the subscription.
    pub commitment: Commitment,
    /// Subscription method (log-mentions or full-block).
    pub kind: StreamKind,
    /// Optional participant filter; `None` yields every decoded event.
    pub watched: Option<Pubkey>,
    /// Instruction kinds worth decoding.
    pub kinds: Vec<InstructionKind>,
    /// Bound on each wait for the next message; expiry sends a ping.
    pub recv_timeout: Duration,
    /// Keepalive cadence under steady message flow.
    pub ping_interval: Duration,
    /// Fixed delay before reconnecting after a connection-level failure.
    pub reconnect_delay: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            program: Pubkey::default(),
            commitment: Commitment::Processed,
            kind: StreamKind::LogMentions,
            watched: None,
            kinds: vec![InstructionKind::Create],
            recv_timeout: Duration::from_secs(30),
            ping_interval: Duration::from_secs(20),
            reconnect_delay: Duration::from_secs(5),
        }
    }
}

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Subscribed,
    Listening,
    Reconnecting,
    Closed,
}

/// Streaming client for one subscription.
///
/// Exclusively owns its connection handle; all per-message data is transient,
/// so nothing survives a cancel/restart cycle.
pub struct StreamClient<D> {
    config: StreamConfig,
    decoder: D,
    state: Arc<RwLock<ConnectionState>>,
    event_tx: mpsc::Sender<CreateEvent>,
    shutdown: CancellationToken,
}

impl<D: TransactionDecoder> StreamClient<D> {
    /// Create a new stream client yielding matched events on `event_tx`.
    pub fn new(config: StreamConfig, decoder: D, event_tx: mpsc::Sender<CreateEvent>) -> Self {
        Self {
            config,
            decoder,
            state: Arc::new(RwLock::new(ConnectionState::Disconnected)),
            event_tx,
            shutdown: CancellationToken::new(),
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    /// Token observed by the receive loop; cancel it to close the client.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Request a prompt, clean shutdown.
    pub fn shutdown(&self) {
        info!("stream client shutdown requested");
        self.shutdown.cancel();
    }

    fn set_state(&self, state: ConnectionState) {
        *self.state.write() = state;
    }

    fn subscribe_request(&self) -> SubscribeRequest {
        SubscribeRequest {
            program: self.config.program,
            commitment: self.config.commitment,
            kind: self.config.kind,
        }
    }

    /// Connect and listen until cancelled.
    ///
    /// Connection-level failures reconnect forever with a fixed delay; the
    /// subscription parameters are immutable across reconnects. Returns only
    /// on cancellation.
    pub async fn run(&self) -> WsResult<()> {
        loop {
            if self.shutdown.is_cancelled() {
                self.set_state(ConnectionState::Closed);
                return Ok(());
            }

            self.set_state(ConnectionState::Connecting);
            match self.connect_once().await {
                Ok(()) => {
                    // Only cancellation ends a session cleanly.
                    self.set_state(ConnectionState::Closed);
                    info!("stream client closed");
                    return Ok(());
                }
                Err(e) => {
                    warn!(error = %e, "stream connection lost");
                }
            }

            if self.shutdown.is_cancelled() {
                self.set_state(ConnectionState::Closed);
                return Ok(());
            }

            self.set_state(ConnectionState::Reconnecting);
            info!(
                delay_ms = self.config.reconnect_delay.as_millis(),
                "reconnecting"
            );
            tokio::select! {
                () = tokio::time::sleep(self.config.reconnect_delay) => {}
                () = self.shutdown.cancelled() => {
                    self.set_state(ConnectionState::Closed);
                    return Ok(());
                }
            }
        }
    }

    async fn connect_once(&self) -> WsResult<()> {
        info!(url = %self.config.url, "connecting to stream");
        let (ws_stream, _response) = connect_async(&self.config.url).await?;
        let (mut write, mut read) = ws_stream.split();

        let request = self.subscribe_request().to_json();
        write.send(Message::Text(request.to_string())).await?;
        self.set_state(ConnectionState::Subscribed);
        debug!(method = self.config.kind.method(), "subscribe request sent");

        self.await_ack(&mut write, &mut read).await?;
        self.set_state(ConnectionState::Listening);
        info!(
            program = %self.config.program,
            method = self.config.kind.method(),
            "subscription acknowledged, listening"
        );

        let mut keepalive = tokio::time::interval(self.config.ping_interval);
        keepalive.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        keepalive.tick().await; // the first tick completes immediately

        loop {
            tokio::select! {
                () = self.shutdown.cancelled() => {
                    let _ = write.send(Message::Close(None)).await;
                    return Ok(());
                }

                _ = keepalive.tick() => {
                    write.send(Message::Ping(Vec::new())).await?;
                    debug!("sent keepalive ping");
                }

                next = tokio::time::timeout(self.config.recv_timeout, read.next()) => {
                    match next {
                        // Quiet stream: ping and re-wait. Not an error.
                        Err(_) => {
                            write.send(Message::Ping(Vec::new())).await?;
                            debug!("receive timeout, sent ping");
                        }
                        Ok(None) => {
                            return Err(WsError::ConnectionClosed {
                                code: 1006,
                                reason: "stream ended".to_string(),
                            });
                        }
                        Ok(Some(Err(e))) => return Err(e.into()),
                        Ok(Some(Ok(Message::Text(text)))) => {
                            self.handle_text(&text).await;
                        }
                        Ok(Some(Ok(Message::Ping(data)))) => {
                            write.send(Message::Pong(data)).await?;
                        }
                        Ok(Some(Ok(Message::Close(frame)))) => {
                            return Err(close_error(frame));
                        }
                        Ok(Some(Ok(_))) => {}
                    }
                }
            }
        }
    }

    /// Wait for and discard the one-time subscription acknowledgement.
    async fn await_ack(&self, write: &mut WsSink, read: &mut WsSource) -> WsResult<()> {
        let deadline = tokio::time::Instant::now() + self.config.recv_timeout;

        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return Err(WsError::SubscribeFailed(
                    "no acknowledgement before timeout".to_string(),
                ));
            }

            let next = match tokio::time::timeout(remaining, read.next()).await {
                Err(_) => {
                    return Err(WsError::SubscribeFailed(
                        "no acknowledgement before timeout".to_string(),
                    ))
                }
                Ok(None) => {
                    return Err(WsError::ConnectionClosed {
                        code: 1006,
                        reason: "stream ended during subscribe".to_string(),
                    })
                }
                Ok(Some(msg)) => msg?,
            };

            match next {
                Message::Text(text) => match parse_stream_message(&text) {
                    StreamMessage::Ack { id, error } if id == SUBSCRIBE_REQUEST_ID => {
                        if let Some(reason) = error {
                            return Err(WsError::SubscribeFailed(reason));
                        }
                        return Ok(());
                    }
                    _ => debug!("discarding pre-acknowledgement message"),
                },
                Message::Ping(data) => write.send(Message::Pong(data)).await?,
                Message::Close(frame) => return Err(close_error(frame)),
                _ => {}
            }
        }
    }

    /// Handle one text frame. Decode failures never escape: they are logged
    /// and the frame is dropped.
    async fn handle_text(&self, text: &str) {
        let notification = match parse_stream_message(text) {
            StreamMessage::Notification(n) => n,
            StreamMessage::Ack { .. } => {
                debug!("discarding late subscription acknowledgement");
                return;
            }
            StreamMessage::Other => return,
        };

        if notification.method != self.config.kind.notification_method() {
            debug!(method = %notification.method, "ignoring unexpected notification method");
            return;
        }

        let value = notification.params.result.value;
        let events = match self.config.kind {
            StreamKind::LogMentions => match serde_json::from_value::<LogsValue>(value) {
                Ok(logs) => {
                    collect_log_events(&logs, &self.config.kinds, self.config.watched.as_ref())
                }
                Err(e) => {
                    debug!(error = %e, "malformed logs notification, skipping");
                    return;
                }
            },
            StreamKind::FullBlock => match serde_json::from_value::<BlockValue>(value) {
                Ok(block) => collect_block_events(
                    &self.decoder,
                    &block,
                    &self.config.program,
                    &self.config.kinds,
                    self.config.watched.as_ref(),
                ),
                Err(e) => {
                    debug!(error = %e, "malformed block notification, skipping");
                    return;
                }
            },
        };

        for event in events {
            info!(mint = %event.mint, name = %event.name, "matched creation event");
            if self.event_tx.send(event).await.is_err() {
                warn!("event receiver dropped");
                return;
            }
        }
    }
}

fn close_error(frame: Option<CloseFrame<'_>>) -> WsError {
    let (code, reason) = frame
        .map(|f| (f.code.into(), f.reason.to_string()))
        .unwrap_or((1000, "normal close".to_string()));
    WsError::ConnectionClosed { code, reason }
}

/// Extract matched events from a logs notification.
///
/// A cheap log-marker gate runs before any base64 work; each `Program data:`
/// payload is then discriminator-classified and decoded. The watched filter
/// compares the event's own address fields, byte-for-byte.
fn collect_log_events(
    value: &LogsValue,
    kinds: &[InstructionKind],
    watched: Option<&Pubkey>,
) -> Vec<CreateEvent> {
    if value.err.is_some() {
        return Vec::new();
    }

    let announced = value.logs.iter().any(|log| {
        kinds
            .iter()
            .filter_map(InstructionKind::log_marker)
            .any(|marker| log.contains(marker))
    });
    if !announced {
        return Vec::new();
    }

    let mut events = Vec::new();
    for log in &value.logs {
        let Some(payload) = program_data_payload(log) else {
            continue;
        };

        let kind = classify_discriminator(&payload);
        if kind == InstructionKind::Unknown || !kinds.contains(&kind) {
            continue;
        }

        match decode_create_event(&payload) {
            Ok(event) => {
                if watched.map_or(true, |address| event.mentions(address)) {
                    events.push(event);
                }
            }
            Err(e) => {
                debug!(
                    error = %e,
                    signature = %value.signature,
                    "undecodable program data, skipping"
                );
            }
        }
    }
    events
}

/// Extract matched events from a block notification.
///
/// Each base64 transaction goes to the external deserializer; instructions
/// are screened cheapest-check-first (program, discriminator, watched
/// account) and decoded at most once, in transaction order.
fn collect_block_events<D: TransactionDecoder>(
    decoder: &D,
    value: &BlockValue,
    program: &Pubkey,
    kinds: &[InstructionKind],
    watched: Option<&Pubkey>,
) -> Vec<CreateEvent> {
    let Some(block) = &value.block else {
        return Vec::new();
    };

    let mut events = Vec::new();
    for entry in &block.transactions {
        let (encoded, _encoding) = &entry.transaction;
        let Ok(bytes) = BASE64.decode(encoded) else {
            debug!(slot = value.slot, "undecodable transaction payload, skipping");
            continue;
        };
        let Some(transaction) = decoder.decode_transaction(&bytes) else {
            continue;
        };

        for instruction in &transaction.instructions {
            let screened =
                screen_instruction(instruction, &transaction.account_keys, program, kinds, watched);
            if screened.is_none() {
                continue;
            }

            match decode_create_event(&instruction.data) {
                Ok(event) => events.push(event),
                Err(e) => {
                    debug!(error = %e, slot = value.slot, "matched instruction failed to decode");
                }
            }
        }
    }
    events
}
