//! Application configuration.
//!
//! Everything the core needs (endpoints, program identifier, watched
//! address, timing) is threaded through this struct; nothing is read from
//! ambient module state.

use crate::error::{AppError, AppResult};
use pumpwatch_core::Pubkey;
use pumpwatch_ws::{Commitment, StreamConfig, StreamKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingMode {
    /// Decode, price, and log only; no executor calls.
    #[default]
    Observation,
    /// Full buy/hold/sell cycle through the trade executor.
    Trading,
}

/// WebSocket timing knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsConfig {
    /// Bound on each wait for the next stream message (seconds).
    #[serde(default = "default_recv_timeout_secs")]
    pub recv_timeout_secs: u64,
    /// Keepalive ping cadence (seconds).
    #[serde(default = "default_ping_interval_secs")]
    pub ping_interval_secs: u64,
    /// Fixed reconnect delay (seconds).
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,
}

fn default_recv_timeout_secs() -> u64 {
    30
}

fn default_ping_interval_secs() -> u64 {
    20
}

fn default_reconnect_delay_secs() -> u64 {
    5
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            recv_timeout_secs: default_recv_timeout_secs(),
            ping_interval_secs: default_ping_interval_secs(),
            reconnect_delay_secs: default_reconnect_delay_secs(),
        }
    }
}

/// Trade cycle parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeConfig {
    /// SOL spent per buy.
    #[serde(default = "default_buy_amount_sol")]
    pub buy_amount_sol: f64,
    /// Slippage tolerance on buys (fraction, 0.25 = 25%).
    #[serde(default = "default_buy_slippage")]
    pub buy_slippage: f64,
    /// Slippage tolerance on sells.
    #[serde(default = "default_sell_slippage")]
    pub sell_slippage: f64,
    /// Wait after a creation before pricing, letting the curve settle (seconds).
    #[serde(default = "default_stabilize_secs")]
    pub stabilize_secs: u64,
    /// Holding time between buy and sell (seconds).
    #[serde(default = "default_hold_secs")]
    pub hold_secs: u64,
}

fn default_buy_amount_sol() -> f64 {
    0.01
}

fn default_buy_slippage() -> f64 {
    0.25
}

fn default_sell_slippage() -> f64 {
    0.25
}

fn default_stabilize_secs() -> u64 {
    15
}

fn default_hold_secs() -> u64 {
    20
}

impl Default for TradeConfig {
    fn default() -> Self {
        Self {
            buy_amount_sol: default_buy_amount_sol(),
            buy_slippage: default_buy_slippage(),
            sell_slippage: default_sell_slippage(),
            stabilize_secs: default_stabilize_secs(),
            hold_secs: default_hold_secs(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Operating mode.
    #[serde(default)]
    pub mode: OperatingMode,
    /// WebSocket endpoint URL.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// JSON-RPC endpoint URL for account fetches.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Watched program identifier (base58).
    #[serde(default = "default_program")]
    pub program: String,
    /// Commitment level for the subscription.
    #[serde(default)]
    pub commitment: Commitment,
    /// Subscription method.
    #[serde(default)]
    pub stream: StreamKind,
    /// Optional watched participant address (base58).
    #[serde(default)]
    pub watched_address: Option<String>,
    /// Directory for the trade log and token info files.
    #[serde(default = "default_trades_dir")]
    pub trades_dir: String,
    /// Default tracing filter directives when RUST_LOG is unset.
    #[serde(default = "default_log_directives")]
    pub log_directives: String,
    /// WebSocket timing.
    #[serde(default)]
    pub websocket: WsConfig,
    /// Trade cycle parameters.
    #[serde(default)]
    pub trade: TradeConfig,
}

fn default_ws_url() -> String {
    "wss://api.mainnet-beta.solana.com".to_string()
}

fn default_rpc_url() -> String {
    "https://api.mainnet-beta.solana.com".to_string()
}

fn default_program() -> String {
    // pump.fun program id
    "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P".to_string()
}

fn default_trades_dir() -> String {
    "trades".to_string()
}

fn default_log_directives() -> String {
    "info,pumpwatch=debug".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: OperatingMode::Observation,
            ws_url: default_ws_url(),
            rpc_url: default_rpc_url(),
            program: default_program(),
            commitment: Commitment::Processed,
            stream: StreamKind::LogMentions,
            watched_address: None,
            trades_dir: default_trades_dir(),
            log_directives: default_log_directives(),
            websocket: WsConfig::default(),
            trade: TradeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from a TOML file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("failed to read config {path}: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("failed to parse config {path}: {e}")))
    }

    /// Parsed program identifier.
    pub fn program_id(&self) -> AppResult<Pubkey> {
        Pubkey::from_str(&self.program)
            .map_err(|e| AppError::Config(format!("bad program id `{}`: {e}", self.program)))
    }

    /// Parsed watched address, if configured.
    pub fn watched(&self) -> AppResult<Option<Pubkey>> {
        self.watched_address
            .as_deref()
            .map(|address| {
                Pubkey::from_str(address).map_err(|e| {
                    AppError::Config(format!("bad watched address `{address}`: {e}"))
                })
            })
            .transpose()
    }

    /// Check if in observation mode.
    pub fn is_observation_mode(&self) -> bool {
        self.mode == OperatingMode::Observation
    }

    /// Build the stream client configuration.
    pub fn stream_config(&self) -> AppResult<StreamConfig> {
        Ok(StreamConfig {
            url: self.ws_url.clone(),
            program: self.program_id()?,
            commitment: self.commitment,
            kind: self.stream,
            watched: self.watched()?,
            recv_timeout: Duration::from_secs(self.websocket.recv_timeout_secs),
            ping_interval: Duration::from_secs(self.websocket.ping_interval_secs),
            reconnect_delay: Duration::from_secs(self.websocket.reconnect_delay_secs),
            ..StreamConfig::default()
        })
    }
}
