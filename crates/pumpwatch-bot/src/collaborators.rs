//! External collaborators consumed by the trade cycle.
//!
//! The orchestrator talks to account storage, trade execution, and the trade
//! log only through these traits. The implementations shipped here are the
//! thin ones the core needs to run end-to-end: a JSON-RPC account fetcher, a
//! dry-run executor, and a JSON-lines trade log.

use crate::error::{AppError, AppResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use pumpwatch_core::{CreateEvent, Pubkey};
use pumpwatch_ws::Commitment;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Write as _;
use std::path::PathBuf;
use tracing::info;

/// Fetches current account bytes from chain storage.
///
/// Implementations must return the live state on every call; the curve
/// account mutates with each trade, so nothing may be cached.
pub trait AccountFetcher {
    async fn fetch_account(&self, address: &Pubkey) -> AppResult<Vec<u8>>;
}

/// Submits buy and sell transactions.
pub trait TradeExecutor {
    async fn buy(
        &self,
        mint: &Pubkey,
        bonding_curve: &Pubkey,
        associated_bonding_curve: &Pubkey,
        amount_sol: f64,
        slippage: f64,
    ) -> AppResult<String>;

    async fn sell(
        &self,
        mint: &Pubkey,
        bonding_curve: &Pubkey,
        associated_bonding_curve: &Pubkey,
        slippage: f64,
    ) -> AppResult<String>;
}

/// Append-only trade record sink.
pub trait TradeLog {
    fn append(&self, record: &TradeRecord) -> AppResult<()>;

    /// Persist the decoded token info of a new creation.
    fn save_token_info(&self, event: &CreateEvent) -> AppResult<()>;
}

/// Trade action recorded in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// One line of the trade log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub timestamp: DateTime<Utc>,
    pub action: TradeAction,
    pub token_address: String,
    pub price: f64,
    pub tx_hash: String,
}

impl TradeRecord {
    pub fn new(action: TradeAction, mint: &Pubkey, price: f64, tx_hash: String) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            token_address: mint.to_string(),
            price,
            tx_hash,
        }
    }
}

/// JSON-RPC `getAccountInfo` fetcher.
pub struct RpcAccountFetcher {
    client: reqwest::Client,
    url: String,
    commitment: Commitment,
}

impl RpcAccountFetcher {
    pub fn new(url: &str, commitment: Commitment) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
            commitment,
        }
    }
}

impl AccountFetcher for RpcAccountFetcher {
    async fn fetch_account(&self, address: &Pubkey) -> AppResult<Vec<u8>> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getAccountInfo",
            "params": [
                address.to_string(),
                { "encoding": "base64", "commitment": self.commitment.as_str() }
            ]
        });

        let response: serde_json::Value = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        let encoded = response
            .pointer("/result/value/data/0")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| AppError::Rpc(format!("no account data for {address}")))?;

        BASE64
            .decode(encoded)
            .map_err(|e| AppError::Rpc(format!("bad account data encoding for {address}: {e}")))
    }
}

/// Executor that logs intent instead of submitting transactions.
///
/// Real signing and submission live outside the core; this stands in for
/// them in observation runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunExecutor;

impl TradeExecutor for DryRunExecutor {
    async fn buy(
        &self,
        mint: &Pubkey,
        _bonding_curve: &Pubkey,
        _associated_bonding_curve: &Pubkey,
        amount_sol: f64,
        slippage: f64,
    ) -> AppResult<String> {
        info!(%mint, amount_sol, slippage, "dry-run buy");
        Ok(format!("dry-run-buy-{mint}"))
    }

    async fn sell(
        &self,
        mint: &Pubkey,
        _bonding_curve: &Pubkey,
        _associated_bonding_curve: &Pubkey,
        slippage: f64,
    ) -> AppResult<String> {
        info!(%mint, slippage, "dry-run sell");
        Ok(format!("dry-run-sell-{mint}"))
    }
}

/// JSON-lines trade log under a trades directory.
///
/// One `trades.log` line per action, plus one `<mint>.json` file per decoded
/// creation.
pub struct FileTradeLog {
    dir: PathBuf,
}

impl FileTradeLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn ensure_dir(&self) -> AppResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }
}

impl TradeLog for FileTradeLog {
    fn append(&self, record: &TradeRecord) -> AppResult<()> {
        self.ensure_dir()?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.dir.join("trades.log"))?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    fn save_token_info(&self, event: &CreateEvent) -> AppResult<()> {
        self.ensure_dir()?;
        let info = json!({
            "name": event.name,
            "symbol": event.symbol,
            "uri": event.uri,
            "mint": event.mint.to_string(),
            "bonding_curve": event.bonding_curve.to_string(),
            "associated_bonding_curve": event.associated_bonding_curve.to_string(),
            "associated_user": event.associated_user.to_string(),
            "user": event.user.to_string(),
            "source": event.source.to_string(),
        });
        let path = self.dir.join(format!("{}.json", event.mint));
        std::fs::write(path, serde_json::to_string_pretty(&info)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    fn temp_trades_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pumpwatch-test-{}-{tag}", std::process::id()))
    }

    fn sample_event() -> CreateEvent {
        CreateEvent {
            name: "Meme Coin".to_string(),
            symbol: "MEME".to_string(),
            uri: "https://arweave.net/abc123".to_string(),
            mint: key(1),
            bonding_curve: key(2),
            associated_bonding_curve: key(3),
            associated_user: key(4),
            user: key(5),
            source: key(6),
        }
    }

    #[test]
    fn test_trade_record_serializes_expected_fields() {
        let record = TradeRecord::new(TradeAction::Buy, &key(1), 3.0e-5, "hash123".to_string());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["action"], "buy");
        assert_eq!(value["token_address"], key(1).to_string());
        assert_eq!(value["price"], 3.0e-5);
        assert_eq!(value["tx_hash"], "hash123");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_file_trade_log_appends_lines() {
        let dir = temp_trades_dir("append");
        let _ = std::fs::remove_dir_all(&dir);
        let log = FileTradeLog::new(&dir);

        log.append(&TradeRecord::new(
            TradeAction::Buy,
            &key(1),
            1.0e-6,
            "h1".to_string(),
        ))
        .unwrap();
        log.append(&TradeRecord::new(
            TradeAction::Sell,
            &key(1),
            2.0e-6,
            "h2".to_string(),
        ))
        .unwrap();

        let content = std::fs::read_to_string(dir.join("trades.log")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"buy\""));
        assert!(lines[1].contains("\"sell\""));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_trade_log_saves_token_info() {
        let dir = temp_trades_dir("token-info");
        let _ = std::fs::remove_dir_all(&dir);
        let log = FileTradeLog::new(&dir);
        let event = sample_event();

        log.save_token_info(&event).unwrap();

        let path = dir.join(format!("{}.json", event.mint));
        let info: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(info["symbol"], "MEME");
        assert_eq!(info["mint"], event.mint.to_string());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_dry_run_executor_hashes() {
        let executor = DryRunExecutor;
        let buy = executor
            .buy(&key(1), &key(2), &key(3), 0.01, 0.25)
            .await
            .unwrap();
        let sell = executor.sell(&key(1), &key(2), &key(3), 0.25).await.unwrap();
        assert!(buy.starts_with("dry-run-buy-"));
        assert!(sell.starts_with("dry-run-sell-"));
    }
}
