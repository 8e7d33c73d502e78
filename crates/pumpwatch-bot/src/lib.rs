//! pumpwatch session orchestrator.
//!
//! Drives repeated "wait for a matched creation event, fetch curve state,
//! compute a quote, hand off to the trade executor" cycles over the stream
//! client, with the account fetcher, trade executor, and trade log supplied
//! as collaborators.

pub mod app;
pub mod collaborators;
pub mod config;
pub mod error;

pub use app::Application;
pub use collaborators::{
    AccountFetcher, DryRunExecutor, FileTradeLog, RpcAccountFetcher, TradeAction, TradeExecutor,
    TradeLog, TradeRecord,
};
pub use config::{AppConfig, OperatingMode, TradeConfig, WsConfig};
pub use error::{AppError, AppResult};
