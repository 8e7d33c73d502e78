//! Main application orchestration.
//!
//! Wires the stream client to the trade cycle: wait for a matched creation
//! event, fetch the bonding-curve account, compute a quote, then hand off to
//! the trade executor and log both legs.

use crate::collaborators::{
    AccountFetcher, DryRunExecutor, FileTradeLog, RpcAccountFetcher, TradeAction, TradeExecutor,
    TradeLog, TradeRecord,
};
use crate::config::{AppConfig, OperatingMode};
use crate::error::AppResult;
use pumpwatch_core::{BondingCurveState, CreateEvent, PricingError};
use pumpwatch_ws::{NullTransactionDecoder, StreamClient};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Capacity of the matched-event channel between the stream client and the
/// trade cycle.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Main application.
pub struct Application<F, E, L> {
    config: AppConfig,
    fetcher: F,
    executor: E,
    trade_log: L,
}

impl Application<RpcAccountFetcher, DryRunExecutor, FileTradeLog> {
    /// Create an application with the default collaborators: a JSON-RPC
    /// account fetcher, a dry-run executor, and a file trade log.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let fetcher = RpcAccountFetcher::new(&config.rpc_url, config.commitment);
        let trade_log = FileTradeLog::new(&config.trades_dir);
        Ok(Self::with_collaborators(
            config,
            fetcher,
            DryRunExecutor,
            trade_log,
        ))
    }
}

impl<F, E, L> Application<F, E, L>
where
    F: AccountFetcher,
    E: TradeExecutor,
    L: TradeLog,
{
    /// Create an application with explicit collaborators.
    pub fn with_collaborators(config: AppConfig, fetcher: F, executor: E, trade_log: L) -> Self {
        Self {
            config,
            fetcher,
            executor,
            trade_log,
        }
    }

    /// Run until ctrl-c.
    pub async fn run(self) -> AppResult<()> {
        info!(mode = ?self.config.mode, "starting application");

        let (event_tx, mut event_rx) = mpsc::channel::<CreateEvent>(EVENT_CHANNEL_CAPACITY);
        let stream_config = self.config.stream_config()?;
        info!(
            program = %stream_config.program,
            method = stream_config.kind.method(),
            watched = ?stream_config.watched.as_ref().map(ToString::to_string),
            "configured stream subscription"
        );

        let client = Arc::new(StreamClient::new(
            stream_config,
            NullTransactionDecoder,
            event_tx,
        ));
        let client_task = client.clone();
        let stream_handle = tokio::spawn(async move {
            if let Err(e) = client_task.run().await {
                error!(error = %e, "stream client failed");
            }
        });

        let mut cycles = 0u64;
        loop {
            tokio::select! {
                maybe_event = event_rx.recv() => {
                    let Some(event) = maybe_event else {
                        warn!("event stream ended");
                        break;
                    };
                    cycles += 1;
                    if let Err(e) = self.process_create(&event).await {
                        warn!(mint = %event.mint, error = %e, "trade cycle failed");
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown signal received");
                    break;
                }
            }
        }

        info!(cycles, "shutting down");
        client.shutdown();
        stream_handle.abort();

        Ok(())
    }

    /// Run one trade cycle for a matched creation event.
    pub async fn process_create(&self, event: &CreateEvent) -> AppResult<()> {
        info!(
            mint = %event.mint,
            name = %event.name,
            symbol = %event.symbol,
            user = %event.user,
            "new token creation"
        );
        self.trade_log.save_token_info(event)?;

        let stabilize = Duration::from_secs(self.config.trade.stabilize_secs);
        if !stabilize.is_zero() {
            info!(secs = self.config.trade.stabilize_secs, "waiting for the curve to settle");
            tokio::time::sleep(stabilize).await;
        }

        // Always re-read: the curve mutates with every on-chain trade.
        let data = self.fetcher.fetch_account(&event.bonding_curve).await?;
        let state = BondingCurveState::from_account_data(&data)?;
        let price = match state.price() {
            Ok(price) => price,
            Err(PricingError::CurveComplete) => {
                info!(mint = %event.mint, "curve already complete, skipping token");
                return Ok(());
            }
            Err(PricingError::DivisionByZero) => {
                warn!(mint = %event.mint, "curve has no token reserves, skipping token");
                return Ok(());
            }
        };
        info!(mint = %event.mint, price, "token priced");

        if self.config.mode == OperatingMode::Observation {
            return Ok(());
        }

        let buy_hash = self
            .executor
            .buy(
                &event.mint,
                &event.bonding_curve,
                &event.associated_bonding_curve,
                self.config.trade.buy_amount_sol,
                self.config.trade.buy_slippage,
            )
            .await?;
        self.trade_log
            .append(&TradeRecord::new(TradeAction::Buy, &event.mint, price, buy_hash))?;

        let hold = Duration::from_secs(self.config.trade.hold_secs);
        if !hold.is_zero() {
            info!(secs = self.config.trade.hold_secs, "holding before sell");
            tokio::time::sleep(hold).await;
        }

        let sell_hash = self
            .executor
            .sell(
                &event.mint,
                &event.bonding_curve,
                &event.associated_bonding_curve,
                self.config.trade.sell_slippage,
            )
            .await?;
        self.trade_log
            .append(&TradeRecord::new(TradeAction::Sell, &event.mint, price, sell_hash))?;

        Ok(())
    }
}
