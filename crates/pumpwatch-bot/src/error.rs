//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("stream error: {0}")]
    Stream(#[from] pumpwatch_ws::WsError),

    #[error("decode error: {0}")]
    Decode(#[from] pumpwatch_decode::DecodeError),

    #[error("curve account error: {0}")]
    Curve(#[from] pumpwatch_core::CurveError),

    #[error("pricing error: {0}")]
    Pricing(#[from] pumpwatch_core::PricingError),

    #[error("telemetry error: {0}")]
    Telemetry(#[from] pumpwatch_telemetry::TelemetryError),

    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("execution error: {0}")]
    Execution(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
