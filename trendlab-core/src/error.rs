//! Error taxonomy for the backtest engine.

use thiserror::Error;

/// Kinds of failure the core can produce. Rejections (`OrderRejected` and its
/// sub-reasons) are non-fatal and are normally surfaced as event payloads
/// rather than propagated; everything else aborts the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown contract symbol: {0}")]
    ContractNotFound(String),

    #[error("order rejected: {0}")]
    OrderRejected(String),

    #[error("insufficient margin: need {required}, available {available}")]
    InsufficientMargin { required: String, available: String },

    #[error("risk limit breached: {0}")]
    RiskLimitBreached(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("data feed error: {0}")]
    Data(String),

    #[error("broker connection error: {0}")]
    BrokerConnection(String),
}
