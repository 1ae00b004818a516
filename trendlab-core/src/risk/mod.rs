//! Risk subsystem: pre-trade checks, position/exposure limits, stop evaluation,
//! and realtime drawdown/daily-loss monitoring.

pub mod limits;
pub mod manager;
pub mod pre_trade;
pub mod realtime;
pub mod stops;

pub use limits::LimitChecker;
pub use manager::{RiskManager, RiskManagerConfig};
pub use pre_trade::PreTradeRiskCheck;
pub use realtime::RealtimeRiskMonitor;
pub use stops::{StopConfig, StopEngine};
