//! Pure `f64` indicator functions over OHLCV slices. Never panics on short
//! input — every function returns `None`/`Vec<Option<f64>>` entries while the
//! lookback window is unfilled.

pub mod atr;
pub mod bollinger;
pub mod donchian;
pub mod ema;
pub mod kd;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use atr::atr;
pub use bollinger::{bollinger, Bollinger};
pub use donchian::{donchian, Donchian};
pub use ema::ema;
pub use kd::{kd, Kd};
pub use macd::{macd, Macd};
pub use rsi::rsi;
pub use sma::{sma, sma_last};
