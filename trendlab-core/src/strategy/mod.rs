//! The strategy trait and the context it operates against.

pub mod context;

pub use context::{SeriesField, StrategyContext};

use crate::error::EngineError;

/// Implemented by a trading strategy. The engine drives one `on_bar` call per
/// closed bar, with `ctx` reflecting the bar history and position state as of
/// that bar's close — any orders queued during the call fill no earlier than
/// the next bar.
pub trait Strategy {
    /// Called once before the first bar, with an empty context.
    fn on_init(&mut self, _ctx: &mut StrategyContext) -> Result<(), EngineError> {
        Ok(())
    }

    /// Called once per closed bar.
    fn on_bar(&mut self, ctx: &mut StrategyContext) -> Result<(), EngineError>;

    /// Called once after the last bar has been processed.
    fn on_stop(&mut self, _ctx: &mut StrategyContext) -> Result<(), EngineError> {
        Ok(())
    }
}
