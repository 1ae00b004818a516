//! StopEngine — stop-loss, take-profit, trailing, and time stops.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::domain::{Bar, ContractRegistry, IdGen, OrderRequest, Position};

#[derive(Debug, Clone, Default)]
pub struct StopConfig {
    pub stop_loss_points: Option<Decimal>,
    pub take_profit_points: Option<Decimal>,
    pub trailing_stop_points: Option<Decimal>,
    pub time_stop_bars: Option<usize>,
}

/// Evaluates the four stop types in fixed priority order, emitting at most
/// one close order per bar per position — the first trigger wins.
pub struct StopEngine {
    config: StopConfig,
    contracts: ContractRegistry,
    trailing_extremes: HashMap<String, Decimal>,
    ids: IdGen,
}

impl StopEngine {
    pub fn new(config: StopConfig, contracts: ContractRegistry) -> Self {
        Self {
            config,
            contracts,
            trailing_extremes: HashMap::new(),
            ids: IdGen::new("stop"),
        }
    }

    /// Clear trailing state for a symbol once its position is closed.
    pub fn reset(&mut self, symbol: &str) {
        self.trailing_extremes.remove(symbol);
    }

    pub fn on_bar(&mut self, bar: &Bar, position: Option<&Position>, bars_held: usize) -> Option<OrderRequest> {
        let pos = position?;
        if pos.quantity == 0 {
            self.trailing_extremes.remove(&bar.symbol);
            return None;
        }

        self.update_trailing(bar, pos);

        if self.check_stop_loss(bar, pos)
            || self.check_take_profit(bar, pos)
            || self.check_trailing_stop(bar, pos)
            || self.check_time_stop(bars_held)
        {
            return Some(self.close_order(bar.symbol.clone(), pos));
        }
        None
    }

    fn check_stop_loss(&self, bar: &Bar, pos: &Position) -> bool {
        let Some(pts) = self.config.stop_loss_points else {
            return false;
        };
        if pos.is_long() {
            bar.low <= pos.avg_price - pts
        } else {
            bar.high >= pos.avg_price + pts
        }
    }

    fn check_take_profit(&self, bar: &Bar, pos: &Position) -> bool {
        let Some(pts) = self.config.take_profit_points else {
            return false;
        };
        if pos.is_long() {
            bar.high >= pos.avg_price + pts
        } else {
            bar.low <= pos.avg_price - pts
        }
    }

    fn check_trailing_stop(&self, bar: &Bar, pos: &Position) -> bool {
        let Some(pts) = self.config.trailing_stop_points else {
            return false;
        };
        let Some(extreme) = self.trailing_extremes.get(&bar.symbol).copied() else {
            return false;
        };
        if pos.is_long() {
            bar.low <= extreme - pts
        } else {
            bar.high >= extreme + pts
        }
    }

    fn check_time_stop(&self, bars_held: usize) -> bool {
        self.config.time_stop_bars.is_some_and(|t| bars_held >= t)
    }

    fn update_trailing(&mut self, bar: &Bar, pos: &Position) {
        if self.config.trailing_stop_points.is_none() {
            return;
        }
        let entry = self.trailing_extremes.entry(bar.symbol.clone());
        if pos.is_long() {
            entry.and_modify(|e| *e = (*e).max(bar.high)).or_insert(bar.high);
        } else {
            entry.and_modify(|e| *e = (*e).min(bar.low)).or_insert(bar.low);
        }
    }

    fn close_order(&mut self, symbol: String, pos: &Position) -> OrderRequest {
        OrderRequest::market(self.ids.next_id(), symbol, pos.side.opposite(), pos.quantity)
    }
}
