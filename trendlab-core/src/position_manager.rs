//! PositionManager — applies fills under five topologies, tracks cash,
//! realized/unrealized P&L, margin, and the trade ledger.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::domain::{ContractRegistry, Fill, PortfolioState, Position, Side, TradeRecord};
use crate::error::EngineError;

pub struct PositionManager {
    contracts: ContractRegistry,
    cash: Decimal,
    positions: HashMap<String, Position>,
    realized_pnl: Decimal,
    trade_records: Vec<TradeRecord>,
    equity_curve: Vec<Decimal>,
    current_bar_index: usize,
}

impl PositionManager {
    pub fn new(initial_capital: Decimal, contracts: ContractRegistry) -> Self {
        Self {
            contracts,
            cash: initial_capital,
            positions: HashMap::new(),
            realized_pnl: Decimal::ZERO,
            trade_records: Vec::new(),
            equity_curve: Vec::new(),
            current_bar_index: 0,
        }
    }

    pub fn set_bar_index(&mut self, index: usize) {
        self.current_bar_index = index;
    }

    pub fn cash(&self) -> Decimal {
        self.cash
    }

    pub fn realized_pnl(&self) -> Decimal {
        self.realized_pnl
    }

    pub fn equity_curve(&self) -> &[Decimal] {
        &self.equity_curve
    }

    pub fn trade_records(&self) -> &[TradeRecord] {
        &self.trade_records
    }

    /// Current position for `symbol`, or `None` if flat.
    pub fn get_position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(symbol).filter(|p| p.quantity > 0)
    }

    pub fn total_equity(&self) -> Decimal {
        self.cash
            + self
                .positions
                .values()
                .filter(|p| p.quantity > 0)
                .map(|p| p.unrealized_pnl)
                .sum::<Decimal>()
    }

    pub fn portfolio_state(&self) -> PortfolioState {
        let open: HashMap<String, Position> = self
            .positions
            .iter()
            .filter(|(_, p)| p.quantity > 0)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let unrealized: Decimal = open.values().map(|p| p.unrealized_pnl).sum();
        let used_margin: Decimal = open.values().map(|p| p.margin_required).sum();
        let total_equity = self.cash + unrealized;
        PortfolioState {
            cash: self.cash,
            positions: open,
            total_equity,
            used_margin,
            available_margin: total_equity - used_margin,
            realized_pnl: self.realized_pnl,
            unrealized_pnl: unrealized,
        }
    }

    /// Apply a fill, routing to one of the five topologies.
    pub fn apply_fill(&mut self, fill: &Fill) -> Result<(), EngineError> {
        let spec = self.contracts.get(&fill.symbol)?.clone();
        self.cash -= fill.total_cost();

        let existing = self.positions.get(&fill.symbol).filter(|p| p.quantity > 0);
        match existing {
            None => self.open_position(fill, &spec),
            Some(pos) if pos.side == fill.side => self.add_to_position(fill, &spec),
            Some(_) => self.reduce_or_reverse(fill, &spec),
        }
        Ok(())
    }

    /// Mark the open position to `price`; no cash effect.
    pub fn mark_to_market(&mut self, symbol: &str, price: Decimal) -> Result<(), EngineError> {
        let spec = self.contracts.get(symbol)?.clone();
        if let Some(pos) = self.positions.get_mut(symbol) {
            if pos.quantity == 0 {
                return Ok(());
            }
            let qty = Decimal::from(pos.quantity);
            pos.unrealized_pnl = match pos.side {
                Side::Buy => (price - pos.avg_price) * qty * spec.multiplier,
                Side::Sell => (pos.avg_price - price) * qty * spec.multiplier,
            };
            pos.margin_required = spec.initial_margin * qty;
        }
        Ok(())
    }

    pub fn snapshot_equity(&mut self) {
        self.equity_curve.push(self.total_equity());
    }

    fn open_position(&mut self, fill: &Fill, spec: &crate::domain::ContractSpec) {
        self.positions.insert(
            fill.symbol.clone(),
            Position {
                symbol: fill.symbol.clone(),
                side: fill.side,
                quantity: fill.quantity,
                avg_price: fill.price,
                unrealized_pnl: Decimal::ZERO,
                margin_required: spec.initial_margin * Decimal::from(fill.quantity),
                entry_bar_index: self.current_bar_index,
                entry_time: fill.timestamp,
            },
        );
    }

    fn add_to_position(&mut self, fill: &Fill, spec: &crate::domain::ContractSpec) {
        let pos = self
            .positions
            .get_mut(&fill.symbol)
            .expect("add_to_position requires an existing position");
        let old_qty = Decimal::from(pos.quantity);
        let fill_qty = Decimal::from(fill.quantity);
        let total_qty = pos.quantity + fill.quantity;
        pos.avg_price = (pos.avg_price * old_qty + fill.price * fill_qty) / (old_qty + fill_qty);
        pos.quantity = total_qty;
        pos.margin_required = spec.initial_margin * Decimal::from(total_qty);
        // entry_bar_index / entry_time intentionally left unchanged.
    }

    fn reduce_or_reverse(&mut self, fill: &Fill, spec: &crate::domain::ContractSpec) {
        let pos = self
            .positions
            .get_mut(&fill.symbol)
            .expect("reduce_or_reverse requires an existing position");

        let close_qty = fill.quantity.min(pos.quantity);
        let remaining_fill_qty = fill.quantity - close_qty;

        let pnl = realized_pnl(pos.side, pos.avg_price, fill.price, close_qty, spec.multiplier);
        self.realized_pnl += pnl;
        self.cash += pnl;

        self.trade_records.push(TradeRecord {
            symbol: fill.symbol.clone(),
            side: pos.side,
            entry_price: pos.avg_price,
            exit_price: fill.price,
            quantity: close_qty,
            entry_time: pos.entry_time,
            exit_time: fill.timestamp,
            pnl,
            commission: fill.commission,
            tax: fill.tax,
            bars_held: self.current_bar_index.saturating_sub(pos.entry_bar_index),
        });

        let new_qty = pos.quantity - close_qty;
        pos.quantity = new_qty;
        pos.unrealized_pnl = Decimal::ZERO;
        pos.margin_required = if new_qty > 0 {
            spec.initial_margin * Decimal::from(new_qty)
        } else {
            Decimal::ZERO
        };

        if new_qty == 0 && remaining_fill_qty > 0 {
            // Case 5: reverse — close fully consumed the position, open the
            // remainder on the opposite side.
            self.positions.insert(
                fill.symbol.clone(),
                Position {
                    symbol: fill.symbol.clone(),
                    side: fill.side,
                    quantity: remaining_fill_qty,
                    avg_price: fill.price,
                    unrealized_pnl: Decimal::ZERO,
                    margin_required: spec.initial_margin * Decimal::from(remaining_fill_qty),
                    entry_bar_index: self.current_bar_index,
                    entry_time: fill.timestamp,
                },
            );
        }
    }
}

/// Realized P&L for a closed slice: long = `(exit - entry) * qty * mult`,
/// short = `(entry - exit) * qty * mult`.
pub fn realized_pnl(side: Side, entry: Decimal, exit: Decimal, qty: u32, multiplier: Decimal) -> Decimal {
    let qty = Decimal::from(qty);
    match side {
        Side::Buy => (exit - entry) * qty * multiplier,
        Side::Sell => (entry - exit) * qty * multiplier,
    }
}
