//! PortfolioState — a value snapshot of cash, positions, and derived equity.

use rust_decimal::Decimal;
use std::collections::HashMap;

use super::position::Position;

/// Immutable snapshot of the entire portfolio at a point in time.
#[derive(Debug, Clone)]
pub struct PortfolioState {
    pub cash: Decimal,
    pub positions: HashMap<String, Position>,
    pub total_equity: Decimal,
    pub used_margin: Decimal,
    pub available_margin: Decimal,
    pub realized_pnl: Decimal,
    pub unrealized_pnl: Decimal,
}
