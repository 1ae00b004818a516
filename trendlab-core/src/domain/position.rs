//! Position — the single open holding (if any) in a symbol.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::order::Side;

/// An open position in a single symbol. A position with `quantity == 0` is
/// semantically absent — callers should treat it as "no position".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub side: Side,
    pub quantity: u32,
    pub avg_price: Decimal,
    pub unrealized_pnl: Decimal,
    pub margin_required: Decimal,
    pub entry_bar_index: usize,
    pub entry_time: NaiveDateTime,
}

impl Position {
    pub fn is_long(&self) -> bool {
        self.side == Side::Buy
    }

    pub fn is_short(&self) -> bool {
        self.side == Side::Sell
    }

    pub fn is_flat(&self) -> bool {
        self.quantity == 0
    }
}
