//! TradeRecord — a completed (or partially closed) round-trip fragment.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::order::Side;

/// A closed slice of a position: realized P&L plus allocated commission/tax.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub symbol: String,
    pub side: Side,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    pub quantity: u32,
    pub entry_time: NaiveDateTime,
    pub exit_time: NaiveDateTime,
    pub pnl: Decimal,
    pub commission: Decimal,
    pub tax: Decimal,
    pub bars_held: usize,
}
