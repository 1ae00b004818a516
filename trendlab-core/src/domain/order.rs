//! OrderRequest — an immutable instruction submitted to the matching engine.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceType {
    Market,
    Limit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub id: String,
    pub symbol: String,
    pub side: Side,
    pub quantity: u32,
    pub price_type: PriceType,
    pub price: Option<Decimal>,
    pub timestamp: Option<NaiveDateTime>,
}

impl OrderRequest {
    pub fn market(id: String, symbol: String, side: Side, quantity: u32) -> Self {
        OrderRequest {
            id,
            symbol,
            side,
            quantity,
            price_type: PriceType::Market,
            price: None,
            timestamp: None,
        }
    }

    pub fn limit(id: String, symbol: String, side: Side, quantity: u32, price: Decimal) -> Self {
        OrderRequest {
            id,
            symbol,
            side,
            quantity,
            price_type: PriceType::Limit,
            price: Some(price),
            timestamp: None,
        }
    }
}
