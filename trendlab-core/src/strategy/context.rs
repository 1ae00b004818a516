//! StrategyContext — the read/write surface a strategy sees each bar.
//!
//! Bar history accumulates in a ring buffer capped at `max_history`. Per-field
//! `f64` series are materialized lazily and cached until the next bar invalidates
//! them — strategies that never touch indicators never pay for the conversion.

use std::collections::VecDeque;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::domain::{Bar, OrderRequest, Position, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesField {
    Open,
    High,
    Low,
    Close,
    Volume,
}

pub struct StrategyContext {
    history: VecDeque<Bar>,
    max_history: usize,
    series_cache: Vec<(SeriesField, Vec<f64>)>,
    position: Option<Position>,
    pending_orders: Vec<OrderRequest>,
    order_seq: u64,
}

impl StrategyContext {
    pub fn new(max_history: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(max_history),
            max_history,
            series_cache: Vec::new(),
            position: None,
            pending_orders: Vec::new(),
            order_seq: 0,
        }
    }

    /// Push the bar just closed and drop the series cache built on the prior window.
    pub fn push_bar(&mut self, bar: Bar) {
        if self.history.len() == self.max_history {
            self.history.pop_front();
        }
        self.history.push_back(bar);
        self.series_cache.clear();
    }

    pub fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn is_flat(&self) -> bool {
        match &self.position {
            Some(p) => p.quantity == 0,
            None => true,
        }
    }

    pub fn is_long(&self) -> bool {
        match &self.position {
            Some(p) => p.quantity > 0 && p.is_long(),
            None => false,
        }
    }

    pub fn is_short(&self) -> bool {
        match &self.position {
            Some(p) => p.quantity > 0 && p.is_short(),
            None => false,
        }
    }

    /// Signed position size: positive for long, negative for short, zero when flat.
    pub fn position_size(&self) -> i64 {
        match &self.position {
            Some(p) if p.is_short() => -(p.quantity as i64),
            Some(p) => p.quantity as i64,
            None => 0,
        }
    }

    pub fn bars(&self) -> impl Iterator<Item = &Bar> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn current_bar(&self) -> Option<&Bar> {
        self.history.back()
    }

    /// Lazily materialize and cache an `f64` series over the current history window.
    pub fn series(&mut self, field: SeriesField) -> &[f64] {
        if let Some(idx) = self.series_cache.iter().position(|(f, _)| *f == field) {
            return &self.series_cache[idx].1;
        }
        let values: Vec<f64> = self
            .history
            .iter()
            .map(|bar| match field {
                SeriesField::Open => bar.open.to_f64().unwrap_or(0.0),
                SeriesField::High => bar.high.to_f64().unwrap_or(0.0),
                SeriesField::Low => bar.low.to_f64().unwrap_or(0.0),
                SeriesField::Close => bar.close.to_f64().unwrap_or(0.0),
                SeriesField::Volume => bar.volume as f64,
            })
            .collect();
        self.series_cache.push((field, values));
        &self.series_cache.last().unwrap().1
    }

    fn next_order_id(&mut self) -> String {
        self.order_seq += 1;
        format!("strat-{}", self.order_seq)
    }

    pub fn buy_market(&mut self, symbol: &str, quantity: u32) -> String {
        let id = self.next_order_id();
        self.pending_orders.push(OrderRequest::market(id.clone(), symbol.to_string(), Side::Buy, quantity));
        id
    }

    pub fn sell_market(&mut self, symbol: &str, quantity: u32) -> String {
        let id = self.next_order_id();
        self.pending_orders.push(OrderRequest::market(id.clone(), symbol.to_string(), Side::Sell, quantity));
        id
    }

    pub fn buy_limit(&mut self, symbol: &str, quantity: u32, price: Decimal) -> String {
        let id = self.next_order_id();
        self.pending_orders.push(OrderRequest::limit(id.clone(), symbol.to_string(), Side::Buy, quantity, price));
        id
    }

    pub fn sell_limit(&mut self, symbol: &str, quantity: u32, price: Decimal) -> String {
        let id = self.next_order_id();
        self.pending_orders.push(OrderRequest::limit(id.clone(), symbol.to_string(), Side::Sell, quantity, price));
        id
    }

    /// Close the open position at market. No-ops and returns `None` when flat.
    pub fn close_position(&mut self, symbol: &str) -> Option<String> {
        let pos = self.position.as_ref()?;
        if pos.quantity == 0 {
            return None;
        }
        let side = pos.side.opposite();
        let quantity = pos.quantity;
        let id = self.next_order_id();
        self.pending_orders.push(OrderRequest::market(id.clone(), symbol.to_string(), side, quantity));
        Some(id)
    }

    /// Drain the orders a strategy submitted this bar so the engine can queue them.
    pub fn drain_orders(&mut self) -> Vec<OrderRequest> {
        std::mem::take(&mut self.pending_orders)
    }
}
