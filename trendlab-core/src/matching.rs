//! MatchingEngine — fills queued orders against each bar's OHLC.
//!
//! Market orders fill at the *next* bar's open plus/minus slippage; limit
//! orders fill once the bar's range crosses the limit. Calling `on_bar`
//! with the same bar an order was submitted on is the caller's
//! responsibility to avoid — the engine loop only ever calls it with the
//! following bar, which is what makes this the look-ahead barrier.

use std::collections::VecDeque;

use crate::commission::CommissionModel;
use crate::domain::{Bar, ContractRegistry, Fill, OrderRequest, PriceType, Side};
use crate::error::EngineError;

pub struct MatchingEngine {
    contracts: ContractRegistry,
    commission: CommissionModel,
    slippage_ticks: u32,
    pending: VecDeque<OrderRequest>,
}

impl MatchingEngine {
    pub fn new(contracts: ContractRegistry, commission: CommissionModel, slippage_ticks: u32) -> Self {
        Self {
            contracts,
            commission,
            slippage_ticks,
            pending: VecDeque::new(),
        }
    }

    pub fn submit(&mut self, order: OrderRequest) {
        self.pending.push_back(order);
    }

    /// Remove the first pending order with the given id. Returns whether one was removed.
    pub fn cancel(&mut self, order_id: &str) -> bool {
        if let Some(pos) = self.pending.iter().position(|o| o.id == order_id) {
            self.pending.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Scan the pending queue against `bar`, filling what can be filled.
    /// Orders for other symbols, and unfilled orders for this symbol, remain queued.
    pub fn on_bar(&mut self, bar: &Bar) -> Result<Vec<Fill>, EngineError> {
        let mut fills = Vec::new();
        let mut remaining = VecDeque::with_capacity(self.pending.len());
        let queued = std::mem::take(&mut self.pending);
        let mut queued = queued.into_iter();

        for order in queued.by_ref() {
            if order.symbol != bar.symbol {
                remaining.push_back(order);
                continue;
            }
            match self.try_fill(&order, bar) {
                Ok(Some(fill)) => fills.push(fill),
                Ok(None) => remaining.push_back(order),
                Err(e) => {
                    // Restore the order that errored and everything not yet
                    // scanned so a transient lookup failure doesn't drop orders.
                    remaining.push_back(order);
                    remaining.extend(queued);
                    self.pending = remaining;
                    return Err(e);
                }
            }
        }

        self.pending = remaining;
        Ok(fills)
    }

    fn try_fill(&self, order: &OrderRequest, bar: &Bar) -> Result<Option<Fill>, EngineError> {
        let spec = self.contracts.get(&order.symbol)?;

        let fill_price = match order.price_type {
            PriceType::Market => {
                let slippage = spec.tick_size * rust_decimal::Decimal::from(self.slippage_ticks);
                Some(match order.side {
                    Side::Buy => bar.open + slippage,
                    Side::Sell => bar.open - slippage,
                })
            }
            PriceType::Limit => {
                let limit = order.price.expect("limit order must carry a price");
                match order.side {
                    Side::Buy if bar.low <= limit => Some(limit.min(bar.open)),
                    Side::Sell if bar.high >= limit => Some(limit.max(bar.open)),
                    _ => None,
                }
            }
        };

        let Some(price) = fill_price else {
            return Ok(None);
        };

        let notional = price * rust_decimal::Decimal::from(order.quantity) * spec.multiplier;
        Ok(Some(Fill {
            order_id: order.id.clone(),
            symbol: order.symbol.clone(),
            side: order.side,
            price,
            quantity: order.quantity,
            commission: self.commission.commission(order.quantity),
            tax: self.commission.tax(notional),
            timestamp: bar.timestamp,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn engine() -> MatchingEngine {
        MatchingEngine::new(ContractRegistry::new(), CommissionModel::default(), 1)
    }

    fn bar(open: i64, high: i64, low: i64, close: i64) -> Bar {
        Bar {
            symbol: "TX".into(),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 3)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            open: Decimal::from(open),
            high: Decimal::from(high),
            low: Decimal::from(low),
            close: Decimal::from(close),
            volume: 100,
            open_interest: None,
            session: crate::domain::Session::Day,
        }
    }

    #[test]
    fn market_buy_fills_at_open_plus_slippage() {
        let mut m = engine();
        m.submit(OrderRequest::market("o1".into(), "TX".into(), Side::Buy, 1));
        let fills = m.on_bar(&bar(20_020, 20_120, 20_000, 20_100)).unwrap();
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].price, Decimal::from(20_021));
    }

    #[test]
    fn market_sell_fills_at_open_minus_slippage() {
        let mut m = engine();
        m.submit(OrderRequest::market("o1".into(), "TX".into(), Side::Sell, 1));
        let fills = m.on_bar(&bar(20_110, 20_200, 20_080, 20_150)).unwrap();
        assert_eq!(fills[0].price, Decimal::from(20_109));
    }

    #[test]
    fn limit_buy_fills_at_gap_down_open() {
        // S4: pending BUY LIMIT 19_950; next bar open 19_900 < limit -> fill at open.
        let mut m = engine();
        m.submit(OrderRequest::limit(
            "o1".into(),
            "TX".into(),
            Side::Buy,
            1,
            Decimal::from(19_950),
        ));
        let fills = m.on_bar(&bar(19_900, 19_960, 19_880, 19_920)).unwrap();
        assert_eq!(fills[0].price, Decimal::from(19_900));
    }

    #[test]
    fn limit_buy_fills_at_limit_when_open_above() {
        let mut m = engine();
        m.submit(OrderRequest::limit(
            "o1".into(),
            "TX".into(),
            Side::Buy,
            1,
            Decimal::from(19_950),
        ));
        // open above limit, but low touches it: fills at min(limit, open) = limit.
        let fills = m.on_bar(&bar(19_970, 19_980, 19_940, 19_960)).unwrap();
        assert_eq!(fills[0].price, Decimal::from(19_950));
    }

    #[test]
    fn limit_buy_does_not_fill_when_low_above_limit() {
        let mut m = engine();
        m.submit(OrderRequest::limit(
            "o1".into(),
            "TX".into(),
            Side::Buy,
            1,
            Decimal::from(19_000),
        ));
        let fills = m.on_bar(&bar(19_970, 19_980, 19_940, 19_960)).unwrap();
        assert!(fills.is_empty());
        assert_eq!(m.pending_count(), 1);
    }

    #[test]
    fn orders_for_other_symbols_are_not_touched() {
        let mut m = engine();
        m.submit(OrderRequest::market("o1".into(), "MTX".into(), Side::Buy, 1));
        let fills = m.on_bar(&bar(20_000, 20_100, 19_900, 20_050)).unwrap();
        assert!(fills.is_empty());
        assert_eq!(m.pending_count(), 1);
    }

    #[test]
    fn cancel_removes_pending_order() {
        let mut m = engine();
        m.submit(OrderRequest::market("o1".into(), "TX".into(), Side::Buy, 1));
        assert!(m.cancel("o1"));
        assert_eq!(m.pending_count(), 0);
        assert!(!m.cancel("o1"));
    }

    #[test]
    fn unknown_contract_errors_on_fill_attempt() {
        let mut m = engine();
        m.submit(OrderRequest::market("o1".into(), "ZZZ".into(), Side::Buy, 1));
        let mut b = bar(100, 110, 90, 105);
        b.symbol = "ZZZ".into();
        assert!(m.on_bar(&b).is_err());
    }
}
