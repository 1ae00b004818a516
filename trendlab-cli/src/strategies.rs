//! SMA crossover — the default strategy the CLI runs when none is scripted.
//! Golden cross (fast above slow) opens long; death cross closes it.

use trendlab_core::indicators::sma;
use trendlab_core::strategy::{SeriesField, Strategy, StrategyContext};
use trendlab_core::EngineError;

pub struct SmaCrossover {
    fast_period: usize,
    slow_period: usize,
    symbol: String,
    quantity: u32,
}

impl SmaCrossover {
    pub fn new(fast_period: usize, slow_period: usize, symbol: String, quantity: u32) -> Self {
        assert!(slow_period > fast_period, "slow_period must be > fast_period");
        Self { fast_period, slow_period, symbol, quantity }
    }
}

impl Strategy for SmaCrossover {
    fn on_bar(&mut self, ctx: &mut StrategyContext) -> Result<(), EngineError> {
        if ctx.len() < self.slow_period + 1 {
            return Ok(());
        }

        let closes = ctx.series(SeriesField::Close).to_vec();
        let fast = sma(&closes, self.fast_period);
        let slow = sma(&closes, self.slow_period);
        let n = closes.len();

        let (Some(fast_now), Some(slow_now), Some(fast_prev), Some(slow_prev)) =
            (fast[n - 1], slow[n - 1], fast[n - 2], slow[n - 2])
        else {
            return Ok(());
        };

        let golden_cross = fast_prev <= slow_prev && fast_now > slow_now;
        let death_cross = fast_prev >= slow_prev && fast_now < slow_now;

        if golden_cross && ctx.is_flat() {
            ctx.buy_market(&self.symbol, self.quantity);
        } else if death_cross && !ctx.is_flat() {
            ctx.close_position(&self.symbol);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use trendlab_core::domain::{Bar, Session};

    fn bar(day: u32, close: i64) -> Bar {
        Bar {
            symbol: "TX".into(),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, day).unwrap().and_hms_opt(9, 0, 0).unwrap(),
            open: Decimal::from(close),
            high: Decimal::from(close + 5),
            low: Decimal::from(close - 5),
            close: Decimal::from(close),
            volume: 10,
            open_interest: None,
            session: Session::Day,
        }
    }

    #[test]
    fn golden_cross_opens_a_long_when_flat() {
        let mut strat = SmaCrossover::new(2, 3, "TX".into(), 1);
        let mut ctx = StrategyContext::new(50);
        let closes = [20_000, 20_000, 20_000, 19_900, 20_200];
        let mut any_buy = false;
        for (i, &c) in closes.iter().enumerate() {
            ctx.push_bar(bar(i as u32 + 1, c));
            strat.on_bar(&mut ctx).unwrap();
            if !ctx.drain_orders().is_empty() {
                any_buy = true;
            }
        }
        assert!(any_buy, "golden cross should have queued a buy order");
    }
}
