//! Full-engine-loop reproductions scenarios that need the real scheduling
//! order rather than a single module in isolation: a strategy that submits
//! on one bar must not see its order fill before the next bar opens.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use trendlab_core::commission::CommissionModel;
use trendlab_core::domain::{Bar, ContractRegistry, Session};
use trendlab_core::engine::{BacktestEngine, EngineConfig};
use trendlab_core::risk::{RiskManagerConfig, StopConfig};
use trendlab_core::{EngineError, Strategy, StrategyContext};

fn bar(day: u32, open: i64, high: i64, low: i64, close: i64) -> Bar {
    Bar {
        symbol: "TX".into(),
        timestamp: NaiveDate::from_ymd_opt(2024, 1, day).unwrap().and_hms_opt(9, 0, 0).unwrap(),
        open: Decimal::from(open),
        high: Decimal::from(high),
        low: Decimal::from(low),
        close: Decimal::from(close),
        volume: 100,
        open_interest: None,
        session: Session::Day,
    }
}

fn engine(initial_capital: i64) -> BacktestEngine {
    BacktestEngine::new(
        EngineConfig {
            initial_capital: Decimal::from(initial_capital),
            slippage_ticks: 1,
            max_history: 50,
            auto_close_before_session_end: false,
        },
        ContractRegistry::new(),
        CommissionModel::default(),
        RiskManagerConfig {
            stops: StopConfig::default(),
            max_position_contracts: 10,
            max_total_exposure_pct: Decimal::new(9, 1),
            max_daily_loss: Decimal::from(1_000_000_000i64),
            max_drawdown_pct: Decimal::new(9, 1),
        },
    )
}

/// Buys on the first bar it sees, sells on the Nth bar it sees (1-indexed by
/// call count), and never trades again.
struct BuyThenSellOnBar {
    calls: usize,
    sell_on_call: usize,
    bought: bool,
    sold: bool,
}

impl Strategy for BuyThenSellOnBar {
    fn on_bar(&mut self, ctx: &mut StrategyContext) -> Result<(), EngineError> {
        self.calls += 1;
        if !self.bought {
            ctx.buy_market("TX", 1);
            self.bought = true;
        } else if self.calls == self.sell_on_call && !self.sold {
            ctx.close_position("TX");
            self.sold = true;
        }
        Ok(())
    }
}

/// S1 — single round-trip, long wins; the sell is submitted on the last bar
/// of the run so it never gets a chance to fill before the run ends.
#[test]
fn s1_long_position_remains_open_with_unrealized_pnl_at_run_end() {
    let mut eng = engine(1_000_000);
    let bars = vec![
        bar(1, 20_000, 20_050, 19_990, 20_010),
        bar(2, 20_020, 20_120, 20_000, 20_100),
        bar(3, 20_090, 20_150, 20_050, 20_120),
    ];
    let mut strat = BuyThenSellOnBar { calls: 0, sell_on_call: 3, bought: false, sold: false };
    let result = eng.run(&bars, &mut strat).unwrap();

    assert_eq!(result.equity_curve.len(), 3);
    // Buy submitted on bar 1 cannot fill until bar 2's open: equity on bar 1
    // reflects no position yet.
    assert_eq!(result.equity_curve[0], Decimal::from(1_000_000));

    // The sell submitted on bar 3 has no following bar in this run, so the
    // position is still open; equity reflects unrealized P&L at bar 3 close.
    // Fill price = 20_020 + 1 = 20_021, commission 60, tax on notional.
    let fill_price = Decimal::from(20_021);
    let notional = fill_price * Decimal::from(200);
    let commission = CommissionModel::default();
    let tax = commission.tax(notional);
    let expected_cash = Decimal::from(1_000_000) - Decimal::from(60) - tax;
    let unrealized = (Decimal::from(20_120) - fill_price) * Decimal::from(200);
    let expected_equity = expected_cash + unrealized;

    assert_eq!(result.final_equity, expected_equity);
    assert!(result.trades.is_empty(), "sell never got a following bar to fill against");
}

/// S2 — full close round-trip: add a fourth bar so the sell submitted on
/// bar 3 fills on bar 4's open, realizing the trade.
#[test]
fn s2_full_close_round_trip_records_one_trade() {
    let mut eng = engine(1_000_000);
    let bars = vec![
        bar(1, 20_000, 20_050, 19_990, 20_010),
        bar(2, 20_020, 20_120, 20_000, 20_100),
        bar(3, 20_090, 20_150, 20_050, 20_120),
        bar(4, 20_110, 20_200, 20_080, 20_150),
    ];
    let mut strat = BuyThenSellOnBar { calls: 0, sell_on_call: 3, bought: false, sold: false };
    let result = eng.run(&bars, &mut strat).unwrap();

    assert_eq!(result.trades.len(), 1);
    let trade = &result.trades[0];
    assert_eq!(trade.entry_price, Decimal::from(20_021));
    assert_eq!(trade.exit_price, Decimal::from(20_109));
    assert_eq!(trade.quantity, 1);
    assert_eq!(trade.bars_held, 3);
    assert_eq!(trade.pnl, Decimal::from((20_109 - 20_021) * 200));
    assert_eq!(result.equity_curve.len(), 4);
}

/// A strategy that never trades must leave equity perfectly flat across the
/// whole run — nothing should touch cash without a fill driving it.
#[test]
fn flat_run_never_moves_equity() {
    struct NeverTrade;
    impl Strategy for NeverTrade {
        fn on_bar(&mut self, _ctx: &mut StrategyContext) -> Result<(), EngineError> {
            Ok(())
        }
    }

    let mut eng = engine(500_000);
    let bars = vec![
        bar(1, 20_000, 20_050, 19_990, 20_010),
        bar(2, 20_020, 20_120, 20_000, 20_100),
        bar(3, 20_090, 20_150, 20_050, 20_120),
    ];
    let mut strat = NeverTrade;
    let result = eng.run(&bars, &mut strat).unwrap();
    assert!(result.equity_curve.iter().all(|e| *e == Decimal::from(500_000)));
    assert!(result.trades.is_empty());
}
