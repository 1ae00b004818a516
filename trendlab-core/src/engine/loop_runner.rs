//! BacktestEngine — drives the fixed seven-step per-bar protocol.
//!
//! Steps, in order, for each bar:
//! 1. Advance clock, stamp bar index into the position manager.
//! 2. `matching.on_bar` fills orders queued during the prior bar.
//! 3. Mark the position to the bar's close.
//! 4. `risk_mgr.on_bar` — forced closes go straight to matching.
//! 5. Push the bar into the strategy context.
//! 6. `strategy.on_bar` — submitted orders pass through pre-trade check.
//! 7. Snapshot equity.
//!
//! An order submitted in step 6 of bar N cannot fill before step 2 of bar
//! N+1 — that ordering is the engine's only look-ahead barrier.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::domain::{Bar, ContractRegistry, Session, TradeRecord};
use crate::error::EngineError;
use crate::matching::MatchingEngine;
use crate::position_manager::PositionManager;
use crate::risk::{RiskManager, RiskManagerConfig};
use crate::strategy::{Strategy, StrategyContext};

use super::clock::{Clock, SimulatedClock};
use super::events::{EventBus, EventKind, EventPayload};

pub struct EngineConfig {
    pub initial_capital: Decimal,
    pub slippage_ticks: u32,
    pub max_history: usize,
    pub auto_close_before_session_end: bool,
}

#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub equity_curve: Vec<Decimal>,
    pub trades: Vec<TradeRecord>,
    pub final_equity: Decimal,
    pub bar_count: usize,
    pub total_commission: Decimal,
    pub total_tax: Decimal,
}

pub struct BacktestEngine {
    matching: MatchingEngine,
    position_mgr: PositionManager,
    risk_mgr: RiskManager,
    context: StrategyContext,
    clock: SimulatedClock,
    events: EventBus,
    auto_close_before_session_end: bool,
    last_session: Option<Session>,
    initialized: bool,
}

impl BacktestEngine {
    pub fn new(
        config: EngineConfig,
        contracts: ContractRegistry,
        commission: crate::commission::CommissionModel,
        risk_config: RiskManagerConfig,
    ) -> Self {
        Self {
            matching: MatchingEngine::new(contracts.clone(), commission, config.slippage_ticks),
            position_mgr: PositionManager::new(config.initial_capital, contracts.clone()),
            risk_mgr: RiskManager::new(risk_config, contracts),
            context: StrategyContext::new(config.max_history),
            clock: SimulatedClock::new(),
            events: EventBus::new(),
            auto_close_before_session_end: config.auto_close_before_session_end,
            last_session: None,
            initialized: false,
        }
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Run every bar from `bars` (already in ascending timestamp order) through
    /// `strategy`.
    pub fn run(&mut self, bars: &[Bar], strategy: &mut dyn Strategy) -> Result<BacktestResult, EngineError> {
        strategy.on_init(&mut self.context)?;

        for (index, bar) in bars.iter().enumerate() {
            let next_session = bars.get(index + 1).map(|b| self.clock.session_for(b.timestamp));
            self.run_bar(index, bar, next_session, strategy)?;
        }

        strategy.on_stop(&mut self.context)?;

        let total_commission: Decimal = self.position_mgr.trade_records().iter().map(|t| t.commission).sum();
        let total_tax: Decimal = self.position_mgr.trade_records().iter().map(|t| t.tax).sum();

        Ok(BacktestResult {
            equity_curve: self.position_mgr.equity_curve().to_vec(),
            trades: self.position_mgr.trade_records().to_vec(),
            final_equity: self.position_mgr.total_equity(),
            bar_count: bars.len(),
            total_commission,
            total_tax,
        })
    }

    fn run_bar(
        &mut self,
        index: usize,
        bar: &Bar,
        next_session: Option<Session>,
        strategy: &mut dyn Strategy,
    ) -> Result<(), EngineError> {
        // Step 1
        self.clock.advance_to(bar.timestamp);
        self.position_mgr.set_bar_index(index);

        self.handle_session_transition(bar);

        // Step 2
        let fills = self.matching.on_bar(bar)?;
        for fill in &fills {
            self.position_mgr.apply_fill(fill)?;
            self.events.publish(EventKind::OrderFilled, EventPayload::Text(fill.order_id.clone()));
            self.events.publish(EventKind::PositionChanged, EventPayload::Text(fill.symbol.clone()));
            debug!(bar = index, order_id = %fill.order_id, price = %fill.price, "order filled");
        }

        // Step 3
        self.position_mgr.mark_to_market(&bar.symbol, bar.close)?;

        // Step 4
        let position = self.position_mgr.get_position(&bar.symbol).cloned();
        let bars_held = position.as_ref().map(|p| index.saturating_sub(p.entry_bar_index)).unwrap_or(0);
        let portfolio = self.position_mgr.portfolio_state();
        let (forced_orders, warnings) = self.risk_mgr.on_bar(bar, position.as_ref(), bars_held, &portfolio);
        for warning in &warnings {
            warn!(bar = index, "{warning}");
            self.events.publish(EventKind::RiskBreach, EventPayload::Text(warning.clone()));
        }
        for order in forced_orders {
            self.matching.submit(order);
        }

        let current_session = self.clock.session_for(bar.timestamp);
        let precedes_session_end = match next_session {
            Some(s) => s != current_session,
            None => true,
        };
        if self.auto_close_before_session_end && precedes_session_end {
            if let Some(pos) = self.position_mgr.get_position(&bar.symbol) {
                if pos.quantity > 0 {
                    self.matching.submit(crate::domain::OrderRequest::market(
                        format!("auto-close-{index}"),
                        bar.symbol.clone(),
                        pos.side.opposite(),
                        pos.quantity,
                    ));
                }
            }
        }

        // Step 5
        self.context.set_position(self.position_mgr.get_position(&bar.symbol).cloned());
        self.context.push_bar(bar.clone());

        // Step 6
        if !self.initialized {
            self.initialized = true;
            self.risk_mgr.initialize(portfolio.total_equity);
        }
        strategy.on_bar(&mut self.context)?;
        for order in self.context.drain_orders() {
            let portfolio = self.position_mgr.portfolio_state();
            match self.risk_mgr.check_pre_trade(&order, &portfolio) {
                Some(reason) => {
                    info!(bar = index, order_id = %order.id, reason = %reason, "order rejected");
                    self.events.publish(EventKind::OrderRejected, EventPayload::Text(reason));
                }
                None => {
                    self.events.publish(EventKind::OrderSubmitted, EventPayload::Text(order.id.clone()));
                    self.matching.submit(order);
                }
            }
        }

        self.risk_mgr.update_daily_pnl(self.position_mgr.realized_pnl());

        // Step 7
        self.position_mgr.snapshot_equity();
        Ok(())
    }

    fn handle_session_transition(&mut self, bar: &Bar) {
        let session = self.clock.session_for(bar.timestamp);
        if self.last_session != Some(session) {
            if self.last_session.is_some() {
                self.events.publish(EventKind::SessionEnd, EventPayload::None);
            }
            self.events.publish(EventKind::SessionStart, EventPayload::None);
            let equity = self.position_mgr.total_equity();
            self.risk_mgr.on_session_start(equity);
            self.last_session = Some(session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commission::CommissionModel;
    use crate::risk::StopConfig;
    use chrono::NaiveDate;

    fn bar(day: u32, open: i64, high: i64, low: i64, close: i64) -> Bar {
        Bar {
            symbol: "TX".into(),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, day).unwrap().and_hms_opt(9, 0, 0).unwrap(),
            open: Decimal::from(open),
            high: Decimal::from(high),
            low: Decimal::from(low),
            close: Decimal::from(close),
            volume: 10,
            open_interest: None,
            session: Session::Day,
        }
    }

    struct NoOpStrategy;
    impl Strategy for NoOpStrategy {
        fn on_bar(&mut self, _ctx: &mut StrategyContext) -> Result<(), EngineError> {
            Ok(())
        }
    }

    struct BuyOnFirstBar {
        bought: bool,
    }
    impl Strategy for BuyOnFirstBar {
        fn on_bar(&mut self, ctx: &mut StrategyContext) -> Result<(), EngineError> {
            if !self.bought && ctx.is_flat() {
                ctx.buy_market("TX", 1);
                self.bought = true;
            }
            Ok(())
        }
    }

    fn engine() -> BacktestEngine {
        BacktestEngine::new(
            EngineConfig {
                initial_capital: Decimal::from(1_000_000),
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

    #[test]
    fn flat_strategy_keeps_equity_unchanged() {
        let mut eng = engine();
        let bars = vec![bar(2, 20_000, 20_050, 19_950, 20_010), bar(3, 20_010, 20_060, 19_960, 20_020)];
        let mut strat = NoOpStrategy;
        let result = eng.run(&bars, &mut strat).unwrap();
        assert_eq!(result.final_equity, Decimal::from(1_000_000));
        assert_eq!(result.equity_curve.len(), 2);
        assert!(result.trades.is_empty());
    }

    #[test]
    fn order_submitted_on_bar_n_does_not_fill_until_bar_n_plus_1() {
        let mut eng = engine();
        let bars = vec![
            bar(2, 20_000, 20_050, 19_950, 20_010),
            bar(3, 20_010, 20_060, 19_960, 20_020),
            bar(4, 20_020, 20_070, 19_970, 20_030),
        ];
        let mut strat = BuyOnFirstBar { bought: false };
        let result = eng.run(&bars, &mut strat).unwrap();
        // First bar: order submitted but cannot fill that same bar -> equity unchanged.
        assert_eq!(result.equity_curve[0], Decimal::from(1_000_000));
        // Second bar: fill happens at bar 2's open plus slippage, so equity moves.
        assert_ne!(result.equity_curve[1], Decimal::from(1_000_000));
    }
}
