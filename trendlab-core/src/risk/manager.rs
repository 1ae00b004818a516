//! RiskManager — composes limits, pre-trade checks, stops, and the realtime monitor
//! into the two entry points the engine loop calls each bar.

use rust_decimal::Decimal;

use crate::domain::{Bar, ContractRegistry, OrderRequest, PortfolioState, Position};

use super::limits::LimitChecker;
use super::pre_trade::PreTradeRiskCheck;
use super::realtime::RealtimeRiskMonitor;
use super::stops::{StopConfig, StopEngine};

pub struct RiskManagerConfig {
    pub stops: StopConfig,
    pub max_position_contracts: u32,
    pub max_total_exposure_pct: Decimal,
    pub max_daily_loss: Decimal,
    pub max_drawdown_pct: Decimal,
}

pub struct RiskManager {
    pre_trade: PreTradeRiskCheck,
    stops: StopEngine,
    realtime: RealtimeRiskMonitor,
}

impl RiskManager {
    pub fn new(config: RiskManagerConfig, contracts: ContractRegistry) -> Self {
        let limits = LimitChecker::new(config.max_position_contracts, config.max_total_exposure_pct);
        let pre_trade = PreTradeRiskCheck::new(contracts.clone(), limits, config.max_daily_loss);
        let stops = StopEngine::new(config.stops, contracts);
        let realtime = RealtimeRiskMonitor::new(config.max_drawdown_pct, config.max_daily_loss);
        Self { pre_trade, stops, realtime }
    }

    pub fn initialize(&mut self, initial_equity: Decimal) {
        self.realtime.initialize(initial_equity);
    }

    /// Reject an order before it enters the matching queue.
    pub fn check_pre_trade(&self, order: &OrderRequest, portfolio: &PortfolioState) -> Option<String> {
        match self.pre_trade.check(order, portfolio) {
            Ok(reason) => reason,
            Err(e) => Some(e.to_string()),
        }
    }

    /// Evaluate realtime breaches and stops for the bar just closed. Returns any
    /// forced-close orders the engine should submit for the next bar.
    ///
    /// If a halt is in force, this returns the forced-close order and does not
    /// consult the stop engine at all — a halted book must not let the trailing
    /// stop's extreme-price ratchet keep mutating underneath it.
    pub fn on_bar(&mut self, bar: &Bar, position: Option<&Position>, bars_held: usize, portfolio: &PortfolioState) -> (Vec<OrderRequest>, Vec<String>) {
        let warnings = self.realtime.update(portfolio);

        if self.realtime.should_force_close() {
            let mut orders = Vec::new();
            if let Some(pos) = position {
                if pos.quantity > 0 {
                    orders.push(OrderRequest::market(
                        format!("risk-halt-{}", bar.symbol),
                        bar.symbol.clone(),
                        pos.side.opposite(),
                        pos.quantity,
                    ));
                }
            }
            return (orders, warnings);
        }

        let mut orders = Vec::new();
        if let Some(order) = self.stops.on_bar(bar, position, bars_held) {
            orders.push(order);
        }
        (orders, warnings)
    }

    pub fn update_daily_pnl(&mut self, realized_pnl: Decimal) {
        self.pre_trade.update_daily_pnl(realized_pnl);
    }

    pub fn reset_stop_state(&mut self, symbol: &str) {
        self.stops.reset(symbol);
    }

    /// Called on a SESSION_START transition: rebases the daily-loss and
    /// drawdown-halt tracking for the new session (Open Question 4).
    pub fn on_session_start(&mut self, equity: Decimal) {
        self.pre_trade.reset_daily();
        self.realtime.reset_session(equity);
    }

    pub fn is_trading_halted(&self) -> bool {
        self.realtime.is_trading_halted()
    }
}
