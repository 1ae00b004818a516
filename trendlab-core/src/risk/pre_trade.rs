//! PreTradeRiskCheck — validates an order before it reaches the matching queue.

use rust_decimal::Decimal;

use crate::domain::{ContractRegistry, OrderRequest, PortfolioState};
use crate::error::EngineError;

use super::limits::LimitChecker;

pub struct PreTradeRiskCheck {
    contracts: ContractRegistry,
    limits: LimitChecker,
    max_daily_loss: Decimal,
    daily_realized_pnl: Decimal,
}

impl PreTradeRiskCheck {
    pub fn new(contracts: ContractRegistry, limits: LimitChecker, max_daily_loss: Decimal) -> Self {
        Self {
            contracts,
            limits,
            max_daily_loss,
            daily_realized_pnl: Decimal::ZERO,
        }
    }

    /// Run every check in order; return the first rejection reason, if any.
    pub fn check(&self, order: &OrderRequest, portfolio: &PortfolioState) -> Result<Option<String>, EngineError> {
        if let Some(reason) = self.check_margin(order, portfolio)? {
            return Ok(Some(reason));
        }
        if let Some(reason) = self.limits.check_position_limit(order, portfolio) {
            return Ok(Some(reason));
        }
        if let Some(reason) = self.limits.check_total_exposure(portfolio) {
            return Ok(Some(reason));
        }
        if let Some(reason) = self.check_daily_loss() {
            return Ok(Some(reason));
        }
        Ok(None)
    }

    pub fn update_daily_pnl(&mut self, realized_pnl: Decimal) {
        self.daily_realized_pnl = realized_pnl;
    }

    pub fn reset_daily(&mut self) {
        self.daily_realized_pnl = Decimal::ZERO;
    }

    fn check_margin(&self, order: &OrderRequest, portfolio: &PortfolioState) -> Result<Option<String>, EngineError> {
        let spec = self.contracts.get(&order.symbol)?;
        if let Some(existing) = portfolio.positions.get(&order.symbol) {
            if existing.side != order.side {
                return Ok(None); // reducing/closing requires no extra margin
            }
        }
        let required = spec.initial_margin * Decimal::from(order.quantity);
        if required > portfolio.available_margin {
            return Ok(Some(format!(
                "Insufficient margin: need {required}, available {}",
                portfolio.available_margin
            )));
        }
        Ok(None)
    }

    fn check_daily_loss(&self) -> Option<String> {
        let daily_loss = -self.daily_realized_pnl;
        if daily_loss >= self.max_daily_loss {
            Some(format!(
                "Daily loss limit reached: {daily_loss} >= {}",
                self.max_daily_loss
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Side;
    use std::collections::HashMap;

    fn empty_portfolio(equity: Decimal) -> PortfolioState {
        PortfolioState {
            cash: equity,
            positions: HashMap::new(),
            total_equity: equity,
            used_margin: Decimal::ZERO,
            available_margin: equity,
            realized_pnl: Decimal::ZERO,
            unrealized_pnl: Decimal::ZERO,
        }
    }

    fn check() -> PreTradeRiskCheck {
        PreTradeRiskCheck::new(
            ContractRegistry::new(),
            LimitChecker::new(10, Decimal::new(5, 1)),
            Decimal::from(100_000),
        )
    }

    #[test]
    fn rejects_insufficient_margin() {
        let c = check();
        let order = OrderRequest::market("o".into(), "TX".into(), Side::Buy, 10);
        let pf = empty_portfolio(Decimal::from(500_000));
        let reason = c.check(&order, &pf).unwrap();
        assert!(reason.unwrap().contains("margin"));
    }

    #[test]
    fn accepts_well_margined_order() {
        let c = check();
        let order = OrderRequest::market("o".into(), "TX".into(), Side::Buy, 1);
        let pf = empty_portfolio(Decimal::from(1_000_000));
        assert!(c.check(&order, &pf).unwrap().is_none());
    }

    #[test]
    fn rejects_when_daily_loss_ceiling_hit() {
        let mut c = check();
        c.update_daily_pnl(Decimal::from(-120_000));
        let order = OrderRequest::market("o".into(), "TX".into(), Side::Buy, 1);
        let pf = empty_portfolio(Decimal::from(1_000_000));
        let reason = c.check(&order, &pf).unwrap();
        assert!(reason.unwrap().contains("Daily loss"));
    }

    #[test]
    fn reset_daily_clears_tracked_pnl() {
        let mut c = check();
        c.update_daily_pnl(Decimal::from(-120_000));
        c.reset_daily();
        let order = OrderRequest::market("o".into(), "TX".into(), Side::Buy, 1);
        let pf = empty_portfolio(Decimal::from(1_000_000));
        assert!(c.check(&order, &pf).unwrap().is_none());
    }
}
