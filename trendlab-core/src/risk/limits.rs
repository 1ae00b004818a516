//! LimitChecker — position-size and total-exposure limit rules.

use rust_decimal::Decimal;

use crate::domain::{OrderRequest, PortfolioState};

pub struct LimitChecker {
    pub max_position_contracts: u32,
    pub max_total_exposure_pct: Decimal,
}

impl LimitChecker {
    pub fn new(max_position_contracts: u32, max_total_exposure_pct: Decimal) -> Self {
        Self {
            max_position_contracts,
            max_total_exposure_pct,
        }
    }

    /// Reject if the resulting net position would exceed `max_position_contracts`.
    pub fn check_position_limit(&self, order: &OrderRequest, portfolio: &PortfolioState) -> Option<String> {
        let current = portfolio.positions.get(&order.symbol);
        let new_qty = match current {
            Some(pos) if pos.side == order.side => pos.quantity + order.quantity,
            Some(pos) => (pos.quantity as i64 - order.quantity as i64).unsigned_abs() as u32,
            None => order.quantity,
        };

        if new_qty > self.max_position_contracts {
            Some(format!(
                "Position limit exceeded: {new_qty} > {} contracts",
                self.max_position_contracts
            ))
        } else {
            None
        }
    }

    /// Reject if margin usage as a fraction of equity would exceed the exposure cap.
    pub fn check_total_exposure(&self, portfolio: &PortfolioState) -> Option<String> {
        if portfolio.total_equity <= Decimal::ZERO {
            return Some("Total equity is non-positive".to_string());
        }
        let pct = portfolio.used_margin / portfolio.total_equity;
        if pct > self.max_total_exposure_pct {
            Some(format!(
                "Exposure limit exceeded: {pct} > {}",
                self.max_total_exposure_pct
            ))
        } else {
            None
        }
    }
}
