//! CommissionModel — per-contract commission and notional-based tax.

use rust_decimal::Decimal;

pub const DEFAULT_COMMISSION_PER_CONTRACT: &str = "60";
pub const DEFAULT_TAX_RATE: &str = "0.00002";

/// Pure-function cost model for Taiwan futures trading costs.
#[derive(Debug, Clone)]
pub struct CommissionModel {
    pub commission_per_contract: Decimal,
    pub tax_rate: Decimal,
}

impl Default for CommissionModel {
    fn default() -> Self {
        Self {
            commission_per_contract: DEFAULT_COMMISSION_PER_CONTRACT.parse().unwrap(),
            tax_rate: DEFAULT_TAX_RATE.parse().unwrap(),
        }
    }
}

impl CommissionModel {
    pub fn new(commission_per_contract: Decimal, tax_rate: Decimal) -> Self {
        Self {
            commission_per_contract,
            tax_rate,
        }
    }

    /// Commission for trading `quantity` contracts.
    pub fn commission(&self, quantity: u32) -> Decimal {
        self.commission_per_contract * Decimal::from(quantity)
    }

    /// Tax on the notional value of the trade.
    pub fn tax(&self, notional_value: Decimal) -> Decimal {
        notional_value * self.tax_rate
    }

    pub fn total_cost(&self, quantity: u32, notional_value: Decimal) -> Decimal {
        self.commission(quantity) + self.tax(notional_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_commission_is_60_per_contract() {
        let m = CommissionModel::default();
        assert_eq!(m.commission(3), Decimal::from(180));
    }

    #[test]
    fn tax_is_notional_times_rate() {
        let m = CommissionModel::default();
        let notional = Decimal::from(20_021) * Decimal::from(200);
        let expected = notional * Decimal::new(2, 5); // 0.00002
        assert_eq!(m.tax(notional), expected);
    }

    #[test]
    fn total_cost_sums_both() {
        let m = CommissionModel::default();
        let notional = Decimal::from(4_000_000);
        assert_eq!(m.total_cost(1, notional), m.commission(1) + m.tax(notional));
    }
}
