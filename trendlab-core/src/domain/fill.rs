//! Fill — a confirmed trade execution, produced by the matching engine.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::order::Side;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub order_id: String,
    pub symbol: String,
    pub side: Side,
    pub price: Decimal,
    pub quantity: u32,
    pub commission: Decimal,
    pub tax: Decimal,
    pub timestamp: NaiveDateTime,
}

impl Fill {
    /// Notional value of the fill: `price * quantity * multiplier`.
    pub fn notional(&self, multiplier: Decimal) -> Decimal {
        self.price * Decimal::from(self.quantity) * multiplier
    }

    /// Total trading cost deducted from cash for this fill.
    pub fn total_cost(&self) -> Decimal {
        self.commission + self.tax
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_fill() -> Fill {
        Fill {
            order_id: "o1".into(),
            symbol: "TX".into(),
            side: Side::Buy,
            price: Decimal::from(20_021),
            quantity: 1,
            commission: Decimal::from(60),
            tax: Decimal::new(80084, 3),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 3)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn notional_uses_multiplier() {
        let f = sample_fill();
        assert_eq!(f.notional(Decimal::from(200)), Decimal::from(4_004_200));
    }

    #[test]
    fn total_cost_sums_commission_and_tax() {
        let f = sample_fill();
        assert_eq!(f.total_cost(), Decimal::from(60) + Decimal::new(80084, 3));
    }
}
