//! Bar — an OHLCV summary over a fixed time window.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which Taiwan trading session a bar's timestamp falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Session {
    Day,
    Night,
}

/// An immutable OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: String,
    pub timestamp: NaiveDateTime,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
    pub open_interest: Option<u64>,
    pub session: Session,
}

impl Bar {
    /// `low <= min(open, close) <= max(open, close) <= high`.
    pub fn is_sane(&self) -> bool {
        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        self.low <= body_low && body_high <= self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(open: i64, high: i64, low: i64, close: i64) -> Bar {
        Bar {
            symbol: "TX".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            open: Decimal::from(open),
            high: Decimal::from(high),
            low: Decimal::from(low),
            close: Decimal::from(close),
            volume: 100,
            open_interest: None,
            session: Session::Day,
        }
    }

    #[test]
    fn sane_bar_passes() {
        assert!(bar(100, 110, 90, 105).is_sane());
    }

    #[test]
    fn high_below_body_fails() {
        assert!(!bar(100, 101, 90, 105).is_sane());
    }

    #[test]
    fn low_above_body_fails() {
        assert!(!bar(100, 110, 99, 95).is_sane());
    }
}
