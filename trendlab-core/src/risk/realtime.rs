//! RealtimeRiskMonitor — peak-drawdown, daily-loss, and margin-call checks.

use rust_decimal::Decimal;

use crate::domain::PortfolioState;

#[derive(Debug, Clone)]
pub struct RealtimeRiskMonitor {
    max_drawdown_pct: Decimal,
    max_daily_loss: Decimal,
    peak_equity: Decimal,
    session_start_equity: Decimal,
    trading_halted: bool,
}

impl RealtimeRiskMonitor {
    pub fn new(max_drawdown_pct: Decimal, max_daily_loss: Decimal) -> Self {
        Self {
            max_drawdown_pct,
            max_daily_loss,
            peak_equity: Decimal::ZERO,
            session_start_equity: Decimal::ZERO,
            trading_halted: false,
        }
    }

    pub fn initialize(&mut self, initial_equity: Decimal) {
        self.peak_equity = initial_equity;
        self.session_start_equity = initial_equity;
    }

    /// Update peak/drawdown/daily-loss/margin state; returns warning strings
    /// (empty if nothing breached this call).
    pub fn update(&mut self, portfolio: &PortfolioState) -> Vec<String> {
        let mut warnings = Vec::new();

        if portfolio.total_equity > self.peak_equity {
            self.peak_equity = portfolio.total_equity;
        }

        if self.peak_equity > Decimal::ZERO {
            let drawdown = (self.peak_equity - portfolio.total_equity) / self.peak_equity;
            if drawdown >= self.max_drawdown_pct {
                self.trading_halted = true;
                warnings.push(format!(
                    "DRAWDOWN BREACH: {drawdown} >= {}",
                    self.max_drawdown_pct
                ));
            }
        }

        for (symbol, pos) in &portfolio.positions {
            if pos.margin_required > Decimal::ZERO
                && pos.quantity > 0
                && portfolio.total_equity < portfolio.used_margin * Decimal::new(75, 2)
            {
                warnings.push(format!(
                    "MARGIN CALL: equity {} < maintenance margin for {symbol}",
                    portfolio.total_equity
                ));
            }
        }

        let daily_pnl = portfolio.total_equity - self.session_start_equity;
        if daily_pnl <= -self.max_daily_loss {
            self.trading_halted = true;
            warnings.push(format!(
                "DAILY LOSS LIMIT: {daily_pnl} <= -{}",
                self.max_daily_loss
            ));
        }

        warnings
    }

    pub fn is_trading_halted(&self) -> bool {
        self.trading_halted
    }

    pub fn should_force_close(&self) -> bool {
        self.trading_halted
    }

    /// Reset daily tracking at a session boundary.
    pub fn reset_session(&mut self, equity: Decimal) {
        self.session_start_equity = equity;
        self.trading_halted = false;
    }

    /// Current drawdown from peak. Fixed from the source, which always
    /// returned zero by subtracting peak from itself.
    pub fn current_drawdown_pct(&self, total_equity: Decimal) -> Decimal {
        if self.peak_equity <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.peak_equity - total_equity) / self.peak_equity
    }
}
