//! Backtest, risk, and system configuration — loaded from an optional TOML
//! file and overridden by environment variables.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BacktestSettings {
    pub initial_capital: Decimal,
    pub commission_per_contract: Decimal,
    pub tax_rate: Decimal,
    pub slippage_ticks: u32,
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            initial_capital: Decimal::from(1_000_000),
            commission_per_contract: Decimal::from(60),
            tax_rate: Decimal::new(2, 5), // 0.00002
            slippage_ticks: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RiskSettings {
    pub max_position_contracts: u32,
    pub max_drawdown_pct: Decimal,
    pub max_daily_loss: Decimal,
    pub max_total_exposure_pct: Decimal,
    pub stop_loss_points: Option<Decimal>,
    pub take_profit_points: Option<Decimal>,
    pub trailing_stop_points: Option<Decimal>,
    pub time_stop_bars: Option<usize>,
    pub auto_close_before_session_end: bool,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            max_position_contracts: 10,
            max_drawdown_pct: Decimal::new(10, 2),
            max_daily_loss: Decimal::from(100_000),
            max_total_exposure_pct: Decimal::new(5, 1),
            stop_loss_points: None,
            take_profit_points: None,
            trailing_stop_points: None,
            time_stop_bars: None,
            auto_close_before_session_end: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Backtest,
    Paper,
    Live,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemSettings {
    pub mode: RunMode,
    pub data_dir: String,
    pub log_level: String,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            mode: RunMode::Backtest,
            data_dir: "./data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub backtest: BacktestSettings,
    pub risk: RiskSettings,
    pub system: SystemSettings,
}

impl Settings {
    /// Load defaults, overlay an optional TOML file, then overlay environment
    /// variables under the `TXF_BT_*` / `TXF_RISK_*` / `TXF_*` prefixes.
    pub fn load(toml_path: Option<&str>) -> Result<Self, EngineError> {
        let mut settings = match toml_path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .map_err(|e| EngineError::Config(format!("reading {path}: {e}")))?;
                toml::from_str(&contents).map_err(|e| EngineError::Config(format!("parsing {path}: {e}")))?
            }
            None => Settings::default(),
        };
        settings.apply_env_overrides();
        Ok(settings)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("TXF_BT_INITIAL_CAPITAL") {
            if let Ok(d) = v.parse() {
                self.backtest.initial_capital = d;
            }
        }
        if let Ok(v) = std::env::var("TXF_BT_SLIPPAGE_TICKS") {
            if let Ok(d) = v.parse() {
                self.backtest.slippage_ticks = d;
            }
        }
        if let Ok(v) = std::env::var("TXF_RISK_MAX_POSITION_CONTRACTS") {
            if let Ok(d) = v.parse() {
                self.risk.max_position_contracts = d;
            }
        }
        if let Ok(v) = std::env::var("TXF_RISK_MAX_DAILY_LOSS") {
            if let Ok(d) = v.parse() {
                self.risk.max_daily_loss = d;
            }
        }
        if let Ok(v) = std::env::var("TXF_LOG_LEVEL") {
            self.system.log_level = v;
        }
        if let Ok(v) = std::env::var("TXF_DATA_DIR") {
            self.system.data_dir = v;
        }
    }
}
