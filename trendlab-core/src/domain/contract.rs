//! ContractSpec and ContractRegistry — symbol → tick/margin/multiplier lookup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::EngineError;

/// Trading session time boundaries, Taiwan local time (UTC+8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    pub start_hour: u32,
    pub start_minute: u32,
    pub end_hour: u32,
    pub end_minute: u32,
}

pub const TX_DAY: SessionWindow = SessionWindow {
    start_hour: 8,
    start_minute: 45,
    end_hour: 13,
    end_minute: 45,
};

pub const TX_NIGHT: SessionWindow = SessionWindow {
    start_hour: 15,
    start_minute: 0,
    end_hour: 5,
    end_minute: 0,
};

/// Immutable specification for a futures contract family, keyed by base symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractSpec {
    pub symbol: String,
    pub multiplier: Decimal,
    pub tick_size: Decimal,
    pub initial_margin: Decimal,
    pub maintenance_margin: Decimal,
    pub day_session: SessionWindow,
    pub night_session: Option<SessionWindow>,
}

impl ContractSpec {
    /// Currency value of a one-tick move per contract.
    pub fn tick_value(&self) -> Decimal {
        self.tick_size * self.multiplier
    }

    pub fn tx() -> Self {
        ContractSpec {
            symbol: "TX".to_string(),
            multiplier: Decimal::from(200),
            tick_size: Decimal::ONE,
            initial_margin: Decimal::from(184_000),
            maintenance_margin: Decimal::from(141_000),
            day_session: TX_DAY,
            night_session: Some(TX_NIGHT),
        }
    }

    pub fn mtx() -> Self {
        ContractSpec {
            symbol: "MTX".to_string(),
            multiplier: Decimal::from(50),
            tick_size: Decimal::ONE,
            initial_margin: Decimal::from(46_000),
            maintenance_margin: Decimal::from(35_250),
            day_session: TX_DAY,
            night_session: Some(TX_NIGHT),
        }
    }
}

/// Lookup table resolving a full contract code (e.g. `TXFG5`) to its base
/// symbol's spec by longest matching registered prefix.
#[derive(Debug, Clone)]
pub struct ContractRegistry {
    specs: HashMap<String, ContractSpec>,
}

impl Default for ContractRegistry {
    fn default() -> Self {
        let mut specs = HashMap::new();
        specs.insert("TX".to_string(), ContractSpec::tx());
        specs.insert("MTX".to_string(), ContractSpec::mtx());
        Self { specs }
    }
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) a contract spec.
    pub fn register(&mut self, spec: ContractSpec) {
        self.specs.insert(spec.symbol.clone(), spec);
    }

    /// Resolve a full symbol to its spec by longest matching registered prefix.
    pub fn get(&self, symbol: &str) -> Result<&ContractSpec, EngineError> {
        let base = self.resolve_base_symbol(symbol);
        self.specs
            .get(&base)
            .ok_or_else(|| EngineError::ContractNotFound(symbol.to_string()))
    }

    fn resolve_base_symbol(&self, symbol: &str) -> String {
        let mut prefixes: Vec<&String> = self.specs.keys().collect();
        prefixes.sort_by_key(|p| std::cmp::Reverse(p.len()));
        for prefix in prefixes {
            if symbol.starts_with(prefix.as_str()) {
                return prefix.clone();
            }
        }
        symbol.to_string()
    }
}
