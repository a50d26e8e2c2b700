//! Strategy parameters for the per-contract state machine.
//!
//! One parameterized strategy covers every contract kind. The presets name
//! the two variants that exist in practice: the trend-gated reversal strategy
//! with a 0.5% trailing target, and the fixed 10% target without trend filter
//! or reversal.

use crate::domain::error::AlgoError;
use crate::domain::table::ContractKind;
use std::fmt;
use std::str::FromStr;

/// Steps with a lower index are never evaluated.
pub const WARMUP_STEPS: usize = 30;

/// Quantity assigned on the first entry of a contract run.
pub const DEFAULT_QUANTITY: u32 = 75;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyConfig {
    pub use_trend_filter: bool,
    pub allow_reversal: bool,
    pub profit_target_pct: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Preset::TrendReversal.config()
    }
}

impl StrategyConfig {
    pub fn long_target(&self, entry_price: f64) -> f64 {
        entry_price * (1.0 + self.profit_target_pct)
    }

    pub fn short_target(&self, entry_price: f64) -> f64 {
        entry_price * (1.0 - self.profit_target_pct)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    TrendReversal,
    FixedTarget,
}

impl Preset {
    pub fn config(self) -> StrategyConfig {
        match self {
            Preset::TrendReversal => StrategyConfig {
                use_trend_filter: true,
                allow_reversal: true,
                profit_target_pct: 0.005,
            },
            Preset::FixedTarget => StrategyConfig {
                use_trend_filter: false,
                allow_reversal: false,
                profit_target_pct: 0.10,
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::TrendReversal => write!(f, "trend_reversal"),
            Preset::FixedTarget => write!(f, "fixed_target"),
        }
    }
}

impl FromStr for Preset {
    type Err = AlgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trend_reversal" => Ok(Preset::TrendReversal),
            "fixed_target" => Ok(Preset::FixedTarget),
            other => Err(AlgoError::ConfigInvalid {
                section: "strategy".into(),
                key: "preset".into(),
                reason: format!("unknown preset {other:?}"),
            }),
        }
    }
}

/// Strategy parameters per contract kind, with a fallback for columns that
/// are neither calls nor puts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StrategyBook {
    pub base: StrategyConfig,
    pub call: StrategyConfig,
    pub put: StrategyConfig,
}

impl StrategyBook {
    pub fn uniform(config: StrategyConfig) -> Self {
        Self {
            base: config,
            call: config,
            put: config,
        }
    }

    pub fn for_column(&self, column: &str) -> &StrategyConfig {
        match ContractKind::from_column(column) {
            Some((ContractKind::Call, _)) => &self.call,
            Some((ContractKind::Put, _)) => &self.put,
            None => &self.base,
        }
    }
}
