//! Configuration validation and strategy resolution.
//!
//! Strategy parameters resolve in layers: the preset named in `[strategy]`,
//! then explicit `[strategy]` keys, then `[strategy.call]` / `[strategy.put]`
//! keys for that contract kind.

use crate::domain::error::AlgoError;
use crate::domain::strategy::{Preset, StrategyBook, StrategyConfig};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_MAX_TABLES: usize = 100;
pub const DEFAULT_OUTPUT_DIR: &str = "results";

const STRATEGY: &str = "strategy";
const CALL_SECTION: &str = "strategy.call";
const PUT_SECTION: &str = "strategy.put";

/// Check everything a `run` or `contract` invocation reads.
pub fn validate_run_config(config: &dyn ConfigPort) -> Result<(), AlgoError> {
    data_dir(config)?;
    max_tables(config)?;
    strategy_book(config)?;
    Ok(())
}

pub fn data_dir(config: &dyn ConfigPort) -> Result<String, AlgoError> {
    config
        .get_string("data", "dir")
        .filter(|dir| !dir.trim().is_empty())
        .ok_or_else(|| AlgoError::ConfigMissing {
            section: "data".to_string(),
            key: "dir".to_string(),
        })
}

pub fn max_tables(config: &dyn ConfigPort) -> Result<usize, AlgoError> {
    if !config.has_key("data", "max_tables") {
        return Ok(DEFAULT_MAX_TABLES);
    }
    // Unparseable values fall back to the 0 default and are rejected with it.
    match config.get_usize("data", "max_tables", 0) {
        0 => Err(invalid(
            "data",
            "max_tables",
            "max_tables must be a positive integer",
        )),
        value => Ok(value),
    }
}

pub fn output_dir(config: &dyn ConfigPort) -> String {
    config
        .get_string("report", "output_dir")
        .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string())
}

pub fn strategy_book(config: &dyn ConfigPort) -> Result<StrategyBook, AlgoError> {
    let base = resolve_section(config, STRATEGY, StrategyConfig::default())?;
    Ok(StrategyBook {
        base,
        call: resolve_section(config, CALL_SECTION, base)?,
        put: resolve_section(config, PUT_SECTION, base)?,
    })
}

fn resolve_section(
    config: &dyn ConfigPort,
    section: &str,
    inherited: StrategyConfig,
) -> Result<StrategyConfig, AlgoError> {
    let start = match config.get_string(section, "preset") {
        Some(name) => name.parse::<Preset>().map_err(|e| in_section(e, section))?.config(),
        None => inherited,
    };

    Ok(StrategyConfig {
        use_trend_filter: bool_key(config, section, "use_trend_filter", start.use_trend_filter)?,
        allow_reversal: bool_key(config, section, "allow_reversal", start.allow_reversal)?,
        profit_target_pct: profit_target_key(config, section, start.profit_target_pct)?,
    })
}

/// A present key must parse; only an absent one inherits `default`.
fn bool_key(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: bool,
) -> Result<bool, AlgoError> {
    if !config.has_key(section, key) {
        return Ok(default);
    }
    // A parsed value ignores the default, so the two reads only differ on junk.
    let value = config.get_bool(section, key, true);
    if value != config.get_bool(section, key, false) {
        return Err(invalid(section, key, &format!("{key} must be true or false")));
    }
    Ok(value)
}

fn profit_target_key(
    config: &dyn ConfigPort,
    section: &str,
    default: f64,
) -> Result<f64, AlgoError> {
    const KEY: &str = "profit_target_pct";
    if !config.has_key(section, KEY) {
        return Ok(default);
    }
    let pct = config.get_double(section, KEY, f64::NAN);
    if !(pct > 0.0 && pct < 1.0) {
        return Err(invalid(
            section,
            KEY,
            "profit_target_pct must be a number between 0 and 1 (exclusive)",
        ));
    }
    Ok(pct)
}

fn invalid(section: &str, key: &str, reason: &str) -> AlgoError {
    AlgoError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn in_section(err: AlgoError, section: &str) -> AlgoError {
    match err {
        AlgoError::ConfigInvalid { key, reason, .. } => AlgoError::ConfigInvalid {
            section: section.to_string(),
            key,
            reason,
        },
        other => other,
    }
}
