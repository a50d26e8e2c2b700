//! Technical indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorType`: Enum for indicator identity + parameters
//! - `IndicatorSeries`: A time series of indicator values, NaN where undefined
//! - `IndicatorSnapshot`: Every indicator the signal detector reads at one step
//!
//! All series are causal: the value at index i depends only on prices at
//! indices <= i.

pub mod ema;
pub mod macd;
pub mod rsi;

pub use ema::calculate_ema;
pub use macd::{calculate_macd, calculate_macd_default, MacdSeries};
pub use rsi::calculate_rsi;

pub const TREND_SPAN: usize = 200;
pub const RSI_PERIOD: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Ema(usize),
    Rsi(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<f64>,
}

/// Indicator readings for a single step. `rsi` and `trend_ema` are NaN until
/// their windows fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_hist: f64,
    pub rsi: f64,
    pub trend_ema: f64,
}

/// Compute one snapshot per price with the default MACD(12,26,9), RSI(14)
/// and EMA(200) trend filter.
pub fn compute_snapshots(prices: &[f64]) -> Vec<IndicatorSnapshot> {
    let macd = calculate_macd_default(prices);
    let rsi = calculate_rsi(prices, RSI_PERIOD);
    let trend = calculate_ema(prices, TREND_SPAN, TREND_SPAN);

    (0..prices.len())
        .map(|i| IndicatorSnapshot {
            ema_fast: macd.ema_fast[i],
            ema_slow: macd.ema_slow[i],
            macd: macd.line[i],
            macd_signal: macd.signal[i],
            macd_hist: macd.histogram[i],
            rsi: rsi.values[i],
            trend_ema: trend.values[i],
        })
        .collect()
}
