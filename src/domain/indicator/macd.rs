//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9. Every component is defined
//! from the first bar because the EMAs are seeded with the first value.

use crate::domain::indicator::{calculate_ema, IndicatorType};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub indicator_type: IndicatorType,
    pub ema_fast: Vec<f64>,
    pub ema_slow: Vec<f64>,
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn calculate_macd(
    prices: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> MacdSeries {
    let indicator_type = IndicatorType::Macd {
        fast,
        slow,
        signal: signal_period,
    };

    if prices.is_empty() || fast == 0 || slow == 0 || signal_period == 0 {
        return MacdSeries {
            indicator_type,
            ema_fast: Vec::new(),
            ema_slow: Vec::new(),
            line: Vec::new(),
            signal: Vec::new(),
            histogram: Vec::new(),
        };
    }

    let ema_fast = calculate_ema(prices, fast, 0).values;
    let ema_slow = calculate_ema(prices, slow, 0).values;

    let line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal = calculate_ema(&line, signal_period, 0).values;
    let histogram = line.iter().zip(&signal).map(|(m, s)| m - s).collect();

    MacdSeries {
        indicator_type,
        ema_fast,
        ema_slow,
        line,
        signal,
        histogram,
    }
}

pub fn calculate_macd_default(prices: &[f64]) -> MacdSeries {
    calculate_macd(prices, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
