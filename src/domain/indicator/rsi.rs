//! RSI (Relative Strength Index) over a rolling window.
//!
//! Average gain and average loss are plain means of the last n price changes
//! (losses stored as positive magnitudes).
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0 and avg_gain > 0: RSI = 100
//! If both are 0: RSI is NaN
//!
//! Warmup: the first n bars are NaN (n price changes are needed).

use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn calculate_rsi(prices: &[f64], period: usize) -> IndicatorSeries {
    let mut values = vec![f64::NAN; prices.len()];

    if period == 0 || prices.len() <= period {
        return IndicatorSeries {
            indicator_type: IndicatorType::Rsi(period),
            values,
        };
    }

    // changes[j] is the move into bar j + 1
    let changes: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();

    for (i, value) in values.iter_mut().enumerate().skip(period) {
        let window = &changes[i - period..i];
        let gain: f64 = window.iter().map(|c| c.max(0.0)).sum();
        let loss: f64 = window.iter().map(|c| (-c).max(0.0)).sum();
        *value = rsi_from_averages(gain / period as f64, loss / period as f64);
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain > 0.0 { 100.0 } else { f64::NAN }
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}
