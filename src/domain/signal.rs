//! Confirmed signal detection from consecutive indicator snapshots.
//!
//! Bullish needs a MACD cross above its signal line with RSI above 70;
//! bearish needs a cross below with RSI under 30. When the trend filter is on,
//! price must also sit on the matching side of the 200-span EMA. Comparisons
//! against NaN are false, so undefined inputs never fire.

use crate::domain::indicator::IndicatorSnapshot;

pub const RSI_BULLISH_ABOVE: f64 = 70.0;
pub const RSI_BEARISH_BELOW: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Bullish,
    Bearish,
    Neutral,
}

impl Signal {
    /// Text written into row records, `None` for a neutral step.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Signal::Bullish => Some("Bullish Confirmed Signal"),
            Signal::Bearish => Some("Bearish Confirmed Signal"),
            Signal::Neutral => None,
        }
    }
}

pub fn detect_signal(
    prev: &IndicatorSnapshot,
    curr: &IndicatorSnapshot,
    price: f64,
    use_trend_filter: bool,
) -> Signal {
    let bullish = prev.macd <= prev.macd_signal
        && curr.macd > curr.macd_signal
        && curr.rsi > RSI_BULLISH_ABOVE
        && (!use_trend_filter || price > curr.trend_ema);
    if bullish {
        return Signal::Bullish;
    }

    let bearish = prev.macd >= prev.macd_signal
        && curr.macd < curr.macd_signal
        && curr.rsi < RSI_BEARISH_BELOW
        && (!use_trend_filter || price < curr.trend_ema);
    if bearish {
        return Signal::Bearish;
    }

    Signal::Neutral
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(macd: f64, macd_signal: f64, rsi: f64, trend_ema: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            ema_fast: 0.0,
            ema_slow: 0.0,
            macd,
            macd_signal,
            macd_hist: macd - macd_signal,
            rsi,
            trend_ema,
        }
    }

    #[test]
    fn bullish_cross_with_high_rsi_above_trend() {
        let prev = snap(-0.1, 0.0, 60.0, 100.0);
        let curr = snap(0.2, 0.1, 75.0, 100.0);
        assert_eq!(detect_signal(&prev, &curr, 101.0, true), Signal::Bullish);
    }

    #[test]
    fn bullish_cross_from_equality() {
        let prev = snap(0.0, 0.0, 60.0, 100.0);
        let curr = snap(0.2, 0.1, 75.0, 100.0);
        assert_eq!(detect_signal(&prev, &curr, 101.0, true), Signal::Bullish);
    }

    #[test]
    fn bearish_cross_with_low_rsi_below_trend() {
        let prev = snap(0.1, 0.0, 40.0, 100.0);
        let curr = snap(-0.2, -0.1, 25.0, 100.0);
        assert_eq!(detect_signal(&prev, &curr, 99.0, true), Signal::Bearish);
    }

    #[test]
    fn no_cross_is_neutral() {
        let prev = snap(0.3, 0.1, 60.0, 100.0);
        let curr = snap(0.4, 0.2, 80.0, 100.0);
        assert_eq!(detect_signal(&prev, &curr, 101.0, true), Signal::Neutral);
    }

    #[test]
    fn rsi_threshold_is_strict() {
        let prev = snap(-0.1, 0.0, 60.0, 100.0);
        let curr = snap(0.2, 0.1, 70.0, 100.0);
        assert_eq!(detect_signal(&prev, &curr, 101.0, true), Signal::Neutral);
    }

    #[test]
    fn price_below_trend_blocks_bullish() {
        let prev = snap(-0.1, 0.0, 60.0, 100.0);
        let curr = snap(0.2, 0.1, 75.0, 100.0);
        assert_eq!(detect_signal(&prev, &curr, 99.0, true), Signal::Neutral);
    }

    #[test]
    fn trend_filter_off_ignores_trend() {
        let prev = snap(-0.1, 0.0, 60.0, 100.0);
        let curr = snap(0.2, 0.1, 75.0, 100.0);
        assert_eq!(detect_signal(&prev, &curr, 99.0, false), Signal::Bullish);
    }

    #[test]
    fn undefined_rsi_is_neutral() {
        let prev = snap(-0.1, 0.0, f64::NAN, 100.0);
        let curr = snap(0.2, 0.1, f64::NAN, 100.0);
        assert_eq!(detect_signal(&prev, &curr, 101.0, true), Signal::Neutral);
    }

    #[test]
    fn undefined_trend_is_neutral_only_when_filtering() {
        let prev = snap(0.1, 0.0, 40.0, f64::NAN);
        let curr = snap(-0.2, -0.1, 25.0, f64::NAN);
        assert_eq!(detect_signal(&prev, &curr, 99.0, true), Signal::Neutral);
        assert_eq!(detect_signal(&prev, &curr, 99.0, false), Signal::Bearish);
    }

    #[test]
    fn labels() {
        assert_eq!(Signal::Bullish.label(), Some("Bullish Confirmed Signal"));
        assert_eq!(Signal::Bearish.label(), Some("Bearish Confirmed Signal"));
        assert_eq!(Signal::Neutral.label(), None);
    }
}
