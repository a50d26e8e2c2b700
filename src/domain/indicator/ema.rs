//! Exponential Moving Average.
//!
//! k = 2/(span+1), seeded with the first value, then EMA[i] = X[i]*k + EMA[i-1]*(1-k).
//! Warmup: the first (min_periods - 1) values are reported as NaN. The
//! recursion itself still runs over them, so a value that becomes visible is
//! identical to the unmasked one.
//!
//! Missing inputs (NaN) leave the average unchanged; the recursion resumes at
//! the next finite value. Leading NaNs delay the seed.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn calculate_ema(values: &[f64], span: usize, min_periods: usize) -> IndicatorSeries {
    if span == 0 || values.is_empty() {
        return IndicatorSeries {
            indicator_type: IndicatorType::Ema(span),
            values: Vec::new(),
        };
    }

    let k = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema: Option<f64> = None;

    for (i, &x) in values.iter().enumerate() {
        if !x.is_nan() {
            ema = Some(match ema {
                Some(prev) => x * k + prev * (1.0 - k),
                None => x,
            });
        }
        if i + 1 < min_periods {
            out.push(f64::NAN);
        } else {
            out.push(ema.unwrap_or(f64::NAN));
        }
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Ema(span),
        values: out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ema_seeds_with_first_value() {
        let series = calculate_ema(&[10.0, 20.0, 30.0], 3, 0);
        assert_relative_eq!(series.values[0], 10.0);
    }

    #[test]
    fn ema_recursive_calculation() {
        let series = calculate_ema(&[10.0, 20.0, 30.0, 40.0], 3, 0);

        let k = 2.0 / 4.0;
        let e1 = 20.0 * k + 10.0 * (1.0 - k);
        let e2 = 30.0 * k + e1 * (1.0 - k);
        let e3 = 40.0 * k + e2 * (1.0 - k);

        assert_relative_eq!(series.values[1], e1);
        assert_relative_eq!(series.values[2], e2);
        assert_relative_eq!(series.values[3], e3);
    }

    #[test]
    fn ema_min_periods_masks_leading_values() {
        let prices: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let masked = calculate_ema(&prices, 4, 4);
        let unmasked = calculate_ema(&prices, 4, 0);

        for i in 0..3 {
            assert!(masked.values[i].is_nan(), "index {} should be NaN", i);
        }
        for i in 3..10 {
            assert_eq!(masked.values[i], unmasked.values[i]);
        }
    }

    #[test]
    fn ema_trend_span_first_defined_at_199() {
        let prices = vec![100.0; 210];
        let series = calculate_ema(&prices, 200, 200);

        assert!(series.values[198].is_nan());
        assert_relative_eq!(series.values[199], 100.0, epsilon = 1e-9);
    }

    #[test]
    fn ema_carries_over_missing_values() {
        let series = calculate_ema(&[10.0, 20.0, f64::NAN, 30.0], 3, 0);

        let k = 2.0 / 4.0;
        let e1 = 20.0 * k + 10.0 * (1.0 - k);
        assert_relative_eq!(series.values[2], e1);
        assert_relative_eq!(series.values[3], 30.0 * k + e1 * (1.0 - k));
    }

    #[test]
    fn ema_seeds_after_leading_missing_values() {
        let series = calculate_ema(&[f64::NAN, f64::NAN, 40.0, 50.0], 3, 0);
        assert!(series.values[0].is_nan());
        assert!(series.values[1].is_nan());
        assert_relative_eq!(series.values[2], 40.0);
        assert_relative_eq!(series.values[3], 45.0);
    }

    #[test]
    fn ema_constant_input_is_constant() {
        let series = calculate_ema(&[50.0; 8], 5, 0);
        for v in &series.values {
            assert_relative_eq!(*v, 50.0);
        }
    }

    #[test]
    fn ema_indicator_type() {
        let series = calculate_ema(&[1.0, 2.0], 12, 0);
        assert_eq!(series.indicator_type, IndicatorType::Ema(12));
    }

    #[test]
    fn ema_empty_and_zero_span() {
        assert!(calculate_ema(&[], 12, 0).values.is_empty());
        assert!(calculate_ema(&[1.0, 2.0], 0, 0).values.is_empty());
    }
}
