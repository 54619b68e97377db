//! Moving averages
//!
//! SMA, EMA, WMA, HMA, ZLEMA, triple EMA and Kaufman's adaptive average.

use super::{first_finite, windowed, zip_with};

/// Simple moving average: arithmetic mean of the last `period` values.
pub fn sma(values: &[f64], period: usize) -> Vec<f64> {
    let len = values.len();
    let mut result = vec![f64::NAN; len];
    if period == 0 {
        return result;
    }

    // Rolling sum, restarted after every non-finite value
    let mut sum = 0.0;
    let mut run = 0usize;
    for i in 0..len {
        let value = values[i];
        if !value.is_finite() {
            sum = 0.0;
            run = 0;
            continue;
        }
        sum += value;
        run += 1;
        if run > period {
            sum -= values[i - period];
        }
        if run >= period {
            result[i] = sum / period as f64;
        }
    }

    result
}

/// Exponential moving average with multiplier `2 / (period + 1)`.
///
/// Matches pandas `ewm(span=period, adjust=False).mean()`: seeded with the
/// first finite value; a non-finite input repeats the previous value.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let len = values.len();
    let mut result = vec![f64::NAN; len];
    if period == 0 || len == 0 {
        return result;
    }

    let alpha = multiplier(period);
    let mut prev = f64::NAN;

    for (i, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            if prev.is_finite() {
                result[i] = prev;
            }
            continue;
        }

        if !prev.is_finite() {
            prev = value;
        } else {
            prev = alpha * value + (1.0 - alpha) * prev;
        }
        result[i] = prev;
    }

    result
}

fn multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Linearly weighted moving average; the newest value weighs `period`.
pub fn wma(values: &[f64], period: usize) -> Vec<f64> {
    let n = period as f64;
    let denominator = n * (n + 1.0) / 2.0;
    windowed(values, period, |window| {
        window
            .iter()
            .enumerate()
            .map(|(i, v)| (i + 1) as f64 * v)
            .sum::<f64>()
            / denominator
    })
}

/// Hull moving average: `WMA(2 * WMA(n/2) - WMA(n), sqrt(n))`.
pub fn hma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return vec![f64::NAN; values.len()];
    }
    let half = (period / 2).max(1);
    let root = ((period as f64).sqrt() as usize).max(1);

    let raw = zip_with(&wma(values, half), &wma(values, period), |h, f| {
        2.0 * h - f
    });
    wma(&raw, root)
}

/// Zero-lag EMA: EMA of `2 * x[i] - x[i - lag]` with `lag = (period - 1) / 2`.
pub fn zlema(values: &[f64], period: usize) -> Vec<f64> {
    let len = values.len();
    if period == 0 {
        return vec![f64::NAN; len];
    }
    let lag = (period - 1) / 2;

    let mut de_lagged = vec![f64::NAN; len];
    for i in lag..len {
        de_lagged[i] = 2.0 * values[i] - values[i - lag];
    }
    ema(&de_lagged, period)
}

/// Triple EMA: `3 * e1 - 3 * e2 + e3` with each stage an EMA of the last.
pub fn triple_ema(values: &[f64], period: usize) -> Vec<f64> {
    let e1 = ema(values, period);
    let e2 = ema(&e1, period);
    let e3 = ema(&e2, period);

    e1.iter()
        .zip(&e2)
        .zip(&e3)
        .map(|((a, b), c)| 3.0 * a - 3.0 * b + c)
        .collect()
}

/// Kaufman adaptive moving average.
///
/// The efficiency ratio over `efficiency` bars scales a smoothing constant
/// between the `fast` and `slow` EMA multipliers.
pub fn kama(values: &[f64], efficiency: usize, fast: usize, slow: usize) -> Vec<f64> {
    let len = values.len();
    let mut result = vec![f64::NAN; len];
    if efficiency == 0 || fast == 0 || slow == 0 {
        return result;
    }
    let Some(start) = first_finite(values) else {
        return result;
    };

    let fast_sc = multiplier(fast);
    let slow_sc = multiplier(slow);
    let Some(seed) = start.checked_add(efficiency).filter(|&seed| seed <= len) else {
        return result;
    };
    result[seed - 1] = values[seed - 1];

    for i in seed..len {
        let change = (values[i] - values[i - efficiency]).abs();
        let volatility: f64 = ((i + 1 - efficiency)..=i)
            .map(|j| (values[j] - values[j - 1]).abs())
            .sum();
        let ratio = if volatility == 0.0 {
            0.0
        } else {
            change / volatility
        };
        let sc = (ratio * (fast_sc - slow_sc) + slow_sc).powi(2);
        let prev = result[i - 1];
        result[i] = if prev.is_finite() {
            prev + sc * (values[i] - prev)
        } else {
            values[i]
        };
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impl_::test_support::assert_close;
    use proptest::prelude::*;

    #[test]
    fn test_sma_basic() {
        let result = sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_close(result[2], 2.0); // (1+2+3)/3
        assert_close(result[3], 3.0);
        assert_close(result[4], 4.0);
    }

    #[test]
    fn test_sma_insufficient_data() {
        assert!(sma(&[1.0, 2.0], 5).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_sma_restarts_after_gap() {
        let result = sma(&[f64::NAN, 2.0, 4.0, 6.0], 2);
        assert!(result[1].is_nan());
        assert_close(result[2], 3.0);
        assert_close(result[3], 5.0);
    }

    #[test]
    fn test_sma_period_zero_returns_nan() {
        assert!(sma(&[1.0, 2.0, 3.0], 0).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_ema_basic() {
        let result = ema(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);

        assert_close(result[0], 1.0);
        assert_close(result[1], 1.5);
        assert_close(result[2], 2.25);
        assert_close(result[3], 3.125);
        assert_close(result[4], 4.0625);
    }

    #[test]
    fn test_ema_over_warmup_series() {
        let result = ema(&[f64::NAN, f64::NAN, 2.0, 4.0], 3);
        assert!(result[1].is_nan());
        assert_close(result[2], 2.0);
        assert_close(result[3], 3.0);
    }

    #[test]
    fn test_wma_weights_newest_highest() {
        let result = wma(&[1.0, 2.0, 3.0], 3);
        assert_close(result[2], (1.0 + 4.0 + 9.0) / 6.0);
    }

    #[test]
    fn test_hma_and_zlema_follow_constant_input() {
        let values = vec![7.0; 30];
        assert_close(hma(&values, 9)[29], 7.0);
        assert_close(zlema(&values, 9)[29], 7.0);
        assert_close(triple_ema(&values, 5)[29], 7.0);
        assert_close(kama(&values, 10, 2, 30)[29], 7.0);
    }

    #[test]
    fn test_hma_warmup() {
        // WMA(4) is defined from index 3, the outer WMA(2) from index 4
        let result = hma(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 4);
        assert!(result[3].is_nan());
        assert!(result[4].is_finite());
    }

    #[test]
    fn test_kama_trending_series_moves_toward_price() {
        let values: Vec<f64> = (1..=20).map(f64::from).collect();
        let result = kama(&values, 5, 2, 30);
        assert!(result[3].is_nan());
        assert_close(result[4], 5.0);
        assert!(result[19] > result[10]);
        assert!(result[19] < 20.0);
    }

    proptest! {
        #[test]
        fn prop_sma_stays_within_window_bounds(
            values in prop::collection::vec(-1.0e6f64..1.0e6, 1..64),
            period in 1usize..10,
        ) {
            let result = sma(&values, period);
            prop_assert_eq!(result.len(), values.len());
            for i in (period - 1).min(values.len())..values.len() {
                let window = &values[i + 1 - period..=i];
                let lo = window.iter().copied().fold(f64::INFINITY, f64::min);
                let hi = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(result[i] >= lo - 1e-6 && result[i] <= hi + 1e-6);
            }
        }

        #[test]
        fn prop_windows_longer_than_input_are_undefined(
            values in prop::collection::vec(-1.0e6f64..1.0e6, 0..64),
            period in prop_oneof![64usize..1024, (u32::MAX as usize)..usize::MAX, Just(usize::MAX)],
        ) {
            for result in [
                sma(&values, period),
                wma(&values, period),
                hma(&values, period),
                zlema(&values, period),
                kama(&values, period, 2, 30),
                kama(&values, 10, period, period),
                kama(&values, period, period, period),
            ] {
                prop_assert_eq!(result.len(), values.len());
            }
            prop_assert!(wma(&values, period).iter().all(|v| v.is_nan()));
            prop_assert!(kama(&values, period, 2, 30).iter().all(|v| v.is_nan()));
        }
    }
}
