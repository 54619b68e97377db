//! Deviation, bands and range based kernels.

use tachart_types::Candle;

use super::averages::ema;
use super::{first_finite, wilder_smooth, windowed, zip_with};

/// Population standard deviation (divides by n, not n - 1).
pub fn std_dev(values: &[f64], period: usize) -> Vec<f64> {
    windowed(values, period, |window| {
        let n = window.len() as f64;
        let mean = window.iter().sum::<f64>() / n;
        let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        variance.sqrt()
    })
}

/// Upper Bollinger band: `middle + k * deviation`.
pub fn bollinger_upper(middle: &[f64], deviation: &[f64], k: f64) -> Vec<f64> {
    zip_with(middle, deviation, |m, sd| m + k * sd)
}

/// Lower Bollinger band: `middle - k * deviation`.
pub fn bollinger_lower(middle: &[f64], deviation: &[f64], k: f64) -> Vec<f64> {
    zip_with(middle, deviation, |m, sd| m - k * sd)
}

/// Band width in percent of the middle band.
pub fn bollinger_width(upper: &[f64], middle: &[f64], lower: &[f64]) -> Vec<f64> {
    (0..middle.len())
        .map(|i| {
            if middle[i] == 0.0 {
                f64::NAN
            } else {
                (upper[i] - lower[i]) / middle[i] * 100.0
            }
        })
        .collect()
}

/// True range for a bar given the previous close.
///
/// TR = max(High - Low, |High - Prev_Close|, |Low - Prev_Close|)
#[inline]
fn bar_range(candle: &Candle, prev_close: f64) -> f64 {
    let hl = candle.high - candle.low;
    let hc = (candle.high - prev_close).abs();
    let lc = (candle.low - prev_close).abs();
    hl.max(hc).max(lc)
}

/// True range series; the first bar uses its high-low span.
pub fn true_range(candles: &[Candle]) -> Vec<f64> {
    let len = candles.len();
    let mut tr = vec![f64::NAN; len];
    if len == 0 {
        return tr;
    }
    tr[0] = candles[0].high - candles[0].low;
    for i in 1..len {
        tr[i] = bar_range(&candles[i], candles[i - 1].close);
    }
    tr
}

/// Average true range with Wilder smoothing: `(prev * (n - 1) + TR) / n`.
pub fn atr(candles: &[Candle], period: usize) -> Vec<f64> {
    wilder_smooth(&true_range(candles), period)
}

/// Keltner middle line: EMA of the typical price.
pub fn keltner_middle(candles: &[Candle], period: usize) -> Vec<f64> {
    let typical: Vec<f64> = candles.iter().map(Candle::typical_price).collect();
    ema(&typical, period)
}

/// Keltner channel offset from `middle` by `ratio * ATR(atr_period)`; `sign`
/// selects the upper (+1) or lower (-1) line.
pub fn keltner_band(
    middle: &[f64],
    candles: &[Candle],
    ratio: f64,
    atr_period: usize,
    sign: f64,
) -> Vec<f64> {
    zip_with(middle, &atr(candles, atr_period), |m, a| m + sign * ratio * a)
}

/// Ulcer index: root mean square of the percent drawdowns from the running
/// maximum inside each `period` window.
pub fn ulcer_index(values: &[f64], period: usize) -> Vec<f64> {
    windowed(values, period, |window| {
        let mut peak = f64::NEG_INFINITY;
        let squares: f64 = window
            .iter()
            .map(|&v| {
                peak = peak.max(v);
                let drawdown = if peak == 0.0 {
                    0.0
                } else {
                    (v - peak) / peak * 100.0
                };
                drawdown * drawdown
            })
            .sum();
        (squares / window.len() as f64).sqrt()
    })
}

/// Trailing stop-loss limit `distance` below the price.
///
/// While the price stays above the previous limit the limit only ratchets
/// up; once the price falls through it the limit restarts from the price.
pub fn trailing_stop_loss(values: &[f64], distance: f64) -> Vec<f64> {
    let len = values.len();
    let mut result = vec![f64::NAN; len];
    let Some(start) = first_finite(values) else {
        return result;
    };

    let mut limit = values[start] - distance;
    result[start] = limit;
    for i in (start + 1)..len {
        let price = values[i];
        if !price.is_finite() {
            result[i] = limit;
            continue;
        }
        limit = if price > limit {
            limit.max(price - distance)
        } else {
            price - distance
        };
        result[i] = limit;
    }
    result
}
