//! Oscillators and momentum.

use tachart_types::Candle;

use super::averages::{ema, sma};
use super::volatility::std_dev;
use super::{diffs, wilder_smooth, windowed, zip_with};

fn gains_and_losses(values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let deltas = diffs(values);
    let gains = deltas
        .iter()
        .map(|d| if d.is_finite() { d.max(0.0) } else { f64::NAN })
        .collect();
    let losses = deltas
        .iter()
        .map(|d| if d.is_finite() { (-d).max(0.0) } else { f64::NAN })
        .collect();
    (gains, losses)
}

fn strength_index(avg_gain: f64, avg_loss: f64) -> f64 {
    if !avg_gain.is_finite() || !avg_loss.is_finite() {
        return f64::NAN;
    }
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}

/// Relative strength index with simple averages of gains and losses.
pub fn rsi(values: &[f64], period: usize) -> Vec<f64> {
    let (gains, losses) = gains_and_losses(values);
    zip_with(&sma(&gains, period), &sma(&losses, period), strength_index)
}

/// Relative strength index with Wilder-smoothed gains and losses.
pub fn smoothed_rsi(values: &[f64], period: usize) -> Vec<f64> {
    let (gains, losses) = gains_and_losses(values);
    zip_with(
        &wilder_smooth(&gains, period),
        &wilder_smooth(&losses, period),
        strength_index,
    )
}

/// Chande momentum oscillator: `100 * (up - down) / (up + down)` over `period` changes.
pub fn cmo(values: &[f64], period: usize) -> Vec<f64> {
    let (gains, losses) = gains_and_losses(values);
    let sum = |w: &[f64]| w.iter().sum::<f64>();
    zip_with(
        &windowed(&gains, period, sum),
        &windowed(&losses, period, sum),
        |up, down| {
            if up + down == 0.0 {
                0.0
            } else {
                100.0 * (up - down) / (up + down)
            }
        },
    )
}

/// Rate of change in percent against the value `period` bars back.
pub fn roc(values: &[f64], period: usize) -> Vec<f64> {
    let len = values.len();
    let mut result = vec![f64::NAN; len];
    for i in period..len {
        let base = values[i - period];
        if base != 0.0 {
            result[i] = (values[i] - base) / base * 100.0;
        }
    }
    result
}

/// MACD line: `EMA(short) - EMA(long)`.
pub fn macd(values: &[f64], short: usize, long: usize) -> Vec<f64> {
    zip_with(&ema(values, short), &ema(values, long), |s, l| s - l)
}

/// Range action verification index: `|SMA(short) - SMA(long)| / SMA(long) * 100`.
pub fn ravi(values: &[f64], short: usize, long: usize) -> Vec<f64> {
    zip_with(&sma(values, short), &sma(values, long), |s, l| {
        if l == 0.0 {
            f64::NAN
        } else {
            ((s - l) / l * 100.0).abs()
        }
    })
}

/// Fisher transform of the price normalized to its `period` range.
///
/// `alpha` weighs the normalized price, `beta` the previous normalized value.
pub fn fisher(values: &[f64], period: usize, alpha: f64, beta: f64) -> Vec<f64> {
    let len = values.len();
    let ranges = windowed(values, period, |w| {
        let lo = w.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = w.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        hi - lo
    });
    let lows = windowed(values, period, |w| {
        w.iter().copied().fold(f64::INFINITY, f64::min)
    });

    let mut result = vec![f64::NAN; len];
    let mut prev_value = 0.0;
    let mut prev_fisher = 0.0;
    for i in 0..len {
        if !ranges[i].is_finite() {
            continue;
        }
        let position = if ranges[i] == 0.0 {
            0.0
        } else {
            (values[i] - lows[i]) / ranges[i] - 0.5
        };
        let value = (alpha * 2.0 * position + beta * prev_value).clamp(-0.999, 0.999);
        let transformed = 0.5 * ((1.0 + value) / (1.0 - value)).ln() + 0.5 * prev_fisher;
        result[i] = transformed;
        prev_value = value;
        prev_fisher = transformed;
    }
    result
}

/// Commodity channel index of the typical price.
pub fn cci(candles: &[Candle], period: usize) -> Vec<f64> {
    let typical: Vec<f64> = candles.iter().map(Candle::typical_price).collect();
    let mean = sma(&typical, period);
    let deviation = windowed(&typical, period, |w| {
        let m = w.iter().sum::<f64>() / w.len() as f64;
        w.iter().map(|v| (v - m).abs()).sum::<f64>() / w.len() as f64
    });

    (0..typical.len())
        .map(|i| {
            if !deviation[i].is_finite() {
                f64::NAN
            } else if deviation[i] == 0.0 {
                0.0
            } else {
                (typical[i] - mean[i]) / (0.015 * deviation[i])
            }
        })
        .collect()
}

/// Bollinger %B: position of the price between SMA +/- `k` deviations.
pub fn percent_b(values: &[f64], period: usize, k: f64) -> Vec<f64> {
    let middle = sma(values, period);
    let deviation = std_dev(values, period);

    (0..values.len())
        .map(|i| {
            let width = 2.0 * k * deviation[i];
            if !width.is_finite() || width == 0.0 {
                f64::NAN
            } else {
                (values[i] - (middle[i] - k * deviation[i])) / width
            }
        })
        .collect()
}
