//! Volume based kernels.

use tachart_types::Candle;

/// Starting level of the positive and negative volume index.
pub const VOLUME_INDEX_BASE: f64 = 1000.0;

/// Traded amount per bar, close * volume.
pub fn amount(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(Candle::amount).collect()
}

/// On-balance volume, starting at zero.
pub fn on_balance_volume(candles: &[Candle]) -> Vec<f64> {
    let mut result = Vec::with_capacity(candles.len());
    let mut obv = 0.0;
    for (i, candle) in candles.iter().enumerate() {
        if i > 0 {
            let prev_close = candles[i - 1].close;
            if candle.close > prev_close {
                obv += candle.volume;
            } else if candle.close < prev_close {
                obv -= candle.volume;
            }
        }
        result.push(obv);
    }
    result
}

/// Volume index that moves with the price change only on bars where
/// `moves(volume, prev_volume)` holds.
fn volume_index<F>(candles: &[Candle], moves: F) -> Vec<f64>
where
    F: Fn(f64, f64) -> bool,
{
    let mut result = Vec::with_capacity(candles.len());
    let mut level = VOLUME_INDEX_BASE;
    for (i, candle) in candles.iter().enumerate() {
        if i > 0 {
            let prev = &candles[i - 1];
            if moves(candle.volume, prev.volume) && prev.close != 0.0 {
                level += (candle.close - prev.close) / prev.close * level;
            }
        }
        result.push(level);
    }
    result
}

/// Positive volume index: follows the price on rising volume.
pub fn positive_volume_index(candles: &[Candle]) -> Vec<f64> {
    volume_index(candles, |volume, prev| volume > prev)
}

/// Negative volume index: follows the price on falling volume.
pub fn negative_volume_index(candles: &[Candle]) -> Vec<f64> {
    volume_index(candles, |volume, prev| volume < prev)
}

/// Rolling volume weighted average of the typical price over `period` bars.
pub fn vwap(candles: &[Candle], period: usize) -> Vec<f64> {
    let len = candles.len();
    let mut result = vec![f64::NAN; len];
    if period == 0 {
        return result;
    }

    for i in (period - 1)..len {
        let window = &candles[i + 1 - period..=i];
        let volume: f64 = window.iter().map(|c| c.volume).sum();
        if volume > 0.0 {
            let weighted: f64 = window.iter().map(|c| c.typical_price() * c.volume).sum();
            result[i] = weighted / volume;
        }
    }
    result
}
