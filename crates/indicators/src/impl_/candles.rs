//! Candle anatomy.

use tachart_types::Candle;

/// Distance from the low to the bottom of the body.
pub fn lower_shadow(candles: &[Candle]) -> Vec<f64> {
    candles
        .iter()
        .map(|c| c.open.min(c.close) - c.low)
        .collect()
}

/// Distance from the top of the body to the high.
pub fn upper_shadow(candles: &[Candle]) -> Vec<f64> {
    candles
        .iter()
        .map(|c| c.high - c.open.max(c.close))
        .collect()
}

/// Signed body, close - open.
pub fn real_body(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close - c.open).collect()
}
