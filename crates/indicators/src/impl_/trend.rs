//! Directional movement and Aroon.

use tachart_types::Candle;

use super::wilder_smooth;

/// Raw directional movement per bar, `(up, down)`; index 0 is `NaN`.
fn directional_movement(candles: &[Candle]) -> (Vec<f64>, Vec<f64>) {
    let len = candles.len();
    let mut up = vec![f64::NAN; len];
    let mut down = vec![f64::NAN; len];
    for i in 1..len {
        let up_move = candles[i].high - candles[i - 1].high;
        let down_move = candles[i - 1].low - candles[i].low;
        up[i] = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        down[i] = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };
    }
    (up, down)
}

/// Wilder-averaged upward directional movement.
pub fn directional_movement_up(candles: &[Candle], period: usize) -> Vec<f64> {
    wilder_smooth(&directional_movement(candles).0, period)
}

/// Wilder-averaged downward directional movement.
pub fn directional_movement_down(candles: &[Candle], period: usize) -> Vec<f64> {
    wilder_smooth(&directional_movement(candles).1, period)
}

/// `100 * (period - bars since extreme) / period` over the last `period + 1`
/// bars. Ties resolve to the most recent bar.
fn aroon<F>(candles: &[Candle], period: usize, value: F, prefer: fn(f64, f64) -> bool) -> Vec<f64>
where
    F: Fn(&Candle) -> f64,
{
    let len = candles.len();
    let mut result = vec![f64::NAN; len];
    if period == 0 {
        return result;
    }

    for i in period..len {
        let mut best = i - period;
        for j in (i - period)..=i {
            let current = value(&candles[j]);
            let extreme = value(&candles[best]);
            if current == extreme || prefer(current, extreme) {
                best = j;
            }
        }
        let since = (i - best) as f64;
        result[i] = 100.0 * (period as f64 - since) / period as f64;
    }
    result
}

/// Aroon up: recency of the highest high.
pub fn aroon_up(candles: &[Candle], period: usize) -> Vec<f64> {
    aroon(candles, period, |c| c.high, |a, b| a > b)
}

/// Aroon down: recency of the lowest low.
pub fn aroon_down(candles: &[Candle], period: usize) -> Vec<f64> {
    aroon(candles, period, |c| c.low, |a, b| a < b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impl_::test_support::{assert_close, ohlc};

    fn rising() -> Vec<Candle> {
        (0..8)
            .map(|i| {
                let c = 10.0 + f64::from(i);
                ohlc(c, c + 1.0, c - 1.0, c)
            })
            .collect()
    }

    #[test]
    fn test_directional_movement_rising_market() {
        let up = directional_movement_up(&rising(), 3);
        let down = directional_movement_down(&rising(), 3);
        assert!(up[2].is_nan());
        assert_close(up[3], 1.0);
        assert_close(down[3], 0.0);
    }

    #[test]
    fn test_aroon_rising_market() {
        let up = aroon_up(&rising(), 4);
        let down = aroon_down(&rising(), 4);
        assert!(up[3].is_nan());
        assert_close(up[4], 100.0);
        assert_close(down[4], 0.0);
        assert_close(up[7], 100.0);
    }
}
