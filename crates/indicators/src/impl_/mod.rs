//! Primitive kernels
//!
//! Free functions over value slices and bars, grouped by family. Every
//! kernel returns a vector of the input length with `NaN` where no value is
//! defined yet (warm-up) or where the window contains a non-finite input.

pub mod averages;
pub mod candles;
pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

/// Index of the first finite value.
pub(crate) fn first_finite(values: &[f64]) -> Option<usize> {
    values.iter().position(|v| v.is_finite())
}

/// Applies `f` to every full window of `period` consecutive finite values.
pub(crate) fn windowed<F>(values: &[f64], period: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let len = values.len();
    let mut result = vec![f64::NAN; len];
    if period == 0 {
        return result;
    }

    let mut run = 0usize;
    for i in 0..len {
        if values[i].is_finite() {
            run += 1;
        } else {
            run = 0;
        }
        if run >= period {
            result[i] = f(&values[i + 1 - period..=i]);
        }
    }
    result
}

/// Wilder smoothing: seeded with the mean of the first `period` finite
/// values, then `(prev * (n - 1) + x) / n`. Non-finite inputs after the seed
/// carry the previous value forward.
pub(crate) fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let len = values.len();
    let mut result = vec![f64::NAN; len];
    if period == 0 {
        return result;
    }

    let Some(first_valid) = first_finite(values) else {
        return result;
    };

    let Some(seed_end) = first_valid.checked_add(period).filter(|&end| end <= len) else {
        return result;
    };

    let seed = &values[first_valid..seed_end];
    if seed.iter().all(|v| v.is_finite()) {
        let initial: f64 = seed.iter().sum::<f64>() / period as f64;
        let start_idx = seed_end - 1;
        result[start_idx] = initial;

        for i in (start_idx + 1)..len {
            if !values[i].is_finite() {
                result[i] = result[i - 1];
                continue;
            }
            result[i] = (result[i - 1] * (period - 1) as f64 + values[i]) / period as f64;
        }
    }

    result
}

/// Bar-to-bar differences; index 0 is `NaN`.
pub(crate) fn diffs(values: &[f64]) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        result[i] = values[i] - values[i - 1];
    }
    result
}

/// Element-wise combination of two equally long series.
pub(crate) fn zip_with<F>(a: &[f64], b: &[f64], f: F) -> Vec<f64>
where
    F: Fn(f64, f64) -> f64,
{
    a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect()
}
