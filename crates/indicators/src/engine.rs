//! Default computation engine bound to a bar series.

use std::borrow::Cow;
use std::sync::Arc;

use tachart_types::Candle;

use crate::error::ComputeError;
use crate::impl_::{averages, candles, momentum, trend, volatility, volume};
use crate::traits::{Compute, InputKind, Primitive, SeriesHandle, Source};

/// Computes primitives over the bars it was created with.
#[derive(Debug, Clone)]
pub struct Engine {
    bars: Arc<[Candle]>,
}

/// Resolved input of a single computation.
enum Input<'a> {
    Price(Cow<'a, [f64]>),
    Bars,
    Series(Vec<&'a [f64]>),
}

impl Engine {
    /// Creates an engine over `bars`.
    #[must_use]
    pub fn new(bars: impl Into<Arc<[Candle]>>) -> Self {
        Self { bars: bars.into() }
    }

    /// The bound bar series.
    #[must_use]
    pub fn bars(&self) -> &[Candle] {
        &self.bars
    }

    /// Number of bars; every computed series has this length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true when no bars are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|c| c.close).collect()
    }

    fn check_length(&self, series: &SeriesHandle) -> Result<(), ComputeError> {
        if series.len() == self.len() {
            Ok(())
        } else {
            Err(ComputeError::LengthMismatch {
                expected: self.len(),
                actual: series.len(),
            })
        }
    }

    fn resolve<'a>(
        &self,
        primitive: Primitive,
        source: Source<'a>,
    ) -> Result<Input<'a>, ComputeError> {
        match (primitive.input(), source) {
            (InputKind::Price, Source::Bars) => Ok(Input::Price(Cow::Owned(self.closes()))),
            (InputKind::Price, Source::Series([series])) => {
                self.check_length(series)?;
                Ok(Input::Price(Cow::Borrowed(series.values())))
            }
            (InputKind::Price, Source::Series(series)) => Err(ComputeError::MissingInput {
                primitive,
                expected: "the bar series or 1 series",
                actual: series.len(),
            }),
            (InputKind::Bars, Source::Bars) => Ok(Input::Bars),
            (InputKind::Bars, Source::Series(series)) => Err(ComputeError::MissingInput {
                primitive,
                expected: "the bar series",
                actual: series.len(),
            }),
            (InputKind::Series(n), Source::Series(series)) if series.len() == n => {
                for s in series {
                    self.check_length(s)?;
                }
                Ok(Input::Series(series.iter().map(SeriesHandle::values).collect()))
            }
            (InputKind::Series(n), source) => Err(ComputeError::MissingInput {
                primitive,
                expected: series_description(n),
                actual: match source {
                    Source::Bars => 0,
                    Source::Series(series) => series.len(),
                },
            }),
        }
    }
}

fn series_description(n: usize) -> &'static str {
    match n {
        1 => "1 series",
        2 => "2 series",
        _ => "3 series",
    }
}

/// Window length parameter: finite, integral and at least 1.
fn period(primitive: Primitive, value: f64) -> Result<usize, ComputeError> {
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 {
        Ok(value as usize)
    } else {
        Err(ComputeError::invalid_params(format!(
            "{primitive} period must be a positive integer, got {value}"
        )))
    }
}

/// Numeric factor parameter: any finite value.
fn factor(primitive: Primitive, value: f64) -> Result<f64, ComputeError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ComputeError::invalid_params(format!(
            "{primitive} factor must be finite, got {value}"
        )))
    }
}

impl Compute for Engine {
    fn compute(
        &self,
        primitive: Primitive,
        source: Source<'_>,
        params: &[f64],
    ) -> Result<SeriesHandle, ComputeError> {
        if params.len() != primitive.arity() {
            return Err(ComputeError::invalid_params(format!(
                "{primitive} takes {} parameters, got {}",
                primitive.arity(),
                params.len()
            )));
        }

        let input = self.resolve(primitive, source)?;
        let bars = self.bars();
        let p = |idx: usize| period(primitive, params[idx]);
        let f = |idx: usize| factor(primitive, params[idx]);

        let values = match (primitive, input) {
            (Primitive::Close, Input::Bars) => self.closes(),
            (Primitive::Sma, Input::Price(x)) => averages::sma(&x, p(0)?),
            (Primitive::Ema, Input::Price(x)) => averages::ema(&x, p(0)?),
            (Primitive::Wma, Input::Price(x)) => averages::wma(&x, p(0)?),
            (Primitive::Hma, Input::Price(x)) => averages::hma(&x, p(0)?),
            (Primitive::Zlema, Input::Price(x)) => averages::zlema(&x, p(0)?),
            (Primitive::TripleEma, Input::Price(x)) => averages::triple_ema(&x, p(0)?),
            (Primitive::Kama, Input::Price(x)) => averages::kama(&x, p(0)?, p(1)?, p(2)?),
            (Primitive::Rsi, Input::Price(x)) => momentum::rsi(&x, p(0)?),
            (Primitive::SmoothedRsi, Input::Price(x)) => momentum::smoothed_rsi(&x, p(0)?),
            (Primitive::Cmo, Input::Price(x)) => momentum::cmo(&x, p(0)?),
            (Primitive::Roc, Input::Price(x)) => momentum::roc(&x, p(0)?),
            (Primitive::Macd, Input::Price(x)) => momentum::macd(&x, p(0)?, p(1)?),
            (Primitive::Ravi, Input::Price(x)) => momentum::ravi(&x, p(0)?, p(1)?),
            (Primitive::Fisher, Input::Price(x)) => momentum::fisher(&x, p(0)?, f(1)?, f(2)?),
            (Primitive::Cci, Input::Bars) => momentum::cci(bars, p(0)?),
            (Primitive::PercentB, Input::Price(x)) => momentum::percent_b(&x, p(0)?, f(1)?),
            (Primitive::StdDev, Input::Price(x)) => volatility::std_dev(&x, p(0)?),
            (Primitive::BollingerUpper, Input::Series(s)) => {
                volatility::bollinger_upper(s[0], s[1], f(0)?)
            }
            (Primitive::BollingerLower, Input::Series(s)) => {
                volatility::bollinger_lower(s[0], s[1], f(0)?)
            }
            (Primitive::BollingerWidth, Input::Series(s)) => {
                volatility::bollinger_width(s[0], s[1], s[2])
            }
            (Primitive::TrueRange, Input::Bars) => volatility::true_range(bars),
            (Primitive::Atr, Input::Bars) => volatility::atr(bars, p(0)?),
            (Primitive::KeltnerMiddle, Input::Bars) => volatility::keltner_middle(bars, p(0)?),
            (Primitive::KeltnerUpper, Input::Series(s)) => {
                volatility::keltner_band(s[0], bars, f(0)?, p(1)?, 1.0)
            }
            (Primitive::KeltnerLower, Input::Series(s)) => {
                volatility::keltner_band(s[0], bars, f(0)?, p(1)?, -1.0)
            }
            (Primitive::UlcerIndex, Input::Price(x)) => volatility::ulcer_index(&x, p(0)?),
            (Primitive::TrailingStopLoss, Input::Price(x)) => {
                volatility::trailing_stop_loss(&x, f(0)?)
            }
            (Primitive::Amount, Input::Bars) => volume::amount(bars),
            (Primitive::OnBalanceVolume, Input::Bars) => volume::on_balance_volume(bars),
            (Primitive::PositiveVolumeIndex, Input::Bars) => volume::positive_volume_index(bars),
            (Primitive::NegativeVolumeIndex, Input::Bars) => volume::negative_volume_index(bars),
            (Primitive::Vwap, Input::Bars) => volume::vwap(bars, p(0)?),
            (Primitive::DirectionalMovementUp, Input::Bars) => {
                trend::directional_movement_up(bars, p(0)?)
            }
            (Primitive::DirectionalMovementDown, Input::Bars) => {
                trend::directional_movement_down(bars, p(0)?)
            }
            (Primitive::AroonUp, Input::Bars) => trend::aroon_up(bars, p(0)?),
            (Primitive::AroonDown, Input::Bars) => trend::aroon_down(bars, p(0)?),
            (Primitive::LowerShadow, Input::Bars) => candles::lower_shadow(bars),
            (Primitive::UpperShadow, Input::Bars) => candles::upper_shadow(bars),
            (Primitive::RealBody, Input::Bars) => candles::real_body(bars),
            (primitive, _) => {
                return Err(ComputeError::invalid_params(format!(
                    "{primitive} cannot be computed from the given input"
                )));
            }
        };

        Ok(values.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn make_candle(close: f64) -> Candle {
        Candle {
            timestamp_ns: 0,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 10.0,
        }
    }

    fn engine() -> Engine {
        let candles: Vec<Candle> = (1..=10).map(|i| make_candle(f64::from(i))).collect();
        Engine::new(candles)
    }

    #[test]
    fn test_sma_over_bars() {
        let sma = engine().compute(Primitive::Sma, Source::Bars, &[3.0]).unwrap();
        assert_eq!(sma.len(), 10);
        assert!(sma.values()[1].is_nan());
        assert!((sma.values()[2] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_chained_series() {
        let engine = engine();
        let macd = engine
            .compute(Primitive::Macd, Source::Bars, &[3.0, 6.0])
            .unwrap();
        let signal = engine
            .compute(Primitive::Ema, Source::Series(&[macd.clone()]), &[3.0])
            .unwrap();
        assert_eq!(signal.len(), macd.len());
        assert!(!signal.same_series(&macd));
    }

    #[test]
    fn test_arity_is_checked() {
        let err = engine().compute(Primitive::Sma, Source::Bars, &[]).unwrap_err();
        assert_eq!(
            err,
            ComputeError::invalid_params("SMA takes 1 parameters, got 0")
        );
    }

    #[test]
    fn test_period_must_be_positive_integer() {
        let engine = engine();
        assert!(engine.compute(Primitive::Ema, Source::Bars, &[0.0]).is_err());
        assert!(engine.compute(Primitive::Ema, Source::Bars, &[2.5]).is_err());
        assert!(engine.compute(Primitive::Ema, Source::Bars, &[f64::NAN]).is_err());
    }

    const WINDOWED_OVER_BARS: &[Primitive] = &[
        Primitive::Sma,
        Primitive::Ema,
        Primitive::Wma,
        Primitive::Hma,
        Primitive::Zlema,
        Primitive::TripleEma,
        Primitive::Kama,
        Primitive::Rsi,
        Primitive::SmoothedRsi,
        Primitive::Cmo,
        Primitive::Roc,
        Primitive::Macd,
        Primitive::Ravi,
        Primitive::Fisher,
        Primitive::Cci,
        Primitive::PercentB,
        Primitive::StdDev,
        Primitive::Atr,
        Primitive::KeltnerMiddle,
        Primitive::UlcerIndex,
        Primitive::Vwap,
        Primitive::DirectionalMovementUp,
        Primitive::DirectionalMovementDown,
        Primitive::AroonUp,
        Primitive::AroonDown,
    ];

    #[test]
    fn test_largest_period_keeps_bar_length() {
        let engine = engine();
        for primitive in WINDOWED_OVER_BARS {
            let params = vec![u64::MAX as f64; primitive.arity()];
            let series = engine.compute(*primitive, Source::Bars, &params).unwrap();
            assert_eq!(series.len(), 10, "{primitive}");
        }
        let wma = engine
            .compute(Primitive::Wma, Source::Bars, &[5_000_000_000.0])
            .unwrap();
        assert!(wma.values().iter().all(|v| v.is_nan()));
    }

    proptest! {
        #[test]
        fn prop_periods_beyond_the_bars_never_panic(
            period in prop_oneof![
                (1u64..=10).prop_map(|p| p as f64),
                (11u64..(1u64 << 53)).prop_map(|p| p as f64),
                Just(u64::MAX as f64),
            ],
        ) {
            let engine = engine();
            for primitive in WINDOWED_OVER_BARS {
                let params = vec![period; primitive.arity()];
                let series = engine.compute(*primitive, Source::Bars, &params).unwrap();
                prop_assert_eq!(series.len(), engine.len());
            }
        }
    }

    #[test]
    fn test_bar_primitive_rejects_series() {
        let engine = engine();
        let close = engine.compute(Primitive::Close, Source::Bars, &[]).unwrap();
        let err = engine
            .compute(Primitive::Cci, Source::Series(&[close]), &[5.0])
            .unwrap_err();
        assert!(matches!(err, ComputeError::MissingInput { actual: 1, .. }));
    }

    #[test]
    fn test_series_count_and_length_are_checked() {
        let engine = engine();
        let close = engine.compute(Primitive::Close, Source::Bars, &[]).unwrap();
        assert!(matches!(
            engine.compute(Primitive::BollingerWidth, Source::Series(&[close]), &[]),
            Err(ComputeError::MissingInput { actual: 1, .. })
        ));

        let short = SeriesHandle::from(vec![1.0, 2.0]);
        assert_eq!(
            engine
                .compute(Primitive::Sma, Source::Series(&[short]), &[1.0])
                .unwrap_err(),
            ComputeError::LengthMismatch {
                expected: 10,
                actual: 2
            }
        );
    }

    #[test]
    fn test_bollinger_chain() {
        let engine = engine();
        let middle = engine.compute(Primitive::Ema, Source::Bars, &[5.0]).unwrap();
        let sd = engine.compute(Primitive::StdDev, Source::Bars, &[5.0]).unwrap();
        let upper = engine
            .compute(
                Primitive::BollingerUpper,
                Source::Series(&[middle.clone(), sd.clone()]),
                &[2.0],
            )
            .unwrap();
        let lower = engine
            .compute(
                Primitive::BollingerLower,
                Source::Series(&[middle.clone(), sd]),
                &[2.0],
            )
            .unwrap();
        let width = engine
            .compute(
                Primitive::BollingerWidth,
                Source::Series(&[upper.clone(), middle.clone(), lower.clone()]),
                &[],
            )
            .unwrap();

        let i = 9;
        assert!(upper.values()[i] > middle.values()[i]);
        assert!(lower.values()[i] < middle.values()[i]);
        assert!(width.values()[i] > 0.0);
        assert!(width.values()[3].is_nan());
    }

    #[test]
    fn test_identical_inputs_identical_output() {
        let engine = engine();
        let a = engine.compute(Primitive::Rsi, Source::Bars, &[4.0]).unwrap();
        let b = engine.compute(Primitive::Rsi, Source::Bars, &[4.0]).unwrap();
        let same = a
            .values()
            .iter()
            .zip(b.values())
            .all(|(x, y)| x == y || (x.is_nan() && y.is_nan()));
        assert!(same);
    }
}
