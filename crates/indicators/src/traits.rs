//! Computation capability traits and types.
//!
//! The registry only talks to [`Compute`]. A primitive is computed from a
//! [`Source`] and a list of numeric parameters and yields an opaque
//! [`SeriesHandle`], which can be fed back in as the source of another
//! primitive (e.g. an EMA signal line over a MACD line).

use std::fmt;
use std::sync::Arc;

use crate::error::ComputeError;

/// Opaque handle to a computed value series.
///
/// Cloning is cheap; the values are shared. Values before the warm-up
/// period are `NaN`.
#[derive(Debug, Clone)]
pub struct SeriesHandle {
    values: Arc<[f64]>,
}

impl SeriesHandle {
    /// Read-only view of the values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of values (equals the bar count of the engine that produced it).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when the series holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at index if finite.
    #[must_use]
    pub fn value_at(&self, idx: usize) -> Option<f64> {
        self.values.get(idx).copied().filter(|v| v.is_finite())
    }

    /// `true` if both handles share the same storage.
    #[must_use]
    pub fn same_series(&self, other: &SeriesHandle) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }
}

impl From<Vec<f64>> for SeriesHandle {
    fn from(values: Vec<f64>) -> Self {
        Self {
            values: values.into(),
        }
    }
}

/// What a primitive is computed from.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// The bar series the capability is bound to. Price based primitives
    /// use the close price.
    Bars,
    /// Previously computed series, in the order the primitive expects.
    Series(&'a [SeriesHandle]),
}

/// Input a primitive accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// The close price (from [`Source::Bars`]) or exactly one series.
    Price,
    /// Only [`Source::Bars`]: the primitive needs full OHLCV bars.
    Bars,
    /// Exactly this many series.
    Series(usize),
}

/// Primitive computations offered by a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Close price.
    Close,
    /// Simple moving average `[period]`.
    Sma,
    /// Exponential moving average `[period]`.
    Ema,
    /// Linearly weighted moving average `[period]`.
    Wma,
    /// Hull moving average `[period]`.
    Hma,
    /// Zero-lag EMA `[period]`.
    Zlema,
    /// Triple EMA `[period]`.
    TripleEma,
    /// Kaufman adaptive moving average `[efficiency period, fast, slow]`.
    Kama,
    /// Relative strength index, simple averages `[period]`.
    Rsi,
    /// Relative strength index, Wilder smoothing `[period]`.
    SmoothedRsi,
    /// Chande momentum oscillator `[period]`.
    Cmo,
    /// Rate of change in percent `[period]`.
    Roc,
    /// MACD line, fast EMA minus slow EMA `[short, long]`.
    Macd,
    /// Range action verification index `[short, long]`.
    Ravi,
    /// Fisher transform `[period, alpha, beta]`.
    Fisher,
    /// Commodity channel index over typical price `[period]`.
    Cci,
    /// Bollinger %B over a simple average `[period, k]`.
    PercentB,
    /// Population standard deviation `[period]`.
    StdDev,
    /// Middle + k * deviation; inputs (middle, deviation) `[k]`.
    BollingerUpper,
    /// Middle - k * deviation; inputs (middle, deviation) `[k]`.
    BollingerLower,
    /// Band width in percent of the middle; inputs (upper, middle, lower).
    BollingerWidth,
    /// True range.
    TrueRange,
    /// Average true range, Wilder smoothing `[period]`.
    Atr,
    /// EMA of the typical price `[period]`.
    KeltnerMiddle,
    /// Middle + ratio * ATR; input (middle) `[ratio, atr period]`.
    KeltnerUpper,
    /// Middle - ratio * ATR; input (middle) `[ratio, atr period]`.
    KeltnerLower,
    /// Ulcer index `[period]`.
    UlcerIndex,
    /// Trailing stop-loss limit `[distance]`.
    TrailingStopLoss,
    /// Close * volume.
    Amount,
    /// On-balance volume.
    OnBalanceVolume,
    /// Positive volume index.
    PositiveVolumeIndex,
    /// Negative volume index.
    NegativeVolumeIndex,
    /// Rolling volume weighted average price `[period]`.
    Vwap,
    /// Wilder-averaged upward directional movement `[period]`.
    DirectionalMovementUp,
    /// Wilder-averaged downward directional movement `[period]`.
    DirectionalMovementDown,
    /// Aroon up `[period]`.
    AroonUp,
    /// Aroon down `[period]`.
    AroonDown,
    /// Low to body bottom.
    LowerShadow,
    /// Body top to high.
    UpperShadow,
    /// Close minus open.
    RealBody,
}

impl Primitive {
    /// Upper-case name used in logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Close => "CLOSE",
            Primitive::Sma => "SMA",
            Primitive::Ema => "EMA",
            Primitive::Wma => "WMA",
            Primitive::Hma => "HMA",
            Primitive::Zlema => "ZLEMA",
            Primitive::TripleEma => "TRIPLE_EMA",
            Primitive::Kama => "KAMA",
            Primitive::Rsi => "RSI",
            Primitive::SmoothedRsi => "SMOOTHED_RSI",
            Primitive::Cmo => "CMO",
            Primitive::Roc => "ROC",
            Primitive::Macd => "MACD",
            Primitive::Ravi => "RAVI",
            Primitive::Fisher => "FISHER",
            Primitive::Cci => "CCI",
            Primitive::PercentB => "PERCENT_B",
            Primitive::StdDev => "STD_DEV",
            Primitive::BollingerUpper => "BOLLINGER_UPPER",
            Primitive::BollingerLower => "BOLLINGER_LOWER",
            Primitive::BollingerWidth => "BOLLINGER_WIDTH",
            Primitive::TrueRange => "TRUE_RANGE",
            Primitive::Atr => "ATR",
            Primitive::KeltnerMiddle => "KELTNER_MIDDLE",
            Primitive::KeltnerUpper => "KELTNER_UPPER",
            Primitive::KeltnerLower => "KELTNER_LOWER",
            Primitive::UlcerIndex => "ULCER_INDEX",
            Primitive::TrailingStopLoss => "TRAILING_STOP_LOSS",
            Primitive::Amount => "AMOUNT",
            Primitive::OnBalanceVolume => "OBV",
            Primitive::PositiveVolumeIndex => "PVI",
            Primitive::NegativeVolumeIndex => "NVI",
            Primitive::Vwap => "VWAP",
            Primitive::DirectionalMovementUp => "DM_UP",
            Primitive::DirectionalMovementDown => "DM_DOWN",
            Primitive::AroonUp => "AROON_UP",
            Primitive::AroonDown => "AROON_DOWN",
            Primitive::LowerShadow => "LOWER_SHADOW",
            Primitive::UpperShadow => "UPPER_SHADOW",
            Primitive::RealBody => "REAL_BODY",
        }
    }

    /// Number of numeric parameters the primitive takes.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Primitive::Close
            | Primitive::BollingerWidth
            | Primitive::TrueRange
            | Primitive::Amount
            | Primitive::OnBalanceVolume
            | Primitive::PositiveVolumeIndex
            | Primitive::NegativeVolumeIndex
            | Primitive::LowerShadow
            | Primitive::UpperShadow
            | Primitive::RealBody => 0,
            Primitive::Macd
            | Primitive::Ravi
            | Primitive::PercentB
            | Primitive::KeltnerUpper
            | Primitive::KeltnerLower => 2,
            Primitive::Kama | Primitive::Fisher => 3,
            _ => 1,
        }
    }

    /// Input the primitive accepts.
    #[must_use]
    pub fn input(&self) -> InputKind {
        match self {
            Primitive::Close
            | Primitive::Cci
            | Primitive::TrueRange
            | Primitive::Atr
            | Primitive::KeltnerMiddle
            | Primitive::Amount
            | Primitive::OnBalanceVolume
            | Primitive::PositiveVolumeIndex
            | Primitive::NegativeVolumeIndex
            | Primitive::Vwap
            | Primitive::DirectionalMovementUp
            | Primitive::DirectionalMovementDown
            | Primitive::AroonUp
            | Primitive::AroonDown
            | Primitive::LowerShadow
            | Primitive::UpperShadow
            | Primitive::RealBody => InputKind::Bars,
            Primitive::BollingerUpper | Primitive::BollingerLower => InputKind::Series(2),
            Primitive::BollingerWidth => InputKind::Series(3),
            Primitive::KeltnerUpper | Primitive::KeltnerLower => InputKind::Series(1),
            _ => InputKind::Price,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// External computation capability.
///
/// Implementations must be pure: identical inputs yield identical series.
pub trait Compute {
    /// Computes `primitive` from `source` with numeric `params`.
    ///
    /// # Errors
    /// Returns [`ComputeError`] when the parameters or inputs do not match
    /// what the primitive expects.
    fn compute(
        &self,
        primitive: Primitive,
        source: Source<'_>,
        params: &[f64],
    ) -> Result<SeriesHandle, ComputeError>;
}
