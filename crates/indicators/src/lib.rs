//! tachart indicators
//!
//! Computation capability consumed by the chart registry.
//!
//! # Features
//! - [`Compute`] trait: primitive + source + numeric params -> series handle
//! - Chainable [`SeriesHandle`]s (a computed series can be the source of another)
//! - [`Engine`]: default implementation over an OHLCV bar series
//!
//! # Available Primitives
//! - Averages: SMA, EMA, WMA, HMA, ZLEMA, triple EMA, KAMA
//! - Oscillators: RSI (simple and Wilder), CMO, ROC, MACD, RAVI, Fisher, CCI, %B
//! - Bands and ranges: standard deviation, Bollinger, true range, ATR, Keltner,
//!   ulcer index, trailing stop-loss
//! - Volume: amount, OBV, PVI, NVI, VWAP
//! - Trend: directional movement up/down, Aroon up/down
//! - Candle anatomy: lower/upper shadow, real body

#![deny(clippy::all)]

pub mod engine;
pub mod error;
pub mod impl_;
pub mod traits;

// Re-export main types
pub use engine::Engine;
pub use error::ComputeError;
pub use traits::{Compute, InputKind, Primitive, SeriesHandle, Source};
