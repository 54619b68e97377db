//! tachart types
//!
//! Shared vocabulary of the indicator registry: compound keys, categories,
//! styling symbols, price bars and raw parameter conversion.

#![deny(clippy::all)]

pub mod candle;
pub mod category;
pub mod error;
pub mod key;
pub mod resolve;
pub mod style;

// Re-export main types for convenience
pub use candle::Candle;
pub use category::Category;
pub use error::ParamError;
pub use key::{CompoundKey, KEY_SEPARATOR};
pub use resolve::ParamKind;
pub use rust_decimal::Decimal;
pub use style::{ChartPlacement, Color, Shape, Stroke};
