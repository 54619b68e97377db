//! Raw parameter text to typed values.
//!
//! All functions are pure. Whitespace is not trimmed: the configuration
//! document is expected to hold exact values.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::category::Category;
use crate::error::ParamError;
use crate::style::{ChartPlacement, Color, Shape, Stroke};

/// Semantic target of a raw parameter value.
///
/// The optional `type` hint of a stored parameter uses these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Signed integer.
    Integer,
    /// Positive window length.
    Period,
    /// Decimal with currency precision.
    Decimal,
    /// `TRUE` / `FALSE`.
    Boolean,
    /// [`Color`] symbol.
    Color,
    /// [`Stroke`] symbol.
    Stroke,
    /// [`Shape`] symbol.
    Shape,
    /// [`ChartPlacement`] symbol.
    ChartType,
    /// [`Category`] symbol.
    Category,
}

impl ParamKind {
    /// Resolves a stored type hint such as `"integer"`; `None` if unknown or empty.
    #[must_use]
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint {
            "integer" | "int" => Some(ParamKind::Integer),
            "period" => Some(ParamKind::Period),
            "decimal" | "double" => Some(ParamKind::Decimal),
            "boolean" => Some(ParamKind::Boolean),
            "color" => Some(ParamKind::Color),
            "stroke" => Some(ParamKind::Stroke),
            "shape" => Some(ParamKind::Shape),
            "chart_type" => Some(ParamKind::ChartType),
            "category" => Some(ParamKind::Category),
            _ => None,
        }
    }

    /// Checks that `raw` converts to this kind without keeping the value.
    ///
    /// # Errors
    /// Returns the same error the typed conversion would.
    pub fn validate(&self, raw: &str) -> Result<(), ParamError> {
        match self {
            ParamKind::Integer => integer(raw).map(drop),
            ParamKind::Period => period(raw).map(drop),
            ParamKind::Decimal => decimal(raw).map(drop),
            ParamKind::Boolean => boolean(raw).map(drop),
            ParamKind::Color => symbol::<Color>(raw).map(drop),
            ParamKind::Stroke => symbol::<Stroke>(raw).map(drop),
            ParamKind::Shape => symbol::<Shape>(raw).map(drop),
            ParamKind::ChartType => symbol::<ChartPlacement>(raw).map(drop),
            ParamKind::Category => symbol::<Category>(raw).map(drop),
        }
    }
}

/// Parses a signed integer.
///
/// # Errors
/// Returns [`ParamError::Parse`] if `raw` is not an integer.
pub fn integer(raw: &str) -> Result<i64, ParamError> {
    raw.parse().map_err(|_| ParamError::parse(raw, "integer"))
}

/// Parses a window length, which must be at least 1.
///
/// # Errors
/// Returns [`ParamError::Parse`] if `raw` is not a positive integer.
pub fn period(raw: &str) -> Result<usize, ParamError> {
    match raw.parse::<usize>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(ParamError::parse(raw, "period")),
    }
}

/// Parses a decimal number (e.g. `"2"`, `"0.025"`, `"-1.5"`).
///
/// Scientific notation is accepted as well (`"1e-3"`).
///
/// # Errors
/// Returns [`ParamError::Parse`] if `raw` is not a decimal number.
pub fn decimal(raw: &str) -> Result<Decimal, ParamError> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| ParamError::parse(raw, "decimal"))
}

/// Parses a boolean flag. Only the exact symbols `TRUE` and `FALSE` match.
///
/// # Errors
/// Returns [`ParamError::Parse`] for anything else.
pub fn boolean(raw: &str) -> Result<bool, ParamError> {
    match raw {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        _ => Err(ParamError::parse(raw, "boolean")),
    }
}

/// Looks up a symbol in a closed enumeration.
///
/// # Errors
/// Returns [`ParamError::UnknownEnumValue`] for symbols outside the table.
pub fn symbol<T>(raw: &str) -> Result<T, ParamError>
where
    T: FromStr<Err = ParamError>,
{
    raw.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer() {
        assert_eq!(integer("14"), Ok(14));
        assert_eq!(integer("-3"), Ok(-3));
        assert_eq!(integer("1.5"), Err(ParamError::parse("1.5", "integer")));
        assert!(integer("").is_err());
    }

    #[test]
    fn test_period_must_be_positive() {
        assert_eq!(period("20"), Ok(20));
        assert!(period("0").is_err());
        assert!(period("-5").is_err());
        assert!(period(" 5").is_err());
    }

    #[test]
    fn test_decimal() {
        assert_eq!(decimal("2"), Ok(Decimal::from(2)));
        assert_eq!(decimal("0.025").unwrap().to_string(), "0.025");
        assert_eq!(decimal("1e-3").unwrap().to_string(), "0.001");
        assert!(matches!(decimal("two"), Err(ParamError::Parse { .. })));
    }

    #[test]
    fn test_boolean() {
        assert_eq!(boolean("TRUE"), Ok(true));
        assert_eq!(boolean("FALSE"), Ok(false));
        assert!(boolean("yes").is_err());
        for raw in ["true", "false", "True", " TRUE"] {
            assert_eq!(boolean(raw), Err(ParamError::parse(raw, "boolean")));
        }
    }

    #[test]
    fn test_symbol() {
        assert_eq!(symbol::<Color>("GREEN"), Ok(Color::Green));
        assert_eq!(symbol::<Shape>("NONE"), Ok(Shape::None));
        assert!(matches!(
            symbol::<Stroke>("WIDE"),
            Err(ParamError::UnknownEnumValue { kind: "stroke", .. })
        ));
    }

    #[test]
    fn test_kind_hints() {
        assert_eq!(ParamKind::from_hint("integer"), Some(ParamKind::Integer));
        assert_eq!(ParamKind::from_hint("color"), Some(ParamKind::Color));
        assert_eq!(ParamKind::from_hint(""), None);

        assert!(ParamKind::Color.validate("RED").is_ok());
        assert!(ParamKind::Integer.validate("x").is_err());
    }
}
