use thiserror::Error;

/// Errors raised while converting raw configuration text into typed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// Raw value could not be converted to the expected type
    #[error("cannot parse {value:?} as {expected}")]
    Parse {
        /// The offending raw value.
        value: String,
        /// Human-readable name of the target type.
        expected: &'static str,
    },

    /// Symbol outside of a closed enumeration
    #[error("unknown {kind} value: {value:?}")]
    UnknownEnumValue {
        /// Enumeration name (e.g. "color").
        kind: &'static str,
        /// The offending symbol.
        value: String,
    },

    /// Text that is not a valid `TypeName_InstanceID` key
    #[error("invalid indicator key: {0:?}")]
    InvalidKey(String),
}

impl ParamError {
    /// Creates a `Parse` error for `value`.
    #[must_use]
    pub fn parse(value: impl Into<String>, expected: &'static str) -> Self {
        ParamError::Parse {
            value: value.into(),
            expected,
        }
    }

    /// Creates an `UnknownEnumValue` error for `value`.
    #[must_use]
    pub fn unknown_symbol(kind: &'static str, value: impl Into<String>) -> Self {
        ParamError::UnknownEnumValue {
            kind,
            value: value.into(),
        }
    }
}
