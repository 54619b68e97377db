//! Indicator grouping tags.

use crate::error::ParamError;
use crate::style::symbol_enum;

symbol_enum! {
    /// Grouping tag used for filtered enumeration, independent of the type name.
    #[derive(Default)]
    Category, "category" {
        #[default]
        Default => "DEFAULT",
        Bollinger => "BOLLINGER",
        Candles => "CANDLES",
        Custom => "CUSTOM",
        Helpers => "HELPERS",
        Ichimoku => "ICHIMOKU",
        Keltner => "KELTNER",
        Statistics => "STATISTICS",
        Strategy => "STRATEGY",
        Volume => "VOLUME",
    }
}

impl Category {
    /// Resolves an optional category attribute.
    ///
    /// Absent or empty attributes are `DEFAULT`; this is the only
    /// configuration value with a default.
    ///
    /// # Errors
    /// Returns [`ParamError::UnknownEnumValue`] for a non-empty unknown symbol.
    pub fn from_attribute(raw: Option<&str>) -> Result<Self, ParamError> {
        match raw {
            None | Some("") => Ok(Category::Default),
            Some(symbol) => symbol.parse(),
        }
    }
}
