//! Closed symbol tables for styling parameters.
//!
//! Lookups are exact and case-sensitive. An unknown symbol is an error,
//! never a fallback to some default.

/// Declares a closed enumeration with a fixed symbol table.
///
/// Generates `SYMBOLS`, `as_str`, `FromStr` (exact match, returning
/// [`crate::ParamError::UnknownEnumValue`]) and `Display`.
macro_rules! symbol_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $symbol:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $symbol)] $variant, )+
        }

        impl $name {
            /// Every accepted configuration symbol, in declaration order.
            pub const SYMBOLS: &'static [&'static str] = &[$($symbol),+];

            /// Configuration symbol of this value.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $symbol, )+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ParamError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $symbol => Ok($name::$variant), )+
                    _ => Err($crate::error::ParamError::unknown_symbol($kind, s)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use symbol_enum;

symbol_enum! {
    /// Named series color.
    Color, "color" {
        Black => "BLACK",
        Blue => "BLUE",
        Cyan => "CYAN",
        DarkGray => "DARK_GRAY",
        Gray => "GRAY",
        Green => "GREEN",
        LightGray => "LIGHT_GRAY",
        Magenta => "MAGENTA",
        Orange => "ORANGE",
        Pink => "PINK",
        Red => "RED",
        White => "WHITE",
        Yellow => "YELLOW",
    }
}

impl Color {
    /// sRGB components.
    #[must_use]
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            Color::Black => [0, 0, 0],
            Color::Blue => [0, 0, 255],
            Color::Cyan => [0, 255, 255],
            Color::DarkGray => [64, 64, 64],
            Color::Gray => [128, 128, 128],
            Color::Green => [0, 255, 0],
            Color::LightGray => [192, 192, 192],
            Color::Magenta => [255, 0, 255],
            Color::Orange => [255, 200, 0],
            Color::Pink => [255, 175, 175],
            Color::Red => [255, 0, 0],
            Color::White => [255, 255, 255],
            Color::Yellow => [255, 255, 0],
        }
    }
}

symbol_enum! {
    /// Named line stroke style.
    Stroke, "stroke" {
        Thin => "THIN",
        Normal => "NORMAL",
        Thick => "THICK",
        Dashed => "DASHED",
        Dotted => "DOTTED",
    }
}

impl Stroke {
    /// Line width in logical pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        match self {
            Stroke::Thin => 0.5,
            Stroke::Normal | Stroke::Dashed | Stroke::Dotted => 1.0,
            Stroke::Thick => 2.0,
        }
    }

    /// Dash pattern (on, off) in logical pixels; `None` for solid lines.
    #[must_use]
    pub fn dash(&self) -> Option<[f32; 2]> {
        match self {
            Stroke::Dashed => Some([6.0, 4.0]),
            Stroke::Dotted => Some([1.0, 3.0]),
            Stroke::Thin | Stroke::Normal | Stroke::Thick => None,
        }
    }
}

symbol_enum! {
    /// Point marker shape. `NONE` disables markers but keeps the line.
    Shape, "shape" {
        None => "NONE",
        Circle => "CIRCLE",
        Square => "SQUARE",
        Triangle => "TRIANGLE",
        Diamond => "DIAMOND",
        Cross => "CROSS",
    }
}

impl Shape {
    /// The marker to draw, or `None` when markers are disabled.
    #[must_use]
    pub fn marker(self) -> Option<Shape> {
        match self {
            Shape::None => Option::None,
            shape => Some(shape),
        }
    }
}

symbol_enum! {
    /// Where an indicator is drawn relative to the price chart.
    ChartPlacement, "chart type" {
        /// Drawn on top of the price series.
        Overlay => "OVERLAY",
        /// Drawn in its own sub-panel.
        Subchart => "SUBCHART",
    }
}

impl ChartPlacement {
    /// `true` when the indicator needs its own sub-panel.
    #[must_use]
    pub fn is_subchart(&self) -> bool {
        matches!(self, ChartPlacement::Subchart)
    }
}
