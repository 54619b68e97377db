//! Typed parameter lookup for one configured instance.
//!
//! Every lookup fails on a missing parameter, except the category (absent
//! means `DEFAULT`) and the optional `ChartType` placement override.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tachart_config::{ConfigError, ConfigStore};
use tachart_types::resolve;
use tachart_types::{Category, ChartPlacement, Color, CompoundKey, ParamError, Shape, Stroke};

use crate::style::SlotStyle;

/// Name of the optional placement override parameter.
pub const CHART_TYPE: &str = "ChartType";

/// Reads the parameters of `key` from `store`.
#[derive(Debug, Clone, Copy)]
pub struct Params<'a> {
    store: &'a ConfigStore,
    key: &'a CompoundKey,
}

impl<'a> Params<'a> {
    /// Binds a store and a key.
    #[must_use]
    pub fn new(store: &'a ConfigStore, key: &'a CompoundKey) -> Self {
        Self { store, key }
    }

    /// Instance the lookups target.
    #[must_use]
    pub fn key(&self) -> &CompoundKey {
        self.key
    }

    /// Raw value.
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`] if the parameter is missing.
    pub fn raw(&self, name: &str) -> Result<String, ConfigError> {
        self.store.get_parameter(self.key, name)
    }

    /// Window length (positive integer).
    ///
    /// # Errors
    /// `NotFound` or a `Parse` error.
    pub fn period(&self, name: &str) -> Result<usize, ConfigError> {
        Ok(resolve::period(&self.raw(name)?)?)
    }

    /// Signed integer.
    ///
    /// # Errors
    /// `NotFound` or a `Parse` error.
    pub fn integer(&self, name: &str) -> Result<i64, ConfigError> {
        Ok(resolve::integer(&self.raw(name)?)?)
    }

    /// Decimal value.
    ///
    /// # Errors
    /// `NotFound` or a `Parse` error.
    pub fn decimal(&self, name: &str) -> Result<Decimal, ConfigError> {
        Ok(resolve::decimal(&self.raw(name)?)?)
    }

    /// Decimal value together with its `f64` form for the computation capability.
    ///
    /// # Errors
    /// `NotFound` or a `Parse` error.
    pub fn factor(&self, name: &str) -> Result<(Decimal, f64), ConfigError> {
        let value = self.decimal(name)?;
        let float = value
            .to_f64()
            .ok_or_else(|| ParamError::parse(value.to_string(), "decimal"))?;
        Ok((value, float))
    }

    /// Boolean flag.
    ///
    /// # Errors
    /// `NotFound` or a `Parse` error.
    pub fn flag(&self, name: &str) -> Result<bool, ConfigError> {
        Ok(resolve::boolean(&self.raw(name)?)?)
    }

    /// Color symbol.
    ///
    /// # Errors
    /// `NotFound` or an `UnknownEnumValue` error.
    pub fn color(&self, name: &str) -> Result<Color, ConfigError> {
        Ok(resolve::symbol(&self.raw(name)?)?)
    }

    /// Stroke symbol.
    ///
    /// # Errors
    /// `NotFound` or an `UnknownEnumValue` error.
    pub fn stroke(&self, name: &str) -> Result<Stroke, ConfigError> {
        Ok(resolve::symbol(&self.raw(name)?)?)
    }

    /// Shape symbol.
    ///
    /// # Errors
    /// `NotFound` or an `UnknownEnumValue` error.
    pub fn shape(&self, name: &str) -> Result<Shape, ConfigError> {
        Ok(resolve::symbol(&self.raw(name)?)?)
    }

    /// Style from `Color{suffix}`, `Stroke{suffix}` and `Shape{suffix}`.
    /// Slot 0 uses the empty suffix.
    ///
    /// # Errors
    /// `NotFound` or an `UnknownEnumValue` error for any of the three.
    pub fn slot_style(&self, suffix: &str) -> Result<SlotStyle, ConfigError> {
        Ok(SlotStyle::new(
            self.color(&format!("Color{suffix}"))?,
            self.stroke(&format!("Stroke{suffix}"))?,
            self.shape(&format!("Shape{suffix}"))?,
        ))
    }

    /// Placement from the optional `ChartType` parameter, `default` if absent.
    ///
    /// # Errors
    /// `UnknownEnumValue` if the parameter is present with an unknown symbol.
    pub fn placement(&self, default: ChartPlacement) -> Result<ChartPlacement, ConfigError> {
        match self.raw(CHART_TYPE) {
            Ok(raw) => Ok(resolve::symbol(&raw)?),
            Err(err) if err.is_not_found() => Ok(default),
            Err(err) => Err(err),
        }
    }

    /// Category of the instance, `DEFAULT` when absent.
    ///
    /// # Errors
    /// `NotFound` for a missing instance, `UnknownEnumValue` for an unknown symbol.
    pub fn category(&self) -> Result<Category, ConfigError> {
        self.store.category(self.key)
    }
}
