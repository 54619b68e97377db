//! Candle anatomy measures, drawn in their own panel.

use tachart_config::ConfigStore;
use tachart_indicators::{Compute, Primitive};
use tachart_types::{ChartPlacement, CompoundKey};

use super::plain;
use crate::error::ChartError;
use crate::factory::Construction;

pub fn lower_shadow(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    plain(key, store, compute, Primitive::LowerShadow, ChartPlacement::Subchart)
}

pub fn upper_shadow(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    plain(key, store, compute, Primitive::UpperShadow, ChartPlacement::Subchart)
}

/// Close minus open; negative for bearish candles.
pub fn real_body(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    plain(key, store, compute, Primitive::RealBody, ChartPlacement::Subchart)
}
