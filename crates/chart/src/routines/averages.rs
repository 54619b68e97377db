//! Moving averages of the close price. All draw over the price panel.

use tachart_config::ConfigStore;
use tachart_indicators::{Compute, Primitive};
use tachart_types::{ChartPlacement, CompoundKey};

use super::{TIME_FRAME, windowed};
use crate::error::ChartError;
use crate::factory::Construction;

const EFFICIENCY_RATIO: &str = "TimeFrameEfficiencyRatio";
const FAST: &str = "TimeFrameFast";
const SLOW: &str = "TimeFrameSlow";

fn average(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
    primitive: Primitive,
) -> Result<Construction, ChartError> {
    windowed(
        key,
        store,
        compute,
        primitive,
        &[TIME_FRAME],
        ChartPlacement::Overlay,
    )
}

/// Simple moving average over `TimeFrame`.
pub fn sma(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    average(key, store, compute, Primitive::Sma)
}

/// Exponential moving average over `TimeFrame`.
pub fn ema(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    average(key, store, compute, Primitive::Ema)
}

/// Weighted moving average over `TimeFrame`.
pub fn wma(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    average(key, store, compute, Primitive::Wma)
}

/// Hull moving average over `TimeFrame`.
pub fn hma(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    average(key, store, compute, Primitive::Hma)
}

pub fn zlema(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    average(key, store, compute, Primitive::Zlema)
}

pub fn triple_ema(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    average(key, store, compute, Primitive::TripleEma)
}

/// Kaufman adaptive average. The efficiency window comes first, then the
/// fast and slow smoothing constants.
pub fn kama(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    windowed(
        key,
        store,
        compute,
        Primitive::Kama,
        &[EFFICIENCY_RATIO, FAST, SLOW],
        ChartPlacement::Overlay,
    )
}
