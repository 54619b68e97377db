//! Range and risk measures.

use tachart_config::ConfigStore;
use tachart_indicators::{Compute, Primitive, Source};
use tachart_types::{ChartPlacement, CompoundKey};

use super::{TIME_FRAME, label, plain, single_entry, windowed};
use crate::error::ChartError;
use crate::factory::Construction;
use crate::params::Params;

const THRESHOLD: &str = "Threshold";

pub fn true_range(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    plain(key, store, compute, Primitive::TrueRange, ChartPlacement::Subchart)
}

/// Ulcer index over `TimeFrame`.
pub fn ulcer_index(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    windowed(
        key,
        store,
        compute,
        Primitive::UlcerIndex,
        &[TIME_FRAME],
        ChartPlacement::Subchart,
    )
}

/// Trailing stop limit `Threshold` price units below the running high.
pub fn trailing_stop_loss(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    let params = Params::new(store, key);
    let (threshold, threshold_f64) = params.factor(THRESHOLD)?;
    let series = compute.compute(Primitive::TrailingStopLoss, Source::Bars, &[threshold_f64])?;
    single_entry(&params, label(key, &[&threshold]), series, ChartPlacement::Overlay)
}
