//! Volume based indicators.

use tachart_config::ConfigStore;
use tachart_indicators::{Compute, Primitive, Source};
use tachart_types::{ChartPlacement, CompoundKey};

use super::{TIME_FRAME, label, numeric, plain, windowed};
use crate::entry::{ChartIndicator, NamedSeries};
use crate::error::ChartError;
use crate::factory::Construction;
use crate::params::Params;
use crate::style::StyleDescriptor;

const TIME_FRAME_VWAP: &str = "TimeFrameVWAP";
const TIME_FRAME_MVWAP: &str = "TimeFrameMVWAP";

/// Traded amount, close times volume.
pub fn amount(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    plain(key, store, compute, Primitive::Amount, ChartPlacement::Subchart)
}

/// Positive volume index.
pub fn pvi(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    plain(key, store, compute, Primitive::PositiveVolumeIndex, ChartPlacement::Subchart)
}

/// Negative volume index.
pub fn nvi(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    plain(key, store, compute, Primitive::NegativeVolumeIndex, ChartPlacement::Subchart)
}

pub fn on_balance_volume(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    plain(key, store, compute, Primitive::OnBalanceVolume, ChartPlacement::Subchart)
}

/// Rolling VWAP over `TimeFrame` bars.
pub fn vwap(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    windowed(
        key,
        store,
        compute,
        Primitive::Vwap,
        &[TIME_FRAME],
        ChartPlacement::Overlay,
    )
}

/// Moving VWAP: a simple average of the VWAP line, drawn first, followed by
/// the VWAP line itself in slot 1 (`ColorVWAP`).
pub fn mvwap(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    let params = Params::new(store, key);
    let vwap_period = params.period(TIME_FRAME_VWAP)?;
    let mvwap_period = params.period(TIME_FRAME_MVWAP)?;
    let style = StyleDescriptor::single(params.slot_style("")?)
        .with_slot(1, params.slot_style("VWAP")?);

    let vwap = compute.compute(Primitive::Vwap, Source::Bars, &[numeric(vwap_period)])?;
    let inputs = [vwap.clone()];
    let mvwap = compute.compute(
        Primitive::Sma,
        Source::Series(&inputs),
        &[numeric(mvwap_period)],
    )?;

    let entry_label = label(key, &[&vwap_period, &mvwap_period]);
    let entry = ChartIndicator::new(
        key.clone(),
        entry_label.clone(),
        NamedSeries::new(entry_label, mvwap),
    )
    .with_series(NamedSeries::new(format!("VWAP ({vwap_period})"), vwap))
    .with_style(style)
    .with_placement(params.placement(ChartPlacement::Overlay)?)
    .with_category(params.category()?);
    Ok(Construction::single(entry))
}
