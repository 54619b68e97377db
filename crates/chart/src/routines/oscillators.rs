//! Momentum oscillators, drawn in their own panel.

use tachart_config::ConfigStore;
use tachart_indicators::{Compute, Primitive, Source};
use tachart_types::{ChartPlacement, CompoundKey};

use super::{TIME_FRAME, TIME_FRAME_LONG, TIME_FRAME_SHORT, label, numeric, single_entry, windowed};
use crate::entry::{ChartIndicator, NamedSeries};
use crate::error::ChartError;
use crate::factory::Construction;
use crate::params::Params;
use crate::style::StyleDescriptor;

const ADD_SIGNAL_LINE: &str = "AddSignalLine";
const TIME_FRAME_SIGNAL: &str = "TimeFrameSignal";
const SIGNAL: &str = "Signal";

fn oscillator(
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
        ChartPlacement::Subchart,
    )
}

/// Commodity channel index over the typical price.
pub fn cci(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    oscillator(key, store, compute, Primitive::Cci)
}

pub fn cmo(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    oscillator(key, store, compute, Primitive::Cmo)
}

/// RSI with simple averages of gains and losses.
pub fn rsi(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    oscillator(key, store, compute, Primitive::Rsi)
}

/// RSI with Wilder smoothing.
pub fn smoothed_rsi(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    oscillator(key, store, compute, Primitive::SmoothedRsi)
}

pub fn roc(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    oscillator(key, store, compute, Primitive::Roc)
}

/// Range action verification index from a short and a long window.
pub fn ravi(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    windowed(
        key,
        store,
        compute,
        Primitive::Ravi,
        &[TIME_FRAME_SHORT, TIME_FRAME_LONG],
        ChartPlacement::Subchart,
    )
}

/// Fisher transform with its `Alpha` and `Beta` smoothing factors.
pub fn fisher(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    let params = Params::new(store, key);
    let period = params.period(TIME_FRAME)?;
    let (alpha, alpha_f64) = params.factor("Alpha")?;
    let (beta, beta_f64) = params.factor("Beta")?;

    let series = compute.compute(
        Primitive::Fisher,
        Source::Bars,
        &[numeric(period), alpha_f64, beta_f64],
    )?;
    let label = label(key, &[&period, &alpha, &beta]);
    single_entry(&params, label, series, ChartPlacement::Subchart)
}

/// Bollinger %B: position of the close within the bands.
pub fn percent_b(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    let params = Params::new(store, key);
    let period = params.period(TIME_FRAME)?;
    let (k, k_f64) = params.factor("K")?;

    let series = compute.compute(Primitive::PercentB, Source::Bars, &[numeric(period), k_f64])?;
    single_entry(&params, label(key, &[&period, &k]), series, ChartPlacement::Subchart)
}

/// MACD line, optionally followed by an EMA signal line over it.
///
/// `TimeFrameSignal` and the `Signal` slot style are only read when
/// `AddSignalLine` is set.
pub fn macd(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    let params = Params::new(store, key);
    let short = params.period(TIME_FRAME_SHORT)?;
    let long = params.period(TIME_FRAME_LONG)?;
    let add_signal = params.flag(ADD_SIGNAL_LINE)?;
    let mut style = StyleDescriptor::single(params.slot_style("")?);

    let line = compute.compute(Primitive::Macd, Source::Bars, &[numeric(short), numeric(long)])?;
    let line_label = label(key, &[&short, &long]);
    let mut entry = ChartIndicator::new(
        key.clone(),
        line_label.clone(),
        NamedSeries::new(line_label, line.clone()),
    );

    if add_signal {
        let signal_period = params.period(TIME_FRAME_SIGNAL)?;
        style = style.with_slot(1, params.slot_style(SIGNAL)?);
        let source = [line];
        let signal = compute.compute(
            Primitive::Ema,
            Source::Series(&source),
            &[numeric(signal_period)],
        )?;
        entry = entry.with_series(NamedSeries::new(format!("Signal ({signal_period})"), signal));
    }

    let entry = entry
        .with_style(style)
        .with_placement(params.placement(ChartPlacement::Subchart)?)
        .with_category(params.category()?);
    Ok(Construction::single(entry))
}
