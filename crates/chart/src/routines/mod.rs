//! Built-in construction routines, grouped by indicator family.
//!
//! Every routine has the [`Routine`](crate::factory::Routine) signature. Slot 0
//! is styled from `Color`/`Stroke`/`Shape`; further slots use a suffix
//! (`ColorUpper`, `StrokeSignal`, ...). The optional `ChartType` parameter
//! overrides the routine's default placement.

use std::fmt;

use tachart_config::ConfigStore;
use tachart_indicators::{Compute, Primitive, SeriesHandle, Source};
use tachart_types::{ChartPlacement, CompoundKey};

use crate::entry::{ChartIndicator, NamedSeries};
use crate::error::ChartError;
use crate::factory::{Construction, Factory};
use crate::params::Params;
use crate::style::StyleDescriptor;

pub mod averages;
pub mod bands;
pub mod candles;
pub mod oscillators;
pub mod ranges;
pub mod trend;
pub mod volume;

pub(crate) const TIME_FRAME: &str = "TimeFrame";
pub(crate) const TIME_FRAME_SHORT: &str = "TimeFrameShort";
pub(crate) const TIME_FRAME_LONG: &str = "TimeFrameLong";
pub(crate) const TIME_FRAME_UP: &str = "TimeFrameUp";
pub(crate) const TIME_FRAME_DOWN: &str = "TimeFrameDown";

/// Type names registered by [`Factory::with_defaults`].
pub const BUILTIN_TYPES: &[&str] = &[
    "SMA",
    "EMA",
    "WMA",
    "HMA",
    "ZLEMA",
    "TripleEMA",
    "KAMA",
    "CCI",
    "CMO",
    "RSI",
    "SmoothedRSI",
    "ROC",
    "RAVI",
    "Fisher",
    "MACD",
    "PercentB",
    "BollingerBands",
    "Keltner",
    "TrueRange",
    "UlcerIndex",
    "TrailingStopLoss",
    "Amount",
    "PVI",
    "NVI",
    "OnBalanceVolume",
    "VWAP",
    "MVWAP",
    "AverageDirectionalMovementUpDown",
    "AroonUpDown",
    "LowerShadow",
    "UpperShadow",
    "RealBody",
];

/// Registers every built-in routine.
pub fn register_defaults(factory: &mut Factory) {
    factory.register("SMA", averages::sma);
    factory.register("EMA", averages::ema);
    factory.register("WMA", averages::wma);
    factory.register("HMA", averages::hma);
    factory.register("ZLEMA", averages::zlema);
    factory.register("TripleEMA", averages::triple_ema);
    factory.register("KAMA", averages::kama);

    factory.register("CCI", oscillators::cci);
    factory.register("CMO", oscillators::cmo);
    factory.register("RSI", oscillators::rsi);
    factory.register("SmoothedRSI", oscillators::smoothed_rsi);
    factory.register("ROC", oscillators::roc);
    factory.register("RAVI", oscillators::ravi);
    factory.register("Fisher", oscillators::fisher);
    factory.register("MACD", oscillators::macd);
    factory.register("PercentB", oscillators::percent_b);

    factory.register("BollingerBands", bands::bollinger_bands);
    factory.register("Keltner", bands::keltner);

    factory.register("TrueRange", ranges::true_range);
    factory.register("UlcerIndex", ranges::ulcer_index);
    factory.register("TrailingStopLoss", ranges::trailing_stop_loss);

    factory.register("Amount", volume::amount);
    factory.register("PVI", volume::pvi);
    factory.register("NVI", volume::nvi);
    factory.register("OnBalanceVolume", volume::on_balance_volume);
    factory.register("VWAP", volume::vwap);
    factory.register("MVWAP", volume::mvwap);

    factory.register(
        "AverageDirectionalMovementUpDown",
        trend::average_directional_movement_up_down,
    );
    factory.register("AroonUpDown", trend::aroon_up_down);

    factory.register("LowerShadow", candles::lower_shadow);
    factory.register("UpperShadow", candles::upper_shadow);
    factory.register("RealBody", candles::real_body);
}

/// `"{TypeName} [{id}] ({args})"`, or `"{TypeName} [{id}]"` without args.
pub(crate) fn label(key: &CompoundKey, args: &[&dyn fmt::Display]) -> String {
    let mut text = format!("{} [{}]", key.type_name(), key.id());
    if !args.is_empty() {
        let joined: Vec<String> = args.iter().map(ToString::to_string).collect();
        text.push_str(&format!(" ({})", joined.join(", ")));
    }
    text
}

/// Window length as the numeric parameter of a primitive.
pub(crate) fn numeric(period: usize) -> f64 {
    period as f64
}

/// Single-series entry named after its label, styled from slot 0.
pub(crate) fn single_entry(
    params: &Params<'_>,
    label: String,
    series: SeriesHandle,
    default_placement: ChartPlacement,
) -> Result<Construction, ChartError> {
    let style = StyleDescriptor::single(params.slot_style("")?);
    let entry = ChartIndicator::new(
        params.key().clone(),
        label.clone(),
        NamedSeries::new(label, series),
    )
    .with_style(style)
    .with_placement(params.placement(default_placement)?)
    .with_category(params.category()?);
    Ok(Construction::single(entry))
}

/// Routine body for primitives over the bars taking only window lengths.
pub(crate) fn windowed(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
    primitive: Primitive,
    period_names: &[&str],
    default_placement: ChartPlacement,
) -> Result<Construction, ChartError> {
    let params = Params::new(store, key);
    let periods = period_names
        .iter()
        .map(|name| params.period(name))
        .collect::<Result<Vec<_>, _>>()?;
    let windows: Vec<f64> = periods.iter().copied().map(numeric).collect();

    let series = compute.compute(primitive, Source::Bars, &windows)?;
    let args: Vec<&dyn fmt::Display> = periods.iter().map(|p| p as &dyn fmt::Display).collect();
    single_entry(&params, label(key, &args), series, default_placement)
}

/// Routine body for parameterless primitives over the bars.
pub(crate) fn plain(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
    primitive: Primitive,
    default_placement: ChartPlacement,
) -> Result<Construction, ChartError> {
    let params = Params::new(store, key);
    let series = compute.compute(primitive, Source::Bars, &[])?;
    single_entry(&params, label(key, &[]), series, default_placement)
}
