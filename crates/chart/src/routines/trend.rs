//! Two-line trend strength indicators with separate up and down windows.
//!
//! The up line takes slot 0 (`Color`), the down line slot 1 (`ColorDown`).

use tachart_config::ConfigStore;
use tachart_indicators::{Compute, Primitive, Source};
use tachart_types::{ChartPlacement, CompoundKey};

use super::{TIME_FRAME_DOWN, TIME_FRAME_UP, label, numeric};
use crate::entry::{ChartIndicator, NamedSeries};
use crate::error::ChartError;
use crate::factory::Construction;
use crate::params::Params;
use crate::style::StyleDescriptor;

fn up_down(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
    (up, down): (Primitive, Primitive),
    (up_name, down_name): (&str, &str),
) -> Result<Construction, ChartError> {
    let params = Params::new(store, key);
    let up_period = params.period(TIME_FRAME_UP)?;
    let down_period = params.period(TIME_FRAME_DOWN)?;
    let style = StyleDescriptor::single(params.slot_style("")?)
        .with_slot(1, params.slot_style("Down")?);

    let up_series = compute.compute(up, Source::Bars, &[numeric(up_period)])?;
    let down_series = compute.compute(down, Source::Bars, &[numeric(down_period)])?;

    let entry = ChartIndicator::new(
        key.clone(),
        label(key, &[&up_period, &down_period]),
        NamedSeries::new(format!("{up_name} ({up_period})"), up_series),
    )
    .with_series(NamedSeries::new(format!("{down_name} ({down_period})"), down_series))
    .with_style(style)
    .with_placement(params.placement(ChartPlacement::Subchart)?)
    .with_category(params.category()?);
    Ok(Construction::single(entry))
}

/// Wilder-averaged upward and downward directional movement.
pub fn average_directional_movement_up_down(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    up_down(
        key,
        store,
        compute,
        (
            Primitive::DirectionalMovementUp,
            Primitive::DirectionalMovementDown,
        ),
        ("+DM", "-DM"),
    )
}

/// Aroon up and Aroon down.
pub fn aroon_up_down(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    up_down(
        key,
        store,
        compute,
        (Primitive::AroonUp, Primitive::AroonDown),
        ("Aroon Up", "Aroon Down"),
    )
}
