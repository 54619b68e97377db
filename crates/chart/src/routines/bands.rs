//! Envelope indicators drawn as middle, upper and lower lines.
//!
//! Series order is fixed: middle (slot 0, `Color`), upper (slot 1,
//! `ColorUpper`), lower (slot 2, `ColorLower`).

use tachart_config::ConfigStore;
use tachart_indicators::{Compute, Primitive, Source};
use tachart_types::{ChartPlacement, CompoundKey};

use super::{TIME_FRAME, label, numeric};
use crate::entry::{ChartIndicator, NamedSeries};
use crate::error::ChartError;
use crate::factory::{Companion, Construction};
use crate::params::Params;
use crate::style::StyleDescriptor;

/// Type name of the width entry maintained next to a Bollinger entry.
pub const BOLLINGER_WIDTH_TYPE: &str = "BollingerBandsWidth";

const ADD_WIDTH: &str = "AddWidth";
const UPPER: &str = "Upper";
const LOWER: &str = "Lower";

fn band_style(params: &Params<'_>) -> Result<StyleDescriptor, ChartError> {
    Ok(StyleDescriptor::single(params.slot_style("")?)
        .with_slot(1, params.slot_style(UPPER)?)
        .with_slot(2, params.slot_style(LOWER)?))
}

/// Bollinger bands around an EMA of the close.
///
/// With `AddWidth` set, the construction also upserts a
/// `BollingerBandsWidth` entry under the same instance id, drawn in its own
/// panel with the full band style. Otherwise that entry is dropped.
pub fn bollinger_bands(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    let params = Params::new(store, key);
    let period = params.period(TIME_FRAME)?;
    let (k, k_f64) = params.factor("K")?;
    let add_width = params.flag(ADD_WIDTH)?;
    let style = band_style(&params)?;
    let category = params.category()?;

    let window = [numeric(period)];
    let middle = compute.compute(Primitive::Ema, Source::Bars, &window)?;
    let deviation = compute.compute(Primitive::StdDev, Source::Bars, &window)?;
    let inputs = [middle.clone(), deviation];
    let upper = compute.compute(Primitive::BollingerUpper, Source::Series(&inputs), &[k_f64])?;
    let lower = compute.compute(Primitive::BollingerLower, Source::Series(&inputs), &[k_f64])?;

    let width_key = key.sibling(BOLLINGER_WIDTH_TYPE)?;
    let companion = if add_width {
        let bands = [upper.clone(), middle.clone(), lower.clone()];
        let width = compute.compute(Primitive::BollingerWidth, Source::Series(&bands), &[])?;
        let width_label = label(&width_key, &[&period, &k]);
        Companion::Upsert(
            ChartIndicator::new(
                width_key,
                width_label.clone(),
                NamedSeries::new(width_label, width),
            )
            // Single series: only slot 0 of the band style is drawn.
            .with_style(style.clone())
            .with_placement(ChartPlacement::Subchart)
            .with_category(category),
        )
    } else {
        Companion::Drop(width_key)
    };

    let entry = ChartIndicator::new(
        key.clone(),
        label(key, &[&period, &k]),
        NamedSeries::new(format!("Middle Band ({period})"), middle),
    )
    .with_series(NamedSeries::new(format!("Upper Band ({period}, {k})"), upper))
    .with_series(NamedSeries::new(format!("Lower Band ({period}, {k})"), lower))
    .with_style(style)
    .with_placement(params.placement(ChartPlacement::Overlay)?)
    .with_category(category);

    Ok(Construction::single(entry).with_companion(companion))
}

/// Keltner channel: EMA of the typical price plus and minus `Ratio` ATRs.
pub fn keltner(
    key: &CompoundKey,
    store: &ConfigStore,
    compute: &dyn Compute,
) -> Result<Construction, ChartError> {
    let params = Params::new(store, key);
    let period = params.period(TIME_FRAME)?;
    let (ratio, ratio_f64) = params.factor("Ratio")?;
    let atr_period = params.period("TimeFrameATR")?;
    let style = band_style(&params)?;

    let middle = compute.compute(Primitive::KeltnerMiddle, Source::Bars, &[numeric(period)])?;
    let inputs = [middle.clone()];
    let offsets = [ratio_f64, numeric(atr_period)];
    let upper = compute.compute(Primitive::KeltnerUpper, Source::Series(&inputs), &offsets)?;
    let lower = compute.compute(Primitive::KeltnerLower, Source::Series(&inputs), &offsets)?;

    let entry = ChartIndicator::new(
        key.clone(),
        label(key, &[&period, &ratio, &atr_period]),
        NamedSeries::new(format!("Keltner Middle ({period})"), middle),
    )
    .with_series(NamedSeries::new(format!("Keltner Upper ({ratio}, {atr_period})"), upper))
    .with_series(NamedSeries::new(format!("Keltner Lower ({ratio}, {atr_period})"), lower))
    .with_style(style)
    .with_placement(params.placement(ChartPlacement::Overlay)?)
    .with_category(params.category()?);

    Ok(Construction::single(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routines::test_support::{engine, store_with};
    use tachart_types::Color;

    const BAND_STYLE: [(&str, &str); 6] = [
        ("ColorUpper", "GREEN"),
        ("StrokeUpper", "THIN"),
        ("ShapeUpper", "NONE"),
        ("ColorLower", "BLUE"),
        ("StrokeLower", "THIN"),
        ("ShapeLower", "NONE"),
    ];

    fn bollinger_params(add_width: &'static str) -> Vec<(&'static str, &'static str)> {
        let mut params = vec![("TimeFrame", "20"), ("K", "2"), ("AddWidth", add_width)];
        params.extend(BAND_STYLE);
        params
    }

    #[test]
    fn test_bollinger_series_order_and_slots() {
        let (store, key) = store_with("BollingerBands", &bollinger_params("FALSE"));
        let built = bollinger_bands(&key, &store, &engine()).unwrap();
        let entry = &built.entry;

        let names: Vec<&str> = entry.names().collect();
        assert_eq!(
            names,
            vec!["Middle Band (20)", "Upper Band (20, 2)", "Lower Band (20, 2)"]
        );
        assert_eq!(entry.style().slot(0).unwrap().color, Color::Red);
        assert_eq!(entry.style().slot(1).unwrap().color, Color::Green);
        assert_eq!(entry.style().slot(2).unwrap().color, Color::Blue);
        assert!(!entry.is_subchart());
    }

    #[test]
    fn test_bollinger_width_companion() {
        let (store, key) = store_with("BollingerBands", &bollinger_params("TRUE"));
        let built = bollinger_bands(&key, &store, &engine()).unwrap();
        assert_eq!(built.companions.len(), 1);
        match &built.companions[0] {
            Companion::Upsert(width) => {
                assert_eq!(width.key().to_string(), "BollingerBandsWidth_1");
                assert!(width.is_subchart());
                assert_eq!(width.style(), built.entry.style());
                assert_eq!(width.style().slot(0).unwrap().color, Color::Red);
                assert_eq!(width.style().slot(1).unwrap().color, Color::Green);
                assert_eq!(width.style().slot(2).unwrap().color, Color::Blue);
            }
            other => panic!("unexpected companion {other:?}"),
        }

        let (store, key) = store_with("BollingerBands", &bollinger_params("FALSE"));
        let built = bollinger_bands(&key, &store, &engine()).unwrap();
        assert!(matches!(
            &built.companions[..],
            [Companion::Drop(width)] if width.to_string() == "BollingerBandsWidth_1"
        ));
    }

    #[test]
    fn test_keltner_bands() {
        let mut params = vec![("TimeFrame", "20"), ("Ratio", "1.5"), ("TimeFrameATR", "10")];
        params.extend(BAND_STYLE);
        let (store, key) = store_with("Keltner", &params);
        let built = keltner(&key, &store, &engine()).unwrap();

        assert_eq!(built.entry.label(), "Keltner [1] (20, 1.5, 10)");
        assert_eq!(built.entry.series().len(), 3);
        assert_eq!(built.entry.style().len(), 3);
    }

    #[test]
    fn test_missing_band_style_fails() {
        let (store, key) = store_with(
            "Keltner",
            &[("TimeFrame", "20"), ("Ratio", "1.5"), ("TimeFrameATR", "10")],
        );
        let err = keltner(&key, &store, &engine()).unwrap_err();
        assert!(matches!(err, ChartError::Config(ref e) if e.is_not_found()));
    }
}
