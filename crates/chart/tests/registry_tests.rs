use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use tachart_chart::{
    BUILTIN_TYPES, ChartError, ErrorKind, NamedSeries, Registry, RegistryChange, StyleConsumer,
    StyleDescriptor,
};
use tachart_config::ConfigStore;
use tachart_types::{Category, Color, CompoundKey, Stroke};

mod common;
use common::{MIXED_STORE, SAMPLE_STORE, engine, open_store};

fn key(s: &str) -> CompoundKey {
    s.parse().unwrap()
}

fn sample_registry() -> (tempfile::TempDir, Registry) {
    let (dir, _path, store) = open_store(SAMPLE_STORE);
    (dir, Registry::with_defaults(store, engine()))
}

fn record_changes(registry: &mut Registry) -> Rc<RefCell<Vec<RegistryChange>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    registry.subscribe(move |change| sink.borrow_mut().push(change.clone()));
    seen
}

#[test]
fn test_init_all_builds_every_builtin_type() {
    let (_dir, mut registry) = sample_registry();
    let report = registry.init_all();

    assert!(report.is_complete(), "failed: {:?}", report.failed);
    assert_eq!(report.loaded.len(), BUILTIN_TYPES.len());
    for type_name in BUILTIN_TYPES {
        let entry = registry
            .chart_indicator(&key(&format!("{type_name}_1")))
            .unwrap_or_else(|| panic!("{type_name} not registered"));
        assert_eq!(entry.series().len(), entry.names().count());
        assert!(!entry.series().is_empty());
        assert_eq!(entry.style().len(), entry.series().len(), "{type_name}");
    }
    // The width companion of BollingerBands_1 comes on top.
    assert_eq!(registry.len(), BUILTIN_TYPES.len() + 1);
    assert!(registry.chart_indicator(&key("BollingerBandsWidth_1")).is_some());
}

#[test]
fn test_init_all_survives_windows_longer_than_the_bars() {
    let (_dir, mut registry) = sample_registry();
    registry
        .store_mut()
        .set_parameter(&key("WMA_1"), "TimeFrame", "5000000000")
        .unwrap();
    registry
        .store_mut()
        .set_parameter(&key("SmoothedRSI_1"), "TimeFrame", "18446744073709551615")
        .unwrap();
    registry
        .store_mut()
        .set_parameter(&key("KAMA_1"), "TimeFrameEfficiencyRatio", "4294967296")
        .unwrap();

    let report = registry.init_all();

    assert!(report.is_complete(), "failed: {:?}", report.failed);
    assert_eq!(report.loaded.len(), BUILTIN_TYPES.len());
    for name in ["WMA_1", "SmoothedRSI_1", "KAMA_1"] {
        let entry = registry.chart_indicator(&key(name)).unwrap();
        let values = entry.series()[0].series.values();
        assert_eq!(values.len(), engine().len(), "{name}");
        assert!(values.iter().all(|v| v.is_nan()), "{name}");
    }
    assert_eq!(
        registry.chart_indicator(&key("WMA_1")).unwrap().label(),
        "WMA [1] (5000000000)"
    );
}

#[test]
fn test_sma_scenario() {
    let (_dir, mut registry) = sample_registry();
    registry.reload(&key("SMA_1")).unwrap();

    let entry = registry.chart_indicator(&key("SMA_1")).unwrap();
    assert_eq!(entry.series().len(), 1);
    assert_eq!(entry.category(), Category::Default);
    let slot = entry.style().slot(0).unwrap();
    assert_eq!(slot.color, Color::Red);
    assert_eq!(slot.stroke, Stroke::Thin);
    assert!(!slot.shows_markers());
}

#[test]
fn test_reload_replaces_entry_in_place() {
    let (_dir, mut registry) = sample_registry();
    let sma = key("SMA_1");
    registry.reload(&sma).unwrap();

    registry.store_mut().set_parameter(&sma, "TimeFrame", "30").unwrap();
    registry.store_mut().set_parameter(&sma, "Color", "BLUE").unwrap();
    registry.reload(&sma).unwrap();

    assert_eq!(registry.len(), 1);
    let entry = registry.chart_indicator(&sma).unwrap();
    assert_eq!(entry.label(), "SMA [1] (30)");
    assert_eq!(entry.style().slot(0).unwrap().color, Color::Blue);
}

#[test]
fn test_failed_reload_keeps_prior_entry() {
    let (_dir, mut registry) = sample_registry();
    let sma = key("SMA_1");
    registry.reload(&sma).unwrap();
    let seen = record_changes(&mut registry);

    registry.store_mut().set_parameter(&sma, "TimeFrame", "fourteen").unwrap();
    let err = registry.reload(&sma).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);

    registry.store_mut().set_parameter(&sma, "TimeFrame", "14").unwrap();
    registry.store_mut().set_parameter(&sma, "Color", "PURPLE").unwrap();
    let err = registry.reload(&sma).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownEnumValue);

    assert_eq!(registry.chart_indicator(&sma).unwrap().label(), "SMA [1] (14)");
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_unsupported_type_keeps_prior_entry() {
    let (_dir, mut registry) = sample_registry();
    registry.reload(&key("BollingerBands_1")).unwrap();

    // The width companion is registered but has no routine of its own.
    let width = key("BollingerBandsWidth_1");
    let before = registry.chart_indicator(&width).unwrap().label().to_string();
    let err = registry.reload(&width).unwrap_err();

    assert!(matches!(err, ChartError::UnsupportedIndicatorType(ref name) if name == "BollingerBandsWidth"));
    assert_eq!(err.kind(), ErrorKind::UnsupportedIndicatorType);
    assert_eq!(registry.chart_indicator(&width).unwrap().label(), before);
}

#[test]
fn test_reload_missing_instance_is_not_found() {
    let (_dir, mut registry) = sample_registry();
    let err = registry.reload(&key("SMA_9")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(registry.is_empty());
}

#[test]
fn test_remove_indicator_is_idempotent() {
    let (_dir, mut registry) = sample_registry();
    let sma = key("SMA_1");
    registry.reload(&sma).unwrap();
    let seen = record_changes(&mut registry);

    assert!(registry.remove_indicator(&sma));
    assert!(registry.chart_indicator(&sma).is_none());
    assert!(!registry.remove_indicator(&sma));

    assert_eq!(*seen.borrow(), vec![RegistryChange::Removed(sma)]);
}

#[test]
fn test_bollinger_width_follows_add_width() {
    let (_dir, mut registry) = sample_registry();
    let bands = key("BollingerBands_1");
    let width = key("BollingerBandsWidth_1");
    let seen = record_changes(&mut registry);

    registry.reload(&bands).unwrap();
    assert_eq!(
        *seen.borrow(),
        vec![
            RegistryChange::Updated(bands.clone()),
            RegistryChange::Updated(width.clone()),
        ]
    );
    let companion = registry.chart_indicator(&width).unwrap();
    assert!(companion.is_subchart());
    assert_eq!(companion.category(), Category::Bollinger);
    assert_eq!(companion.style(), registry.chart_indicator(&bands).unwrap().style());

    seen.borrow_mut().clear();
    registry.store_mut().set_parameter(&bands, "AddWidth", "FALSE").unwrap();
    registry.reload(&bands).unwrap();
    assert_eq!(
        *seen.borrow(),
        vec![
            RegistryChange::Updated(bands.clone()),
            RegistryChange::Removed(width.clone()),
        ]
    );
    assert!(registry.chart_indicator(&width).is_none());

    seen.borrow_mut().clear();
    registry.reload(&bands).unwrap();
    assert_eq!(*seen.borrow(), vec![RegistryChange::Updated(bands)]);
}

#[test]
fn test_lower_case_flag_is_rejected() {
    let (_dir, mut registry) = sample_registry();
    let bands = key("BollingerBands_1");
    registry.reload(&bands).unwrap();

    registry.store_mut().set_parameter(&bands, "AddWidth", "false").unwrap();
    let err = registry.reload(&bands).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(registry.chart_indicator(&key("BollingerBandsWidth_1")).is_some());
}

#[test]
fn test_macd_signal_line_toggle() {
    let (_dir, mut registry) = sample_registry();
    let macd = key("MACD_1");

    registry.reload(&macd).unwrap();
    let entry = registry.chart_indicator(&macd).unwrap();
    assert_eq!(entry.series().len(), 2);
    assert_eq!(entry.style().slot(1).unwrap().stroke, Stroke::Dashed);

    registry.store_mut().set_parameter(&macd, "AddSignalLine", "FALSE").unwrap();
    registry.reload(&macd).unwrap();
    assert_eq!(registry.chart_indicator(&macd).unwrap().series().len(), 1);
}

#[test]
fn test_init_all_skips_failures_and_continues() {
    let (_dir, _path, store) = open_store(MIXED_STORE);
    let mut registry = Registry::with_defaults(store, engine());
    let seen = record_changes(&mut registry);

    let report = registry.init_all();

    assert_eq!(report.loaded, vec![key("SMA_1")]);
    let failed: Vec<(String, ErrorKind)> = report
        .failed
        .iter()
        .map(|(k, err)| (k.to_string(), err.kind()))
        .collect();
    assert_eq!(
        failed,
        vec![
            ("Ichimoku_1".to_string(), ErrorKind::UnsupportedIndicatorType),
            ("RSI_2".to_string(), ErrorKind::NotFound),
        ]
    );
    assert_eq!(registry.len(), 1);
    assert_eq!(*seen.borrow(), vec![RegistryChange::Updated(key("SMA_1"))]);
}

#[test]
fn test_keys_for_category_filters_registered_entries() {
    let (_dir, mut registry) = sample_registry();
    registry.reload(&key("PVI_1")).unwrap();
    registry.reload(&key("NVI_1")).unwrap();
    registry.reload(&key("SMA_1")).unwrap();

    assert_eq!(
        registry.keys_for_category(Category::Volume),
        vec![key("NVI_1"), key("PVI_1")]
    );
    assert_eq!(registry.keys_for_category(Category::Default), vec![key("SMA_1")]);
    // The store knows more VOLUME instances than are registered.
    assert!(registry.store().keys_for_category(Category::Volume).len() > 2);
}

#[test]
fn test_duplicate_then_reload() {
    let (_dir, mut registry) = sample_registry();
    let copy = registry.store_mut().duplicate(&key("SMA_1")).unwrap();
    assert_eq!(copy, key("SMA_2"));

    registry.reload(&copy).unwrap();
    assert_eq!(registry.chart_indicator(&copy).unwrap().label(), "SMA [2] (14)");
}

#[test]
fn test_changes_survive_fresh_load() {
    let (_dir, path, store) = open_store(SAMPLE_STORE);
    let mut registry = Registry::with_defaults(store, engine());
    registry
        .store_mut()
        .set_parameter(&key("RSI_1"), "TimeFrame", "7")
        .unwrap();
    drop(registry);

    let mut registry = Registry::with_defaults(ConfigStore::open(&path).unwrap(), engine());
    registry.reload(&key("RSI_1")).unwrap();
    assert_eq!(
        registry.chart_indicator(&key("RSI_1")).unwrap().label(),
        "RSI [1] (7)"
    );
}

#[derive(Default)]
struct RecordingConsumer {
    drawn: Vec<(String, Option<Color>)>,
}

impl StyleConsumer for RecordingConsumer {
    fn render(&mut self, style: &StyleDescriptor, series: &[NamedSeries]) {
        for (index, named) in series.iter().enumerate() {
            let color = style.slot(index).map(|slot| slot.color);
            self.drawn.push((named.name.clone(), color));
        }
    }
}

#[test]
fn test_style_consumer_receives_slots_in_series_order() {
    let (_dir, mut registry) = sample_registry();
    let keltner = key("Keltner_1");
    registry.reload(&keltner).unwrap();

    let entry = registry.chart_indicator(&keltner).unwrap();
    let mut consumer = RecordingConsumer::default();
    consumer.render(entry.style(), entry.series());

    let colors: Vec<Option<Color>> = consumer.drawn.iter().map(|(_, c)| *c).collect();
    assert_eq!(
        colors,
        vec![Some(Color::Gray), Some(Color::Blue), Some(Color::Blue)]
    );
}

#[derive(Debug, Clone)]
enum Op {
    Reload,
    Remove,
    ReloadUnsupported,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Reload),
        Just(Op::Remove),
        Just(Op::ReloadUnsupported),
    ]
}

proptest! {
    #[test]
    fn prop_notifications_match_state_changes(ops in proptest::collection::vec(op_strategy(), 0..20)) {
        let (_dir, mut registry) = sample_registry();
        let seen = record_changes(&mut registry);
        let sma = key("SMA_1");
        let unsupported = key("Ichimoku_1");

        let mut present = false;
        let mut expected = 0usize;
        for op in ops {
            match op {
                Op::Reload => {
                    registry.reload(&sma).unwrap();
                    present = true;
                    expected += 1;
                }
                Op::Remove => {
                    let removed = registry.remove_indicator(&sma);
                    prop_assert_eq!(removed, present);
                    if removed {
                        expected += 1;
                    }
                    present = false;
                }
                Op::ReloadUnsupported => {
                    prop_assert!(registry.reload(&unsupported).is_err());
                }
            }
            prop_assert_eq!(registry.chart_indicator(&sma).is_some(), present);
        }
        prop_assert_eq!(seen.borrow().len(), expected);
    }
}
