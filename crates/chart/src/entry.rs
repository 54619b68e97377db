//! Registered chart indicators.

use tachart_indicators::SeriesHandle;
use tachart_types::{Category, ChartPlacement, CompoundKey};

use crate::style::StyleDescriptor;

/// A computed series with its display name.
#[derive(Debug, Clone)]
pub struct NamedSeries {
    /// Display name of the series.
    pub name: String,
    /// Handle returned by the computation capability.
    pub series: SeriesHandle,
}

impl NamedSeries {
    /// Pairs a name with a series.
    #[must_use]
    pub fn new(name: impl Into<String>, series: SeriesHandle) -> Self {
        Self {
            name: name.into(),
            series,
        }
    }
}

/// Live indicator held by the registry.
///
/// Holds one or more named series. Names and series are stored as pairs, so
/// there is always exactly one name per series.
#[derive(Debug, Clone)]
pub struct ChartIndicator {
    key: CompoundKey,
    series: Vec<NamedSeries>,
    label: String,
    style: StyleDescriptor,
    placement: ChartPlacement,
    category: Category,
}

impl ChartIndicator {
    /// Creates an overlay entry in `DEFAULT` with a single series and no styling.
    #[must_use]
    pub fn new(key: CompoundKey, label: impl Into<String>, first: NamedSeries) -> Self {
        Self {
            key,
            series: vec![first],
            label: label.into(),
            style: StyleDescriptor::default(),
            placement: ChartPlacement::Overlay,
            category: Category::Default,
        }
    }

    /// Appends a series; its style slot is the next index.
    #[must_use]
    pub fn with_series(mut self, series: NamedSeries) -> Self {
        self.series.push(series);
        self
    }

    /// Sets the style descriptor.
    #[must_use]
    pub fn with_style(mut self, style: StyleDescriptor) -> Self {
        self.style = style;
        self
    }

    /// Sets overlay or sub-panel placement.
    #[must_use]
    pub fn with_placement(mut self, placement: ChartPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Sets the category tag.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Identifier of the entry.
    #[must_use]
    pub fn key(&self) -> &CompoundKey {
        &self.key
    }

    /// Series in display order.
    #[must_use]
    pub fn series(&self) -> &[NamedSeries] {
        &self.series
    }

    /// Series names in display order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.name.as_str())
    }

    /// Display label of the whole entry.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Style descriptor.
    #[must_use]
    pub fn style(&self) -> &StyleDescriptor {
        &self.style
    }

    /// Overlay or sub-panel.
    #[must_use]
    pub fn placement(&self) -> ChartPlacement {
        self.placement
    }

    /// `true` if drawn in its own sub-panel.
    #[must_use]
    pub fn is_subchart(&self) -> bool {
        self.placement.is_subchart()
    }

    /// Category tag.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }
}
