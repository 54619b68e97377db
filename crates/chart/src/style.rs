//! Style descriptors for registered entries.
//!
//! A descriptor maps series slots (0, 1, 2, ... in series order) to a color,
//! a stroke and an optional marker. The registry never looks inside.

use std::collections::BTreeMap;

use tachart_types::{Color, Shape, Stroke};

use crate::entry::NamedSeries;

/// Style of one series slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotStyle {
    /// Line color.
    pub color: Color,
    /// Line stroke; always drawn.
    pub stroke: Stroke,
    /// Point marker, `None` when the configured shape is `NONE`.
    pub marker: Option<Shape>,
}

impl SlotStyle {
    /// Builds a slot style from configured symbols.
    #[must_use]
    pub fn new(color: Color, stroke: Stroke, shape: Shape) -> Self {
        Self {
            color,
            stroke,
            marker: shape.marker(),
        }
    }

    /// `true` if point markers are drawn.
    #[must_use]
    pub fn shows_markers(&self) -> bool {
        self.marker.is_some()
    }
}

/// Per-slot styling of a registered entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDescriptor {
    slots: BTreeMap<usize, SlotStyle>,
}

impl StyleDescriptor {
    /// Descriptor styling only slot 0.
    #[must_use]
    pub fn single(style: SlotStyle) -> Self {
        Self::default().with_slot(0, style)
    }

    /// Sets (or replaces) the style of slot `index`.
    #[must_use]
    pub fn with_slot(mut self, index: usize, style: SlotStyle) -> Self {
        self.slots.insert(index, style);
        self
    }

    /// Style of slot `index`, if configured.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&SlotStyle> {
        self.slots.get(&index)
    }

    /// Configured slots in index order.
    pub fn slots(&self) -> impl Iterator<Item = (usize, &SlotStyle)> {
        self.slots.iter().map(|(i, s)| (*i, s))
    }

    /// Number of configured slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true when no slot is styled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Rendering collaborator that draws styled series.
pub trait StyleConsumer {
    /// Draws `series`, styling the series at index `i` with slot `i`.
    fn render(&mut self, style: &StyleDescriptor, series: &[NamedSeries]);
}
