//! tachart chart
//!
//! Parameter-driven registry of chart indicators.
//!
//! # Features
//! - [`Factory`]: type name to construction routine, open for registration
//! - [`Params`]: strict typed lookup of an instance's configured parameters
//! - [`StyleDescriptor`]: per-slot color, stroke and marker
//! - [`Registry`]: reload, bulk init, removal and change subscription
//!
//! # Example
//!
//! ```no_run
//! use tachart_chart::Registry;
//! use tachart_config::{ConfigStore, resolve_store_path};
//! use tachart_indicators::Engine;
//! use tachart_types::Candle;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ConfigStore::open_or_init(resolve_store_path())?;
//! let bars: Vec<Candle> = Vec::new();
//! let mut registry = Registry::with_defaults(store, Engine::new(bars));
//! registry.subscribe(|change| println!("changed: {}", change.key()));
//! let report = registry.init_all();
//! println!("{} loaded, {} skipped", report.loaded.len(), report.failed.len());
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]

pub mod entry;
pub mod error;
pub mod factory;
pub mod params;
pub mod registry;
pub mod routines;
pub mod style;

// Re-export main types
pub use entry::{ChartIndicator, NamedSeries};
pub use error::{ChartError, ErrorKind};
pub use factory::{Companion, Construction, Factory, Routine};
pub use params::{CHART_TYPE, Params};
pub use registry::{InitReport, Registry, RegistryChange, SubscriptionId};
pub use routines::BUILTIN_TYPES;
pub use style::{SlotStyle, StyleConsumer, StyleDescriptor};
