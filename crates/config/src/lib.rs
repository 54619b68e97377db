//! tachart config
//!
//! Hierarchical indicator configuration store backed by a JSON document.
//!
//! # Features
//! - Typed document model (`Document` -> `IndicatorGroup` -> `Instance` -> `Parameter`)
//! - Raw parameter lookup and write-back with atomic whole-document persistence
//! - Category filtered enumeration and monotonic instance duplication
//! - Store location from `TACHART_INDICATOR_STORE`

#![deny(clippy::all)]

pub mod document;
pub mod error;
pub mod store;

// Re-export main types
pub use document::{Document, IndicatorGroup, Instance, Parameter};
pub use error::ConfigError;
pub use store::{ConfigStore, DEFAULT_STORE_PATH, STORE_PATH_ENV, resolve_store_path};
