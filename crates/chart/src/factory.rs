//! Dispatch table from type name to construction routine.

use std::collections::HashMap;

use tachart_config::ConfigStore;
use tachart_indicators::Compute;
use tachart_types::CompoundKey;

use crate::entry::ChartIndicator;
use crate::error::ChartError;
use crate::routines;

/// Side effect of a construction on another registry entry.
#[derive(Debug, Clone)]
pub enum Companion {
    /// Register or replace this entry under its own key.
    Upsert(ChartIndicator),
    /// Remove the entry with this key if present.
    Drop(CompoundKey),
}

/// Result of a routine: the entry for the requested key plus companions.
#[derive(Debug, Clone)]
pub struct Construction {
    /// Entry for the requested key.
    pub entry: ChartIndicator,
    /// Dependent entries to add or remove alongside.
    pub companions: Vec<Companion>,
}

impl Construction {
    /// Construction without companions.
    #[must_use]
    pub fn single(entry: ChartIndicator) -> Self {
        Self {
            entry,
            companions: Vec::new(),
        }
    }

    /// Adds a companion.
    #[must_use]
    pub fn with_companion(mut self, companion: Companion) -> Self {
        self.companions.push(companion);
        self
    }
}

/// Routine type: reads parameters of a key and builds its entry.
pub type Routine = Box<
    dyn Fn(&CompoundKey, &ConfigStore, &dyn Compute) -> Result<Construction, ChartError>
        + Send
        + Sync,
>;

/// Registry of construction routines by type name.
pub struct Factory {
    routines: HashMap<String, Routine>,
}

impl Factory {
    /// Creates an empty factory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            routines: HashMap::new(),
        }
    }

    /// Registers (or replaces) the routine for `type_name`.
    pub fn register<F>(&mut self, type_name: &str, routine: F)
    where
        F: Fn(&CompoundKey, &ConfigStore, &dyn Compute) -> Result<Construction, ChartError>
            + Send
            + Sync
            + 'static,
    {
        self.routines.insert(type_name.to_string(), Box::new(routine));
    }

    /// Builds the entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::UnsupportedIndicatorType`] if no routine is
    /// registered for the key's type name, otherwise whatever the routine
    /// reports.
    pub fn build(
        &self,
        key: &CompoundKey,
        store: &ConfigStore,
        compute: &dyn Compute,
    ) -> Result<Construction, ChartError> {
        let routine = self
            .routines
            .get(key.type_name())
            .ok_or_else(|| ChartError::UnsupportedIndicatorType(key.type_name().to_string()))?;
        routine(key, store, compute)
    }

    /// Checks if a type name is registered.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.routines.contains_key(type_name)
    }

    /// Returns the registered type names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.routines.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Creates a factory with every built-in type name registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut factory = Self::new();
        routines::register_defaults(&mut factory);
        factory
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("routines", &self.names())
            .finish()
    }
}
