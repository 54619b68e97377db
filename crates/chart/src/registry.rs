//! Live chart indicators keyed by compound key.
//!
//! The registry owns the configuration store and the entry map. Every
//! successful mutation is published synchronously to the subscribers, which
//! receive the change but never the registry itself.

use std::collections::BTreeMap;
use std::fmt;

use tachart_config::ConfigStore;
use tachart_indicators::Compute;
use tachart_types::{Category, CompoundKey};

use crate::entry::ChartIndicator;
use crate::error::ChartError;
use crate::factory::{Companion, Factory};

/// What changed in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryChange {
    /// An entry was inserted or replaced.
    Updated(CompoundKey),
    /// An entry was removed.
    Removed(CompoundKey),
}

impl RegistryChange {
    /// Key the change applies to.
    #[must_use]
    pub fn key(&self) -> &CompoundKey {
        match self {
            RegistryChange::Updated(key) | RegistryChange::Removed(key) => key,
        }
    }
}

/// Handle returned by [`Registry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&RegistryChange)>;

/// Outcome of [`Registry::init_all`].
#[derive(Debug, Default)]
pub struct InitReport {
    /// Keys that were registered.
    pub loaded: Vec<CompoundKey>,
    /// Keys that were skipped, with the reason.
    pub failed: Vec<(CompoundKey, ChartError)>,
}

impl InitReport {
    /// `true` if every key was registered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Registry of live chart indicators.
pub struct Registry {
    store: ConfigStore,
    factory: Factory,
    compute: Box<dyn Compute>,
    entries: BTreeMap<CompoundKey, ChartIndicator>,
    subscribers: Vec<(SubscriptionId, Handler)>,
    next_subscription: u64,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new(store: ConfigStore, factory: Factory, compute: impl Compute + 'static) -> Self {
        Self {
            store,
            factory,
            compute: Box::new(compute),
            entries: BTreeMap::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Creates an empty registry dispatching to the built-in routines.
    pub fn with_defaults(store: ConfigStore, compute: impl Compute + 'static) -> Self {
        Self::new(store, Factory::with_defaults(), compute)
    }

    /// Rebuilds the entry for `key` from the store, replacing any prior entry.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::UnsupportedIndicatorType`] for an unregistered
    /// type name, or the routine's failure. On error the registry is left
    /// unchanged and no subscriber is notified.
    pub fn reload(&mut self, key: &CompoundKey) -> Result<(), ChartError> {
        let construction = self.factory.build(key, &self.store, self.compute.as_ref())?;
        tracing::debug!(
            "Reloaded {} ({} series, {} companions)",
            key,
            construction.entry.series().len(),
            construction.companions.len()
        );

        let mut changes = vec![RegistryChange::Updated(key.clone())];
        self.entries.insert(key.clone(), construction.entry);
        for companion in construction.companions {
            match companion {
                Companion::Upsert(entry) => {
                    let companion_key = entry.key().clone();
                    self.entries.insert(companion_key.clone(), entry);
                    changes.push(RegistryChange::Updated(companion_key));
                }
                Companion::Drop(companion_key) => {
                    if self.entries.remove(&companion_key).is_some() {
                        changes.push(RegistryChange::Removed(companion_key));
                    }
                }
            }
        }

        for change in &changes {
            self.publish(change);
        }
        Ok(())
    }

    /// Reloads every key of the store. A failing key is logged, recorded in
    /// the report and skipped; it never aborts the others.
    pub fn init_all(&mut self) -> InitReport {
        let mut report = InitReport::default();
        for key in self.store.all_keys() {
            match self.reload(&key) {
                Ok(()) => report.loaded.push(key),
                Err(err) => {
                    tracing::warn!("Skipping indicator {}: {}", key, err);
                    report.failed.push((key, err));
                }
            }
        }
        tracing::info!(
            "Initialized {} indicators ({} skipped)",
            report.loaded.len(),
            report.failed.len()
        );
        report
    }

    /// Removes the entry for `key`. Returns `false` (and notifies nobody) if
    /// there was none.
    pub fn remove_indicator(&mut self, key: &CompoundKey) -> bool {
        if self.entries.remove(key).is_none() {
            return false;
        }
        tracing::debug!("Removed {}", key);
        self.publish(&RegistryChange::Removed(key.clone()));
        true
    }

    /// Entry for `key`, if registered.
    #[must_use]
    pub fn chart_indicator(&self, key: &CompoundKey) -> Option<&ChartIndicator> {
        self.entries.get(key)
    }

    /// All registered entries in key order.
    pub fn all(&self) -> impl Iterator<Item = &ChartIndicator> {
        self.entries.values()
    }

    /// Registered keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = &CompoundKey> {
        self.entries.keys()
    }

    /// Keys of the registered entries tagged with `category`.
    #[must_use]
    pub fn keys_for_category(&self, category: Category) -> Vec<CompoundKey> {
        self.entries
            .values()
            .filter(|entry| entry.category() == category)
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configuration store the entries are built from.
    #[must_use]
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Mutable store access. Registered entries are not rebuilt until the
    /// affected keys are reloaded.
    pub fn store_mut(&mut self) -> &mut ConfigStore {
        &mut self.store
    }

    /// Dispatch table in use.
    #[must_use]
    pub fn factory(&self) -> &Factory {
        &self.factory
    }

    /// Replaces the computation capability, e.g. when the bar series changes.
    /// Registered entries keep their series until reloaded.
    pub fn set_compute(&mut self, compute: impl Compute + 'static) {
        self.compute = Box::new(compute);
    }

    /// Registers a change handler. Handlers run synchronously, in
    /// subscription order, after each successful mutation.
    pub fn subscribe(&mut self, handler: impl FnMut(&RegistryChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Removes a handler. Returns `false` if the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn publish(&mut self, change: &RegistryChange) {
        for (_, handler) in &mut self.subscribers {
            handler(change);
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("store", &self.store.path())
            .field("factory", &self.factory)
            .field("entries", &self.entries.keys().collect::<Vec<_>>())
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}
