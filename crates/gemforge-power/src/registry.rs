//! Power registry
//!
//! Resolves power identifiers and wire raw ids to shared power handles. The
//! empty sentinel is always present at raw id 0. Registration happens at
//! startup; after [`PowerRegistry::freeze`] the table is read-only.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use gemforge_core::Identifier;
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::error::PowerError;
use crate::power::{empty_power_id, EmptyPower, GemPower};

/// A registered power: its key, its raw id, and the shared implementation
#[derive(Clone)]
pub struct PowerEntry {
    key: Identifier,
    raw_id: u32,
    power: Arc<dyn GemPower>,
}

impl PowerEntry {
    /// The empty sentinel, identical to raw id 0 of every registry
    pub fn empty() -> Self {
        Self {
            key: empty_power_id(),
            raw_id: 0,
            power: Arc::new(EmptyPower),
        }
    }

    pub fn key(&self) -> &Identifier {
        &self.key
    }

    /// Dense numeric id used on the wire
    pub fn raw_id(&self) -> u32 {
        self.raw_id
    }

    /// The power implementation
    pub fn value(&self) -> &dyn GemPower {
        self.power.as_ref()
    }

    /// Shorthand for `value().is_empty()`
    pub fn is_empty(&self) -> bool {
        self.power.is_empty()
    }
}

impl PartialEq for PowerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PowerEntry {}

impl Hash for PowerEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for PowerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PowerEntry")
            .field("key", &self.key)
            .field("raw_id", &self.raw_id)
            .finish()
    }
}

struct RegistryInner {
    entries: Vec<PowerEntry>,
    by_key: HashMap<Identifier, u32>,
    frozen: bool,
}

/// Lookup table of all known powers
pub struct PowerRegistry {
    inner: RwLock<RegistryInner>,
}

impl PowerRegistry {
    /// Create a registry holding only the empty sentinel
    pub fn new() -> Self {
        let empty = PowerEntry::empty();
        let mut by_key = HashMap::new();
        by_key.insert(empty.key.clone(), 0);
        Self {
            inner: RwLock::new(RegistryInner {
                entries: vec![empty],
                by_key,
                frozen: false,
            }),
        }
    }

    /// Register a power under `key`
    pub fn register<P: GemPower + 'static>(
        &self,
        key: Identifier,
        power: P,
    ) -> Result<PowerEntry, PowerError> {
        self.register_shared(key, Arc::new(power))
    }

    /// Register an already shared power
    pub fn register_shared(
        &self,
        key: Identifier,
        power: Arc<dyn GemPower>,
    ) -> Result<PowerEntry, PowerError> {
        let mut inner = self.inner.write();
        if inner.frozen {
            return Err(PowerError::RegistryFrozen(key));
        }
        if inner.by_key.contains_key(&key) {
            return Err(PowerError::DuplicatePower(key));
        }

        let raw_id = inner.entries.len() as u32;
        let entry = PowerEntry {
            key: key.clone(),
            raw_id,
            power,
        };
        inner.by_key.insert(key, raw_id);
        inner.entries.push(entry.clone());
        debug!("Registered power {} as raw id {}", entry.key, raw_id);
        Ok(entry)
    }

    /// Disallow further registration
    pub fn freeze(&self) {
        let mut inner = self.inner.write();
        if !inner.frozen {
            inner.frozen = true;
            info!("Power registry frozen with {} entries", inner.entries.len());
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.inner.read().frozen
    }

    /// The empty sentinel entry
    pub fn empty(&self) -> PowerEntry {
        self.inner.read().entries[0].clone()
    }

    pub fn get(&self, key: &Identifier) -> Option<PowerEntry> {
        let inner = self.inner.read();
        inner
            .by_key
            .get(key)
            .map(|&raw_id| inner.entries[raw_id as usize].clone())
    }

    /// Like [`PowerRegistry::get`] but unknown keys are an error
    pub fn resolve(&self, key: &Identifier) -> Result<PowerEntry, PowerError> {
        self.get(key)
            .ok_or_else(|| PowerError::UnknownPower(key.clone()))
    }

    pub fn by_raw_id(&self, raw_id: u32) -> Option<PowerEntry> {
        self.inner.read().entries.get(raw_id as usize).cloned()
    }

    /// Number of entries, including the empty sentinel
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Always false: the empty sentinel is registered on creation
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// All keys in raw id order
    pub fn keys(&self) -> Vec<Identifier> {
        self.inner
            .read()
            .entries
            .iter()
            .map(|e| e.key.clone())
            .collect()
    }

    /// All entries in raw id order
    pub fn entries(&self) -> Vec<PowerEntry> {
        self.inner.read().entries.clone()
    }

    /// Pick a random non-empty power accepted by `filter`
    pub fn random_non_empty<R, F>(&self, rng: &mut R, filter: F) -> Option<PowerEntry>
    where
        R: Rng + ?Sized,
        F: Fn(&PowerEntry) -> bool,
    {
        let inner = self.inner.read();
        let candidates: Vec<&PowerEntry> = inner
            .entries
            .iter()
            .filter(|e| !e.is_empty() && filter(*e))
            .collect();
        candidates.choose(rng).map(|e| (*e).clone())
    }
}

impl Default for PowerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PowerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("PowerRegistry")
            .field("entries", &inner.entries)
            .field("frozen", &inner.frozen)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{id, MarkerPower};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_registry_holds_empty_sentinel() {
        let registry = PowerRegistry::new();
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());

        let empty = registry.empty();
        assert_eq!(empty.raw_id(), 0);
        assert_eq!(empty.key(), &empty_power_id());
        assert!(empty.value().is_empty());
        assert_eq!(registry.by_raw_id(0), Some(empty));
    }

    #[test]
    fn test_register_assigns_dense_raw_ids() {
        let registry = PowerRegistry::new();
        let a = registry.register(id("a"), MarkerPower::new("a")).unwrap();
        let b = registry.register(id("b"), MarkerPower::new("b")).unwrap();
        assert_eq!(a.raw_id(), 1);
        assert_eq!(b.raw_id(), 2);
        assert_eq!(registry.get(&id("b")), Some(b.clone()));
        assert_eq!(registry.by_raw_id(1), Some(a));
        assert_eq!(registry.keys(), vec![empty_power_id(), id("a"), id("b")]);
        assert_eq!(registry.entries().len(), 3);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = PowerRegistry::new();
        registry.register(id("a"), MarkerPower::new("a")).unwrap();
        let err = registry.register(id("a"), MarkerPower::new("a")).unwrap_err();
        assert!(matches!(err, PowerError::DuplicatePower(_)));

        let err = registry.register(empty_power_id(), EmptyPower).unwrap_err();
        assert!(matches!(err, PowerError::DuplicatePower(_)));
    }

    #[test]
    fn test_frozen_registry_rejects_registration() {
        let registry = PowerRegistry::new();
        registry.freeze();
        assert!(registry.is_frozen());
        let err = registry.register(id("late"), MarkerPower::new("late")).unwrap_err();
        assert!(matches!(err, PowerError::RegistryFrozen(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = PowerRegistry::new();
        assert!(registry.get(&id("missing")).is_none());
        assert!(matches!(
            registry.resolve(&id("missing")),
            Err(PowerError::UnknownPower(_))
        ));
        assert!(registry.by_raw_id(7).is_none());
    }

    #[test]
    fn test_random_non_empty_respects_filter() {
        let registry = PowerRegistry::new();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(registry.random_non_empty(&mut rng, |_| true).is_none());

        registry.register(id("a"), MarkerPower::new("a")).unwrap();
        registry.register(id("b"), MarkerPower::new("b")).unwrap();
        for _ in 0..20 {
            let picked = registry
                .random_non_empty(&mut rng, |e| e.key() == &id("b"))
                .unwrap();
            assert_eq!(picked.key(), &id("b"));
        }
        let any = registry.random_non_empty(&mut rng, |_| true).unwrap();
        assert!(!any.value().is_empty());
    }

    #[test]
    fn test_entries_compare_by_key() {
        let registry = PowerRegistry::new();
        let a = registry.register(id("a"), MarkerPower::new("a")).unwrap();
        let again = registry.get(&id("a")).unwrap();
        assert_eq!(a, again);
        assert_ne!(a, registry.empty());
    }
}
