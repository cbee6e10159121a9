//! Transformation registry mapping operation names to functions.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::config::register_builtins;
use super::transformation::Transformation;

type Entries = HashMap<String, Arc<dyn Transformation>>;

/// Registry mapping operation names to transformations.
///
/// Registration and lookup both take `&self` and may run from several
/// threads at once. Entries are never removed; registering a name twice
/// replaces the earlier entry.
pub struct TransformationRegistry {
    transformations: RwLock<Entries>,
}

impl TransformationRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transformations: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry holding the built-in transformations.
    #[must_use]
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        register_builtins(&registry);
        registry
    }

    /// Register a transformation under `name`, replacing any previous entry.
    pub fn register(&self, name: impl Into<String>, transformation: impl Transformation + 'static) {
        let name = name.into();
        let replaced = self
            .write()
            .insert(name.clone(), Arc::new(transformation))
            .is_some();
        if replaced {
            tracing::debug!(operation = %name, "Replaced registered transformation");
        }
    }

    /// Look up the transformation registered under `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Transformation>> {
        self.read().get(name).cloned()
    }

    /// Check if a transformation is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Return all registered operation names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered transformations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Inserts are single map operations; a poisoned lock still guards a
    // consistent map.
    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.transformations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.transformations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TransformationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TransformationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformationRegistry")
            .field("operations", &self.names())
            .finish()
    }
}
