//! Override registry and resolution policy.

use std::collections::HashMap;
use std::fmt;

use crate::comparator::Comparator;
use crate::path::normalize_path;

/// Comparators keyed by index-normalized path pattern or by type name.
///
/// Holds at most one comparator per key; inserting under an existing key
/// replaces it. Keys that never match anything are inert. The registry is
/// read-only while a comparison runs and can be shared between threads.
#[derive(Default)]
pub struct Overrides {
    entries: HashMap<String, Box<dyn Comparator>>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `comparator` under `key`, returning the one it replaces.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        comparator: impl Comparator + 'static,
    ) -> Option<Box<dyn Comparator>> {
        self.entries.insert(key.into(), Box::new(comparator))
    }

    /// Builder form of [`Overrides::insert`].
    pub fn with(mut self, key: impl Into<String>, comparator: impl Comparator + 'static) -> Self {
        self.insert(key, comparator);
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the comparator for the node at `path` whose runtime type is
    /// `type_name`.
    ///
    /// The index-normalized path is tried first; the type name only when no
    /// path pattern matches.
    pub fn resolve(&self, path: &str, type_name: Option<&str>) -> Option<&dyn Comparator> {
        let comparator = self
            .entries
            .get(&*normalize_path(path))
            .or_else(|| type_name.and_then(|name| self.entries.get(name)))?;
        Some(&**comparator)
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.entries.keys().collect();
        keys.sort();
        f.debug_struct("Overrides").field("keys", &keys).finish()
    }
}

impl<K: Into<String>> FromIterator<(K, Box<dyn Comparator>)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (K, Box<dyn Comparator>)>>(iter: I) -> Self {
        let mut overrides = Overrides::new();
        overrides.extend(iter);
        overrides
    }
}

impl<K: Into<String>> Extend<(K, Box<dyn Comparator>)> for Overrides {
    fn extend<I: IntoIterator<Item = (K, Box<dyn Comparator>)>>(&mut self, iter: I) {
        for (key, comparator) in iter {
            self.entries.insert(key.into(), comparator);
        }
    }
}
