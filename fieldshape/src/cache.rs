//! Per-type descriptor cache.
//!
//! Enumerating a type's properties happens once per cache; later lookups are a
//! shard read on a `DashMap`. Two callers missing on the same type at the same
//! time both compute the list, and the first insert wins for everyone.

use crate::descriptor::{PropertyDescriptor, Shapeable};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

type Entry = Arc<dyn Any + Send + Sync>;

static GLOBAL: LazyLock<Arc<PropertyCache>> = LazyLock::new(|| Arc::new(PropertyCache::new()));

/// Maps a type to its ordered property descriptors. Entries are never evicted.
#[derive(Default)]
pub struct PropertyCache {
    entries: DashMap<TypeId, Entry>,
}

impl PropertyCache {
    /// Creates an empty, isolated cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// The process-wide cache shared by [`crate::FieldShaper::new`].
    #[must_use]
    pub fn global() -> Arc<PropertyCache> {
        Arc::clone(&GLOBAL)
    }

    /// Returns the descriptors for `T`, computing and storing them on first use.
    pub fn properties<T: Shapeable>(&self) -> Arc<Vec<PropertyDescriptor<T>>> {
        let type_id = TypeId::of::<T>();
        if let Some(cached) = self.lookup::<T>(type_id) {
            return cached;
        }

        let computed = Arc::new(Self::describe::<T>());
        let winner = Arc::clone(
            self.entries
                .entry(type_id)
                .or_insert_with(|| Arc::clone(&computed) as Entry)
                .value(),
        );

        // The key is the TypeId of T, so the stored entry always downcasts.
        winner
            .downcast::<Vec<PropertyDescriptor<T>>>()
            .unwrap_or(computed)
    }

    /// Whether descriptors for `T` have been computed.
    #[must_use]
    pub fn contains<T: Shapeable>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of cached types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup<T: Shapeable>(&self, type_id: TypeId) -> Option<Arc<Vec<PropertyDescriptor<T>>>> {
        let entry = Arc::clone(self.entries.get(&type_id)?.value());
        entry.downcast::<Vec<PropertyDescriptor<T>>>().ok()
    }

    fn describe<T: Shapeable>() -> Vec<PropertyDescriptor<T>> {
        let mut seen = HashSet::new();
        let properties: Vec<_> = T::properties()
            .into_iter()
            .filter(|property| {
                let fresh = seen.insert(property.key().to_owned());
                if !fresh {
                    warn!(
                        entity_type = T::type_name(),
                        property = property.name(),
                        "dropping duplicate property name"
                    );
                }
                fresh
            })
            .collect();

        debug!(
            entity_type = T::type_name(),
            properties = properties.len(),
            "cached property descriptors"
        );
        properties
    }
}
