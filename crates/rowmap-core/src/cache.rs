//! Field map cache
//!
//! Resolving a field map walks the whole descriptor tree, so sessions share
//! resolved maps through a [`DescriptorCache`]. Each record type gets one
//! slot; concurrent first lookups of the same type wait on a single build.

use std::any::TypeId;
use std::sync::{Arc, PoisonError, RwLock};

use ahash::AHashMap;
use once_cell::sync::{Lazy, OnceCell};

use crate::descriptor::{Record, TypeDescriptor};
use crate::error::Result;
use crate::resolve::{resolve, FieldMap};

type Slot = Arc<OnceCell<Arc<FieldMap>>>;

static GLOBAL: Lazy<Arc<DescriptorCache>> = Lazy::new(|| Arc::new(DescriptorCache::new()));

/// Cache of resolved field maps, keyed by record type
#[derive(Debug, Default)]
pub struct DescriptorCache {
    slots: RwLock<AHashMap<TypeId, Slot>>,
}

impl DescriptorCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by sessions created without one
    pub fn global() -> Arc<DescriptorCache> {
        Arc::clone(&GLOBAL)
    }

    /// Get the field map of `T`, resolving it on first use
    pub fn field_map<T: Record>(&self) -> Result<Arc<FieldMap>> {
        self.get_or_resolve(TypeId::of::<T>(), T::descriptor)
    }

    /// Get the field map for `type_id`, resolving `describe()` on first use.
    ///
    /// Failed resolutions are not cached; a later call tries again.
    pub fn get_or_resolve<F>(&self, type_id: TypeId, describe: F) -> Result<Arc<FieldMap>>
    where
        F: FnOnce() -> TypeDescriptor,
    {
        let slot = self.slot(type_id);
        let map = slot.get_or_try_init(|| {
            let descriptor = describe();
            log::debug!("Building field map for {}", descriptor.name());
            resolve(&descriptor).map(Arc::new)
        })?;
        Ok(Arc::clone(map))
    }

    /// Check if `T` has a resolved field map
    pub fn contains<T: Record>(&self) -> bool {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<T>())
            .map_or(false, |slot| slot.get().is_some())
    }

    /// Number of resolved types
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    /// Check if no type has been resolved
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all cached field maps.
    ///
    /// Sessions keep the maps they already hold.
    pub fn clear(&self) {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn slot(&self, type_id: TypeId) -> Slot {
        if let Some(slot) = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return Arc::clone(slot);
        }

        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(type_id).or_default())
    }
}
