use alloc::sync::Arc;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock};

use fm_utils::TypeIdMap;

use crate::descriptor::{DescriptorBuilder, TypeDescriptor};
use crate::{MaskError, Record};

// -----------------------------------------------------------------------------
// DescriptorCache

/// Thread-safe map from record type to its [`TypeDescriptor`].
///
/// Lookups take a read lock only. Two threads that miss on the same type may
/// both build it, the last stored descriptor wins. Failed builds are not
/// stored.
pub struct DescriptorCache {
    descriptors: RwLock<TypeIdMap<Arc<TypeDescriptor>>>,
}

impl Default for DescriptorCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorCache {
    /// Creates an empty cache.
    #[inline]
    pub const fn new() -> Self {
        Self {
            descriptors: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Returns the stored descriptor of the type `type_id`.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<Arc<TypeDescriptor>> {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    }

    /// Returns the descriptor of `T`, building and storing it on a miss.
    pub fn get_or_build<T: Record>(&self) -> Result<Arc<TypeDescriptor>, MaskError> {
        match self.get(TypeId::of::<T>()) {
            Some(descriptor) => Ok(descriptor),
            None => DescriptorBuilder::new(self).build::<T>(),
        }
    }

    /// Stores `descriptor` under its type and returns it.
    pub fn insert(&self, descriptor: Arc<TypeDescriptor>) -> Arc<TypeDescriptor> {
        let replaced = self
            .descriptors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(descriptor.type_id(), descriptor.clone());

        if replaced.is_some() {
            log::trace!("replaced field descriptor for `{}`", descriptor.type_name());
        }
        descriptor
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&type_id)
    }

    /// Returns the number of stored descriptors.
    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl core::fmt::Debug for DescriptorCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DescriptorCache")
            .field("len", &self.len())
            .finish()
    }
}
