use alloc::sync::Arc;
use core::any::{TypeId, type_name};

use fm_utils::hash::HashSet;

use crate::descriptor::{DescriptorCache, FieldDescriptor, TypeDescriptor};
use crate::{MaskError, Maskable, Record};

// -----------------------------------------------------------------------------
// DescriptorBuilder

/// Builds the descriptor of a record type and of every record reachable
/// from it.
///
/// The builder tracks the types whose descriptors are being built. Reaching
/// one of them again means the type contains itself and fails with
/// [`MaskError::CircularReference`]. A type leaves the set once its own
/// descriptor is done, so the same type may appear in sibling fields.
pub struct DescriptorBuilder<'a> {
    cache: &'a DescriptorCache,
    in_progress: HashSet<TypeId>,
}

impl<'a> DescriptorBuilder<'a> {
    /// Creates a builder that stores each finished descriptor in `cache`.
    #[inline]
    pub fn new(cache: &'a DescriptorCache) -> Self {
        Self {
            cache,
            in_progress: HashSet::default(),
        }
    }

    /// Returns the descriptor of `T`, building it if the cache has none.
    pub fn build<T: Record>(&mut self) -> Result<Arc<TypeDescriptor>, MaskError> {
        let type_id = TypeId::of::<T>();

        if let Some(descriptor) = self.cache.get(type_id) {
            return Ok(descriptor);
        }

        if !self.in_progress.insert(type_id) {
            return Err(MaskError::CircularReference {
                type_name: type_name::<T>(),
            });
        }

        let described = T::describe(self);
        self.in_progress.remove(&type_id);
        let descriptor = Arc::new(described?);

        log::debug!(
            "built field descriptor for `{}` ({} fields)",
            descriptor.type_name(),
            descriptor.len(),
        );

        Ok(self.cache.insert(descriptor))
    }

    /// Creates the descriptor of the field `name` of `O`, stored under `key`
    /// and reached through `get_mut`.
    ///
    /// If `F` leads to a record, its descriptor is built first.
    pub fn field<O: Record, F: Maskable>(
        &mut self,
        key: &'static str,
        name: &'static str,
        get_mut: fn(&mut O) -> &mut F,
    ) -> Result<FieldDescriptor, MaskError> {
        let child = F::nested_descriptor(self).map_err(|err| MaskError::field(name, err))?;
        Ok(FieldDescriptor::new(key, name, child, get_mut))
    }
}
