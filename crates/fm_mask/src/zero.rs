use alloc::sync::Arc;
use core::any::{Any, TypeId, type_name};
use std::sync::{PoisonError, RwLock};

use fm_utils::TypeIdMap;

// -----------------------------------------------------------------------------
// ZeroCache

type ErasedZero = Arc<dyn Any + Send + Sync>;

/// Memoized default values of leaf types.
///
/// The first request for a type creates its `Default` value; later requests
/// share it. Cached instances are never mutated, a reset clones from them.
///
/// ```
/// use fm_mask::ZeroCache;
///
/// let zeros = ZeroCache::new();
/// let a = zeros.zero::<String>();
/// let b = zeros.zero::<String>();
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// assert_eq!(zeros.zero_value::<u32>(), 0);
/// ```
pub struct ZeroCache {
    values: RwLock<TypeIdMap<ErasedZero>>,
}

impl Default for ZeroCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ZeroCache {
    /// Creates an empty cache.
    #[inline]
    pub const fn new() -> Self {
        Self {
            values: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Returns the shared default instance of `T`.
    pub fn zero<T>(&self) -> Arc<T>
    where
        T: Default + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<T>();

        let cached = self
            .values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned();

        if let Some(value) = cached
            && let Ok(value) = value.downcast::<T>()
        {
            return value;
        }

        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        let erased = values
            .get_or_insert(type_id, || {
                log::trace!("zero value created for `{}`", type_name::<T>());
                Arc::new(T::default()) as ErasedZero
            })
            .clone();

        // The map is keyed by `TypeId`, so the downcast only fails if the
        // entry was written for another type.
        erased.downcast::<T>().unwrap_or_else(|_| Arc::new(T::default()))
    }

    /// Returns a fresh copy of the default instance of `T`.
    #[inline]
    pub fn zero_value<T>(&self) -> T
    where
        T: Clone + Default + Send + Sync + 'static,
    {
        T::clone(&self.zero::<T>())
    }

    /// Returns the number of cached types.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if no zero value was created yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl core::fmt::Debug for ZeroCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ZeroCache").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ZeroCache;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    #[test]
    fn memoized_per_type() {
        let zeros = ZeroCache::new();
        assert!(zeros.is_empty());

        let a = zeros.zero::<String>();
        let b = zeros.zero::<String>();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(zeros.len(), 1);

        assert_eq!(zeros.zero_value::<i64>(), 0);
        assert!(!zeros.zero_value::<bool>());
        assert_eq!(zeros.len(), 3);
    }

    #[test]
    fn copies_are_independent() {
        let zeros = ZeroCache::new();
        let mut s = zeros.zero_value::<String>();
        s.push_str("changed");
        assert_eq!(*zeros.zero::<String>(), "");
    }

    #[test]
    fn concurrent_first_use() {
        let zeros = ZeroCache::new();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| zeros.zero::<String>()))
                .collect();
            let values: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert!(values.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        });
    }
}
