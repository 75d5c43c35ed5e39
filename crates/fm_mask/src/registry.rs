use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, TypeId};

use crate::apply::VisitedSet;
use crate::descriptor::{DescriptorCache, TypeDescriptor};
use crate::{FieldMask, MaskError, Record, ZeroCache};

// -----------------------------------------------------------------------------
// MaskRegistry

/// Descriptor and zero-value caches used to apply field masks.
///
/// [`MaskRegistry::shared`] is the process-wide instance behind
/// [`FieldMask::apply`]. A separate registry can be created for isolated
/// caches, e.g. in tests.
///
/// # Examples
///
/// ```
/// use fm_mask::{FieldMask, MaskRegistry, derive::Masked};
///
/// #[derive(Masked, Default)]
/// pub struct Point {
///     pub x: i32,
///     pub y: i32,
/// }
///
/// let registry = MaskRegistry::new();
/// let mut point = Point { x: 1, y: 2 };
///
/// registry.apply(&FieldMask::new(["x"]), &mut point).unwrap();
/// assert_eq!((point.x, point.y), (1, 0));
///
/// let descriptor = registry.descriptor::<Point>().unwrap();
/// assert_eq!(descriptor.keys().collect::<Vec<_>>(), ["x", "y"]);
/// ```
#[derive(Debug, Default)]
pub struct MaskRegistry {
    descriptors: DescriptorCache,
    zeros: ZeroCache,
}

impl MaskRegistry {
    /// Creates a registry with empty caches.
    #[inline]
    pub const fn new() -> Self {
        Self {
            descriptors: DescriptorCache::new(),
            zeros: ZeroCache::new(),
        }
    }

    /// Returns the process-wide registry.
    #[inline]
    pub fn shared() -> &'static MaskRegistry {
        static SHARED: MaskRegistry = MaskRegistry::new();
        &SHARED
    }

    #[inline]
    pub fn descriptors(&self) -> &DescriptorCache {
        &self.descriptors
    }

    #[inline]
    pub fn zeros(&self) -> &ZeroCache {
        &self.zeros
    }

    /// Returns the descriptor of `T`, building it on first use.
    #[inline]
    pub fn descriptor<T: Record>(&self) -> Result<Arc<TypeDescriptor>, MaskError> {
        self.descriptors.get_or_build::<T>()
    }

    /// Builds the descriptor of `T` ahead of time, which also makes `T`
    /// known to [`apply_dyn`](Self::apply_dyn).
    #[inline]
    pub fn register<T: Record>(&self) -> Result<(), MaskError> {
        self.descriptor::<T>().map(|_| ())
    }

    /// Returns `true` if a descriptor of the type `type_id` is stored.
    #[inline]
    pub fn is_registered(&self, type_id: TypeId) -> bool {
        self.descriptors.contains(type_id)
    }

    /// Applies `mask` to `target`.
    ///
    /// An empty mask leaves `target` untouched.
    pub fn apply<T: Record>(&self, mask: &FieldMask, target: &mut T) -> Result<(), MaskError> {
        if mask.is_empty() {
            return Ok(());
        }
        let descriptor = self.descriptor::<T>()?;
        self.apply_descriptor(&descriptor, mask, target)
    }

    /// Applies `mask` to a type-erased `target`.
    ///
    /// An empty mask succeeds without looking at `target`. Otherwise a missing
    /// target fails with [`MaskError::NilInput`], and a value that is not a
    /// known record fails with [`MaskError::NoStruct`].
    ///
    /// With the `auto_register` feature every concrete `#[derive(Masked)]`
    /// record is known. Generic records must be [registered](Self::register)
    /// per instantiation first.
    pub fn apply_dyn(
        &self,
        mask: &FieldMask,
        target: Option<&mut dyn Any>,
    ) -> Result<(), MaskError> {
        if mask.is_empty() {
            return Ok(());
        }
        let target = target.ok_or(MaskError::NilInput)?;
        let descriptor = self.lookup(Any::type_id(&*target))?;
        self.apply_descriptor(&descriptor, mask, target)
    }

    fn lookup(&self, type_id: TypeId) -> Result<Arc<TypeDescriptor>, MaskError> {
        if let Some(descriptor) = self.descriptors.get(type_id) {
            return Ok(descriptor);
        }

        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register::__AutoRegisterFunc;

            let submitted = inventory::iter::<__AutoRegisterFunc>
                .into_iter()
                .find(|func| (func.type_id)() == type_id);
            if let Some(func) = submitted {
                (func.register)(self)?;
                log::trace!("built the descriptor of {type_id:?} on a type-erased apply");
                return self.descriptors.get(type_id).ok_or(MaskError::NoStruct);
            }
        }

        Err(MaskError::NoStruct)
    }

    fn apply_descriptor(
        &self,
        descriptor: &TypeDescriptor,
        mask: &FieldMask,
        target: &mut dyn Any,
    ) -> Result<(), MaskError> {
        let paths: Vec<&str> = mask.paths().iter().map(String::as_str).collect();
        let mut visited = VisitedSet::default();
        descriptor.apply(target, &paths, &self.zeros, &mut visited)
    }

    /// Builds the descriptors of every type marked `#[mask(auto_register)]`
    /// in the final binary.
    ///
    /// Returns the number of types processed. A failing type does not stop
    /// the others; the first error is returned after all were tried.
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&self) -> Result<usize, MaskError> {
        use crate::__macro_exports::auto_register::__AutoRegisterFunc;

        let mut count = 0;
        let mut first_error = None;
        for func in inventory::iter::<__AutoRegisterFunc> {
            if !func.eager {
                continue;
            }
            count += 1;
            if let Err(err) = (func.register)(self) {
                log::warn!("auto registration failed: {err}");
                first_error.get_or_insert(err);
            }
        }

        log::debug!("auto registered {count} masked types");
        match first_error {
            Some(err) => Err(err),
            None => Ok(count),
        }
    }
}
