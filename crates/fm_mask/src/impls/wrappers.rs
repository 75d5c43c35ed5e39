use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;
use core::cell::RefCell;
use std::sync::{Mutex, PoisonError, RwLock};

use crate::descriptor::{DescriptorBuilder, TypeDescriptor};
use crate::maskable::RecordVisitor;
use crate::{MaskError, MaskKind, Maskable, ZeroCache};

// Every wrapper zeroes to a fresh wrapper around the zero of its content, so
// a reset never shares state with another field.

macro_rules! forward_descriptor {
    () => {
        #[inline]
        fn nested_descriptor(
            builder: &mut DescriptorBuilder<'_>,
        ) -> Result<Option<Arc<TypeDescriptor>>, MaskError> {
            if Self::KIND.is_nested() {
                T::nested_descriptor(builder)
            } else {
                Ok(None)
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Pointers

impl<T: Maskable> Maskable for Box<T> {
    const KIND: MaskKind = T::KIND.behind_pointer();

    #[inline]
    fn zero_value(zeros: &ZeroCache) -> Self {
        Box::new(T::zero_value(zeros))
    }

    forward_descriptor!();

    #[inline]
    fn visit_nested(&mut self, visitor: &mut RecordVisitor<'_>) -> Result<(), MaskError> {
        if Self::KIND.is_nested() {
            (**self).visit_nested(visitor)
        } else {
            Ok(())
        }
    }
}

macro_rules! impl_shared_pointer {
    ($ptr:ident) => {
        impl<T: Maskable> Maskable for $ptr<T> {
            const KIND: MaskKind = T::KIND.behind_pointer();

            #[inline]
            fn zero_value(zeros: &ZeroCache) -> Self {
                $ptr::new(T::zero_value(zeros))
            }

            forward_descriptor!();

            /// A cell is reached through the shared reference. A record is
            /// only reached when this is the sole owner.
            fn visit_nested(&mut self, visitor: &mut RecordVisitor<'_>) -> Result<(), MaskError> {
                match T::KIND {
                    MaskKind::Cell => (**self).visit_shared(visitor),
                    MaskKind::Record => match $ptr::get_mut(self) {
                        Some(inner) => inner.visit_nested(visitor),
                        None => {
                            log::trace!(
                                "skipped shared `{}`",
                                core::any::type_name::<Self>()
                            );
                            Ok(())
                        }
                    },
                    _ => Ok(()),
                }
            }
        }
    };
}

impl_shared_pointer!(Arc);
impl_shared_pointer!(Rc);

// -----------------------------------------------------------------------------
// Cells

impl<T: Maskable> Maskable for Mutex<T> {
    const KIND: MaskKind = T::KIND.behind_cell();

    #[inline]
    fn zero_value(zeros: &ZeroCache) -> Self {
        Mutex::new(T::zero_value(zeros))
    }

    forward_descriptor!();

    fn visit_nested(&mut self, visitor: &mut RecordVisitor<'_>) -> Result<(), MaskError> {
        if !Self::KIND.is_nested() {
            return Ok(());
        }
        self.get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .visit_nested(visitor)
    }

    fn visit_shared(&self, visitor: &mut RecordVisitor<'_>) -> Result<(), MaskError> {
        if !Self::KIND.is_nested() {
            return Ok(());
        }
        let mut guard = self.lock().unwrap_or_else(PoisonError::into_inner);
        guard.visit_nested(visitor)
    }
}

impl<T: Maskable> Maskable for RwLock<T> {
    const KIND: MaskKind = T::KIND.behind_cell();

    #[inline]
    fn zero_value(zeros: &ZeroCache) -> Self {
        RwLock::new(T::zero_value(zeros))
    }

    forward_descriptor!();

    fn visit_nested(&mut self, visitor: &mut RecordVisitor<'_>) -> Result<(), MaskError> {
        if !Self::KIND.is_nested() {
            return Ok(());
        }
        self.get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .visit_nested(visitor)
    }

    fn visit_shared(&self, visitor: &mut RecordVisitor<'_>) -> Result<(), MaskError> {
        if !Self::KIND.is_nested() {
            return Ok(());
        }
        let mut guard = self.write().unwrap_or_else(PoisonError::into_inner);
        guard.visit_nested(visitor)
    }
}

impl<T: Maskable> Maskable for RefCell<T> {
    const KIND: MaskKind = T::KIND.behind_cell();

    #[inline]
    fn zero_value(zeros: &ZeroCache) -> Self {
        RefCell::new(T::zero_value(zeros))
    }

    forward_descriptor!();

    fn visit_nested(&mut self, visitor: &mut RecordVisitor<'_>) -> Result<(), MaskError> {
        if !Self::KIND.is_nested() {
            return Ok(());
        }
        self.get_mut().visit_nested(visitor)
    }

    /// A value that is already borrowed elsewhere is skipped.
    fn visit_shared(&self, visitor: &mut RecordVisitor<'_>) -> Result<(), MaskError> {
        if !Self::KIND.is_nested() {
            return Ok(());
        }
        match self.try_borrow_mut() {
            Ok(mut inner) => inner.visit_nested(visitor),
            Err(_) => Ok(()),
        }
    }
}

// -----------------------------------------------------------------------------
// Option

impl<T: Maskable> Maskable for Option<T> {
    const KIND: MaskKind = T::KIND.behind_option();

    #[inline]
    fn zero_value(_: &ZeroCache) -> Self {
        None
    }

    forward_descriptor!();

    #[inline]
    fn visit_nested(&mut self, visitor: &mut RecordVisitor<'_>) -> Result<(), MaskError> {
        match self {
            Some(inner) if Self::KIND.is_nested() => inner.visit_nested(visitor),
            _ => Ok(()),
        }
    }
}
