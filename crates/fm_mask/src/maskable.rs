use alloc::sync::Arc;
use core::any::Any;

use crate::MaskError;
use crate::descriptor::{DescriptorBuilder, TypeDescriptor};
use crate::zero::ZeroCache;

// -----------------------------------------------------------------------------
// MaskKind

/// How the mask engine treats a field of a given type.
///
/// Only [`Record`](MaskKind::Record) values are entered to mask their own
/// fields. The wrapper kinds forward to a record they contain; every other
/// type is a [`Leaf`](MaskKind::Leaf) that is either kept whole or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskKind {
    /// Opaque value: scalars, strings, collections, maps, leaf structs.
    Leaf,
    /// A `#[derive(Masked)]` struct.
    Record,
    /// `Mutex`, `RwLock` or `RefCell` over a record.
    Cell,
    /// `Box`, `Arc` or `Rc` over a record or a cell.
    Pointer,
    /// `Option` over a record, a cell or a pointer.
    Optional,
}

impl MaskKind {
    /// Returns `true` if a value of this kind can lead to a record.
    #[inline]
    pub const fn is_nested(self) -> bool {
        !matches!(self, Self::Leaf)
    }

    /// Kind of `Mutex<T>`, `RwLock<T>` and `RefCell<T>` for a content of kind `self`.
    #[inline]
    pub const fn behind_cell(self) -> Self {
        match self {
            Self::Record => Self::Cell,
            _ => Self::Leaf,
        }
    }

    /// Kind of `Box<T>`, `Arc<T>` and `Rc<T>` for a content of kind `self`.
    #[inline]
    pub const fn behind_pointer(self) -> Self {
        match self {
            Self::Record | Self::Cell => Self::Pointer,
            _ => Self::Leaf,
        }
    }

    /// Kind of `Option<T>` for a content of kind `self`.
    #[inline]
    pub const fn behind_option(self) -> Self {
        match self {
            Self::Record | Self::Cell | Self::Pointer => Self::Optional,
            _ => Self::Leaf,
        }
    }
}

// -----------------------------------------------------------------------------
// Maskable

/// Callback invoked with each record reached through a nested field.
pub type RecordVisitor<'v> = dyn FnMut(&mut dyn Any) -> Result<(), MaskError> + 'v;

/// A type that can appear as a field of a masked record.
///
/// Implemented for the common std types in [`crate::impls`] and for every
/// `#[derive(Masked)]` type.
pub trait Maskable: 'static {
    /// How the engine treats fields of this type.
    const KIND: MaskKind;

    /// Returns the value a field of this type takes when it is not kept.
    fn zero_value(zeros: &ZeroCache) -> Self
    where
        Self: Sized;

    /// Returns the descriptor of the record this type leads to, if any.
    ///
    /// Leaves return `Ok(None)`.
    fn nested_descriptor(
        builder: &mut DescriptorBuilder<'_>,
    ) -> Result<Option<Arc<TypeDescriptor>>, MaskError> {
        let _ = builder;
        Ok(None)
    }

    /// Calls `visitor` with the record reached through `self`, if present.
    ///
    /// Absent content (`None`, a shared `Arc`) is not visited.
    fn visit_nested(&mut self, visitor: &mut RecordVisitor<'_>) -> Result<(), MaskError> {
        let _ = visitor;
        Ok(())
    }

    /// Like [`visit_nested`](Self::visit_nested), through a shared reference.
    ///
    /// Only interior-mutable types visit anything here, which is how a record
    /// behind `Arc<Mutex<T>>` is reached.
    fn visit_shared(&self, visitor: &mut RecordVisitor<'_>) -> Result<(), MaskError> {
        let _ = visitor;
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Record

/// A struct whose fields can be masked.
///
/// Use [`#[derive(Masked)]`](crate::derive::Masked) rather than implementing
/// this by hand.
pub trait Record: Maskable + Sized {
    /// Builds the descriptor of `Self`. Nested record types are resolved
    /// through `builder`.
    fn describe(builder: &mut DescriptorBuilder<'_>) -> Result<TypeDescriptor, MaskError>;
}

#[cfg(test)]
mod tests {
    use super::MaskKind;

    #[test]
    fn wrapper_kinds() {
        assert_eq!(MaskKind::Record.behind_cell(), MaskKind::Cell);
        assert_eq!(MaskKind::Leaf.behind_cell(), MaskKind::Leaf);
        assert_eq!(MaskKind::Pointer.behind_cell(), MaskKind::Leaf);

        assert_eq!(MaskKind::Cell.behind_pointer(), MaskKind::Pointer);
        assert_eq!(MaskKind::Pointer.behind_pointer(), MaskKind::Leaf);

        assert_eq!(MaskKind::Pointer.behind_option(), MaskKind::Optional);
        assert_eq!(MaskKind::Cell.behind_option(), MaskKind::Optional);
        assert_eq!(MaskKind::Leaf.behind_option(), MaskKind::Leaf);
        assert_eq!(MaskKind::Optional.behind_option(), MaskKind::Leaf);
        assert!(!MaskKind::Leaf.is_nested());
    }
}
