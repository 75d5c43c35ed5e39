use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::{Any, TypeId, type_name};
use core::fmt;

use crate::descriptor::TypeDescriptor;
use crate::maskable::RecordVisitor;
use crate::{MaskError, MaskKind, Maskable, Record, ZeroCache};

// -----------------------------------------------------------------------------
// FieldAccess

/// Type-erased operations on one field of an owning record.
trait FieldAccess: Send + Sync {
    fn reset(&self, owner: &mut dyn Any, zeros: &ZeroCache) -> Result<(), MaskError>;

    fn descend(
        &self,
        owner: &mut dyn Any,
        visitor: &mut RecordVisitor<'_>,
    ) -> Result<(), MaskError>;
}

struct TypedAccessor<O, F> {
    get_mut: fn(&mut O) -> &mut F,
}

impl<O: Record, F: Maskable> TypedAccessor<O, F> {
    #[inline]
    fn field<'o>(&self, owner: &'o mut dyn Any) -> Result<&'o mut F, MaskError> {
        match owner.downcast_mut::<O>() {
            Some(owner) => Ok((self.get_mut)(owner)),
            None => Err(MaskError::UnexpectedKind {
                expected: type_name::<O>(),
            }),
        }
    }
}

impl<O: Record, F: Maskable> FieldAccess for TypedAccessor<O, F> {
    fn reset(&self, owner: &mut dyn Any, zeros: &ZeroCache) -> Result<(), MaskError> {
        *self.field(owner)? = F::zero_value(zeros);
        Ok(())
    }

    fn descend(
        &self,
        owner: &mut dyn Any,
        visitor: &mut RecordVisitor<'_>,
    ) -> Result<(), MaskError> {
        self.field(owner)?.visit_nested(visitor)
    }
}

// -----------------------------------------------------------------------------
// FieldDescriptor

/// One masked field of a record type.
pub struct FieldDescriptor {
    key: &'static str,
    name: &'static str,
    type_id: TypeId,
    type_name: &'static str,
    kind: MaskKind,
    child: Option<Arc<TypeDescriptor>>,
    access: Box<dyn FieldAccess>,
}

impl FieldDescriptor {
    pub(crate) fn new<O: Record, F: Maskable>(
        key: &'static str,
        name: &'static str,
        child: Option<Arc<TypeDescriptor>>,
        get_mut: fn(&mut O) -> &mut F,
    ) -> Self {
        Self {
            key,
            name,
            type_id: TypeId::of::<F>(),
            type_name: type_name::<F>(),
            kind: F::KIND,
            child,
            access: Box::new(TypedAccessor { get_mut }),
        }
    }

    /// The serialization key that paths refer to.
    #[inline]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// The field name as declared in Rust.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The [`TypeId`] of the declared field type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn kind(&self) -> MaskKind {
        self.kind
    }

    /// The descriptor of the record this field leads to, if any.
    #[inline]
    pub fn child(&self) -> Option<&Arc<TypeDescriptor>> {
        self.child.as_ref()
    }

    /// Replaces the field of `owner` with the zero value of its type.
    ///
    /// Fails with [`MaskError::UnexpectedKind`] if `owner` is not the record
    /// type this field belongs to.
    #[inline]
    pub fn reset(&self, owner: &mut dyn Any, zeros: &ZeroCache) -> Result<(), MaskError> {
        self.access.reset(owner, zeros)
    }

    /// Calls `visitor` with the record stored in the field of `owner`, if the
    /// field leads to one that is currently present.
    #[inline]
    pub fn descend(
        &self,
        owner: &mut dyn Any,
        visitor: &mut RecordVisitor<'_>,
    ) -> Result<(), MaskError> {
        self.access.descend(owner, visitor)
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("kind", &self.kind)
            .field("child", &self.child.as_ref().map(|c| c.type_name()))
            .finish()
    }
}
