use alloc::vec::Vec;
use core::any::{TypeId, type_name};
use core::fmt;

use fm_utils::hash::HashMap;

use crate::descriptor::FieldDescriptor;

// -----------------------------------------------------------------------------
// TypeDescriptor

/// The masked fields of one record type.
///
/// Fields are stored in declaration order and indexed by serialization key.
/// Keys are unique: inserting a second field with an existing key replaces
/// the first one in place.
pub struct TypeDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    fields: Vec<FieldDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl TypeDescriptor {
    /// Creates an empty descriptor for `T`.
    pub fn with_capacity<T: 'static>(capacity: usize) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            fields: Vec::with_capacity(capacity),
            index: HashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Adds `field`, replacing any field with the same key.
    pub fn insert(&mut self, field: FieldDescriptor) {
        match self.index.get(field.key()) {
            Some(&position) => {
                log::warn!(
                    "`{}`: field `{}` overrides field `{}` for key `{}`",
                    self.type_name,
                    field.name(),
                    self.fields[position].name(),
                    field.key(),
                );
                self.fields[position] = field;
            }
            None => {
                self.index.insert(field.key(), self.fields.len());
                self.fields.push(field);
            }
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the field stored under `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.index.get(key).map(|&position| &self.fields[position])
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the serialization keys in declaration order.
    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.fields.iter().map(FieldDescriptor::key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish()
    }
}
