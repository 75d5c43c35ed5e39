use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;

// -----------------------------------------------------------------------------
// MaskError

/// Errors returned while building descriptors or applying a [`FieldMask`].
///
/// [`FieldProcessing`](MaskError::FieldProcessing) only adds the name of the
/// field that failed; the `is_*` predicates look through it, so
/// classification does not depend on how deep the failure happened.
///
/// [`FieldMask`]: crate::FieldMask
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MaskError {
    #[error("cannot apply field mask to a missing target")]
    NilInput,

    #[error("target is not a masked record")]
    NoStruct,

    #[error("circular reference detected for type `{type_name}`")]
    CircularReference { type_name: &'static str },

    #[error("unexpected field kind: value is not a `{expected}`")]
    UnexpectedKind { expected: &'static str },

    #[error("failed to process field `{field}`: {source}")]
    FieldProcessing {
        field: &'static str,
        #[source]
        source: Box<MaskError>,
    },
}

impl MaskError {
    /// Wraps `source` with the name of the field being processed.
    #[inline]
    pub fn field(field: &'static str, source: MaskError) -> Self {
        Self::FieldProcessing {
            field,
            source: Box::new(source),
        }
    }

    /// Returns the innermost error, skipping every `FieldProcessing` layer.
    pub fn root(&self) -> &MaskError {
        let mut current = self;
        while let Self::FieldProcessing { source, .. } = current {
            current = &**source;
        }
        current
    }

    /// Returns the dotted field path recorded by the `FieldProcessing` layers,
    /// outermost first, or `None` if the error was not raised inside a field.
    ///
    /// ```
    /// use fm_mask::MaskError;
    ///
    /// let inner = MaskError::UnexpectedKind { expected: "Profile" };
    /// let err = MaskError::field("user", MaskError::field("profile", inner));
    /// assert_eq!(err.field_path().as_deref(), Some("user.profile"));
    /// ```
    pub fn field_path(&self) -> Option<String> {
        let mut names = Vec::new();
        let mut current = self;
        while let Self::FieldProcessing { field, source } = current {
            names.push(*field);
            current = &**source;
        }
        (!names.is_empty()).then(|| names.join("."))
    }

    #[inline]
    pub fn is_nil_input(&self) -> bool {
        matches!(self.root(), Self::NilInput)
    }

    #[inline]
    pub fn is_no_struct(&self) -> bool {
        matches!(self.root(), Self::NoStruct)
    }

    #[inline]
    pub fn is_circular_reference(&self) -> bool {
        matches!(self.root(), Self::CircularReference { .. })
    }

    #[inline]
    pub fn is_unexpected_kind(&self) -> bool {
        matches!(self.root(), Self::UnexpectedKind { .. })
    }

    /// Returns `true` if the error was raised while processing a field.
    #[inline]
    pub fn is_field_processing(&self) -> bool {
        matches!(self, Self::FieldProcessing { .. })
    }
}
