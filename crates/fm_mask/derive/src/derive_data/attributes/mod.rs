//! Parsing of `#[mask(..)]` and the honoured `#[serde(..)]` keys.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod serde_compat;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use field_attributes::FieldAttributes;
pub(crate) use type_attributes::TypeAttributes;
