//! Parsed form of a `#[derive(Masked)]` input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod mask_derive;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use mask_derive::{MaskBody, MaskDerive, MaskField};
