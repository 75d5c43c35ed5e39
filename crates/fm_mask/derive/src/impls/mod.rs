//! Code generators for `#[derive(Masked)]`.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod leaf_kind;
mod record_kind;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use auto_register::get_auto_register_impl;
pub(crate) use leaf_kind::impl_leaf;
pub(crate) use record_kind::impl_record;
