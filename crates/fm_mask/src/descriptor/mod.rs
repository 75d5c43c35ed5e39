//! Per-type field tables.
//!
//! A [`TypeDescriptor`] lists the masked fields of one record type, each as a
//! [`FieldDescriptor`] with a typed accessor. Descriptors are built once per
//! type by a [`DescriptorBuilder`] and shared through a [`DescriptorCache`].

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod cache;
mod field_descriptor;
mod type_descriptor;

// -----------------------------------------------------------------------------
// Exports

pub use builder::DescriptorBuilder;
pub use cache::DescriptorCache;
pub use field_descriptor::FieldDescriptor;
pub use type_descriptor::TypeDescriptor;
