#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names items through `::fm_mask`, which must also resolve
// inside this crate's own tests.
extern crate self as fm_mask;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod apply;
mod error;
mod maskable;
mod registry;
mod zero;

pub mod descriptor;
pub mod impls;
pub mod path;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use fm_mask_derive as derive;

pub use apply::VisitedSet;
pub use error::MaskError;
pub use maskable::{MaskKind, Maskable, Record, RecordVisitor};
pub use path::FieldMask;
pub use registry::MaskRegistry;
pub use zero::ZeroCache;
