//! Items used by the code `#[derive(Masked)]` generates. Not public API.

pub use alloc::sync::Arc;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use core::any::TypeId;

    use crate::{MaskError, MaskRegistry};

    /// Entry submitted for each concrete `#[derive(Masked)]` record.
    ///
    /// `eager` is set for `#[mask(auto_register)]` types.
    pub struct __AutoRegisterFunc {
        pub type_id: fn() -> TypeId,
        pub register: fn(&MaskRegistry) -> Result<(), MaskError>,
        pub eager: bool,
    }

    inventory::collect!(__AutoRegisterFunc);
}
