//! Paths to `fm_mask` items used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the access path to the `fm_mask` crate from the invoking crate.
///
/// 1. For crates that depend on `fm_mask`, `::fm_mask` is returned.
/// 2. For crates that depend on `fm_core`, `::fm_core::mask` is returned.
/// 3. For crates that depend on `fm`, `::fm::mask` is returned.
/// 4. Otherwise `::fm_mask` is returned, which is correct inside `fm_mask`
///    itself thanks to its `extern crate self as fm_mask`.
///
/// Reading the manifest is not free, so the path is computed once per
/// derive and passed around.
pub(crate) fn fm_mask() -> syn::Path {
    fm_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("fm_mask"))
}

#[inline(always)]
pub(crate) fn descriptor_(fm_mask_path: &syn::Path) -> TokenStream {
    quote! {
        #fm_mask_path::descriptor
    }
}

#[inline(always)]
pub(crate) fn macro_exports_(fm_mask_path: &syn::Path) -> TokenStream {
    quote! {
        #fm_mask_path::__macro_exports
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(fm_mask_path: &syn::Path) -> TokenStream {
    quote! {
        #fm_mask_path::__macro_exports::auto_register
    }
}
