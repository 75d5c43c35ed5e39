//! Small helpers shared by the code generators.

mod rename_rule;

pub(crate) use rename_rule::RenameRule;

/// An empty token stream.
#[inline(always)]
pub(crate) fn empty() -> proc_macro2::TokenStream {
    proc_macro2::TokenStream::new()
}
