//! The [`Masked`] derive macro of `fm_mask`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static MASK_ATTRIBUTE_NAME: &str = "mask";
static SERDE_ATTRIBUTE_NAME: &str = "serde";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Field Mask Derivation
///
/// `#[derive(Masked)]` implements `Maskable` and `Record` for a struct with
/// named fields, so that a `FieldMask` can be applied to it.
///
/// ```rust, ignore
/// #[derive(Masked)]
/// pub struct User {
///     pub name: String,
///     pub profile: Profile,       // another `Masked` struct
///     pub manager: Option<Box<User>>,
///     secret: String,             // private, never touched
/// }
/// ```
///
/// Field types must implement `Maskable`. The std scalars, strings,
/// collections and the `Box`, `Arc`, `Rc`, `Mutex`, `RwLock`, `RefCell` and
/// `Option` wrappers do. Other types can opt in with `#[mask(leaf)]`.
///
/// Fields that are not masked (private or skipped) keep their value when a
/// mask is applied, but must implement `Default` for the zero value of the
/// record itself.
///
/// ## Keys
///
/// Paths name fields by key. The key of a field is, in order:
///
/// 1. `#[mask(rename = "key")]`. Text after the first `,` is ignored and an
///    empty key keeps the field name. `#[mask(rename = "-")]` skips the field.
/// 2. `#[serde(rename = "key")]`, or its `serialize` form.
/// 3. The container `rename_all` rule, `#[mask(rename_all = "..")]` first,
///    then `#[serde(rename_all = "..")]`. Rule names are those of `serde`.
/// 4. The field name, case preserved, without `r#`.
///
/// When two fields resolve to the same key, the later one wins.
///
/// ## Skipping
///
/// Private fields (no `pub` of any kind) are never masked, nor are fields
/// marked `#[mask(skip)]`, `#[serde(skip)]` or `#[serde(skip_serializing)]`.
/// Other `serde` keys are accepted and ignored.
///
/// ## Leaf Types
///
/// ```rust, ignore
/// #[derive(Masked, Clone, Default)]
/// #[mask(leaf)]
/// pub enum Status { #[default] Active, Disabled }
/// ```
///
/// A leaf is kept or reset as a whole. Concrete leaf types must implement
/// `Clone`, `Default`, `Send` and `Sync`; generic ones only `Default`.
///
/// ## Auto Registration
///
/// With the default `auto_register` feature each non-generic record is
/// submitted to `inventory`, so `MaskRegistry::apply_dyn` finds it by its
/// `TypeId`. `#[mask(auto_register)]` additionally makes
/// `MaskRegistry::auto_register` build the descriptor of the type ahead of
/// time. The attribute is only available for non-generic records.
///
/// Lifetime parameters, tuple structs, enums and unions are rejected unless
/// marked `leaf` (lifetimes are always rejected).
#[proc_macro_derive(Masked, attributes(mask, serde))]
pub fn derive_masked(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let meta = match derive_data::MaskDerive::from_input(&ast) {
        Ok(meta) => meta,
        Err(err) => return err.into_compile_error().into(),
    };

    let body = match &meta.body {
        derive_data::MaskBody::Record(fields) => impls::impl_record(&meta, fields),
        derive_data::MaskBody::Leaf => impls::impl_leaf(&meta),
    };

    let auto_register = match impls::get_auto_register_impl(&meta) {
        Ok(tokens) => tokens,
        Err(err) => err.into_compile_error(),
    };

    TokenStream::from(quote! {
        const _: () = {
            #body

            #auto_register
        };
    })
}
