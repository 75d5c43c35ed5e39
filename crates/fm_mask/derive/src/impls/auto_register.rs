use crate::derive_data::MaskDerive;

/// Generate the `inventory` submission of a concrete record.
///
/// Every concrete record is submitted so that `MaskRegistry::apply_dyn` can
/// find it by `TypeId`. Types marked `#[mask(auto_register)]` are flagged
/// eager and built by `MaskRegistry::auto_register`.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &MaskDerive) -> syn::Result<proc_macro2::TokenStream> {
    use quote::quote_spanned;

    use crate::derive_data::MaskBody;

    let marked = meta.attrs.auto_register;

    if let Some(span) = marked {
        if matches!(meta.body, MaskBody::Leaf) {
            return Err(syn::Error::new(
                span,
                "`auto_register` is only available for records, leaf types have no descriptor",
            ));
        }
        if meta.is_generic() {
            return Err(syn::Error::new(
                span,
                "`auto_register` needs a concrete type, register each instantiation with `MaskRegistry::register`",
            ));
        }
    }

    if matches!(meta.body, MaskBody::Leaf) || meta.is_generic() {
        return Ok(crate::utils::empty());
    }

    let fm_mask_path = &meta.fm_mask_path;
    let auto_register_ = crate::path::auto_register_(fm_mask_path);
    let ident = meta.ident;
    let span = marked.unwrap_or_else(|| ident.span());
    let eager = marked.is_some();

    Ok(quote_spanned! { span =>
        #auto_register_::inventory::submit! {
            #auto_register_::__AutoRegisterFunc {
                type_id: ::core::any::TypeId::of::<#ident>,
                register: #fm_mask_path::MaskRegistry::register::<#ident>,
                eager: #eager,
            }
        }
    })
}

/// Generate the `inventory` submission of a concrete record.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &MaskDerive) -> syn::Result<proc_macro2::TokenStream> {
    Ok(crate::utils::empty())
}

#[cfg(all(test, feature = "auto_register"))]
mod tests {
    use syn::{DeriveInput, parse_quote};

    use super::get_auto_register_impl;
    use crate::derive_data::MaskDerive;

    fn expand(input: &DeriveInput) -> syn::Result<String> {
        let meta = MaskDerive::from_input(input)?;
        get_auto_register_impl(&meta).map(|tokens| tokens.to_string())
    }

    #[test]
    fn concrete_records_are_submitted() {
        let plain: DeriveInput = parse_quote! {
            struct Plain { pub a: u32 }
        };
        let tokens = expand(&plain).unwrap();
        assert!(tokens.contains("submit"));
        assert!(tokens.contains("eager : false"));

        let marked: DeriveInput = parse_quote! {
            #[mask(auto_register)]
            struct Marked { pub a: u32 }
        };
        assert!(expand(&marked).unwrap().contains("eager : true"));
    }

    #[test]
    fn generic_and_leaf_types_are_not_submitted() {
        let generic: DeriveInput = parse_quote! {
            struct Wrapper<T> { pub value: T }
        };
        assert!(expand(&generic).unwrap().is_empty());

        let leaf: DeriveInput = parse_quote! {
            #[mask(leaf)]
            enum Status { On, Off }
        };
        assert!(expand(&leaf).unwrap().is_empty());
    }

    #[test]
    fn marked_generic_or_leaf_is_rejected() {
        let generic: DeriveInput = parse_quote! {
            #[mask(auto_register)]
            struct Wrapper<T> { pub value: T }
        };
        assert!(expand(&generic).is_err());

        let leaf: DeriveInput = parse_quote! {
            #[mask(leaf, auto_register)]
            enum Status { On, Off }
        };
        assert!(expand(&leaf).is_err());
    }
}
