use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::MaskDerive;

/// `#[mask(leaf)]`: the type is kept or reset as a whole.
///
/// Concrete types share a cached zero value. Generic types build theirs from
/// `Default`.
pub(crate) fn impl_leaf(meta: &MaskDerive) -> TokenStream {
    let fm_mask_path = &meta.fm_mask_path;
    let ident = meta.ident;

    let mut generics = meta.generics.clone();
    let zero = if meta.is_generic() {
        let where_clause = generics.make_where_clause();
        for param in meta.generics.type_params() {
            let param = &param.ident;
            where_clause.predicates.push(syn::parse_quote! { #param: 'static });
        }
        where_clause.predicates.push(syn::parse_quote! {
            Self: ::core::default::Default
        });
        quote! { <Self as ::core::default::Default>::default() }
    } else {
        quote! { zeros.zero_value::<Self>() }
    };
    let zeros_ident = if meta.is_generic() {
        quote! { _zeros }
    } else {
        quote! { zeros }
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #fm_mask_path::Maskable for #ident #ty_generics #where_clause {
            const KIND: #fm_mask_path::MaskKind = #fm_mask_path::MaskKind::Leaf;

            #[inline]
            fn zero_value(#zeros_ident: &#fm_mask_path::ZeroCache) -> Self {
                #zero
            }
        }
    }
}
