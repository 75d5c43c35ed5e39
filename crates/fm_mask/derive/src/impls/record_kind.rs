use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{MaskDerive, MaskField};

/// Generate `Maskable` and `Record` for a struct with named fields.
///
/// Masked fields are visited through `fn(&mut Self) -> &mut Field`
/// accessors. Fields that are not masked only take part in `zero_value`,
/// where they are built from `Default`.
pub(crate) fn impl_record(meta: &MaskDerive, fields: &[MaskField]) -> TokenStream {
    let fm_mask_path = &meta.fm_mask_path;
    let descriptor_ = crate::path::descriptor_(fm_mask_path);
    let macro_exports_ = crate::path::macro_exports_(fm_mask_path);
    let ident = meta.ident;

    let mut generics = meta.generics.clone();
    if meta.is_generic() {
        let where_clause = generics.make_where_clause();
        for param in meta.generics.type_params() {
            let param = &param.ident;
            where_clause.predicates.push(syn::parse_quote! { #param: 'static });
        }
        for field in fields {
            let ty = field.ty;
            let predicate = if field.is_masked() {
                syn::parse_quote! { #ty: #fm_mask_path::Maskable }
            } else {
                syn::parse_quote! { #ty: ::core::default::Default }
            };
            where_clause.predicates.push(predicate);
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let zero_fields = fields.iter().map(|field| {
        let member = field.ident;
        let ty = field.ty;
        if field.is_masked() {
            quote! { #member: <#ty as #fm_mask_path::Maskable>::zero_value(zeros) }
        } else {
            quote! { #member: ::core::default::Default::default() }
        }
    });

    let masked: Vec<_> = fields.iter().filter(|field| field.is_masked()).collect();
    let capacity = masked.len();
    let inserts = masked.iter().map(|field| {
        let member = field.ident;
        let ty = field.ty;
        let key = field.key.as_deref().unwrap_or_default();
        let name = &field.name;
        quote! {
            descriptor.insert(
                builder.field::<Self, #ty>(#key, #name, |value| &mut value.#member)?
            );
        }
    });

    let zeros_ident = if fields.iter().any(MaskField::is_masked) {
        quote! { zeros }
    } else {
        quote! { _zeros }
    };

    quote! {
        impl #impl_generics #fm_mask_path::Maskable for #ident #ty_generics #where_clause {
            const KIND: #fm_mask_path::MaskKind = #fm_mask_path::MaskKind::Record;

            fn zero_value(#zeros_ident: &#fm_mask_path::ZeroCache) -> Self {
                Self {
                    #(#zero_fields,)*
                }
            }

            #[inline]
            fn nested_descriptor(
                builder: &mut #descriptor_::DescriptorBuilder<'_>,
            ) -> ::core::result::Result<
                ::core::option::Option<#macro_exports_::Arc<#descriptor_::TypeDescriptor>>,
                #fm_mask_path::MaskError,
            > {
                builder.build::<Self>().map(::core::option::Option::Some)
            }

            #[inline]
            fn visit_nested(
                &mut self,
                visitor: &mut #fm_mask_path::RecordVisitor<'_>,
            ) -> ::core::result::Result<(), #fm_mask_path::MaskError> {
                visitor(self)
            }
        }

        impl #impl_generics #fm_mask_path::Record for #ident #ty_generics #where_clause {
            fn describe(
                builder: &mut #descriptor_::DescriptorBuilder<'_>,
            ) -> ::core::result::Result<#descriptor_::TypeDescriptor, #fm_mask_path::MaskError> {
                let mut descriptor = #descriptor_::TypeDescriptor::with_capacity::<Self>(#capacity);
                #(#inserts)*
                ::core::result::Result::Ok(descriptor)
            }
        }
    }
}
