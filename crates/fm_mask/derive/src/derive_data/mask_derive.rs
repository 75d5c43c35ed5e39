use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, GenericParam, Generics, Ident, Type, Visibility};

use super::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// MaskField

/// One named field of a record.
pub(crate) struct MaskField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    /// Declared name with any `r#` prefix removed.
    pub name: String,
    /// Serialization key, `None` if the field is not masked.
    pub key: Option<String>,
}

impl MaskField<'_> {
    #[inline]
    pub(crate) fn is_masked(&self) -> bool {
        self.key.is_some()
    }
}

// -----------------------------------------------------------------------------
// MaskDerive

pub(crate) enum MaskBody<'a> {
    Record(Vec<MaskField<'a>>),
    Leaf,
}

pub(crate) struct MaskDerive<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub attrs: TypeAttributes,
    pub body: MaskBody<'a>,
    pub fm_mask_path: syn::Path,
}

impl<'a> MaskDerive<'a> {
    pub(crate) fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        if let Some(param) = input
            .generics
            .params
            .iter()
            .find(|param| matches!(param, GenericParam::Lifetime(_)))
        {
            return Err(syn::Error::new(
                param.span(),
                "`Masked` types must be `'static`, lifetime parameters are not supported",
            ));
        }

        let body = if attrs.leaf.is_some() {
            MaskBody::Leaf
        } else {
            match &input.data {
                Data::Struct(data) => match &data.fields {
                    Fields::Named(fields) => MaskBody::Record(
                        fields
                            .named
                            .iter()
                            .map(|field| parse_field(field, &attrs))
                            .collect::<syn::Result<_>>()?,
                    ),
                    Fields::Unit => MaskBody::Record(Vec::new()),
                    Fields::Unnamed(fields) => {
                        return Err(syn::Error::new(
                            fields.span(),
                            "`Masked` records need named fields, use `#[mask(leaf)]` to mask tuple structs as a whole",
                        ));
                    }
                },
                Data::Enum(data) => {
                    return Err(syn::Error::new(
                        data.enum_token.span,
                        "`Masked` is only derived for structs, use `#[mask(leaf)]` for enums",
                    ));
                }
                Data::Union(data) => {
                    return Err(syn::Error::new(
                        data.union_token.span,
                        "`Masked` does not support unions",
                    ));
                }
            }
        };

        Ok(Self {
            ident: &input.ident,
            generics: &input.generics,
            attrs,
            body,
            fm_mask_path: crate::path::fm_mask(),
        })
    }

    /// Returns `true` if the type has type or const parameters.
    #[inline]
    pub(crate) fn is_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }
}

fn parse_field<'a>(field: &'a syn::Field, type_attrs: &TypeAttributes) -> syn::Result<MaskField<'a>> {
    let attrs = FieldAttributes::parse_attrs(&field.attrs)?;

    // Named fields always carry an ident.
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new(field.span(), "expected a named field"));
    };
    let name = ident.unraw().to_string();

    let key = if matches!(field.vis, Visibility::Inherited) || attrs.is_skipped() {
        None
    } else {
        Some(match attrs.explicit_key(&name) {
            Some(key) => key,
            None => match type_attrs.rename_rule() {
                Some(rule) => rule.apply_to_field(&name),
                None => name.clone(),
            },
        })
    };

    Ok(MaskField {
        ident,
        ty: &field.ty,
        name,
        key,
    })
}

#[cfg(test)]
mod tests {
    use super::{MaskBody, MaskDerive, MaskField};
    use syn::{DeriveInput, parse_quote};

    fn keys<'a>(fields: &'a [MaskField<'a>]) -> Vec<Option<&'a str>> {
        fields.iter().map(|f| f.key.as_deref()).collect()
    }

    fn with_fields(input: &DeriveInput, check: impl FnOnce(&[MaskField<'_>])) {
        match MaskDerive::from_input(input).unwrap().body {
            MaskBody::Record(fields) => check(&fields),
            MaskBody::Leaf => panic!("expected a record"),
        }
    }

    #[test]
    fn key_resolution_order() {
        let input: DeriveInput = parse_quote! {
            #[serde(rename_all = "camelCase")]
            pub struct User {
                pub user_name: String,
                #[serde(rename = "mail")]
                pub email: String,
                #[mask(rename = "Addr,omitempty")]
                #[serde(rename = "address")]
                pub home_address: String,
                pub r#type: u8,
                hidden: u8,
                #[mask(skip)]
                pub skipped: u8,
                #[serde(skip)]
                pub serde_skipped: u8,
                #[mask(rename = "-")]
                pub dashed: u8,
            }
        };
        with_fields(&input, |fields| {
            assert_eq!(
                keys(fields),
                [
                    Some("userName"),
                    Some("mail"),
                    Some("Addr"),
                    Some("type"),
                    None,
                    None,
                    None,
                    None,
                ]
            );
            assert!(fields[3].is_masked());
            assert_eq!(fields[3].name, "type");
        });
    }

    #[test]
    fn mask_rename_all_overrides_serde() {
        let input: DeriveInput = parse_quote! {
            #[serde(rename_all = "camelCase")]
            #[mask(rename_all = "SCREAMING_SNAKE_CASE")]
            pub struct Config {
                pub max_size: u32,
                pub(crate) CaseKept: u32,
            }
        };
        with_fields(&input, |fields| {
            assert_eq!(keys(fields), [Some("MAX_SIZE"), Some("CASEKEPT")]);
        });
    }

    #[test]
    fn names_keep_their_case() {
        let input: DeriveInput = parse_quote! {
            pub struct Mixed {
                pub(super) Name: String,
                pub name: String,
            }
        };
        with_fields(&input, |fields| {
            assert_eq!(keys(fields), [Some("Name"), Some("name")]);
        });
    }

    #[test]
    fn rejected_inputs() {
        let tuple: DeriveInput = parse_quote! { pub struct Pair(pub u8, pub u8); };
        assert!(MaskDerive::from_input(&tuple).is_err());

        let lifetime: DeriveInput = parse_quote! { pub struct Ref<'a> { pub s: &'a str } };
        assert!(MaskDerive::from_input(&lifetime).is_err());

        let leaf: DeriveInput = parse_quote! {
            #[mask(leaf)]
            pub enum Status { On, Off }
        };
        assert!(matches!(MaskDerive::from_input(&leaf).unwrap().body, MaskBody::Leaf));
    }
}
