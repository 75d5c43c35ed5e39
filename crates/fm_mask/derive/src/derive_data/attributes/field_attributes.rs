use proc_macro2::Span;
use syn::{Attribute, LitStr};

use super::serde_compat;
use crate::{MASK_ATTRIBUTE_NAME, SERDE_ATTRIBUTE_NAME};

/// Field attributes.
///
/// - `#[mask(skip)]`
/// - `#[mask(rename = "key")]`: only the part before the first `,` is the
///   key, `"-"` skips the field and an empty key keeps the field name.
/// - `#[serde(skip)]`, `#[serde(skip_serializing)]`, `#[serde(rename = "..")]`
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub skip: Option<Span>,
    pub rename: Option<LitStr>,
    pub serde_skip: bool,
    pub serde_rename: Option<LitStr>,
}

impl FieldAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(MASK_ATTRIBUTE_NAME) {
                this.parse_mask(attr)?;
            } else if attr.path().is_ident(SERDE_ATTRIBUTE_NAME) {
                this.parse_serde(attr)?;
            }
        }
        Ok(this)
    }

    fn parse_mask(&mut self, attr: &Attribute) -> syn::Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                self.skip = Some(meta.path.require_ident()?.span());
            } else if meta.path.is_ident("rename") {
                if self.rename.is_some() {
                    return Err(meta.error("duplicate `rename`"));
                }
                self.rename = Some(meta.value()?.parse()?);
            } else {
                return Err(meta.error("unknown field attribute, expected `skip` or `rename`"));
            }
            Ok(())
        })
    }

    fn parse_serde(&mut self, attr: &Attribute) -> syn::Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                self.serde_skip = true;
            } else if meta.path.is_ident("rename") {
                if let Some(lit) = serde_compat::serialize_name(&meta)? {
                    self.serde_rename = Some(lit);
                }
            } else {
                serde_compat::skip_value(&meta)?;
            }
            Ok(())
        })
    }

    /// Returns `true` if an attribute excludes the field from masking.
    pub(crate) fn is_skipped(&self) -> bool {
        self.skip.is_some()
            || self.serde_skip
            || self.rename.as_ref().is_some_and(|tag| tag.value() == "-")
    }

    /// Returns the key given by attributes, if any.
    ///
    /// An empty `mask` key yields `fallback`.
    pub(crate) fn explicit_key(&self, fallback: &str) -> Option<String> {
        if let Some(tag) = &self.rename {
            let tag = tag.value();
            let primary = tag.split(',').next().unwrap_or_default();
            return Some(match primary {
                "" => fallback.to_owned(),
                key => key.to_owned(),
            });
        }
        self.serde_rename.as_ref().map(LitStr::value)
    }
}

#[cfg(test)]
mod tests {
    use super::FieldAttributes;
    use syn::parse_quote;

    fn parse(field: syn::Field) -> FieldAttributes {
        FieldAttributes::parse_attrs(&field.attrs).unwrap()
    }

    #[test]
    fn mask_tag_options() {
        let attrs = parse(parse_quote! { #[mask(rename = "name,omitempty")] pub a: u8 });
        assert_eq!(attrs.explicit_key("a").as_deref(), Some("name"));

        let attrs = parse(parse_quote! { #[mask(rename = ",omitempty")] pub a: u8 });
        assert_eq!(attrs.explicit_key("a").as_deref(), Some("a"));

        let attrs = parse(parse_quote! { #[mask(rename = "-")] pub a: u8 });
        assert!(attrs.is_skipped());

        let attrs = parse(parse_quote! { #[mask(rename = "-,")] pub a: u8 });
        assert!(!attrs.is_skipped());
        assert_eq!(attrs.explicit_key("a").as_deref(), Some("-"));
    }

    #[test]
    fn serde_keys() {
        let attrs = parse(parse_quote! {
            #[serde(default, rename = "userName", skip_serializing_if = "Option::is_none")]
            pub a: u8
        });
        assert_eq!(attrs.explicit_key("a").as_deref(), Some("userName"));
        assert!(!attrs.is_skipped());

        let attrs = parse(parse_quote! {
            #[serde(rename(serialize = "out", deserialize = "in"))]
            pub a: u8
        });
        assert_eq!(attrs.explicit_key("a").as_deref(), Some("out"));

        let attrs = parse(parse_quote! { #[serde(skip_serializing)] pub a: u8 });
        assert!(attrs.is_skipped());
    }

    #[test]
    fn mask_rename_overrides_serde() {
        let attrs = parse(parse_quote! {
            #[serde(rename = "serde_key")]
            #[mask(rename = "mask_key")]
            pub a: u8
        });
        assert_eq!(attrs.explicit_key("a").as_deref(), Some("mask_key"));
    }

    #[test]
    fn unknown_mask_key_is_an_error() {
        let field: syn::Field = parse_quote! { #[mask(hide)] pub a: u8 };
        assert!(FieldAttributes::parse_attrs(&field.attrs).is_err());
    }
}
