use proc_macro2::Span;
use syn::{Attribute, LitStr};

use super::serde_compat;
use crate::utils::RenameRule;
use crate::{MASK_ATTRIBUTE_NAME, SERDE_ATTRIBUTE_NAME};

/// Container attributes.
///
/// - `#[mask(rename_all = "camelCase")]`
/// - `#[mask(leaf)]`: treat the type as an opaque value.
/// - `#[mask(auto_register)]`
/// - `#[serde(rename_all = "..")]`, honoured when `mask` gives none.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub rename_all: Option<RenameRule>,
    pub serde_rename_all: Option<RenameRule>,
    pub leaf: Option<Span>,
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
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
            if meta.path.is_ident("rename_all") {
                if self.rename_all.is_some() {
                    return Err(meta.error("duplicate `rename_all`"));
                }
                let lit: LitStr = meta.value()?.parse()?;
                self.rename_all = Some(RenameRule::from_lit(&lit)?);
            } else if meta.path.is_ident("leaf") {
                self.leaf = Some(meta.path.require_ident()?.span());
            } else if meta.path.is_ident("auto_register") {
                self.auto_register = Some(meta.path.require_ident()?.span());
            } else {
                return Err(meta.error(
                    "unknown container attribute, expected `rename_all`, `leaf` or `auto_register`",
                ));
            }
            Ok(())
        })
    }

    fn parse_serde(&mut self, attr: &Attribute) -> syn::Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                if let Some(lit) = serde_compat::serialize_name(&meta)? {
                    self.serde_rename_all = Some(RenameRule::from_lit(&lit)?);
                }
            } else {
                serde_compat::skip_value(&meta)?;
            }
            Ok(())
        })
    }

    /// The rule applied to field names without an explicit key.
    #[inline]
    pub(crate) fn rename_rule(&self) -> Option<RenameRule> {
        self.rename_all.or(self.serde_rename_all)
    }
}
