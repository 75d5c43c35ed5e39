use syn::meta::ParseNestedMeta;
use syn::{Expr, LitStr, Token, token::Paren};

/// Consumes the value of a `serde` key the mask derive does not use, so
/// that any valid `#[serde(..)]` attribute is accepted.
pub(super) fn skip_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(Paren) {
        meta.input.parse::<proc_macro2::Group>()?;
    }
    Ok(())
}

/// Parses `key = ".."` or `key(serialize = "..", deserialize = "..")` and
/// returns the serialization side.
pub(super) fn serialize_name(meta: &ParseNestedMeta) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return meta.value()?.parse().map(Some);
    }

    let mut serialize = None;
    if meta.input.peek(Paren) {
        meta.parse_nested_meta(|nested| {
            if nested.path.is_ident("serialize") {
                serialize = Some(nested.value()?.parse()?);
            } else {
                skip_value(&nested)?;
            }
            Ok(())
        })?;
    }
    Ok(serialize)
}
