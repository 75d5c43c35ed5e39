//! Dot-separated field paths.
//!
//! - [`FieldMask`]: the ordered, deduplicated path set callers build.
//! - [`PathSplit`]: one level of a path set, partitioned into the keys kept
//!   verbatim and the keys that continue into a nested record.

// -----------------------------------------------------------------------------
// Modules

mod field_mask;
mod split;

// -----------------------------------------------------------------------------
// Exports

pub use field_mask::FieldMask;
pub use split::{PathSplit, split_by_top_level};

/// Separator between the serialization keys of a path.
pub const PATH_SEPARATOR: char = '.';

/// Returns `true` if `ancestor` is a strict prefix of `path` that ends exactly
/// at a separator, e.g. `a.b` is an ancestor of `a.b.c` but not of `a.bc`.
#[inline]
pub(crate) fn is_ancestor(ancestor: &str, path: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path[ancestor.len()..].starts_with(PATH_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::is_ancestor;

    #[test]
    fn ancestor_requires_separator_boundary() {
        assert!(is_ancestor("a", "a.b"));
        assert!(is_ancestor("a.b", "a.b.c"));
        assert!(!is_ancestor("a", "a"));
        assert!(!is_ancestor("a", "ab.c"));
        assert!(!is_ancestor("a.b", "a"));
    }
}
