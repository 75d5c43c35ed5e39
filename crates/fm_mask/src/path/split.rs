use alloc::vec::Vec;

use fm_utils::hash::{HashMap, HashSet};

use super::PATH_SEPARATOR;

/// One recursion level of a path set.
///
/// Bare paths land in `keep`; a dotted path contributes its remainder to
/// `descend` under its first segment, in input order. A key may appear in
/// both buckets when both forms were given.
#[derive(Debug, Default)]
pub struct PathSplit<'a> {
    pub keep: HashSet<&'a str>,
    pub descend: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> PathSplit<'a> {
    /// Returns `true` if `key` was given as a bare path at this level.
    #[inline]
    pub fn keeps(&self, key: &str) -> bool {
        self.keep.contains(key)
    }

    /// Returns the suffixes given for `key`, if any path continues past it.
    #[inline]
    pub fn suffixes(&self, key: &str) -> Option<&[&'a str]> {
        self.descend.get(key).map(Vec::as_slice)
    }
}

/// Partitions `paths` by their first segment.
///
/// ```
/// use fm_mask::path::split_by_top_level;
///
/// let split = split_by_top_level(&["name", "profile.age", "profile.bio.text"]);
/// assert!(split.keeps("name"));
/// assert_eq!(split.suffixes("profile"), Some(&["age", "bio.text"][..]));
/// ```
pub fn split_by_top_level<'a, S: AsRef<str>>(paths: &'a [S]) -> PathSplit<'a> {
    let mut split = PathSplit {
        keep: HashSet::with_capacity_and_hasher(paths.len(), Default::default()),
        descend: HashMap::default(),
    };

    for path in paths {
        match path.as_ref().split_once(PATH_SEPARATOR) {
            None => {
                split.keep.insert(path.as_ref());
            }
            Some((head, rest)) => split.descend.entry(head).or_default().push(rest),
        }
    }

    split
}

#[cfg(test)]
mod tests {
    use super::split_by_top_level;

    #[test]
    fn simple_paths() {
        let split = split_by_top_level(&["field1", "field2.subfield"]);
        assert_eq!(split.keep.len(), 1);
        assert!(split.keeps("field1"));
        assert_eq!(split.suffixes("field2"), Some(&["subfield"][..]));
        assert_eq!(split.suffixes("field1"), None);
    }

    #[test]
    fn empty_paths() {
        let split = split_by_top_level::<&str>(&[]);
        assert!(split.keep.is_empty());
        assert!(split.descend.is_empty());
    }

    #[test]
    fn key_in_both_buckets() {
        let split = split_by_top_level(&["a", "a.b", "a.c.d"]);
        assert!(split.keeps("a"));
        assert_eq!(split.suffixes("a"), Some(&["b", "c.d"][..]));
    }

    #[test]
    fn only_first_separator_splits() {
        let split = split_by_top_level(&[".a", "a..b"]);
        assert_eq!(split.suffixes(""), Some(&["a"][..]));
        assert_eq!(split.suffixes("a"), Some(&[".b"][..]));
    }
}
