use alloc::string::String;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;

use fm_utils::hash::{FixedHashState, HashSet};

use super::is_ancestor;
use crate::{MaskError, MaskRegistry, Record};

// -----------------------------------------------------------------------------
// FieldMask

/// An ordered set of dot-separated field paths.
///
/// Each segment of a path is the serialization key of a field at successive
/// nesting levels. Applying a mask keeps the named fields (a bare key keeps
/// the whole field, a dotted path keeps only the named part of a nested
/// record) and resets everything else to its zero value.
///
/// An empty mask means "no mask": applying it leaves the target untouched.
///
/// # Examples
///
/// ```
/// use fm_mask::{FieldMask, derive::Masked};
///
/// #[derive(Masked, Debug, PartialEq)]
/// pub struct Profile {
///     pub age: u32,
///     pub bio: String,
/// }
///
/// #[derive(Masked, Debug, PartialEq)]
/// pub struct User {
///     pub name: String,
///     pub email: String,
///     pub profile: Profile,
/// }
///
/// let mut user = User {
///     name: "John Doe".into(),
///     email: "john@example.com".into(),
///     profile: Profile { age: 30, bio: "Developer".into() },
/// };
///
/// let mask = FieldMask::new(["name", "profile.age"]);
/// mask.apply(&mut user).unwrap();
///
/// assert_eq!(user.name, "John Doe");
/// assert_eq!(user.email, "");
/// assert_eq!(user.profile, Profile { age: 30, bio: String::new() });
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldMask {
    paths: Vec<String>,
}

impl FieldMask {
    /// Creates a normalized mask from `paths`.
    ///
    /// ```
    /// use fm_mask::FieldMask;
    ///
    /// let mask = FieldMask::new(["a", "", " ", "a", "b.c"]);
    /// assert_eq!(mask.paths(), ["a", "b.c"]);
    /// ```
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut mask = Self {
            paths: paths.into_iter().map(Into::into).collect(),
        };
        mask.normalize();
        mask
    }

    /// Creates an empty mask.
    #[inline]
    pub const fn empty() -> Self {
        Self { paths: Vec::new() }
    }

    /// Removes empty and whitespace-only paths, then exact duplicates,
    /// keeping the first occurrence of each path in place.
    pub fn normalize(&mut self) {
        if self.paths.is_empty() {
            return;
        }

        let mut seen: HashSet<String> =
            HashSet::with_capacity_and_hasher(self.paths.len(), FixedHashState);
        let paths = core::mem::take(&mut self.paths);
        self.paths = paths
            .into_iter()
            .filter(|path| !path.trim().is_empty())
            .filter(|path| seen.insert(path.clone()))
            .collect();
    }

    /// Appends `path` as given, without normalizing.
    #[inline]
    pub fn push(&mut self, path: impl Into<String>) {
        self.paths.push(path.into());
    }

    /// Returns `true` if the mask holds no paths.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Returns the number of stored paths.
    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns the stored paths in order.
    #[inline]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Returns a copy of the stored paths.
    #[inline]
    pub fn to_paths(&self) -> Vec<String> {
        self.paths.clone()
    }

    /// Consumes the mask and returns its paths.
    #[inline]
    pub fn into_paths(self) -> Vec<String> {
        self.paths
    }

    /// Returns `true` if `path` is stored verbatim or one of its ancestors is
    /// stored. Keeping a field keeps everything below it.
    ///
    /// ```
    /// use fm_mask::FieldMask;
    ///
    /// let mask = FieldMask::new(["profile", "name"]);
    /// assert!(mask.has_path("profile.age"));
    /// assert!(mask.has_path("name"));
    /// assert!(!mask.has_path("names"));
    /// ```
    pub fn has_path(&self, path: &str) -> bool {
        self.paths
            .iter()
            .any(|p| p == path || is_ancestor(p, path))
    }

    /// Returns `true` if at least one of `paths` satisfies [`has_path`](Self::has_path).
    pub fn has_any<I, S>(&self, paths: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths.into_iter().any(|p| self.has_path(p.as_ref()))
    }

    /// Returns `true` if `path` is stored verbatim or some stored path lies
    /// below it, i.e. applying the mask keeps at least part of `path`.
    ///
    /// ```
    /// use fm_mask::FieldMask;
    ///
    /// let mask = FieldMask::new(["profile.age"]);
    /// assert!(mask.touches("profile"));
    /// assert!(!mask.touches("profile.age.value"));
    /// assert!(!mask.touches("name"));
    /// ```
    pub fn touches(&self, path: &str) -> bool {
        self.paths
            .iter()
            .any(|p| p == path || is_ancestor(path, p))
    }

    /// Removes each of `paths` together with every stored path below it.
    ///
    /// ```
    /// use fm_mask::FieldMask;
    ///
    /// let mut mask = FieldMask::new(["a", "a.b", "ab", "c.d"]);
    /// mask.remove_paths(["a", "c.d"]);
    /// assert_eq!(mask.paths(), ["ab"]);
    /// ```
    pub fn remove_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for removed in paths {
            let removed = removed.as_ref();
            self.paths
                .retain(|existing| existing != removed && !is_ancestor(removed, existing));
        }
    }

    /// Applies the mask to `target` using the process-wide
    /// [`MaskRegistry::shared`] registry.
    #[inline]
    pub fn apply<T: Record>(&self, target: &mut T) -> Result<(), MaskError> {
        MaskRegistry::shared().apply(self, target)
    }

    /// Applies the mask to `target` using the caches of `registry`.
    #[inline]
    pub fn apply_with<T: Record>(
        &self,
        registry: &MaskRegistry,
        target: &mut T,
    ) -> Result<(), MaskError> {
        registry.apply(self, target)
    }
}

// -----------------------------------------------------------------------------
// Traits

impl fmt::Display for FieldMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("FieldMask{}");
        }
        write!(f, "FieldMask{{Paths: {}}}", self.paths.join(", "))
    }
}

impl fmt::Debug for FieldMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.paths).finish()
    }
}

impl<S: Into<String>> FromIterator<S> for FieldMask {
    /// Collects and normalizes the paths.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<S: Into<String>> Extend<S> for FieldMask {
    /// Appends the paths and normalizes the result.
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.paths.extend(iter.into_iter().map(Into::into));
        self.normalize();
    }
}

impl FromStr for FieldMask {
    type Err = Infallible;

    /// Parses a comma-separated path list, e.g. `"name,profile.age"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.split(',').map(str::trim)))
    }
}

impl From<Vec<String>> for FieldMask {
    /// Normalizes the given paths.
    fn from(paths: Vec<String>) -> Self {
        Self::new(paths)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::FieldMask;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    #[test]
    fn new_normalizes() {
        assert!(FieldMask::new(Vec::<String>::new()).is_empty());
        assert_eq!(FieldMask::new(["field1", "field2"]).paths(), ["field1", "field2"]);
        assert_eq!(FieldMask::new(["field1", "field1", "field2"]).paths(), ["field1", "field2"]);
        assert_eq!(FieldMask::new(["field1", ""]).paths(), ["field1"]);
        assert_eq!(FieldMask::new(["a", "a"]).paths(), ["a"]);
        assert_eq!(FieldMask::new(["a", "", " "]).paths(), ["a"]);
        assert_eq!(FieldMask::new(["field1.subfield"]).paths(), ["field1.subfield"]);
    }

    #[test]
    fn normalize_keeps_first_occurrence_order() {
        let mut mask = FieldMask::empty();
        mask.push("b");
        mask.push("\t");
        mask.push("a");
        mask.push("b");
        mask.push("c.d");
        mask.push("a");
        assert_eq!(mask.len(), 6);

        mask.normalize();
        assert_eq!(mask.paths(), ["b", "a", "c.d"]);

        mask.normalize();
        assert_eq!(mask.paths(), ["b", "a", "c.d"]);
    }

    #[test]
    fn has_path() {
        let mask = FieldMask::new(["field1", "field2"]);
        assert!(mask.has_path("field1"));
        assert!(!mask.has_path("field3"));
        assert!(!FieldMask::empty().has_path("field1"));

        let mask = FieldMask::new(["field1.subfield"]);
        assert!(mask.has_path("field1.subfield"));
        assert!(mask.has_path("field1.subfield.subfield"));
        assert!(!mask.has_path("field1"));
        assert!(!mask.has_path("field1.sub"));
    }

    #[test]
    fn ancestor_containment() {
        let mask = FieldMask::new(["a", "x.y"]);
        for path in ["a.b", "a.b.c", "x.y.z", "x.y.z.w"] {
            assert!(mask.has_path(path), "{path}");
        }
        assert!(!mask.has_path("x"));
        assert!(!mask.has_path("ab"));
    }

    #[test]
    fn touches_looks_downwards() {
        let mask = FieldMask::new(["field1.subfield"]);
        assert!(mask.touches("field1"));
        assert!(mask.touches("field1.subfield"));
        assert!(!mask.touches("field1.subfield.subfield"));
        assert!(!mask.touches("field"));
    }

    #[test]
    fn has_any() {
        assert!(!FieldMask::empty().has_any(["field1", "field2"]));
        assert!(FieldMask::new(["field1", "field2"]).has_any(["field1", "field2", "field3"]));
        assert!(!FieldMask::new(["field1"]).has_any(["field3"]));
    }

    #[test]
    fn paths_are_copied() {
        let mask = FieldMask::new(["field1", "field1", "field2"]);
        let mut copy = mask.to_paths();
        copy.push("field3".to_string());
        assert_eq!(mask.paths(), ["field1", "field2"]);
        assert_eq!(mask.clone().into_paths(), ["field1", "field2"]);
    }

    #[test]
    fn remove_paths() {
        let mut mask = FieldMask::new(["field1", "field2", "field3"]);
        mask.remove_paths(["field1", "field3"]);
        assert_eq!(mask, FieldMask::new(["field2"]));

        let mut mask = FieldMask::new(["field1", "field2"]);
        mask.remove_paths(["field3"]);
        assert_eq!(mask, FieldMask::new(["field1", "field2"]));

        let mut mask = FieldMask::new(["field1", "field2"]);
        mask.remove_paths(["field1", "field2"]);
        assert!(mask.is_empty());

        let mut mask = FieldMask::new(["field1", "field1.subfield", "field2.subfield"]);
        mask.remove_paths(["field1", "field2.subfield"]);
        assert!(mask.is_empty());

        let mut mask = FieldMask::empty();
        mask.remove_paths(["field1"]);
        assert!(mask.is_empty());
    }

    #[test]
    fn removal_is_transitive() {
        let mut mask = FieldMask::new(["p", "p.q", "p.q.r", "pq", "p_q.r"]);
        mask.remove_paths(["p"]);
        assert_eq!(mask.paths(), ["pq", "p_q.r"]);
        assert!(!mask.has_path("p.q.r"));
    }

    #[test]
    fn display() {
        assert_eq!(FieldMask::empty().to_string(), "FieldMask{}");
        assert_eq!(
            FieldMask::new(["name", "profile.age"]).to_string(),
            "FieldMask{Paths: name, profile.age}"
        );
    }

    #[test]
    fn parse_and_collect() {
        let mask: FieldMask = "name, profile.age,,name".parse().unwrap();
        assert_eq!(mask.paths(), ["name", "profile.age"]);

        let mut mask: FieldMask = ["b", "a"].into_iter().collect();
        mask.extend(["a", "c"]);
        assert_eq!(mask.paths(), ["b", "a", "c"]);

        let mask = FieldMask::from(alloc::vec!["x".to_string(), "x".to_string()]);
        assert_eq!(mask.paths(), ["x"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_paths_object() {
        let mask = FieldMask::new(["name", "profile.age"]);
        let json = serde_json::to_string(&mask).unwrap();
        assert_eq!(json, r#"{"paths":["name","profile.age"]}"#);

        let back: FieldMask = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mask);
    }
}
