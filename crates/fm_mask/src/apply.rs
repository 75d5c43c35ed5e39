use core::any::{Any, TypeId};

use fm_utils::hash::HashSet;

use crate::descriptor::TypeDescriptor;
use crate::path::split_by_top_level;
use crate::{MaskError, ZeroCache};

/// Identities of the records already processed by one apply call.
///
/// A record is identified by its address together with its type, so a
/// record stored at the start of its parent is not taken for the parent.
pub type VisitedSet = HashSet<(usize, TypeId)>;

impl TypeDescriptor {
    /// Masks `value` in place, keeping the fields named by `paths` and
    /// resetting the others to their zero value.
    ///
    /// `value` must be the record this descriptor was built for. A record
    /// whose identity is already in `visited` is left alone.
    ///
    /// For each field in declaration order:
    /// - if the field leads to a record and some path continues through its
    ///   key, the nested record is masked with the remaining segments;
    /// - else if its key is given as a bare path, the field is kept;
    /// - else the field is reset. A path that continues through a leaf field
    ///   therefore resets that field.
    pub fn apply(
        &self,
        value: &mut dyn Any,
        paths: &[&str],
        zeros: &ZeroCache,
        visited: &mut VisitedSet,
    ) -> Result<(), MaskError> {
        let address = core::ptr::from_mut(&mut *value).cast::<()>().addr();
        if !visited.insert((address, self.type_id())) {
            return Ok(());
        }

        let split = split_by_top_level(paths);

        for field in self.fields() {
            if let Some(child) = field.child()
                && let Some(suffixes) = split.suffixes(field.key())
            {
                field
                    .descend(&mut *value, &mut |nested: &mut dyn Any| {
                        child.apply(nested, suffixes, zeros, visited)
                    })
                    .map_err(|err| MaskError::field(field.name(), err))?;
                continue;
            }

            if !split.keeps(field.key()) {
                field
                    .reset(&mut *value, zeros)
                    .map_err(|err| MaskError::field(field.name(), err))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;
    use std::sync::Mutex;

    use crate::derive::Masked;
    use crate::{FieldMask, MaskError, MaskRegistry, Record};

    #[derive(Masked, Debug, Clone, Default, PartialEq)]
    pub struct Profile {
        pub age: u32,
        pub bio: String,
    }

    #[derive(Masked, Debug, Clone, Default, PartialEq)]
    pub struct Manager {
        pub name: String,
        pub level: u8,
    }

    #[derive(Masked, Debug, Clone, Default, PartialEq)]
    pub struct User {
        pub name: String,
        pub age: u32,
        pub bio: String,
        pub profile: Profile,
        pub manager: Option<Box<Manager>>,
        pub history: Vec<Profile>,
    }

    fn apply<T: Record>(value: &mut T, paths: &[&str]) -> Result<(), MaskError> {
        MaskRegistry::new().apply(&FieldMask::new(paths.iter().copied()), value)
    }

    fn sample() -> User {
        User {
            name: "John".to_string(),
            age: 30,
            bio: "x".to_string(),
            profile: Profile {
                age: 30,
                bio: "Developer".to_string(),
            },
            manager: Some(Box::new(Manager {
                name: "Ann".to_string(),
                level: 3,
            })),
            history: vec![Profile::default()],
        }
    }

    #[test]
    fn keep_top_level_field() {
        let mut user = sample();
        apply(&mut user, &["name"]).unwrap();
        assert_eq!(
            user,
            User {
                name: "John".to_string(),
                ..User::default()
            }
        );
    }

    #[test]
    fn keep_nested_field() {
        let mut user = sample();
        apply(&mut user, &["profile.age"]).unwrap();
        assert_eq!(user.name, "");
        assert_eq!(user.age, 0);
        assert_eq!(
            user.profile,
            Profile {
                age: 30,
                bio: String::new()
            }
        );
        assert_eq!(user.manager, None);
        assert!(user.history.is_empty());
    }

    #[test]
    fn whole_nested_record_is_kept() {
        let mut user = sample();
        apply(&mut user, &["profile", "manager"]).unwrap();
        assert_eq!(user.profile, sample().profile);
        assert_eq!(user.manager, sample().manager);
        assert_eq!(user.name, "");
    }

    #[test]
    fn descend_wins_over_keep() {
        let mut user = sample();
        apply(&mut user, &["profile", "profile.age"]).unwrap();
        assert_eq!(user.profile.age, 30);
        assert_eq!(user.profile.bio, "");
    }

    #[test]
    fn path_through_leaf_resets_it() {
        let mut user = sample();
        apply(&mut user, &["name.first", "history.age", "age"]).unwrap();
        assert_eq!(user.name, "");
        assert!(user.history.is_empty());
        assert_eq!(user.age, 30);
    }

    #[test]
    fn optional_pointer() {
        let mut user = sample();
        apply(&mut user, &["manager.name"]).unwrap();
        assert_eq!(
            user.manager.as_deref(),
            Some(&Manager {
                name: "Ann".to_string(),
                level: 0
            })
        );

        let mut user = User {
            manager: None,
            ..sample()
        };
        apply(&mut user, &["manager.name"]).unwrap();
        assert_eq!(user.manager, None);
    }

    #[test]
    fn empty_mask_is_identity() {
        let mut user = sample();
        apply(&mut user, &[]).unwrap();
        assert_eq!(user, sample());

        apply(&mut user, &["", "  "]).unwrap();
        assert_eq!(user, sample());
    }

    #[test]
    fn idempotent() {
        let masks: [&[&str]; 3] = [&["name"], &["profile.bio", "manager"], &["age", "profile"]];
        for paths in masks {
            let mut once = sample();
            apply(&mut once, paths).unwrap();
            let mut twice = once.clone();
            apply(&mut twice, paths).unwrap();
            assert_eq!(once, twice, "{paths:?}");
        }
    }

    #[test]
    fn subset_of_mask() {
        let wide = ["name", "profile", "manager.level"];
        let narrow = ["name", "profile.age"];

        let mut both = sample();
        apply(&mut both, &wide).unwrap();
        apply(&mut both, &narrow).unwrap();

        let mut direct = sample();
        apply(&mut direct, &narrow).unwrap();

        assert_eq!(both, direct);
    }

    #[test]
    fn kept_fields_unchanged_others_zeroed() {
        let original = sample();
        let mut user = sample();
        apply(&mut user, &["bio", "profile.bio", "manager.level"]).unwrap();

        assert_eq!(user.bio, original.bio);
        assert_eq!(user.profile.bio, original.profile.bio);
        assert_eq!(user.manager.as_ref().map(|m| m.level), Some(3));

        assert_eq!(user.name, String::default());
        assert_eq!(user.age, u32::default());
        assert_eq!(user.profile.age, u32::default());
        assert_eq!(user.manager.as_ref().map(|m| m.name.as_str()), Some(""));
        assert_eq!(user.history, Vec::<Profile>::default());
    }

    #[test]
    fn no_paths_clear_all_fields() {
        let registry = MaskRegistry::new();
        let descriptor = registry.descriptor::<User>().unwrap();
        let mut visited = crate::VisitedSet::default();

        let mut user = sample();
        descriptor
            .apply(&mut user, &[], registry.zeros(), &mut visited)
            .unwrap();
        assert_eq!(user, User::default());
    }

    #[derive(Masked, Debug, Default, PartialEq)]
    pub struct Counter {
        pub a: u32,
        pub b: u32,
    }

    #[derive(Masked, Default)]
    pub struct Pair {
        pub left: Arc<Mutex<Counter>>,
        pub right: Arc<Mutex<Counter>>,
    }

    #[test]
    fn shared_instance_visited_once() {
        let shared = Arc::new(Mutex::new(Counter { a: 1, b: 2 }));
        let mut pair = Pair {
            left: Arc::clone(&shared),
            right: Arc::clone(&shared),
        };

        apply(&mut pair, &["left.a", "right.b"]).unwrap();

        assert!(Arc::ptr_eq(&pair.left, &pair.right));
        assert_eq!(*shared.lock().unwrap(), Counter { a: 1, b: 0 });
    }

    #[derive(Masked, Default)]
    pub struct Holder {
        pub owned: Arc<Profile>,
        pub tag: String,
    }

    #[test]
    fn shared_arc_is_left_alone() {
        let profile = Arc::new(Profile {
            age: 5,
            bio: "kept".to_string(),
        });
        let mut holder = Holder {
            owned: Arc::clone(&profile),
            tag: "t".to_string(),
        };

        apply(&mut holder, &["owned.age"]).unwrap();
        assert_eq!(holder.owned.bio, "kept");
        assert_eq!(holder.tag, "");

        drop(profile);
        apply(&mut holder, &["owned.age"]).unwrap();
        assert_eq!(*holder.owned, Profile { age: 5, bio: String::new() });
    }

    #[test]
    fn wrong_value_type() {
        let registry = MaskRegistry::new();
        let descriptor = registry.descriptor::<Profile>().unwrap();
        let mut visited = crate::VisitedSet::default();

        let err = descriptor
            .apply(&mut 5_u32, &["bio"], registry.zeros(), &mut visited)
            .unwrap_err();
        assert!(err.is_unexpected_kind());
        assert_eq!(err.field_path().as_deref(), Some("age"));
    }
}
