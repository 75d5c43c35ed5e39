//! Keep the name and the profile age of a user, reset everything else.
//!
//! Run with `cargo run --example basic_usage`.

use fm_core::mask::{FieldMask, MaskError, derive::Masked};

#[derive(Masked, Debug, Default)]
pub struct Profile {
    pub age: u32,
    pub bio: String,
    pub website: String,
}

#[derive(Masked, Debug, Default)]
pub struct User {
    pub name: String,
    pub email: String,
    pub profile: Profile,
}

fn main() -> Result<(), MaskError> {
    let mut user = User {
        name: "John Doe".into(),
        email: "john@example.com".into(),
        profile: Profile {
            age: 30,
            bio: "Software Developer".into(),
            website: "https://johndoe.com".into(),
        },
    };

    let mask = FieldMask::new(["name", "profile.age"]);
    println!("{mask}");

    mask.apply(&mut user)?;

    // User { name: "John Doe", email: "", profile: Profile { age: 30, bio: "", website: "" } }
    println!("{user:?}");
    Ok(())
}
