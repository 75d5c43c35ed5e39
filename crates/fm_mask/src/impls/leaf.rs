use alloc::borrow::Cow;
use alloc::string::String;
use core::time::Duration;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::{MaskKind, Maskable, ZeroCache};

macro_rules! impl_cached_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Maskable for $ty {
                const KIND: MaskKind = MaskKind::Leaf;

                #[inline]
                fn zero_value(zeros: &ZeroCache) -> Self {
                    zeros.zero_value::<Self>()
                }
            }
        )*
    };
}

impl_cached_leaf!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    &'static str,
    Cow<'static, str>,
    Duration,
    PathBuf,
    OsString,
);
