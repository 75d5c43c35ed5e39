use alloc::collections::{BTreeMap, BTreeSet, BinaryHeap, VecDeque};
use alloc::vec::Vec;
use core::cell::Cell;
use core::marker::PhantomData;

use fm_utils::hash::hashbrown;

use crate::{MaskKind, Maskable, ZeroCache};

// Containers are opaque to masks: a kept container is kept whole, a reset one
// is emptied. Their zero is built directly instead of being cached.

macro_rules! impl_empty_leaf {
    ($(<$($param:ident $(: $bound:path)?),*> $ty:ty => $zero:expr;)*) => {
        $(
            impl<$($param: 'static $(+ $bound)?),*> Maskable for $ty {
                const KIND: MaskKind = MaskKind::Leaf;

                #[inline]
                fn zero_value(_: &ZeroCache) -> Self {
                    $zero
                }
            }
        )*
    };
}

impl_empty_leaf! {
    <T> Vec<T> => Vec::new();
    <T> VecDeque<T> => VecDeque::new();
    <T: Ord> BinaryHeap<T> => BinaryHeap::new();
    <K, V> BTreeMap<K, V> => BTreeMap::new();
    <T> BTreeSet<T> => BTreeSet::new();
    <K, V, S: Default> std::collections::HashMap<K, V, S> => Default::default();
    <T, S: Default> std::collections::HashSet<T, S> => Default::default();
    <K, V, S: Default> hashbrown::HashMap<K, V, S> => hashbrown::HashMap::with_hasher(S::default());
    <T, S: Default> hashbrown::HashSet<T, S> => hashbrown::HashSet::with_hasher(S::default());
    <T> alloc::sync::Weak<T> => alloc::sync::Weak::new();
    <T> alloc::rc::Weak<T> => alloc::rc::Weak::new();
    <T> PhantomData<T> => PhantomData;
}

impl<T: Maskable> Maskable for Cell<T> {
    const KIND: MaskKind = MaskKind::Leaf;

    #[inline]
    fn zero_value(zeros: &ZeroCache) -> Self {
        Cell::new(T::zero_value(zeros))
    }
}

impl<T: Maskable, const N: usize> Maskable for [T; N] {
    const KIND: MaskKind = MaskKind::Leaf;

    #[inline]
    fn zero_value(zeros: &ZeroCache) -> Self {
        core::array::from_fn(|_| T::zero_value(zeros))
    }
}

macro_rules! impl_tuple {
    ($($param:ident),+) => {
        impl<$($param: Maskable),+> Maskable for ($($param,)+) {
            const KIND: MaskKind = MaskKind::Leaf;

            #[inline]
            fn zero_value(zeros: &ZeroCache) -> Self {
                ($($param::zero_value(zeros),)+)
            }
        }
    };
}

impl_tuple!(P0);
impl_tuple!(P0, P1);
impl_tuple!(P0, P1, P2);
impl_tuple!(P0, P1, P2, P3);

#[cfg(test)]
mod tests {
    use crate::{MaskKind, Maskable, ZeroCache};
    use alloc::string::String;
    use alloc::vec::Vec;
    use fm_utils::hash::HashMap;

    #[test]
    fn containers_zero_to_empty() {
        let zeros = ZeroCache::new();
        assert!(<Vec<String>>::zero_value(&zeros).is_empty());
        assert!(<HashMap<u32, String>>::zero_value(&zeros).is_empty());
        assert!(<std::collections::HashMap<u32, u32>>::zero_value(&zeros).is_empty());
        assert_eq!(<[u8; 3]>::zero_value(&zeros), [0, 0, 0]);
        assert_eq!(<(u8, String)>::zero_value(&zeros), (0, String::new()));
        assert_eq!(<Vec<Vec<u8>> as Maskable>::KIND, MaskKind::Leaf);
        // Only the scalar elements went through the cache.
        assert_eq!(zeros.len(), 2);
    }
}
