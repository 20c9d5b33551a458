#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

#[cfg(feature = "std")]
pub(crate) type KeySet<K> = HashSet<K>;
#[cfg(not(feature = "std"))]
pub(crate) type KeySet<K> = BTreeSet<K>;

/// A stable identity for a list member.
#[cfg(feature = "std")]
pub trait ItemKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<T: core::hash::Hash + Eq + Clone> ItemKey for T {}

/// A stable identity for a list member.
#[cfg(not(feature = "std"))]
pub trait ItemKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<T: Ord + Clone> ItemKey for T {}

/// Items that carry their own key (an `id` field by convention).
pub trait Keyed {
    type Key: ItemKey;

    fn key(&self) -> Self::Key;
}
