use fnv::FnvHasher;
use std::{
    collections::{HashMap, HashSet},
    hash::{BuildHasherDefault, Hash},
};

pub type FnvHashSet<T> = HashSet<T, BuildHasherDefault<FnvHasher>>;
pub type FnvHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;

/// Hash set with the given capacity, hashed with FNV. Much faster than the
/// default hasher on the short keys (coordinates) used throughout this crate.
pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    HashSet::with_capacity_and_hasher(capacity, BuildHasherDefault::<FnvHasher>::default())
}

/// Hash map with the given capacity, hashed with FNV.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, BuildHasherDefault::<FnvHasher>::default())
}
