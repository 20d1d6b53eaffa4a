use std::{
    collections::hash_map,
    fmt::Debug,
    hash::{BuildHasher, Hash, Hasher},
    marker::PhantomData,
    num::NonZeroU64,
};

use ahash::{AHasher, HashMap, RandomState};

fn new_hasher() -> AHasher {
    static RANDOM_STATE: std::sync::LazyLock<RandomState> =
        std::sync::LazyLock::new(RandomState::new);

    RANDOM_STATE.build_hasher()
}

type IdInner = NonZeroU64;

/// Opaque identifier for sections, catalog entries and saved compositions.
///
/// The `<T>` prevents accidental misuse of an `Id<Section>` as an
/// `Id<SheetMusic>`. Ids are never reused; [`Id::arbitrary`] hashes a
/// per-thread counter together with the thread id, so two ids handed out
/// anywhere in the process are distinct for all practical purposes.
#[repr(transparent)]
pub struct Id<T = ()>(IdInner, PhantomData<T>);

fn arbitrary_impl() -> IdInner {
    use std::cell::Cell;
    thread_local! {
        static COUNTER: Cell<u64> = const { Cell::new(0) };
    }

    COUNTER.set(COUNTER.get() + 1);
    let mut hasher = new_hasher();
    (COUNTER.get(), std::thread::current().id()).hash(&mut hasher);
    IdInner::new(hasher.finish()).expect("hash collision to 0")
}

impl<T> Id<T> {
    pub const fn from_raw(raw: IdInner) -> Self {
        Self(raw, PhantomData)
    }
    pub const fn raw(self) -> IdInner {
        self.0
    }

    pub fn arbitrary() -> Self {
        Self::from_raw(arbitrary_impl())
    }
}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Id::<{}>({:#x})", std::any::type_name::<T>(), self.0)
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

/// Hash map keyed by [`Id<T>`].
#[derive(Clone)]
pub struct IdMap<T: 'static, V = T> {
    map: HashMap<Id<T>, V>,
}

impl<T, V> IdMap<T, V> {
    pub fn new() -> Self {
        Self {
            map: Default::default(),
        }
    }

    pub fn has(&self, id: Id<T>) -> bool {
        self.map.contains_key(&id)
    }

    pub fn get(&self, id: Id<T>) -> Option<&V> {
        self.map.get(&id)
    }
    pub fn get_mut(&mut self, id: Id<T>) -> Option<&mut V> {
        self.map.get_mut(&id)
    }
    pub fn insert(&mut self, id: Id<T>, val: V) {
        if self.map.insert(id, val).is_some() {
            panic!("tried to insert already existing id into IdMap");
        }
    }
    pub fn remove(&mut self, id: Id<T>) -> Option<V> {
        self.map.remove(&id)
    }

    pub fn keys(&self) -> hash_map::Keys<'_, Id<T>, V> {
        self.map.keys()
    }
    pub fn values(&self) -> hash_map::Values<'_, Id<T>, V> {
        self.map.values()
    }
    pub fn iter(&self) -> hash_map::Iter<'_, Id<T>, V> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<T, V> Default for IdMap<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V: Debug> Debug for IdMap<T, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.map.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::{Id, IdMap};

    #[test]
    fn arbitrary_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(Id::<()>::arbitrary()));
        }
    }

    #[test]
    #[should_panic(expected = "already existing id")]
    fn double_insert_panics() {
        let id = Id::arbitrary();
        let mut map = IdMap::<(), u32>::new();
        map.insert(id, 1);
        map.insert(id, 2);
    }
}
