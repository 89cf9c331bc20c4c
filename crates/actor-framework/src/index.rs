//! # Index Store
//!
//! Equality indexes maintained alongside a `ResourceActor`'s record store.
//!
//! Every record contributes the keys from [`ActorEntity::index_keys`]; the index maps each key
//! to the ordered set of ids holding it. Keys from [`ActorEntity::unique_keys`] are tracked
//! separately so that a second holder can be rejected before anything is written.

use crate::entity::ActorEntity;
use std::collections::{BTreeSet, HashMap};

pub struct IndexStore<T: ActorEntity> {
    entries: HashMap<T::IndexKey, BTreeSet<T::Id>>,
    unique: HashMap<T::IndexKey, T::Id>,
}

impl<T: ActorEntity> Default for IndexStore<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            unique: HashMap::new(),
        }
    }
}

impl<T: ActorEntity> IndexStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every key of `item` under `id`.
    pub fn insert(&mut self, id: &T::Id, item: &T) {
        for key in item.index_keys() {
            self.entries.entry(key).or_default().insert(id.clone());
        }
        for key in item.unique_keys() {
            self.unique.insert(key, id.clone());
        }
    }

    /// Drops every key of `item` registered under `id`.
    pub fn remove(&mut self, id: &T::Id, item: &T) {
        for key in item.index_keys() {
            if let Some(ids) = self.entries.get_mut(&key) {
                ids.remove(id);
                if ids.is_empty() {
                    self.entries.remove(&key);
                }
            }
        }
        for key in item.unique_keys() {
            if self.unique.get(&key) == Some(id) {
                self.unique.remove(&key);
            }
        }
    }

    /// Ids holding `key`, in ascending order.
    pub fn lookup(&self, key: &T::IndexKey) -> Vec<T::Id> {
        self.entries
            .get(key)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The id holding unique `key`, if any.
    pub fn unique_holder(&self, key: &T::IndexKey) -> Option<&T::Id> {
        self.unique.get(key)
    }

    /// First unique key of `item` already held by a record other than `id`.
    pub fn conflict(&self, id: &T::Id, item: &T) -> Option<T::IndexKey> {
        item.unique_keys()
            .into_iter()
            .find(|key| matches!(self.unique.get(key), Some(holder) if holder != id))
    }

    /// Whether `item` is reachable under `key`.
    pub fn covers(item: &T, key: &T::IndexKey) -> bool {
        item.index_keys().iter().any(|k| k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug)]
    struct Seat {
        row: char,
        number: u32,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    enum SeatKey {
        Row(char),
        Exact(char, u32),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("seat error")]
    struct SeatError;

    #[async_trait]
    impl ActorEntity for Seat {
        type Id = u32;
        type Create = ();
        type Update = ();
        type Action = ();
        type ActionResult = ();
        type Context = ();
        type Error = SeatError;
        type IndexKey = SeatKey;

        fn from_create_params(_id: u32, _: ()) -> Result<Self, Self::Error> {
            Err(SeatError)
        }

        fn index_keys(&self) -> Vec<SeatKey> {
            vec![SeatKey::Row(self.row), SeatKey::Exact(self.row, self.number)]
        }

        fn unique_keys(&self) -> Vec<SeatKey> {
            vec![SeatKey::Exact(self.row, self.number)]
        }

        async fn on_update(&mut self, _: (), _: &()) -> Result<(), SeatError> {
            Ok(())
        }

        async fn handle_action(&mut self, _: (), _: &()) -> Result<(), SeatError> {
            Ok(())
        }
    }

    #[test]
    fn lookup_returns_ids_in_ascending_order() {
        let mut index = IndexStore::<Seat>::new();
        index.insert(&3, &Seat { row: 'A', number: 3 });
        index.insert(&1, &Seat { row: 'A', number: 1 });
        index.insert(&2, &Seat { row: 'B', number: 1 });

        assert_eq!(index.lookup(&SeatKey::Row('A')), vec![1, 3]);
        assert_eq!(index.lookup(&SeatKey::Row('B')), vec![2]);
        assert!(index.lookup(&SeatKey::Row('C')).is_empty());
    }

    #[test]
    fn unique_conflict_ignores_the_holder_itself() {
        let mut index = IndexStore::<Seat>::new();
        let seat = Seat { row: 'A', number: 1 };
        index.insert(&1, &seat);

        assert!(index.conflict(&1, &seat).is_none());
        assert_eq!(index.conflict(&2, &seat), Some(SeatKey::Exact('A', 1)));
        assert_eq!(index.unique_holder(&SeatKey::Exact('A', 1)), Some(&1));
    }

    #[test]
    fn remove_releases_all_keys() {
        let mut index = IndexStore::<Seat>::new();
        let seat = Seat { row: 'A', number: 1 };
        index.insert(&1, &seat);
        index.remove(&1, &seat);

        assert!(index.lookup(&SeatKey::Row('A')).is_empty());
        assert!(index.unique_holder(&SeatKey::Exact('A', 1)).is_none());
        assert!(index.conflict(&2, &seat).is_none());
    }
}
