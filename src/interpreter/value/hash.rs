use std::fmt;

use rustc_hash::FxHashMap;

use crate::interpreter::value::core::{Object, ObjectType};

/// Canonical key of a hashable value, rendered as `"<TYPE>:<value>"`.
///
/// Two values produce the same key exactly when they have the same type and
/// the same content, so `1` and `"1"` never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashKey(String);

impl HashKey {
    pub(crate) fn new(object_type: ObjectType, value: &Object) -> Self {
        Self(format!("{object_type}:{value}"))
    }

    /// The key as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of a hash: the key as written and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    /// The original key object.
    pub key:   Object,
    /// The associated value.
    pub value: Object,
}

/// The map behind [`Object::Hash`].
///
/// Entries iterate in insertion order. Inserting an existing key replaces
/// the entry in place.
#[derive(Debug, Clone, Default)]
pub struct HashObject {
    slots: FxHashMap<HashKey, usize>,
    pairs: Vec<HashPair>,
}

impl HashObject {
    /// Inserts `pair` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: HashKey, pair: HashPair) {
        if let Some(&slot) = self.slots.get(&key) {
            self.pairs[slot] = pair;
        } else {
            self.slots.insert(key, self.pairs.len());
            self.pairs.push(pair);
        }
    }

    /// Looks up the entry stored under `key`.
    #[must_use]
    pub fn get(&self, key: &HashKey) -> Option<&HashPair> {
        self.slots.get(key).map(|&slot| &self.pairs[slot])
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the hash has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &HashPair> {
        self.pairs.iter()
    }
}

/// Hashes are equal when they hold the same entries, regardless of order.
impl PartialEq for HashObject {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
        && self.slots
               .iter()
               .all(|(key, &slot)| other.get(key) == Some(&self.pairs[slot]))
    }
}
