use serde::ser::{Serialize, SerializeMap, Serializer};
use std::slice;

///
/// OrderedMap
///
/// Insertion-ordered string-keyed map backed by a pair vector.
///
/// - Iteration order is insertion order.
/// - `insert` is last-write-wins: re-inserting a key replaces the value
///   while keeping the key's original position.
/// - Lookups are linear; entry counts in fixture definitions are small.
///

#[derive(Clone, Debug, PartialEq)]
pub struct OrderedMap<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedMap<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Insert a value, replacing in place if the key already exists.
    ///
    /// Returns the previous value for the key, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: T) -> Option<T> {
        let key = key.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove a key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;

        Some(self.entries.remove(index).1)
    }

    /// Keep only the entries for which the predicate returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &T) -> bool) {
        self.entries.retain(|(k, v)| keep(k, v));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut T)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<T> IntoIterator for OrderedMap<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OrderedMap<T> {
    type Item = &'a (String, T);
    type IntoIter = slice::Iter<'a, (String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, T> FromIterator<(K, T)> for OrderedMap<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);

        map
    }
}

impl<K: Into<String>, T> Extend<(K, T)> for OrderedMap<T> {
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T: Serialize> Serialize for OrderedMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_insertion_order() {
        let mut map = OrderedMap::new();
        map.insert("b", 1);
        map.insert("a", 2);
        map.insert("c", 3);

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn reinsert_overwrites_in_place() {
        let mut map = OrderedMap::new();
        map.insert("b", 1);
        map.insert("a", 2);
        let previous = map.insert("b", 9);

        assert_eq!(previous, Some(1));
        assert_eq!(map.get("b"), Some(&9));

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn remove_returns_value_and_drops_key() {
        let mut map: OrderedMap<i32> = [("a", 1), ("b", 2)].into_iter().collect();

        assert_eq!(map.remove("a"), Some(1));
        assert_eq!(map.remove("a"), None);
        assert!(!map.contains_key("a"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn retain_filters_entries() {
        let mut map: OrderedMap<i32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        map.retain(|_, v| *v != 2);

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, ["a", "c"]);
    }

    #[test]
    fn extend_applies_last_write_wins() {
        let mut map: OrderedMap<i32> = [("a", 1)].into_iter().collect();
        map.extend([("a", 7), ("b", 8)]);

        assert_eq!(map.get("a"), Some(&7));
        assert_eq!(map.get("b"), Some(&8));
        assert_eq!(map.len(), 2);
    }
}
