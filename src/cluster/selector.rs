use std::collections::BTreeMap;

pub trait BTreeMapContains<K, V> {
    /// Whether every entry of `other` is also in `self`.
    fn contains_key_values(&self, other: &BTreeMap<K, V>) -> bool;
}

impl<K, V> BTreeMapContains<K, V> for BTreeMap<K, V>
where
    K: Ord,
    V: PartialEq,
{
    fn contains_key_values(&self, other: &BTreeMap<K, V>) -> bool {
        other
            .iter()
            .all(|(key, value)| self.get(key).is_some_and(|v| v == value))
    }
}
