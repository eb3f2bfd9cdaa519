//! Keyed-map equality shared by every entity family.

use std::collections::HashMap;
use std::hash::Hash;

/// Strict map equality: identical key sets and pairwise-equal values.
pub(crate) fn map_eq<K: Eq + Hash, V: PartialEq>(a: &HashMap<K, V>, b: &HashMap<K, V>) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| value == other))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_maps() {
        let mut a = HashMap::new();
        a.insert("x", 1);
        a.insert("y", 2);
        let mut b = HashMap::new();
        b.insert("y", 2);
        b.insert("x", 1);
        assert!(map_eq(&a, &b));
    }

    #[test]
    fn extra_key_fails_both_directions() {
        let mut a = HashMap::new();
        a.insert("x", 1);
        let mut b = HashMap::new();
        b.insert("x", 1);
        b.insert("y", 2);
        assert!(!map_eq(&a, &b));
        assert!(!map_eq(&b, &a));
    }

    #[test]
    fn differing_value_fails() {
        let mut a = HashMap::new();
        a.insert("x", 1);
        let mut b = HashMap::new();
        b.insert("x", 2);
        assert!(!map_eq(&a, &b));
    }
}
