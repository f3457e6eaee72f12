use std::{collections::BTreeMap, fmt};

use serde::Serialize;

/// Ordered value counts, printed as `{1: 2, 2: 3}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrences<K: Ord>(BTreeMap<K, usize>);

impl<K: Ord> Default for Occurrences<K> {
    fn default() -> Self {
        Occurrences(BTreeMap::new())
    }
}

impl<K: Ord> Occurrences<K> {
    pub fn add(&mut self, key: K) {
        *self.0.entry(key).or_insert(0) += 1;
    }

    pub fn get(&self, key: &K) -> usize {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &usize)> {
        self.0.iter()
    }
}

impl<K: Ord> FromIterator<K> for Occurrences<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut occurrences = Occurrences::default();
        for key in iter {
            occurrences.add(key);
        }
        occurrences
    }
}

impl<K: Ord + fmt::Display> fmt::Display for Occurrences<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, count)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {count}")?;
        }
        write!(f, "}}")
    }
}

pub fn count_occurrences<K: Ord + Copy>(values: &[K]) -> Occurrences<K> {
    values.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_occurrences() {
        let occurrences = count_occurrences(&[1u8, 1, 2, 2, 2, 3, 3, 3, 3, 7]);

        let expected: Vec<(u8, usize)> = vec![(1, 2), (2, 3), (3, 4), (7, 1)];
        assert_eq!(
            occurrences
                .iter()
                .map(|(k, v)| (*k, *v))
                .collect::<Vec<_>>(),
            expected
        );
        assert_eq!(occurrences.total(), 10);
        assert_eq!(occurrences.get(&5), 0);
    }

    #[test]
    fn test_display() {
        let occurrences = count_occurrences(&[3u8, 1, 1]);
        assert_eq!(occurrences.to_string(), "{1: 2, 3: 1}");

        let empty = count_occurrences::<u8>(&[]);
        assert_eq!(empty.to_string(), "{}");
        assert!(empty.is_empty());
    }
}
