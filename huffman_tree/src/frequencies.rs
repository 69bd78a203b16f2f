//! Tools to count frequencies of values.

use std::collections::HashMap;
use std::borrow::Borrow;
use std::hash::Hash;

/// Types that implement this trait can count number of occurrences of values.
pub trait Frequencies {
    /// Type of value.
    type Value;

    /// Constructs `Self` that counts occurrences of all values exposed by `iter`.
    fn with_counted_all<Iter: IntoIterator>(iter: Iter) -> Self
        where Iter::Item: Borrow<Self::Value>, Self: Default, Self::Value: Clone
    {
        let mut result = Self::default();
        result.count_all(iter);
        return result;
    }

    /// Adds one to the stored number of `value` occurrences.
    fn count(&mut self, value: Self::Value);

    /// Calls `count` for all items exposed by `iter`.
    fn count_all<Iter: IntoIterator>(&mut self, iter: Iter) where Iter::Item: Borrow<Self::Value>, Self::Value: Clone {
        for v in iter { self.count(v.borrow().clone()); }
    }

    /// Converts `self` to the pair of boxed slices that contain
    /// distinct values and numbers of their occurrences respectively.
    ///
    /// The order of the values decides how ties between equal weights are broken
    /// during tree construction.
    fn into_unsorted(self) -> (Box<[Self::Value]>, Box<[u64]>);
}

/// Numbers of occurrences of values, kept in the order of the first occurrence of each value.
#[derive(Clone, Debug)]
pub struct FrequencyTable<V> {
    /// Distinct values, in order of their first occurrence.
    values: Vec<V>,
    /// `counts[i]` is the number of occurrences of `values[i]`.
    counts: Vec<u64>,
    /// Maps each value to its index in `values`.
    index: HashMap<V, usize>
}

impl<V> Default for FrequencyTable<V> {
    fn default() -> Self {
        Self { values: Vec::new(), counts: Vec::new(), index: HashMap::new() }
    }
}

impl<V: Hash + Eq> FrequencyTable<V> {
    /// Returns the number of occurrences of `value`, or `None` if it has never been counted.
    pub fn get<Q>(&self, value: &Q) -> Option<u64> where V: Borrow<Q>, Q: Hash + Eq + ?Sized {
        self.index.get(value).map(|i| self.counts[*i])
    }

    /// Increases the number of occurrences of `value` by `occurrences`.
    /// The stored number saturates at `u64::MAX`.
    pub fn add(&mut self, value: V, occurrences: u64) where V: Clone {
        match self.index.get(&value).copied() {
            Some(i) => self.counts[i] = self.counts[i].saturating_add(occurrences),
            None => {
                self.index.insert(value.clone(), self.values.len());
                self.values.push(value);
                self.counts.push(occurrences);
            }
        }
    }
}

impl<V> FrequencyTable<V> {
    /// Returns the number of distinct values.
    #[inline] pub fn len(&self) -> usize { self.values.len() }

    /// Returns whether no value has been counted.
    #[inline] pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Returns the total number of occurrences of all values,
    /// which equals the length of the counted sequence.
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |total, c| total.saturating_add(*c))
    }

    /// Returns iterator over (value, number of its occurrences) pairs,
    /// in order of the first occurrence of each value.
    pub fn iter(&self) -> impl Iterator<Item = (&V, u64)> + '_ {
        self.values.iter().zip(self.counts.iter().copied())
    }
}

impl<V: Hash + Eq + Clone> Frequencies for FrequencyTable<V> {
    type Value = V;

    #[inline] fn count(&mut self, value: V) {
        self.add(value, 1)
    }

    fn into_unsorted(self) -> (Box<[V]>, Box<[u64]>) {
        (self.values.into_boxed_slice(), self.counts.into_boxed_slice())
    }
}

impl<V: Hash + Eq + Clone> FromIterator<(V, u64)> for FrequencyTable<V> {
    fn from_iter<Iter: IntoIterator<Item = (V, u64)>>(iter: Iter) -> Self {
        let mut result = Self::default();
        for (value, occurrences) in iter { result.add(value, occurrences); }
        result
    }
}

impl<V: Hash + Eq> From<FrequencyTable<V>> for HashMap<V, u64> {
    fn from(table: FrequencyTable<V>) -> Self {
        table.values.into_iter().zip(table.counts).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    #[test]
    fn count_abracadabra() {
        let table = FrequencyTable::<char>::with_counted_all("abracadabra".chars());
        assert_eq!(table.len(), 5);
        assert_eq!(table.total(), 11);
        assert_eq!(table.get(&'a'), Some(5));
        assert_eq!(table.get(&'z'), None);
        assert_eq!(table.iter().map(|(v, _)| *v).collect::<String>(), "abrcd");
        assert_eq!(HashMap::from(table), hashmap!('a' => 5, 'b' => 2, 'r' => 2, 'c' => 1, 'd' => 1));
    }

    #[test]
    fn count_empty() {
        let table = FrequencyTable::<u8>::with_counted_all(std::iter::empty::<u8>());
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        let (values, freq) = table.into_unsorted();
        assert!(values.is_empty() && freq.is_empty());
    }

    #[test]
    fn counts_sum_to_length() {
        let text = b"the quick brown fox jumps over the lazy dog";
        let table = FrequencyTable::<u8>::with_counted_all(text.iter());
        assert_eq!(table.total(), text.len() as u64);
        let map = HashMap::from(table);
        assert_eq!(map.values().map(|c| *c as usize).sum::<usize>(), text.len());
        assert_eq!(map[&b'o'], 4);
    }

    #[test]
    fn from_explicit_counts() {
        let table: FrequencyTable<char> = [('x', 3), ('y', 1), ('x', 2)].into_iter().collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&'x'), Some(5));
        let (values, freq) = table.into_unsorted();
        assert_eq!(values.as_ref(), ['x', 'y']);
        assert_eq!(freq.as_ref(), [5, 1]);
    }

    #[test]
    fn counts_saturate() {
        let mut table: FrequencyTable<char> = [('x', u64::MAX - 1), ('y', 2)].into_iter().collect();
        table.add('x', 3);
        table.count('x');
        assert_eq!(table.get(&'x'), Some(u64::MAX));
        assert_eq!(table.total(), u64::MAX);
    }
}
