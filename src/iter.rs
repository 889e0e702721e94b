use crate::cmp::Comparator;
use crate::skiplist::{Entry, SkipMap};
use rand::RngCore;

/// A positioned, bidirectional walk over an ordered collection.
///
/// A cursor is either positioned on an entry (`valid`) or past either end.
/// Stepping an invalid cursor leaves it invalid; re-position it with one of
/// the `seek` methods.
pub trait Cursor {
    type Key;
    type Item;
    fn valid(&self) -> bool;
    fn prev(&mut self);
    fn next(&mut self);
    fn current(&self) -> Option<Self::Item>;
    fn seek(&mut self, target: &Self::Key);
    fn seek_to_first(&mut self);
    fn seek_to_last(&mut self);
}

pub struct SkipMapIterator<'a, K, V, C, R> {
    list: &'a SkipMap<K, V, C, R>,
    node: Option<Entry<'a, K, V>>,
}

impl<'a, K, V, C, R> SkipMapIterator<'a, K, V, C, R> {
    pub(crate) fn new(list: &'a SkipMap<K, V, C, R>) -> Self {
        Self { list, node: None }
    }
}

impl<'a, K, V, C, R> Cursor for SkipMapIterator<'a, K, V, C, R>
where
    C: Comparator<K>,
    R: RngCore,
{
    type Key = K;
    type Item = (&'a K, &'a V);

    fn valid(&self) -> bool {
        self.node.is_some()
    }

    // O(1) through the level-0 back link
    fn prev(&mut self) {
        self.node = self.node.and_then(|node| node.prev());
    }

    fn next(&mut self) {
        self.node = self.node.and_then(|node| node.next());
    }

    fn current(&self) -> Option<Self::Item> {
        self.node.map(|node| (node.key(), node.value()))
    }

    fn seek(&mut self, target: &K) {
        self.node = self.list.find_greater_or_equal(target);
    }

    fn seek_to_first(&mut self) {
        self.node = self.list.get_min();
    }

    fn seek_to_last(&mut self) {
        self.node = self.list.get_max();
    }
}

/// Ordered iterator over `(key, value)` pairs.
pub struct Iter<'a, K, V> {
    node: Option<Entry<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(first: Option<Entry<'a, K, V>>, len: usize) -> Self {
        Self {
            node: first,
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node?;
        self.node = node.next();
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V, C, R> IntoIterator for &'a SkipMap<K, V, C, R> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmp::DefaultComparator;
    use crate::test_utils::seeded;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;

    fn make_skipmap() -> SkipMap<&'static str, usize> {
        let mut skm = SkipMap::with_rng(DefaultComparator, seeded(0xdeadbeef));
        let keys = vec![
            "aba", "abb", "abc", "abd", "abe", "abf", "abg", "abh", "abi", "abj", "abk", "abl",
            "abm", "abn", "abo", "abp", "abq", "abr", "abs", "abt", "abu", "abv", "abw", "abx",
            "aby", "abz",
        ];
        for (i, k) in keys.into_iter().enumerate() {
            skm.insert(k, i);
        }
        skm
    }

    type TestCursor<'a> = SkipMapIterator<'a, &'static str, usize, DefaultComparator, StdRng>;

    fn current_key(iter: &TestCursor<'_>) -> Option<&'static str> {
        iter.current().map(|(k, _)| *k)
    }

    #[test]
    fn test_iter_in_order() {
        let skm = make_skipmap();
        let iter = skm.iter();
        assert_eq!(iter.len(), 26);
        let keys: Vec<_> = skm.keys().copied().collect();
        assert_eq!(keys.first(), Some(&"aba"));
        assert_eq!(keys.last(), Some(&"abz"));
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        let values: Vec<_> = skm.values().copied().collect();
        assert_eq!(values, (0..26).collect::<Vec<_>>());
        assert_eq!((&skm).into_iter().count(), 26);
    }

    #[test]
    fn test_cursor_seek_valid() {
        let skm = make_skipmap();
        let mut iter = skm.cursor();
        assert!(!iter.valid());
        iter.next();
        assert!(!iter.valid());

        iter.seek_to_first();
        assert!(iter.valid());
        assert_eq!(current_key(&iter), Some("aba"));
        iter.seek(&"abz");
        assert_eq!(current_key(&iter), Some("abz"));
        iter.seek(&"aba");
        assert_eq!(current_key(&iter), Some("aba"));

        iter.seek(&"");
        assert!(iter.valid());
        iter.prev();
        assert!(!iter.valid());

        iter.seek(&"ab{");
        assert!(!iter.valid());
        assert_eq!(current_key(&iter), None);
    }

    #[test]
    fn test_cursor_both_directions() {
        let skm = make_skipmap();
        let mut iter = skm.cursor();
        iter.seek_to_last();
        assert_eq!(current_key(&iter), Some("abz"));
        iter.prev();
        assert_eq!(current_key(&iter), Some("aby"));
        iter.next();
        iter.next();
        assert!(!iter.valid());

        iter.seek(&"abd0");
        assert_eq!(current_key(&iter), Some("abe"));
        let mut seen = 0;
        while iter.valid() {
            seen += 1;
            iter.prev();
        }
        assert_eq!(seen, 5);
    }
}
