use std::cmp::Ordering;

/// Three-way comparison imposing a strict total order over keys.
///
/// Any `Fn(&K, &K) -> Ordering` closure is a comparator. An ordering that is
/// not total (non-transitive, non-antisymmetric) leaves the map's order
/// unspecified; it is not detected.
pub trait Comparator<K> {
    fn cmp(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their `Ord` implementation.
#[derive(Debug, Default, Copy, Clone)]
pub struct DefaultComparator;

impl<K: Ord> Comparator<K> for DefaultComparator {
    fn cmp(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    fn cmp(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
