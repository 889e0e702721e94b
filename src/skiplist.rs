//! Ordered map backed by a probabilistic multi-level linked list.
//!
//! ```text
//! level 2:  HEAD ───────────────► 30 ────────────────► NIL
//! level 1:  HEAD ───────► 20 ───► 30 ───────► 50 ────► NIL
//! level 0:  HEAD ─► 10 ─► 20 ───► 30 ─► 40 ─► 50 ────► NIL
//!                  ◄──── ◄───── ◄──── ◄──── (prev, level 0 only)
//! ```
//!
//! Entries are owned by an [`Arena`] and linked through [`NodeId`] handles.
//! The head is a fixed row of `max_level` links. A predecessor of `None`
//! always stands for the head, both in update vectors and in `prev` links.

use crate::arena::{Arena, NodeId};
use crate::cmp::{Comparator, DefaultComparator};
use crate::iter::{Iter, Keys, SkipMapIterator, Values};
use crate::options::{Options, MAX_LEVEL_LIMIT};
use arrayvec::ArrayVec;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::mem;

type Link = Option<NodeId>;

/// Predecessor per level, `None` meaning the head.
type Update = ArrayVec<Option<NodeId>, MAX_LEVEL_LIMIT>;

#[derive(Debug)]
pub(crate) struct Node<K, V> {
    key: K,
    value: V,
    skips: Vec<Link>,
    prev: Link,
}

/// An ordered key/value map with expected `O(log n)` insert, search and
/// delete.
///
/// Keys are ordered by a [`Comparator`], which defaults to the key's `Ord`.
/// Entry heights are drawn from the random source `R`; pass a seeded rng
/// through [`SkipMap::with_rng`] for reproducible layouts.
///
/// ```
/// use skipmap::SkipMap;
///
/// let mut map = SkipMap::new();
/// map.insert(3, "three");
/// map.insert(1, "one");
/// assert_eq!(map.get(&1), Some(&"one"));
/// assert_eq!(map.get_min().map(|e| *e.key()), Some(1));
/// assert_eq!(map.get_max().map(|e| *e.key()), Some(3));
/// ```
pub struct SkipMap<K, V, C = DefaultComparator, R = StdRng> {
    cmp: C,
    nodes: Arena<Node<K, V>>,
    head: Vec<Link>,
    rand: R,
    probability: f64,
    level: usize,
    len: usize,
}

impl<K: Ord, V> SkipMap<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(DefaultComparator)
    }
}

impl<K: Ord, V> Default for SkipMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> SkipMap<K, V, C> {
    /// Creates an empty map ordered by `cmp`, with an entropy-seeded rng.
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_rng(cmp, StdRng::from_entropy())
    }
}

impl<K, V, C, R> SkipMap<K, V, C, R>
where
    C: Comparator<K>,
    R: RngCore,
{
    pub fn with_rng(cmp: C, rand: R) -> Self {
        Self::build(cmp, rand, Options::default())
    }

    pub fn with_options(cmp: C, rand: R, options: Options) -> crate::Result<Self> {
        options.validate()?;
        Ok(Self::build(cmp, rand, options))
    }

    fn build(cmp: C, rand: R, options: Options) -> Self {
        Self {
            cmp,
            nodes: Arena::new(),
            head: vec![None; options.max_level],
            rand,
            probability: options.probability,
            level: 1,
            len: 0,
        }
    }

    /// Inserts `key`, returning the previous value if the key was present.
    ///
    /// An existing entry keeps its position and height; only its value is
    /// replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut update = self.update_vector();
        let pred = self.descend(&key, Some(&mut update));

        if let Some(id) = self.next(pred, 0) {
            if self.key_eq(id, &key) {
                trace!("replacing value of {:?}", id);
                return Some(mem::replace(&mut self.nodes.get_mut(id).value, value));
            }
        }

        let height = self.random_level();
        if height > self.level {
            // slots above the old level were initialised to the head
            debug!("raising level {} -> {}", self.level, height);
            self.level = height;
        }

        let succ = self.next(pred, 0);
        let id = self.nodes.alloc(Node {
            key,
            value,
            skips: vec![None; height],
            prev: pred,
        });
        for (level, &prev) in update.iter().enumerate().take(height) {
            let next = self.next(prev, level);
            self.nodes.get_mut(id).skips[level] = next;
            self.set_next(prev, level, Some(id));
        }
        if let Some(succ) = succ {
            self.nodes.get_mut(succ).prev = Some(id);
        }

        self.len += 1;
        None
    }

    /// Returns the entry holding `key`.
    pub fn search(&self, key: &K) -> Option<Entry<'_, K, V>> {
        self.find(key).map(|id| self.entry(id))
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|id| &self.nodes.get(id).value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.find(key)?;
        Some(&mut self.nodes.get_mut(id).value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key`, returning its value. Absent keys are a no-op.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let mut update = self.update_vector();
        let pred = self.descend(key, Some(&mut update));

        let target = match self.next(pred, 0) {
            Some(id) if self.key_eq(id, key) => id,
            _ => {
                trace!("delete of absent key");
                return None;
            }
        };

        let node = self.nodes.free(target)?;
        // an entry is linked on exactly the levels below its height
        for (level, &next) in node.skips.iter().enumerate() {
            debug_assert_eq!(self.next(update[level], level), Some(target));
            self.set_next(update[level], level, next);
        }
        if let Some(succ) = node.skips[0] {
            self.nodes.get_mut(succ).prev = node.prev;
        }

        let old_level = self.level;
        while self.level > 1 && self.head[self.level - 1].is_none() {
            self.level -= 1;
        }
        if self.level != old_level {
            debug!("shrinking level {} -> {}", old_level, self.level);
        }

        self.len -= 1;
        Some(node.value)
    }

    /// First entry whose key is greater than or equal to `key`.
    pub fn find_greater_or_equal(&self, key: &K) -> Option<Entry<'_, K, V>> {
        let pred = self.descend(key, None);
        self.next(pred, 0).map(|id| self.entry(id))
    }

    /// Last entry whose key is strictly less than `key`.
    pub fn find_less_than(&self, key: &K) -> Option<Entry<'_, K, V>> {
        self.descend(key, None).map(|id| self.entry(id))
    }

    pub fn cursor(&self) -> SkipMapIterator<'_, K, V, C, R> {
        SkipMapIterator::new(self)
    }

    fn find(&self, key: &K) -> Option<NodeId> {
        let pred = self.descend(key, None);
        self.next(pred, 0).filter(|&id| self.key_eq(id, key))
    }

    /// Walks from the top level down to level 0, advancing while the next
    /// key is strictly less than `key`. Returns the level-0 predecessor and
    /// records the predecessor of every active level into `update`.
    fn descend(&self, key: &K, mut update: Option<&mut Update>) -> Option<NodeId> {
        let mut current = None;
        for level in (0..self.level).rev() {
            while let Some(next) = self.next(current, level) {
                if self.cmp.cmp(&self.nodes.get(next).key, key) != Ordering::Less {
                    break;
                }
                current = Some(next);
            }
            if let Some(update) = update.as_deref_mut() {
                update[level] = current;
            }
        }
        current
    }

    fn key_eq(&self, id: NodeId, key: &K) -> bool {
        self.cmp.cmp(&self.nodes.get(id).key, key) == Ordering::Equal
    }

    fn random_level(&mut self) -> usize {
        let mut height = 1;
        while height < self.max_level() && self.rand.gen::<f64>() < self.probability {
            height += 1;
        }
        height
    }
}

impl<K, V, C, R> SkipMap<K, V, C, R> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels currently in use.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn max_level(&self) -> usize {
        self.head.len()
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Smallest entry. `O(1)`.
    pub fn get_min(&self) -> Option<Entry<'_, K, V>> {
        self.head[0].map(|id| self.entry(id))
    }

    /// Largest entry, found by walking level 0. `O(len)`.
    pub fn get_max(&self) -> Option<Entry<'_, K, V>> {
        let mut current = self.head[0]?;
        while let Some(next) = self.nodes.get(current).skips[0] {
            current = next;
        }
        Some(self.entry(current))
    }

    pub fn clear(&mut self) {
        debug!("clearing {} entries", self.len);
        self.nodes.clear();
        self.head.iter_mut().for_each(|link| *link = None);
        self.level = 1;
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.get_min(), self.len)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    fn entry(&self, id: NodeId) -> Entry<'_, K, V> {
        Entry {
            nodes: &self.nodes,
            id,
        }
    }

    fn update_vector(&self) -> Update {
        (0..self.max_level()).map(|_| None).collect()
    }

    fn next(&self, at: Option<NodeId>, level: usize) -> Link {
        match at {
            None => self.head[level],
            Some(id) => self.nodes.get(id).skips[level],
        }
    }

    fn set_next(&mut self, at: Option<NodeId>, level: usize, to: Link) {
        match at {
            None => self.head[level] = to,
            Some(id) => self.nodes.get_mut(id).skips[level] = to,
        }
    }
}

#[cfg(test)]
impl<K, V, C, R> SkipMap<K, V, C, R> {
    /// Entries linked on `level`, in chain order.
    pub(crate) fn chain(&self, level: usize) -> Vec<Entry<'_, K, V>> {
        let mut out = Vec::new();
        let mut current = self.head[level];
        while let Some(id) = current {
            out.push(self.entry(id));
            current = self.nodes.get(id).skips[level];
        }
        out
    }

    pub(crate) fn live_nodes(&self) -> usize {
        self.nodes.live()
    }
}

impl<K: Ord, V> Extend<(K, V)> for SkipMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SkipMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = SkipMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Debug, V: Debug, C, R> Debug for SkipMap<K, V, C, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Debug, V, C, R> Display for SkipMap<K, V, C, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "level {} len {}", self.level, self.len)?;
        let mut current = self.head[0];
        while let Some(id) = current {
            let node = self.nodes.get(id);
            write!(f, "{:?} {:?} -", id, node.key)?;
            for skip in &node.skips {
                match skip {
                    Some(next) => write!(f, " {:?}", next)?,
                    None => f.write_str(" nil")?,
                }
            }
            writeln!(f)?;
            current = node.skips[0];
        }
        Ok(())
    }
}

/// Read-only view of one stored entry.
///
/// `next` and `prev` follow the level-0 chain, so walking `next` from
/// [`SkipMap::get_min`] visits every entry in key order.
pub struct Entry<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    id: NodeId,
}

impl<'a, K, V> Clone for Entry<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for Entry<'a, K, V> {}

impl<'a, K, V> Entry<'a, K, V> {
    fn node(&self) -> &'a Node<K, V> {
        self.nodes.get(self.id)
    }

    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    pub fn value(&self) -> &'a V {
        &self.node().value
    }

    /// Number of levels this entry is linked on.
    pub fn height(&self) -> usize {
        self.node().skips.len()
    }

    pub fn next(&self) -> Option<Entry<'a, K, V>> {
        self.node().skips[0].map(|id| Entry {
            nodes: self.nodes,
            id,
        })
    }

    pub fn prev(&self) -> Option<Entry<'a, K, V>> {
        self.node().prev.map(|id| Entry {
            nodes: self.nodes,
            id,
        })
    }
}

impl<'a, K: Debug, V: Debug> Debug for Entry<'a, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("key", self.key())
            .field("value", self.value())
            .field("height", &self.height())
            .finish()
    }
}
