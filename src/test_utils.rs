use crate::cmp::Comparator;
use crate::SkipMap;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::cmp::Ordering;
use std::collections::VecDeque;

pub(crate) fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random source that makes new entries take a scripted sequence of
/// heights, then height 1 once the script runs out.
///
/// Each height draw promotes while the next `f64` is below the promotion
/// probability, so height `h` is `h - 1` zero draws followed by a draw
/// close to 1.
pub(crate) struct HeightScript {
    draws: VecDeque<u64>,
}

impl HeightScript {
    pub(crate) fn new(heights: &[usize]) -> Self {
        let mut draws = VecDeque::new();
        for &height in heights {
            draws.extend(std::iter::repeat(0).take(height - 1));
            draws.push_back(u64::MAX);
        }
        Self { draws }
    }
}

impl RngCore for HeightScript {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.draws.pop_front().unwrap_or(u64::MAX)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Asserts every structural invariant of `map`:
/// each level is strictly increasing, an entry of height `h` is linked on
/// exactly levels `0..h`, `level()` bounds every height and its top level
/// is occupied, and the back links mirror level 0.
pub(crate) fn check_invariants<K, V, C, R>(map: &SkipMap<K, V, C, R>)
where
    C: Comparator<K>,
{
    let cmp = map.comparator();
    let base = map.chain(0);
    assert_eq!(base.len(), map.len(), "level 0 length");
    assert_eq!(map.live_nodes(), map.len(), "arena holds only live entries");
    assert!(map.level() >= 1 && map.level() <= map.max_level());

    for level in 0..map.max_level() {
        let chain = map.chain(level);
        if level >= map.level() {
            assert!(chain.is_empty(), "level {} above current level", level);
            continue;
        }
        for pair in chain.windows(2) {
            assert_eq!(
                Comparator::cmp(cmp, pair[0].key(), pair[1].key()),
                Ordering::Less,
                "level {} out of order",
                level
            );
        }
        let expected = base.iter().filter(|e| e.height() > level).count();
        assert_eq!(chain.len(), expected, "level {} membership", level);
    }
    if map.level() > 1 {
        assert!(!map.chain(map.level() - 1).is_empty(), "top level is empty");
    }
    assert!(base.iter().all(|e| e.height() <= map.level()));

    for (i, entry) in base.iter().enumerate() {
        match (i, entry.prev()) {
            (0, prev) => assert!(prev.is_none(), "first entry has a back link"),
            (_, Some(prev)) => assert_eq!(
                Comparator::cmp(cmp, prev.key(), base[i - 1].key()),
                Ordering::Equal,
                "back link of entry {}",
                i
            ),
            (_, None) => panic!("entry {} lost its back link", i),
        }
    }
    match (map.get_min(), base.first()) {
        (Some(min), Some(first)) => {
            assert_eq!(Comparator::cmp(cmp, min.key(), first.key()), Ordering::Equal)
        }
        (None, None) => {}
        _ => panic!("get_min disagrees with level 0"),
    }
    match (map.get_max(), base.last()) {
        (Some(max), Some(last)) => {
            assert_eq!(Comparator::cmp(cmp, max.key(), last.key()), Ordering::Equal)
        }
        (None, None) => {}
        _ => panic!("get_max disagrees with level 0"),
    }
}
