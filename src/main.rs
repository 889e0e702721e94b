use rand::rngs::StdRng;
use rand::SeedableRng;
use skipmap::{DefaultComparator, SkipMap};

fn main() {
    let mut map = SkipMap::with_rng(DefaultComparator, StdRng::seed_from_u64(0xdeadbeef));
    map.insert(vec![7, 5, 5], vec![3, 3, 3]);
    map.insert(vec![1, 2, 3], vec![1, 2, 3]);
    map.insert(vec![5, 5, 5], vec![5, 5, 5]);
    map.insert(vec![0, 5, 5], vec![5, 5, 5]);
    map.insert(vec![0, 0, 5], vec![5, 5, 5]);
    map.insert(vec![0, 0, 1], vec![5, 5, 5]);
    print!("{}", map);

    map.delete(&vec![5, 5, 5]);
    print!("{}", map);
}
