//! An in-memory ordered map built on a skip list.
//!
//! [`SkipMap`] keeps entries sorted under a caller-supplied [`Comparator`]
//! and offers expected `O(log n)` insert, search and delete, `O(1)` access
//! to the smallest entry and a doubly linked base level for walking in
//! either direction. It is single-threaded; wrap it in a lock to share it.

pub use crate::cmp::{Comparator, DefaultComparator};
pub use crate::error::Error;
pub use crate::iter::{Cursor, Iter, Keys, SkipMapIterator, Values};
pub use crate::options::{Options, MAX_LEVEL_LIMIT};
pub use crate::skiplist::{Entry, SkipMap};

mod arena;
mod cmp;
mod error;
mod iter;
mod options;
mod skiplist;
#[cfg(test)]
mod test_utils;

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! ensure {
    ($cond:expr,$err:expr $(,)?) => {
        if !$cond {
            return Err($err);
        }
    };
}
