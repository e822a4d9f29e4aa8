//! An ordered map and multimap based on a height-balanced binary search tree.
//!
//! The tree keeps the heights of every node's two subtrees within one of each other, so
//! lookups, insertions and removals all run in O(log n) time, as do the ordered queries
//! (`first`, `last`, `succ`, `pred`), which rederive their position from the root on every
//! call instead of storing parent pointers.
//!
//! Keys are ordered by a comparator from the [`compare`] crate, supplied when the tree is
//! built; `K: Ord` keys get their natural order by default.
//!
//! [`Map`] keeps one value per key; [`MultiMap`] keeps every inserted entry, with equal keys
//! enumerating in insertion order.
//!
//! # Examples
//!
//! ```
//! use avltree::Map;
//!
//! let mut map = Map::new();
//!
//! map.insert(2, "b");
//! map.insert(1, "a");
//! map.insert(3, "c");
//!
//! assert_eq!(map.first(), Some((&1, &"a")));
//! assert_eq!(map.succ(&1, false), Some((&2, &"b")));
//! assert_eq!(map.remove(&2), Some((2, "b")));
//! assert_eq!(map.get(&2), None);
//! ```

pub mod map;
pub mod multimap;

mod node;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;

#[cfg(feature = "quickcheck")]
mod quickcheck;

pub use crate::map::Map;
pub use crate::multimap::MultiMap;
