//! Ordered binary-search-tree containers.
//!
//! This module provides [`BstMap`], a mutable ordered key-value map backed
//! by a plain binary search tree:
//!
//! - [`BstMap`]: the map itself (insert, lookup, clear, explicit
//!   [`BstMap::balance`])
//! - [`Cursor`] / [`CursorMut`]: positioned access with in-order successor
//!   stepping over parent links
//! - [`BstMapIter`] / [`BstMapIntoIter`]: ascending-order iterators
//! - [`TreeError`]: the lookup error for read-only keyed access
//!
//! # Explicit Balancing
//!
//! Nothing rebalances automatically: insertion cost tracks the current
//! height, which [`BstMap::height`] exposes and [`BstMap::balance`] resets
//! to the minimum for the stored key count. This trades per-insert
//! constant factors against worst-case lookups, and suits workloads that
//! load in bulk and can balance once afterwards.
//!
//! # Examples
//!
//! ```rust
//! use arbor_map::tree::BstMap;
//!
//! let mut map = BstMap::new();
//! map.insert(3, "three");
//! map.insert(1, "one");
//! map.insert(4, "four");
//!
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &3, &4]);
//!
//! map.balance();
//! assert_eq!(map.height(), 2);
//! ```

mod bst_map;
mod error;
mod render;

pub use bst_map::BstMap;
pub use bst_map::BstMapIntoIter;
pub use bst_map::BstMapIter;
pub use bst_map::Cursor;
pub use bst_map::CursorMut;
pub use error::TreeError;
