//! # arbor-map
//!
//! An ordered key-value map backed by a binary search tree with explicit
//! on-demand rebalancing.
//!
//! ## Overview
//!
//! This library provides [`tree::BstMap`], an in-memory associative
//! container for totally ordered keys where ordered iteration is a
//! first-class requirement (unlike a hash map). Its distinguishing choice
//! is that balancing is an explicit O(n) operation rather than an
//! automatic per-mutation one:
//!
//! - **Upsert insertion and lookup** in O(height)
//! - **Ordered traversal** through a parent-link successor walk, with no
//!   auxiliary stack
//! - **Explicit rebalancing** that flattens the tree and rebuilds it at
//!   minimal height
//! - **Structural visualization** as a layered ASCII diagram
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`tree::BstMap`] as an ordered
//!   map
//!
//! ## Example
//!
//! ```rust
//! use arbor_map::prelude::*;
//!
//! let mut map: BstMap<i32, &str> = (1..=7).map(|key| (key, "x")).collect();
//! assert_eq!(map.height(), 7); // sorted insertion: fully skewed
//!
//! map.balance();
//! assert_eq!(map.height(), 3);
//! assert_eq!(map.len(), 7);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use arbor_map::prelude::*;
/// ```
pub mod prelude {
    pub use crate::tree::*;
}

pub mod tree;
