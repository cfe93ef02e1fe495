//! Ordered map backed by a binary search tree with explicit rebalancing.
//!
//! This module provides [`BstMap`], a mutable ordered map that keeps its
//! entries in a plain (non-self-balancing) binary search tree and exposes
//! rebalancing as an explicit operation.
//!
//! # Overview
//!
//! `BstMap` is the right container when ordered iteration is a first-class
//! requirement and the caller controls when the O(n) rebalancing cost is
//! paid:
//!
//! - O(h) get / insert, where h is the current tree height
//! - O(1) len, height and `is_empty`
//! - O(n) ordered traversal using parent links, with no auxiliary stack
//! - O(n) `balance()`, producing a tree of minimal height
//!
//! Unlike an AVL or Red-Black tree, no rotations happen on insertion: an
//! adversarial insertion order degrades the tree to a linked list until
//! [`BstMap::balance`] is called.
//!
//! # Examples
//!
//! ```rust
//! use arbor_map::tree::BstMap;
//!
//! let mut map = BstMap::new();
//! map.insert(3, "three");
//! map.insert(1, "one");
//! map.insert(2, "two");
//!
//! // Entries are always traversed in sorted key order
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//!
//! map.balance();
//! assert_eq!(map.height(), 2);
//! ```
//!
//! # Internal Structure
//!
//! Nodes live in an arena (`Vec<Node>`) and reference each other through
//! `NodeId` indices. Each node carries its two owning child links and a
//! non-owning parent back-link, which the in-order cursor uses to compute
//! successors without a stack. The arena maintains these invariants:
//!
//! 1. Every slot is reachable from the root through child links
//! 2. `parent` always names the node owning the child slot (root: `None`)
//! 3. Left subtree keys < node key < right subtree keys, no duplicates
//! 4. Keys are never mutated after insertion
//!
//! `clear()` and the destructive phase of `balance()` release all nodes in
//! bulk, so deep trees never recurse through a destructor chain.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{FromIterator, FusedIterator};

use super::error::TreeError;

// =============================================================================
// Node Arena Definitions
// =============================================================================

/// Index of a node slot inside the arena.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct NodeId(usize);

/// Internal node structure stored in the arena.
///
/// Child links own their subtree (transitively, through the arena); the
/// parent link is a non-owning back-reference kept consistent on every
/// structural mutation.
#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
}

// =============================================================================
// BstMap Definition
// =============================================================================

/// A mutable ordered map backed by a binary search tree.
///
/// Keys must implement `Ord` and are immutable once inserted; only values
/// can be modified through the map. Inserting an existing key overwrites
/// its value in place.
///
/// The tree never rebalances itself: [`BstMap::balance`] rebuilds it to
/// minimal height on demand, and [`BstMap::height`] exposes how skewed the
/// tree currently is.
///
/// # Time Complexity
///
/// | Operation   | Complexity              |
/// |-------------|-------------------------|
/// | `new`       | O(1)                    |
/// | `get`       | O(h)                    |
/// | `insert`    | O(h)                    |
/// | `find`      | O(h)                    |
/// | `balance`   | O(n)                    |
/// | `clear`     | O(n)                    |
/// | `len`       | O(1)                    |
/// | `height`    | O(1)                    |
/// | full `iter` | O(n)                    |
///
/// h is the current height: ⌈log2(n+1)⌉ right after `balance()`, up to n
/// for a fully skewed tree.
///
/// # Examples
///
/// ```rust
/// use arbor_map::tree::BstMap;
///
/// let mut map = BstMap::singleton(42, "answer");
/// assert_eq!(map.get(&42), Some(&"answer"));
///
/// // Sorted-order insertion degrades to a list...
/// let mut skewed: BstMap<i32, i32> = (0..7).map(|k| (k, k)).collect();
/// assert_eq!(skewed.height(), 7);
///
/// // ...until an explicit balance
/// skewed.balance();
/// assert_eq!(skewed.height(), 3);
/// ```
#[derive(Clone)]
pub struct BstMap<K, V> {
    /// Arena of node slots; every slot is live (the map never deletes).
    nodes: Vec<Node<K, V>>,
    /// Root node of the tree.
    root: Option<NodeId>,
    /// Longest root-to-leaf path, counted in nodes (0 when empty).
    height: usize,
}

impl<K, V> BstMap<K, V> {
    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor_map::tree::BstMap;
    ///
    /// let map: BstMap<i32, String> = BstMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            height: 0,
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor_map::tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "one");
    /// map.insert(2, "two");
    /// assert_eq!(map.len(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the height of the tree: the length of the longest
    /// root-to-leaf path counted in nodes (1 for a single-node tree, 0 for
    /// an empty one).
    ///
    /// The height is maintained incrementally on insertion and recomputed
    /// by the rebuild inside [`BstMap::balance`]; it never decreases
    /// otherwise, since no operation removes individual nodes.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Removes all entries from the map.
    ///
    /// The whole node graph is released in bulk; size and height reset to
    /// zero. Any cursor previously obtained from this map cannot be used
    /// afterwards (the borrow checker enforces this).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor_map::tree::BstMap;
    ///
    /// let mut map = BstMap::singleton(1, "one");
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.height(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.height = 0;
    }

    fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.0]
    }

    /// Appends a fresh node slot to the arena and returns its id.
    fn push_node(&mut self, key: K, value: V, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            key,
            value,
            left: None,
            right: None,
            parent,
        });
        id
    }

    /// Leftmost descendant of `id`: the smallest key in its subtree.
    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    /// In-order successor of `id`, using only parent/child links.
    ///
    /// With a right child, the successor is that child's leftmost
    /// descendant. Otherwise the walk ascends parent links until it arrives
    /// from a left child; running past the root means `id` held the
    /// largest key.
    fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.node(id).right {
            return Some(self.leftmost(right));
        }
        let mut child = id;
        let mut parent = self.node(id).parent;
        while let Some(ancestor) = parent {
            if self.node(ancestor).left == Some(child) {
                return Some(ancestor);
            }
            child = ancestor;
            parent = self.node(ancestor).parent;
        }
        None
    }

    /// Node id of the smallest key, or `None` when empty.
    fn first_id(&self) -> Option<NodeId> {
        self.root.map(|root| self.leftmost(root))
    }

    /// Collects the node ids in ascending key order by walking successors
    /// from the leftmost node.
    fn in_order_ids(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.len());
        let mut current = self.first_id();
        while let Some(id) = current {
            order.push(id);
            current = self.successor(id);
        }
        order
    }

    /// Returns a cursor positioned at the smallest key, or an end cursor
    /// for an empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor_map::tree::BstMap;
    ///
    /// let empty: BstMap<i32, i32> = BstMap::new();
    /// assert!(empty.begin().is_end());
    /// assert_eq!(empty.begin(), empty.end());
    /// ```
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, K, V> {
        Cursor {
            map: self,
            node: self.first_id(),
        }
    }

    /// Returns the end cursor (one past the largest key).
    #[must_use]
    pub fn end(&self) -> Cursor<'_, K, V> {
        Cursor {
            map: self,
            node: None,
        }
    }

    /// Returns an iterator over the entries in ascending key order.
    ///
    /// The iterator steps through the tree with the parent-link successor
    /// walk; it allocates nothing and visits all n entries in O(n) total.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor_map::tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(2, "two");
    /// map.insert(1, "one");
    ///
    /// let entries: Vec<(&i32, &&str)> = map.iter().collect();
    /// assert_eq!(entries, vec![(&1, &"one"), (&2, &"two")]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> BstMapIter<'_, K, V> {
        BstMapIter {
            map: self,
            next: self.first_id(),
            remaining: self.len(),
        }
    }

    /// Returns an iterator over the keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values, ordered by their keys.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Looks up the key at a complete-binary-tree position.
    ///
    /// The tree is numbered as an implicit complete binary tree: position 1
    /// is the root, and each bit of `index` below the leading one encodes a
    /// step on the root-to-node path (0 = left, 1 = right). Returns `None`
    /// for position 0 or when the path runs off the existing structure;
    /// the structural dump renders those positions with its placeholder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor_map::tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(4, ());
    /// map.insert(2, ());
    /// map.insert(6, ());
    ///
    /// assert_eq!(map.key_at(1), Some(&4));
    /// assert_eq!(map.key_at(2), Some(&2)); // 0b10: left of root
    /// assert_eq!(map.key_at(3), Some(&6)); // 0b11: right of root
    /// assert_eq!(map.key_at(5), None);     // 0b101: left, then right
    /// ```
    #[must_use]
    pub fn key_at(&self, index: usize) -> Option<&K> {
        if index == 0 {
            return None;
        }
        let mut current = self.root?;
        let mut mask: usize = 1;
        while index >> 1 >= mask {
            mask <<= 1;
        }
        mask >>= 1;
        while mask > 0 {
            let node = self.node(current);
            current = if index & mask > 0 { node.right } else { node.left }?;
            mask >>= 1;
        }
        Some(&self.node(current).key)
    }
}

impl<K: Ord, V> BstMap<K, V> {
    /// Creates a map containing a single key-value pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor_map::tree::BstMap;
    ///
    /// let map = BstMap::singleton(42, "answer");
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.height(), 1);
    /// ```
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        let mut map = Self::new();
        map.insert(key, value);
        map
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key is already present its value is overwritten in place and
    /// the previous value returned; size and height are unchanged.
    /// Otherwise a new node is attached at the reached leaf slot, the size
    /// grows by one, and the height rises to the depth of the new node if
    /// that exceeds the current height.
    ///
    /// No rebalancing happens here: inserting keys in sorted order builds
    /// a degenerate list-shaped tree until [`BstMap::balance`] is called.
    ///
    /// # Complexity
    ///
    /// O(h)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor_map::tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.insert(1, "one"), None);
    /// assert_eq!(map.insert(1, "ONE"), Some("one"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(mut current) = self.root else {
            let id = self.push_node(key, value, None);
            self.root = Some(id);
            self.height = 1;
            return None;
        };

        // Depth of `current`, in nodes from the root.
        let mut depth = 1;
        loop {
            let ordering = key.cmp(&self.node(current).key);
            match ordering {
                Ordering::Equal => {
                    let slot = &mut self.node_mut(current).value;
                    return Some(std::mem::replace(slot, value));
                }
                Ordering::Less => match self.node(current).left {
                    Some(child) => {
                        current = child;
                        depth += 1;
                    }
                    None => {
                        let id = self.push_node(key, value, Some(current));
                        self.node_mut(current).left = Some(id);
                        self.height = self.height.max(depth + 1);
                        return None;
                    }
                },
                Ordering::Greater => match self.node(current).right {
                    Some(child) => {
                        current = child;
                        depth += 1;
                    }
                    None => {
                        let id = self.push_node(key, value, Some(current));
                        self.node_mut(current).right = Some(id);
                        self.height = self.height.max(depth + 1);
                        return None;
                    }
                },
            }
        }
    }

    /// Iterative binary search; the shared lookup path of `get`, `get_mut`,
    /// `find` and `try_get`.
    fn locate<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(id) = current {
            match key.cmp(self.node(id).key.borrow()) {
                Ordering::Equal => return Some(id),
                Ordering::Less => current = self.node(id).left,
                Ordering::Greater => current = self.node(id).right,
            }
        }
        None
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form must match the ordering on the key
    /// type.
    ///
    /// # Complexity
    ///
    /// O(h)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor_map::tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert("hello".to_string(), 42);
    ///
    /// // Can use &str to look up String keys
    /// assert_eq!(map.get("hello"), Some(&42));
    /// assert_eq!(map.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).map(|id| &self.node(id).value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// Only the value is reachable mutably; keys stay immutable so the
    /// ordering invariant never needs re-validation.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).map(|id| &mut self.node_mut(id).value)
    }

    /// Returns `true` if the map contains a value for the specified key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.locate(key).is_some()
    }

    /// Returns a cursor positioned at the given key, or the end cursor if
    /// the key is absent.
    ///
    /// The cursor stays usable until the next structural mutation; the
    /// borrow it holds on the map makes outliving one a compile error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor_map::tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "one");
    /// map.insert(2, "two");
    ///
    /// let mut cursor = map.find(&1);
    /// assert_eq!(cursor.key(), Some(&1));
    /// cursor.advance();
    /// assert_eq!(cursor.key(), Some(&2));
    ///
    /// assert!(map.find(&9).is_end());
    /// ```
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Cursor {
            map: self,
            node: self.locate(key),
        }
    }

    /// Returns a mutable cursor positioned at the given key, or the end
    /// cursor if the key is absent.
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.locate(key);
        CursorMut { map: self, node }
    }

    /// Read-only keyed access that fails on a missing key.
    ///
    /// This is the read-only counterpart of [`BstMap::get_or_default`]: a
    /// shared reference cannot fabricate a default slot, so an absent key
    /// is reported as [`TreeError::KeyNotFound`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyNotFound`] if the key is not in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor_map::tree::{BstMap, TreeError};
    ///
    /// let map = BstMap::singleton(1, "one");
    /// assert_eq!(map.try_get(&1), Ok(&"one"));
    /// assert_eq!(map.try_get(&2), Err(TreeError::KeyNotFound));
    /// ```
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V, TreeError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(TreeError::KeyNotFound)
    }

    /// Keyed access with insertion: returns a mutable reference to the
    /// value for `key`, inserting `V::default()` first if the key is
    /// absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor_map::tree::BstMap;
    ///
    /// let mut map: BstMap<&str, i32> = BstMap::new();
    /// *map.get_or_default("hits") += 1;
    /// *map.get_or_default("hits") += 1;
    /// assert_eq!(map.get("hits"), Some(&2));
    /// ```
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let id = match self.locate(&key) {
            Some(id) => id,
            None => {
                // A missed lookup means insert appends: the new slot is
                // the last one in the arena.
                self.insert(key, V::default());
                NodeId(self.nodes.len() - 1)
            }
        };
        &mut self.node_mut(id).value
    }

    /// Rebalances the tree in place to minimal height.
    ///
    /// Two phases, with no rotations involved:
    ///
    /// 1. **Flatten**: an in-order walk drains the arena into a
    ///    key-ascending `Vec` of pairs.
    /// 2. **Rebuild**: for each range the floor midpoint is inserted
    ///    first, then both halves recurse, yielding a complete-as-possible
    ///    tree of height ⌈log2(n+1)⌉. Even-sized ranges always bias left.
    ///
    /// Content is preserved exactly; only the shape (and therefore
    /// [`BstMap::height`]) changes. Calling `balance()` twice in a row
    /// produces the same shape as calling it once.
    ///
    /// # Complexity
    ///
    /// O(n) time, O(n) auxiliary space.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor_map::tree::BstMap;
    ///
    /// let mut map: BstMap<i32, i32> = (1..=15).map(|k| (k, k)).collect();
    /// assert_eq!(map.height(), 15); // sorted insertion: fully skewed
    ///
    /// map.balance();
    /// assert_eq!(map.height(), 4);
    /// assert_eq!(map.len(), 15);
    /// ```
    pub fn balance(&mut self) {
        let order = self.in_order_ids();
        let mut slots: Vec<Option<Node<K, V>>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        let mut pairs: Vec<Option<(K, V)>> = order
            .into_iter()
            .filter_map(|id| slots[id.0].take())
            .map(|node| Some((node.key, node.value)))
            .collect();

        self.root = None;
        self.height = 0;
        self.nodes = Vec::with_capacity(pairs.len());
        if !pairs.is_empty() {
            let end = pairs.len() - 1;
            self.rebuild_balanced(&mut pairs, 0, end);
        }
    }

    /// Midpoint-first rebuild of the range `[start, end]` of `pairs`.
    ///
    /// Inserting the floor midpoint before recursing on both halves hands
    /// each subtree the correctly ordered remainder and halves the range
    /// per level, so the rebuilt tree has minimal height.
    fn rebuild_balanced(&mut self, pairs: &mut [Option<(K, V)>], start: usize, end: usize) {
        debug_assert!(start <= end && end < pairs.len());

        let mid = (start + end) / 2;
        if let Some((key, value)) = pairs[mid].take() {
            self.insert(key, value);
        }
        if mid > start {
            self.rebuild_balanced(pairs, start, mid - 1);
        }
        if mid < end {
            self.rebuild_balanced(pairs, mid + 1, end);
        }
    }
}

// =============================================================================
// Cursor Implementation
// =============================================================================

/// A read-only cursor over the entries of a [`BstMap`].
///
/// A cursor is either positioned at a node or at the end of the sequence.
/// [`Cursor::advance`] steps to the in-order successor using only
/// parent/child links: a full traversal of n entries costs O(n) in total
/// with no auxiliary stack.
///
/// The cursor borrows the map, so it cannot outlive a structural mutation
/// such as `insert`, `balance` or `clear`.
pub struct Cursor<'a, K, V> {
    map: &'a BstMap<K, V>,
    node: Option<NodeId>,
}

impl<'a, K, V> Cursor<'a, K, V> {
    /// Returns `true` if the cursor is past the last entry.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// The key at the current position, or `None` at the end.
    #[must_use]
    pub fn key(&self) -> Option<&'a K> {
        self.node.map(|id| &self.map.node(id).key)
    }

    /// The value at the current position, or `None` at the end.
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.node.map(|id| &self.map.node(id).value)
    }

    /// The key-value pair at the current position, or `None` at the end.
    #[must_use]
    pub fn entry(&self) -> Option<(&'a K, &'a V)> {
        self.node
            .map(|id| (&self.map.node(id).key, &self.map.node(id).value))
    }

    /// Steps to the in-order successor; at the largest key the cursor
    /// becomes the end cursor. Advancing an end cursor is a no-op.
    pub fn advance(&mut self) {
        if let Some(id) = self.node {
            self.node = self.map.successor(id);
        }
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    /// Two cursors are equal iff they come from the same map and reference
    /// the identical node (or both are end cursors).
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.map, other.map) && self.node == other.node
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entry() {
            Some((key, value)) => formatter
                .debug_struct("Cursor")
                .field("key", key)
                .field("value", value)
                .finish(),
            None => formatter.write_str("Cursor(end)"),
        }
    }
}

/// A cursor over a [`BstMap`] with mutable access to values.
///
/// Keys remain read-only through a mutable cursor; only values can be
/// changed, which keeps the ordering invariant intact.
pub struct CursorMut<'a, K, V> {
    map: &'a mut BstMap<K, V>,
    node: Option<NodeId>,
}

impl<K, V> CursorMut<'_, K, V> {
    /// Returns `true` if the cursor is past the last entry.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// The key at the current position, or `None` at the end.
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.node.map(|id| &self.map.node(id).key)
    }

    /// The value at the current position, or `None` at the end.
    #[must_use]
    pub fn value(&self) -> Option<&V> {
        self.node.map(|id| &self.map.node(id).value)
    }

    /// Mutable access to the value at the current position.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.node.map(|id| &mut self.map.node_mut(id).value)
    }

    /// Steps to the in-order successor, as [`Cursor::advance`] does.
    pub fn advance(&mut self) {
        if let Some(id) = self.node {
            self.node = self.map.successor(id);
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the key-value pairs of a [`BstMap`] in ascending key
/// order.
///
/// Stepping uses the parent-link successor walk, so the iterator holds no
/// stack or buffered entries.
pub struct BstMapIter<'a, K, V> {
    map: &'a BstMap<K, V>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for BstMapIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.map.successor(id);
        self.remaining -= 1;
        let node = self.map.node(id);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for BstMapIter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for BstMapIter<'_, K, V> {}

/// An owning iterator over the key-value pairs of a [`BstMap`] in
/// ascending key order.
pub struct BstMapIntoIter<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for BstMapIntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> ExactSizeIterator for BstMapIntoIter<K, V> {
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> FusedIterator for BstMapIntoIter<K, V> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for BstMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BstMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for BstMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for BstMap<K, V> {
    type Item = (K, V);
    type IntoIter = BstMapIntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let order = self.in_order_ids();
        let mut slots: Vec<Option<Node<K, V>>> = self.nodes.into_iter().map(Some).collect();
        let entries: Vec<(K, V)> = order
            .into_iter()
            .filter_map(|id| slots[id.0].take())
            .map(|node| (node.key, node.value))
            .collect();
        BstMapIntoIter {
            entries: entries.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a BstMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = BstMapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for BstMap<K, V> {
    /// Maps are equal iff they hold the same key-value pairs; the tree
    /// shapes may differ (e.g. one side balanced, the other not).
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for BstMap<K, V> {}

/// Computes a hash value for this map.
///
/// The length is hashed first, then each (key, value) pair in key order.
/// Iteration order is insertion-order independent, so equal maps produce
/// equal hashes regardless of how they were built or whether they were
/// balanced.
impl<K: Hash, V: Hash> Hash for BstMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BstMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for BstMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Implementations
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for BstMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct BstMapVisitor<K, V> {
    marker: std::marker::PhantomData<BstMap<K, V>>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for BstMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = BstMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = BstMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for BstMap<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(BstMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
