//! Textual rendering of a [`BstMap`]: the ordered key-value dump and the
//! layered ASCII diagram of the tree structure.
//!
//! Both renderers are pure presentation on top of the map's traversal and
//! position-lookup primitives; they never touch the node graph directly.

use std::fmt;

use super::bst_map::BstMap;

/// Writes `count` repetitions of `pad` into the sink.
fn pad_run<W: fmt::Write>(out: &mut W, count: usize, pad: char) -> fmt::Result {
    for _ in 0..count {
        out.write_char(pad)?;
    }
    Ok(())
}

impl<K, V> BstMap<K, V> {
    /// Writes every entry as a `"key: value"` line in ascending key order,
    /// or the single line `"tree is empty"` when there are no entries.
    ///
    /// # Errors
    ///
    /// Propagates errors from the sink.
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
    /// let mut out = String::new();
    /// map.write_ordered(&mut out).unwrap();
    /// assert_eq!(out, "1: one\n2: two\n");
    /// ```
    pub fn write_ordered<W: fmt::Write>(&self, out: &mut W) -> fmt::Result
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        if self.is_empty() {
            return writeln!(out, "tree is empty");
        }
        for (key, value) in self {
            writeln!(out, "{key}: {value}")?;
        }
        Ok(())
    }

    /// Returns the ordered dump of [`BstMap::write_ordered`] as a `String`.
    #[must_use]
    pub fn ordered_string(&self) -> String
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_ordered(&mut out);
        out
    }

    /// Writes a layered ASCII diagram of the tree structure.
    ///
    /// The tree is drawn as a complete binary tree of the tracked height,
    /// one line per level. Every position in the complete-tree numbering
    /// (see [`BstMap::key_at`]) is rendered: occupied positions through
    /// `key_fn`, unoccupied ones as `placeholder`. Spacing between nodes
    /// halves geometrically from one level to the next, using `pad` as the
    /// separation character.
    ///
    /// The diagram has 2^height − 1 positions, so this is meant for small
    /// or freshly balanced trees; a heavily skewed tree renders mostly
    /// placeholders. A tree whose height reaches the bit width of `usize`
    /// has no representable position count at all, so the dump degrades
    /// to the single line `"tree too deep to render"` instead.
    ///
    /// # Errors
    ///
    /// Propagates errors from the sink.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arbor_map::tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(2, ());
    /// map.insert(1, ());
    /// map.insert(3, ());
    ///
    /// let mut out = String::new();
    /// map.write_structure(&mut out, |key| key.to_string(), "-", ' ').unwrap();
    /// assert_eq!(out, " 2   \n1 3 \n");
    /// ```
    pub fn write_structure<W: fmt::Write>(
        &self,
        out: &mut W,
        key_fn: impl Fn(&K) -> String,
        placeholder: &str,
        pad: char,
    ) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        // `1 << height` (and the level-gap shifts, all bounded by it)
        // must fit in a usize.
        if self.height() >= usize::BITS as usize {
            return writeln!(out, "tree too deep to render");
        }

        let positions = 1_usize << self.height();
        let mut newline = 1;
        // Spacing exponent for the current level.
        let mut gap = self.height() - 1;

        pad_run(out, (1 << gap) - 1, pad)?;
        for position in 1..positions {
            match self.key_at(position) {
                Some(key) => out.write_str(&key_fn(key))?,
                None => out.write_str(placeholder)?,
            }
            pad_run(out, (1_usize << (gap + 1)) - 1, pad)?;

            // Last position of the current level: break the line and
            // indent the next one.
            if position == newline {
                if gap > 0 {
                    gap -= 1;
                }
                out.write_char('\n')?;
                pad_run(out, (1 << gap) - 1, pad)?;
                newline = (newline << 1) + 1;
            }
        }
        Ok(())
    }

    /// Returns the structural diagram as a `String`, with the default
    /// `"XXX"` placeholder and space padding.
    #[must_use]
    pub fn structure_string(&self, key_fn: impl Fn(&K) -> String) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_structure(&mut out, key_fn, "XXX", ' ');
        out
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_ordered_dump_of_empty_tree() {
        let map: BstMap<i32, i32> = BstMap::new();
        assert_eq!(map.ordered_string(), "tree is empty\n");
    }

    #[rstest]
    fn test_ordered_dump_ascending_lines() {
        let mut map = BstMap::new();
        for key in [8, 3, 10, 1, 6, 4, 7, 14, 13] {
            map.insert(key, key);
        }
        let expected: String = [1, 3, 4, 6, 7, 8, 10, 13, 14]
            .iter()
            .map(|key| format!("{key}: {key}\n"))
            .collect();
        assert_eq!(map.ordered_string(), expected);
    }

    #[rstest]
    fn test_structure_of_empty_tree_is_blank() {
        let map: BstMap<i32, i32> = BstMap::new();
        assert_eq!(map.structure_string(|key| key.to_string()), "");
    }

    #[rstest]
    fn test_structure_of_single_node() {
        let map = BstMap::singleton(5, ());
        // Height 1: one position, no leading pad, one trailing pad.
        assert_eq!(map.structure_string(|key| key.to_string()), "5 \n");
    }

    #[rstest]
    fn test_structure_of_complete_tree() {
        let mut map = BstMap::new();
        for key in [2, 1, 3] {
            map.insert(key, ());
        }
        let mut out = String::new();
        map.write_structure(&mut out, |key| key.to_string(), "-", ' ')
            .unwrap();
        assert_eq!(out, " 2   \n1 3 \n");
    }

    #[rstest]
    fn test_structure_uses_placeholder_for_missing_slots() {
        let mut map = BstMap::new();
        map.insert(2, ());
        map.insert(1, ());
        let mut out = String::new();
        map.write_structure(&mut out, |key| key.to_string(), "-", ' ')
            .unwrap();
        assert_eq!(out, " 2   \n1 - \n");
    }

    #[rstest]
    fn test_structure_default_placeholder_for_missing_slots() {
        let mut map = BstMap::new();
        map.insert(2, ());
        map.insert(1, ());
        // The right child of the root is unoccupied and renders as the
        // default "XXX" placeholder.
        assert_eq!(
            map.structure_string(|key| key.to_string()),
            " 2   \n1 XXX \n"
        );
    }

    #[rstest]
    fn test_structure_of_unrenderably_deep_tree() {
        // Sorted inserts build a chain whose height reaches the usize
        // bit width; 2^height positions are not representable, so the
        // dump degrades to a notice instead of overflowing.
        let depth = usize::BITS as usize;
        let map: BstMap<usize, ()> = (0..depth).map(|key| (key, ())).collect();
        assert_eq!(map.height(), depth);
        assert_eq!(
            map.structure_string(|key| key.to_string()),
            "tree too deep to render\n"
        );
    }

    #[rstest]
    fn test_structure_custom_pad_character() {
        let mut map = BstMap::new();
        for key in [2, 1, 3] {
            map.insert(key, ());
        }
        let mut out = String::new();
        map.write_structure(&mut out, |key| key.to_string(), "-", '.')
            .unwrap();
        assert_eq!(out, ".2...\n1.3.\n");
    }

    #[rstest]
    fn test_structure_after_balance_fills_top_levels() {
        let mut map: BstMap<i32, ()> = (1..=7).map(|key| (key, ())).collect();
        map.balance();
        // Seven keys balance into a full tree of height 3.
        assert_eq!(
            map.structure_string(|key| key.to_string()),
            "   4       \n 2   6   \n1 3 5 7 \n"
        );
    }
}
