//! Error types for tree lookups.
//!
//! The map's mutating entry points cannot fail, so the taxonomy is small:
//! only read-only keyed access to an absent key is an error, since no
//! default value can be fabricated through a shared reference.

use std::fmt;

/// Represents errors raised by read-only keyed access to a [`BstMap`].
///
/// [`BstMap`]: crate::tree::BstMap
///
/// # Examples
///
/// ```rust
/// use arbor_map::tree::TreeError;
///
/// let error = TreeError::KeyNotFound;
/// assert_eq!(format!("{}", error), "key not found in tree");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The requested key is not present in the tree.
    KeyNotFound,
}

impl fmt::Display for TreeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyNotFound => write!(formatter, "key not found in tree"),
        }
    }
}

impl std::error::Error for TreeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_found_display() {
        let error = TreeError::KeyNotFound;
        assert_eq!(format!("{error}"), "key not found in tree");
    }

    #[test]
    fn test_tree_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&TreeError::KeyNotFound);
    }
}
