use crate::error::Result;

/// Abstract interface for raw key-value I/O.
///
/// This trait handles the "how" of storage (memory vs disk), while `PostStore`
/// handles the "what" (post records and the recency index). It mirrors the
/// small slice of a Redis-like service that the wall needs: string scalars plus
/// ordered lists of strings.
///
/// All methods take `&self`; implementations manage their own interior
/// mutability so a single backend can be shared across request handlers.
pub trait KvBackend: Send + Sync {
    // --- Scalar Operations ---

    /// Read the value stored at `key`. Returns Ok(None) if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` at `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<()>;

    /// Whether a scalar value exists at `key`.
    fn exists(&self, key: &str) -> Result<bool>;

    // --- List Operations ---

    /// Insert `values` at the head of the list at `key`, keeping their order,
    /// and return the new length.
    fn push_front(&self, key: &str, values: &[String]) -> Result<usize>;

    /// Read the inclusive range `start..=stop` of the list at `key`.
    /// Negative indexes count from the end, so `(0, -1)` reads everything.
    fn range(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>>;

    /// Remove the first occurrence of `value` from the list at `key`.
    /// Returns whether anything was removed.
    fn remove_one(&self, key: &str, value: &str) -> Result<bool>;
}

/// Resolves an inclusive, possibly negative, index range against a list of
/// `len` items. Returns `None` when the range selects nothing.
pub(crate) fn resolve_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if len == 0 || start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

#[cfg(test)]
mod tests {
    use super::resolve_range;

    #[test]
    fn full_range() {
        assert_eq!(resolve_range(3, 0, -1), Some((0, 2)));
    }

    #[test]
    fn positive_bounds_are_inclusive_and_clamped() {
        assert_eq!(resolve_range(5, 1, 2), Some((1, 2)));
        assert_eq!(resolve_range(5, 0, 99), Some((0, 4)));
    }

    #[test]
    fn negative_bounds_count_from_end() {
        assert_eq!(resolve_range(5, -2, -1), Some((3, 4)));
        assert_eq!(resolve_range(5, -99, 0), Some((0, 0)));
    }

    #[test]
    fn empty_selections() {
        assert_eq!(resolve_range(0, 0, -1), None);
        assert_eq!(resolve_range(3, 2, 1), None);
        assert_eq!(resolve_range(3, 5, 9), None);
        assert_eq!(resolve_range(3, 0, -4), None);
    }
}
