//! Reorder engine — drag-and-drop as a pure permutation.
//!
//! A completed drag is a `(source, target)` pair of ids. The source element
//! is taken out and put back at the index the target occupied, shifting the
//! elements in between by one. Ids that are no longer present (a drag racing
//! a removal) leave the sequence unchanged.

/// Move the element at `from` to index `to`, shifting the elements in between.
///
/// Out-of-range indices return the input unchanged.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out = items.to_vec();
    if from == to || from >= out.len() || to >= out.len() {
        return out;
    }
    let moved = out.remove(from);
    out.insert(to, moved);
    out
}

/// Reorder `items` by moving the element keyed `source` to where `target` is.
///
/// `key` projects each element to its identity. Returns the input unchanged
/// when `source == target`, when either key is missing, or when there are
/// fewer than two elements.
pub fn reorder<T, K, F>(items: &[T], source: &K, target: &K, key: F) -> Vec<T>
where
    T: Clone,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    if items.len() < 2 || source == target {
        return items.to_vec();
    }
    let Some(from) = items.iter().position(|item| key(item) == *source) else {
        return items.to_vec();
    };
    let Some(to) = items.iter().position(|item| key(item) == *target) else {
        return items.to_vec();
    };
    array_move(items, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(s: &str) -> Vec<String> {
        s.chars().map(|c| c.to_string()).collect()
    }

    fn reorder_letters(seq: &str, source: &str, target: &str) -> String {
        reorder(&letters(seq), &source.to_string(), &target.to_string(), String::clone).concat()
    }

    #[test]
    fn test_move_forward() {
        assert_eq!(reorder_letters("ABCD", "A", "C"), "BCAD");
    }

    #[test]
    fn test_move_backward() {
        assert_eq!(reorder_letters("ABCD", "D", "B"), "ADBC");
    }

    #[test]
    fn test_move_to_adjacent() {
        assert_eq!(reorder_letters("ABCD", "B", "C"), "ACBD");
        assert_eq!(reorder_letters("ABCD", "C", "B"), "ACBD");
    }

    #[test]
    fn test_same_source_and_target_is_noop() {
        assert_eq!(reorder_letters("ABCD", "B", "B"), "ABCD");
    }

    #[test]
    fn test_missing_ids_are_noop() {
        assert_eq!(reorder_letters("ABCD", "X", "B"), "ABCD");
        assert_eq!(reorder_letters("ABCD", "A", "X"), "ABCD");
    }

    #[test]
    fn test_empty_and_singleton() {
        assert_eq!(reorder_letters("", "A", "B"), "");
        assert_eq!(reorder_letters("A", "A", "B"), "A");
        assert_eq!(reorder_letters("A", "B", "A"), "A");
    }

    #[test]
    fn test_array_move_out_of_range() {
        assert_eq!(array_move(&[1, 2, 3], 0, 3), vec![1, 2, 3]);
        assert_eq!(array_move(&[1, 2, 3], 2, 0), vec![3, 1, 2]);
    }
}
