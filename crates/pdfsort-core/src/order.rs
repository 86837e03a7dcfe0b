//! The single mutation both input modes share

/// Move the element at `from` so it ends up at `to`, shifting everything in
/// between by one. This is a move, not a swap.
///
/// Returns `false` and leaves `items` untouched when either index is out of
/// bounds or the two are equal.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let moved = items.remove(from);
    items.insert(to, moved);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_move_down_shifts_intermediate_items_up() {
        let mut items = vec!['A', 'B', 'C', 'D'];
        assert!(move_item(&mut items, 0, 2));
        assert_eq!(items, vec!['B', 'C', 'A', 'D']);
    }

    #[test]
    fn test_move_up_shifts_intermediate_items_down() {
        let mut items = vec!['A', 'B', 'C', 'D'];
        assert!(move_item(&mut items, 3, 1));
        assert_eq!(items, vec!['A', 'D', 'B', 'C']);
    }

    #[test]
    fn test_same_index_is_no_op() {
        let mut items = vec![1, 2, 3];
        assert!(!move_item(&mut items, 1, 1));
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_out_of_bounds_is_no_op() {
        let mut items = vec![1, 2, 3];
        assert!(!move_item(&mut items, 3, 0));
        assert!(!move_item(&mut items, 0, 3));
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_move_and_back_restores_order() {
        let mut items = vec!['A', 'B', 'C', 'D', 'E'];
        move_item(&mut items, 1, 4);
        move_item(&mut items, 4, 1);
        assert_eq!(items, vec!['A', 'B', 'C', 'D', 'E']);
    }
}
