//! Accessible names and live-region announcements
//!
//! Every string a screen reader hears comes from here. Announcements always
//! name the item and its position so they stay meaningful even when two of
//! them land out of order in the live region.

use crate::keyboard::Direction;

/// Which kind of list is being rendered. Only the wording differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFlavor {
    /// Arbitrary items rendered by a caller-supplied function
    #[default]
    Generic,
    /// Uploaded files rendered as fixed file rows
    Files,
}

impl ListFlavor {
    /// `aria-label` for the list container
    pub fn container_label(self, len: usize) -> String {
        match self {
            ListFlavor::Generic => format!(
                "Sortable list with {} items. Drag and drop to reorder, or use keyboard.",
                len
            ),
            ListFlavor::Files => format!(
                "File list with {} files. Drag and drop to reorder.",
                len
            ),
        }
    }

    fn keyboard_hint(self) -> &'static str {
        match self {
            ListFlavor::Generic => "Press Space to grab, use arrow keys to reorder.",
            ListFlavor::Files => "Press Space to grab and reorder, use arrow keys to move.",
        }
    }

    /// Positional `aria-label` for one row
    pub fn item_label(self, label: &str, index: usize, len: usize) -> String {
        format!(
            "{}. Position {} of {}. {}",
            label,
            index + 1,
            len,
            self.keyboard_hint()
        )
    }

    pub fn grabbed(self, name: &str) -> String {
        let keys = match self {
            ListFlavor::Generic => "arrow keys",
            ListFlavor::Files => "Up and Down arrow keys",
        };
        format!(
            "Grabbed {}. Use {} to move, Space or Enter to drop.",
            name, keys
        )
    }

    pub fn dropped(self, name: &str, index: usize) -> String {
        format!("Dropped {} at position {}.", name, index + 1)
    }

    pub fn moved(self, name: &str, index: usize, len: usize) -> String {
        format!("Moved {} to position {} of {}.", name, index + 1, len)
    }

    pub fn at_boundary(self, direction: Direction) -> String {
        match direction {
            Direction::Up => "Already at the top of the list.".to_string(),
            Direction::Down => "Already at the bottom of the list.".to_string(),
        }
    }

    pub fn cancelled(self, name: &str, index: usize) -> String {
        format!("Cancelled. {} remains at position {}.", name, index + 1)
    }

    pub fn removed(self, name: &str) -> String {
        format!("Removed {} from the list.", name)
    }

    pub fn drag_started(self, name: &str, index: usize) -> String {
        format!("Dragging {} from position {}.", name, index + 1)
    }

    pub fn drag_moved(self, name: &str, index: usize, len: usize) -> String {
        format!("{} moved to position {} of {}.", name, index + 1, len)
    }

    pub fn drag_in_place(self, name: &str) -> String {
        format!("{} dropped at original position.", name)
    }
}

/// Supplies the names used in labels and announcements
pub trait ItemLabel<T> {
    /// Accessible name placed at the front of the row's `aria-label`
    fn label(&self, item: &T, index: usize) -> String;

    /// Name spoken in announcements
    fn spoken_name(&self, item: &T, index: usize) -> String {
        self.label(item, index)
    }
}

/// Default labeler: `Item 1`, `Item 2`, ...
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalLabel;

impl<T> ItemLabel<T> for PositionalLabel {
    fn label(&self, _item: &T, index: usize) -> String {
        format!("Item {}", index + 1)
    }
}

/// Adapts a closure into an [`ItemLabel`]
pub struct LabelFn<F>(pub F);

impl<T, F> ItemLabel<T> for LabelFn<F>
where
    F: Fn(&T, usize) -> String,
{
    fn label(&self, item: &T, index: usize) -> String {
        (self.0)(item, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_label_carries_position_and_hint() {
        let label = ListFlavor::Files.item_label("image1.jpg, 1 KB", 0, 3);
        assert!(label.contains("image1.jpg"));
        assert!(label.contains("Position 1 of 3"));
        assert!(label.contains("Press Space to grab"));
    }

    #[test]
    fn test_container_label_mentions_count() {
        assert_eq!(
            ListFlavor::Files.container_label(0),
            "File list with 0 files. Drag and drop to reorder."
        );
        assert!(ListFlavor::Generic
            .container_label(4)
            .starts_with("Sortable list with 4 items."));
    }

    #[test]
    fn test_positional_label_is_one_based() {
        assert_eq!(ItemLabel::<&str>::label(&PositionalLabel, &"x", 0), "Item 1");
        assert_eq!(ItemLabel::<&str>::label(&PositionalLabel, &"x", 9), "Item 10");
    }

    #[test]
    fn test_label_fn_spoken_name_defaults_to_label() {
        let labeler = LabelFn(|item: &String, _| item.to_uppercase());
        assert_eq!(labeler.spoken_name(&"a.pdf".to_string(), 2), "A.PDF");
    }

    #[test]
    fn test_boundary_messages() {
        assert_eq!(
            ListFlavor::Generic.at_boundary(Direction::Up),
            "Already at the top of the list."
        );
        assert_eq!(
            ListFlavor::Files.at_boundary(Direction::Down),
            "Already at the bottom of the list."
        );
    }
}
