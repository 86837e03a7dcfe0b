//! Rendering backend seam
//!
//! The list controller never touches the DOM directly. It drives a
//! [`ListSurface`], which the browser crate implements with web-sys and
//! [`crate::memory::MemorySurface`] implements in memory.

use std::fmt::Debug;

pub const ROLE_LIST: &str = "list";
pub const ROLE_LISTITEM: &str = "listitem";
/// Class toggled on a row grabbed from the keyboard
pub const KEYBOARD_GRABBED_CLASS: &str = "keyboard-grabbed";

/// Per-row attributes the controller owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAttributes {
    pub index: usize,
    /// Name of the positional data attribute, e.g. `data-index`
    pub index_attribute: String,
    pub aria_label: String,
}

/// How a row is marked as grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabMark {
    /// `aria-grabbed="false"`, no marker class
    Released,
    /// `aria-grabbed="true"` while the drag engine holds the row
    Pointer,
    /// `aria-grabbed="true"` plus the `keyboard-grabbed` class
    Keyboard,
}

impl GrabMark {
    pub fn aria_grabbed(self) -> &'static str {
        match self {
            GrabMark::Released => "false",
            GrabMark::Pointer | GrabMark::Keyboard => "true",
        }
    }
}

pub trait ListSurface<T> {
    type Error: Debug;

    /// Remove every rendered row from the container.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Apply `role="list"` and the given `aria-label` to the container.
    fn set_container_label(&mut self, label: &str) -> Result<(), Self::Error>;

    /// Render `item` as a new last row carrying `role="listitem"`,
    /// `tabindex="0"`, `draggable="true"`, `aria-grabbed="false"` and `attrs`.
    fn append_item(&mut self, item: &T, attrs: &ItemAttributes) -> Result<(), Self::Error>;

    /// Rewrite the index attribute and label of the row currently rendered at
    /// `attrs.index`, without rebuilding it.
    fn relabel_item(&mut self, attrs: &ItemAttributes) -> Result<(), Self::Error>;

    fn set_grabbed(&mut self, index: usize, mark: GrabMark) -> Result<(), Self::Error>;

    fn focus_item(&mut self, index: usize) -> Result<(), Self::Error>;

    /// Publish a message through the list's live region, creating the region
    /// on first use.
    fn announce(&mut self, message: &str) -> Result<(), Self::Error>;

    /// Clear the container and drop the live region.
    fn teardown(&mut self) -> Result<(), Self::Error>;
}
