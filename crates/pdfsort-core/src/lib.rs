//! Accessible drag-and-drop reordering for file lists
//!
//! This crate holds the DOM-free half of the sortable list used by the PDF
//! tool pages: the ordered collection, the grab state machine, keyboard and
//! pointer protocols, positional labels and announcement text.
//!
//! Rendering goes through the [`ListSurface`] trait. The browser crate
//! implements it on top of web-sys; [`MemorySurface`] implements it in memory.
//!
//! ```
//! use pdfsort_core::{KeyInput, MemorySurface, PositionalLabel, SortOptions, SortableList};
//!
//! let mut list = SortableList::new(
//!     MemorySurface::new(),
//!     vec!["a.jpg", "b.jpg"],
//!     SortOptions::default(),
//!     PositionalLabel,
//! )
//! .unwrap();
//!
//! list.handle_key(0, KeyInput::parse(" ", false).unwrap()).unwrap();
//! list.handle_key(0, KeyInput::parse("ArrowDown", false).unwrap()).unwrap();
//! assert_eq!(list.items(), &["b.jpg", "a.jpg"]);
//! ```

pub mod controller;
pub mod error;
pub mod format;
pub mod keyboard;
pub mod memory;
pub mod messages;
pub mod options;
pub mod order;
pub mod surface;

pub use controller::{GrabSource, InteractionState, KeyResponse, ListEvent, SortableList};
pub use error::SortError;
pub use format::format_file_size;
pub use keyboard::{Direction, KeyAction, KeyInput};
pub use memory::{MemoryRow, MemorySurface};
pub use messages::{ItemLabel, LabelFn, ListFlavor, PositionalLabel};
pub use options::{FileListOptions, SortOptions};
pub use order::move_item;
pub use surface::{GrabMark, ItemAttributes, ListSurface, KEYBOARD_GRABBED_CLASS};
