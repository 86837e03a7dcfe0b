//! WASM bindings for accessible drag-and-drop list reordering
//!
//! Used by the PDF tool pages to let users put uploaded files (or any other
//! rendered rows) in order with the mouse, touch or keyboard.
//!
//! ## Architecture
//!
//! - Order, grab state and announcement wording live in `pdfsort-core`
//! - Rows are rendered and labelled here through web-sys
//! - Pointer dragging is delegated to SortableJS when the page loads it
//! - JavaScript only supplies the container, the items and the callbacks
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { createDragDropSort, createFileListDragDrop } from './pkg/pdfsort_wasm.js';
//!
//! await init();
//!
//! // Any items, rendered by the page
//! const pages = createDragDropSort({
//!   container: document.getElementById('pages'),
//!   items: pages,
//!   renderItem: (page, index) => renderThumbnail(page, index),
//!   getItemLabel: (page) => `Page ${page.number}`,
//!   onReorder: (pages) => { state.pages = pages; },
//! });
//!
//! // Uploaded files, rendered as file rows
//! const files = createFileListDragDrop({
//!   container: document.getElementById('file-list'),
//!   files: Array.from(input.files),
//!   onReorder: (files) => { state.files = files; },
//!   onRemove: (file, index) => { state.files.splice(index, 1); },
//! });
//!
//! files.destroy();
//! ```

pub mod binding;
pub mod config;
pub mod dom;
pub mod drag_drop_sort;
pub mod file_list;
pub mod live_region;
pub mod sortable;

use wasm_bindgen::prelude::*;

// Re-export main types for JavaScript
pub use drag_drop_sort::{create_drag_drop_sort, DragDropSort};
pub use file_list::{create_file_list_drag_drop, FileListDragDrop};

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&JsValue::from_str(&format!(
        "[pdfsort] v{} loaded (SortableJS {})",
        env!("CARGO_PKG_VERSION"),
        if sortable::is_available() {
            "found"
        } else {
            "not loaded yet"
        }
    )));
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Human-readable file size, e.g. `1.5 KB`
#[wasm_bindgen(js_name = formatFileSize)]
pub fn format_file_size(bytes: f64) -> String {
    pdfsort_core::format_file_size(bytes.max(0.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matches_package() {
        assert_eq!(get_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_format_file_size_clamps_negative() {
        assert_eq!(format_file_size(-5.0), "0 Bytes");
        assert_eq!(format_file_size(1536.0), "1.5 KB");
    }
}
