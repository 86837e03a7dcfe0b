//! Sortable list of uploaded files
//!
//! Rows are built here rather than by the page: an optional grip icon, the
//! file name, its size and an optional remove button.
//!
//! ```javascript
//! const list = createFileListDragDrop({
//!   container: document.getElementById('file-list'),
//!   files: Array.from(input.files),
//!   onReorder: (files) => { state.files = files; },
//!   onRemove: (file, index) => { state.files.splice(index, 1); },
//! });
//! ```

use js_sys::{Array, Function};
use pdfsort_core::{format_file_size, FileListOptions, ItemLabel, SortableList};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, File, HtmlElement};

use crate::binding::{to_js, Callbacks, ListBinding};
use crate::config::{self, FILE_OPTION_KEYS, SORT_OPTION_KEYS};
use crate::dom::{DomSurface, RowRenderer};

/// Id of the page element describing the keyboard controls
pub const INSTRUCTIONS_ID: &str = "drag-instructions";

const GRIP_ICON: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="9" cy="5" r="1"/><circle cx="15" cy="5" r="1"/><circle cx="9" cy="12" r="1"/><circle cx="15" cy="12" r="1"/><circle cx="9" cy="19" r="1"/><circle cx="15" cy="19" r="1"/></svg>"#;
const TRASH_ICON: &str = r#"<i data-lucide="trash-2" class="w-4 h-4"></i>"#;

const INFO_CLASS: &str = "flex items-center gap-2 overflow-hidden flex-1";
const HANDLE_CLASS: &str = "drag-handle text-gray-400 p-1 rounded transition-colors flex-shrink-0";
const NAME_CLASS: &str = "truncate font-medium text-gray-200";
const SIZE_CLASS: &str = "flex-shrink-0 text-gray-400 text-xs";
const REMOVE_CLASS: &str = "ml-4 text-red-400 hover:text-red-300 flex-shrink-0 p-1 rounded focus:outline-none focus:ring-2 focus:ring-red-400 focus:ring-offset-2 focus:ring-offset-gray-700";

/// Size text, from the page's `formatFileSize` when given
#[derive(Clone, Default)]
pub struct SizeFormatter {
    custom: Option<Function>,
}

impl SizeFormatter {
    pub fn new(custom: Option<Function>) -> Self {
        Self { custom }
    }

    pub fn format(&self, bytes: f64) -> String {
        self.custom
            .as_ref()
            .and_then(|f| f.call1(&JsValue::NULL, &JsValue::from_f64(bytes)).ok())
            .and_then(|value| value.as_string())
            .unwrap_or_else(|| format_file_size(bytes.max(0.0) as u64))
    }
}

/// `"<name>, <size>"` for labels, the bare name for announcements
pub struct FileLabel {
    sizes: SizeFormatter,
}

impl ItemLabel<File> for FileLabel {
    fn label(&self, file: &File, _index: usize) -> String {
        file_label(&file.name(), &self.sizes.format(file.size()))
    }

    fn spoken_name(&self, file: &File, _index: usize) -> String {
        file.name()
    }
}

fn file_label(name: &str, size: &str) -> String {
    format!("{}, {}", name, size)
}

fn remove_label(name: &str) -> String {
    format!("Remove {}", name)
}

pub struct FileRowRenderer {
    class_name: String,
    show_drag_handle: bool,
    show_remove_button: bool,
    sizes: SizeFormatter,
}

impl FileRowRenderer {
    fn element(document: &Document, tag: &str, class_name: &str) -> Result<HtmlElement, JsValue> {
        let element: HtmlElement = document.create_element(tag)?.dyn_into()?;
        element.set_class_name(class_name);
        Ok(element)
    }
}

impl RowRenderer<File> for FileRowRenderer {
    fn render(
        &self,
        document: &Document,
        file: &File,
        _index: usize,
    ) -> Result<HtmlElement, JsValue> {
        let name = file.name();

        let row = Self::element(document, "div", &self.class_name)?;
        row.set_attribute("data-file-name", &name)?;
        row.set_attribute("aria-describedby", INSTRUCTIONS_ID)?;

        let info = Self::element(document, "div", INFO_CLASS)?;
        if self.show_drag_handle {
            let handle = Self::element(document, "div", HANDLE_CLASS)?;
            handle.set_attribute("aria-hidden", "true")?;
            handle.set_inner_html(GRIP_ICON);
            info.append_child(&handle)?;
        }

        let name_span = Self::element(document, "span", NAME_CLASS)?;
        name_span.set_text_content(Some(&name));
        name_span.set_title(&name);
        info.append_child(&name_span)?;

        let size_span = Self::element(document, "span", SIZE_CLASS)?;
        size_span.set_text_content(Some(&format!("({})", self.sizes.format(file.size()))));
        info.append_child(&size_span)?;
        row.append_child(&info)?;

        if self.show_remove_button {
            let button = Self::element(document, "button", REMOVE_CLASS)?;
            button.set_attribute("type", "button")?;
            button.set_attribute("data-action", "remove")?;
            button.set_attribute("aria-label", &remove_label(&name))?;
            button.set_inner_html(TRASH_ICON);
            row.append_child(&button)?;
        }

        Ok(row)
    }
}

/// Handle returned by [`create_file_list_drag_drop`]
#[wasm_bindgen]
pub struct FileListDragDrop {
    binding: ListBinding<File, FileRowRenderer, FileLabel>,
}

#[wasm_bindgen]
impl FileListDragDrop {
    /// Replace the files and re-render. Any grab is dropped.
    pub fn refresh(&self, files: Array) -> Result<(), JsValue> {
        self.binding.refresh(files_from(&files)?)
    }

    /// Current order as a new array
    #[wasm_bindgen(js_name = getFiles)]
    pub fn get_files(&self) -> Result<Array, JsValue> {
        Ok(self.binding.items()?.into_iter().collect())
    }

    #[wasm_bindgen(js_name = itemCount)]
    pub fn item_count(&self) -> Result<u32, JsValue> {
        Ok(self.binding.len()? as u32)
    }

    /// Index of the grabbed row, `undefined` when none
    #[wasm_bindgen(js_name = grabbedIndex)]
    pub fn grabbed_index(&self) -> Result<Option<u32>, JsValue> {
        Ok(self.binding.grabbed_index()?.map(|i| i as u32))
    }

    pub fn destroy(&mut self) -> Result<(), JsValue> {
        self.binding.destroy()
    }
}

fn files_from(files: &Array) -> Result<Vec<File>, JsValue> {
    files
        .iter()
        .map(|value| {
            value
                .dyn_into::<File>()
                .map_err(|_| JsValue::from_str("files must contain only File objects"))
        })
        .collect()
}

/// Render `options.files` into `options.container` and make the rows
/// reorderable.
#[wasm_bindgen(js_name = createFileListDragDrop)]
pub fn create_file_list_drag_drop(options: &JsValue) -> Result<FileListDragDrop, JsValue> {
    let container = config::container(options)?;
    let document = container
        .owner_document()
        .ok_or_else(|| JsValue::from_str("No document available"))?;
    let files = files_from(&config::array(options, "files")?)?;

    let keys: Vec<&str> = SORT_OPTION_KEYS
        .iter()
        .chain(FILE_OPTION_KEYS)
        .copied()
        .collect();
    let settings: FileListOptions = config::settings(options, &keys)?;
    settings.validate().map_err(to_js)?;

    let callbacks = Callbacks {
        on_reorder: config::required_function(options, "onReorder")?,
        on_remove: config::optional_function(options, "onRemove")?,
    };
    let sizes = SizeFormatter::new(config::optional_function(options, "formatFileSize")?);

    let sort = settings.sort_options();
    let renderer = FileRowRenderer {
        class_name: settings.item_class_name,
        show_drag_handle: settings.show_drag_handle,
        show_remove_button: settings.show_remove_button && callbacks.on_remove.is_some(),
        sizes: sizes.clone(),
    };
    let surface = DomSurface::new(document, container, renderer, sort.announce_delay_ms);
    let list = SortableList::new(surface, files, sort, FileLabel { sizes }).map_err(to_js)?;

    Ok(FileListDragDrop {
        binding: ListBinding::attach(list, callbacks)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_label_joins_name_and_size() {
        assert_eq!(file_label("scan.jpg", "1.5 KB"), "scan.jpg, 1.5 KB");
    }

    #[test]
    fn test_remove_label_names_file() {
        assert_eq!(remove_label("scan.jpg"), "Remove scan.jpg");
    }

    #[test]
    fn test_grip_icon_has_six_dots() {
        assert_eq!(GRIP_ICON.matches("<circle").count(), 6);
    }
}
