//! Configuration for sortable lists
//!
//! Options arrive from JavaScript as plain objects with camelCase keys and
//! fall back to the defaults below for anything left out.

use serde::{Deserialize, Serialize};

use crate::error::SortError;
use crate::messages::ListFlavor;

pub const DEFAULT_ANIMATION_MS: u32 = 250;
pub const DEFAULT_EASING: &str = "cubic-bezier(0.25, 1, 0.5, 1)";
pub const DEFAULT_ANNOUNCE_DELAY_MS: u32 = 50;

const DEFAULT_INDEX_ATTRIBUTE: &str = "data-index";
const FILE_INDEX_ATTRIBUTE: &str = "data-file-index";

/// Row classes used by the PDF tool pages for file rows
pub const DEFAULT_FILE_ROW_CLASS: &str = "sortable-item flex items-center justify-between bg-gray-700 p-3 rounded-lg text-sm cursor-grab active:cursor-grabbing";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortOptions {
    /// Selector restricting where a pointer drag may start
    pub handle: Option<String>,
    /// Drop animation duration in milliseconds
    pub animation: u32,
    pub easing: String,
    pub ghost_class: String,
    pub chosen_class: String,
    pub drag_class: String,
    /// Attribute holding each row's index; defaults depend on the flavor
    pub item_data_attribute: Option<String>,
    /// Delay before a cleared live region receives its new text
    pub announce_delay_ms: u32,
    #[serde(skip)]
    pub flavor: ListFlavor,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            handle: None,
            animation: DEFAULT_ANIMATION_MS,
            easing: DEFAULT_EASING.to_string(),
            ghost_class: "sortable-ghost".to_string(),
            chosen_class: "sortable-chosen".to_string(),
            drag_class: "sortable-drag".to_string(),
            item_data_attribute: None,
            announce_delay_ms: DEFAULT_ANNOUNCE_DELAY_MS,
            flavor: ListFlavor::Generic,
        }
    }
}

impl SortOptions {
    /// The positional attribute written on every row
    pub fn index_attribute(&self) -> &str {
        match (&self.item_data_attribute, self.flavor) {
            (Some(attr), _) => attr,
            (None, ListFlavor::Generic) => DEFAULT_INDEX_ATTRIBUTE,
            (None, ListFlavor::Files) => FILE_INDEX_ATTRIBUTE,
        }
    }

    pub fn validate(&self) -> Result<(), SortError> {
        let attr = self.index_attribute();
        if !attr.starts_with("data-") || attr.len() <= "data-".len() {
            return Err(SortError::invalid(
                "itemDataAttribute",
                format!("'{}' is not a data-* attribute", attr),
            ));
        }
        if attr.chars().any(char::is_whitespace) {
            return Err(SortError::invalid(
                "itemDataAttribute",
                "attribute names cannot contain whitespace",
            ));
        }

        for (field, class) in [
            ("ghostClass", &self.ghost_class),
            ("chosenClass", &self.chosen_class),
            ("dragClass", &self.drag_class),
        ] {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(SortError::invalid(
                    field,
                    format!("'{}' must be a single class name", class),
                ));
            }
        }

        if self.easing.trim().is_empty() {
            return Err(SortError::invalid("easing", "easing cannot be empty"));
        }

        if let Some(handle) = &self.handle {
            if handle.trim().is_empty() {
                return Err(SortError::invalid("handle", "selector cannot be empty"));
            }
        }

        Ok(())
    }
}

/// Options for the file-row variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileListOptions {
    pub show_remove_button: bool,
    pub show_drag_handle: bool,
    pub item_class_name: String,
    #[serde(flatten)]
    pub sort: SortOptions,
}

impl Default for FileListOptions {
    fn default() -> Self {
        Self {
            show_remove_button: true,
            show_drag_handle: true,
            item_class_name: DEFAULT_FILE_ROW_CLASS.to_string(),
            sort: SortOptions::default(),
        }
    }
}

impl FileListOptions {
    /// Sort options with the file wording applied
    pub fn sort_options(&self) -> SortOptions {
        SortOptions {
            flavor: ListFlavor::Files,
            ..self.sort.clone()
        }
    }

    pub fn validate(&self) -> Result<(), SortError> {
        self.sort_options().validate()
    }
}
