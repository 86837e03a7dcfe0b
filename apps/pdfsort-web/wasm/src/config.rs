//! Reading the options object passed from JavaScript
//!
//! Option objects mix plain settings with DOM nodes and functions. The plain
//! settings are copied into a fresh object and deserialized with
//! `serde-wasm-bindgen`; nodes and functions are read with `Reflect`.

use js_sys::{Array, Function, Object, Reflect};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Keys understood by `SortOptions`
pub const SORT_OPTION_KEYS: &[&str] = &[
    "handle",
    "animation",
    "easing",
    "ghostClass",
    "chosenClass",
    "dragClass",
    "itemDataAttribute",
    "announceDelayMs",
];

/// Keys understood by `FileListOptions` on top of [`SORT_OPTION_KEYS`]
pub const FILE_OPTION_KEYS: &[&str] = &["showRemoveButton", "showDragHandle", "itemClassName"];

fn get(options: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    if !options.is_object() {
        return Err(JsValue::from_str("Options must be an object"));
    }
    Reflect::get(options, &JsValue::from_str(key))
}

fn is_missing(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

pub fn container(options: &JsValue) -> Result<HtmlElement, JsValue> {
    let value = get(options, "container")?;
    if is_missing(&value) {
        return Err(JsValue::from_str("Missing container element"));
    }
    value
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str("container must be an HTMLElement"))
}

pub fn required_function(options: &JsValue, key: &str) -> Result<Function, JsValue> {
    optional_function(options, key)?
        .ok_or_else(|| JsValue::from_str(&format!("Missing {} callback", key)))
}

pub fn optional_function(options: &JsValue, key: &str) -> Result<Option<Function>, JsValue> {
    let value = get(options, key)?;
    if is_missing(&value) {
        return Ok(None);
    }
    value
        .dyn_into::<Function>()
        .map(Some)
        .map_err(|_| JsValue::from_str(&format!("{} must be a function", key)))
}

/// An array-valued option; a missing key reads as empty.
pub fn array(options: &JsValue, key: &str) -> Result<Array, JsValue> {
    let value = get(options, key)?;
    if is_missing(&value) {
        return Ok(Array::new());
    }
    if !Array::is_array(&value) {
        return Err(JsValue::from_str(&format!("{} must be an array", key)));
    }
    Ok(Array::from(&value))
}

/// Deserialize the plain settings named by `keys`; keys left out or set to
/// `undefined` take their defaults.
pub fn settings<O: DeserializeOwned>(options: &JsValue, keys: &[&str]) -> Result<O, JsValue> {
    let plain = Object::new();
    for key in keys {
        let value = get(options, key)?;
        if !value.is_undefined() {
            Reflect::set(&plain, &JsValue::from_str(key), &value)?;
        }
    }
    serde_wasm_bindgen::from_value(plain.into())
        .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_keys_do_not_shadow_sort_keys() {
        for key in FILE_OPTION_KEYS {
            assert!(!SORT_OPTION_KEYS.contains(key), "{} listed twice", key);
        }
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use pdfsort_core::{FileListOptions, SortOptions};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn options_from(source: &str) -> JsValue {
        Function::new_no_args(&format!("return {};", source))
            .call0(&JsValue::NULL)
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_settings_skip_dom_values() {
        let options = options_from(
            "{ container: document.body, onReorder: () => {}, animation: 120, handle: '.grip' }",
        );
        let parsed: SortOptions = settings(&options, SORT_OPTION_KEYS).unwrap();
        assert_eq!(parsed.animation, 120);
        assert_eq!(parsed.handle.as_deref(), Some(".grip"));
        assert_eq!(parsed.ghost_class, "sortable-ghost");
    }

    #[wasm_bindgen_test]
    fn test_file_settings_merge_both_key_sets() {
        let options = options_from("{ showRemoveButton: false, easing: 'linear' }");
        let keys: Vec<&str> = SORT_OPTION_KEYS
            .iter()
            .chain(FILE_OPTION_KEYS)
            .copied()
            .collect();
        let parsed: FileListOptions = settings(&options, &keys).unwrap();
        assert!(!parsed.show_remove_button);
        assert!(parsed.show_drag_handle);
        assert_eq!(parsed.sort.easing, "linear");
    }

    #[wasm_bindgen_test]
    fn test_missing_container_is_reported() {
        let err = container(&options_from("{}")).unwrap_err();
        assert_eq!(err.as_string().as_deref(), Some("Missing container element"));
    }

    #[wasm_bindgen_test]
    fn test_optional_function_rejects_non_functions() {
        let options = options_from("{ onRemove: 3 }");
        assert!(optional_function(&options, "onRemove").is_err());
        assert!(optional_function(&options, "getItemLabel").unwrap().is_none());
    }
}
