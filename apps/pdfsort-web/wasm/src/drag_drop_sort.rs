//! Sortable list of arbitrary items rendered by the page

use js_sys::{Array, Function};
use pdfsort_core::{ItemLabel, PositionalLabel, SortOptions, SortableList};
use wasm_bindgen::prelude::*;

use crate::binding::{to_js, Callbacks, ListBinding};
use crate::config::{self, SORT_OPTION_KEYS};
use crate::dom::{DomSurface, JsRowRenderer};

/// Names items with the page's `getItemLabel(item, index)`, falling back to
/// `Item <n>` when it is absent or returns something other than a string.
pub struct JsLabel {
    get_label: Option<Function>,
}

impl ItemLabel<JsValue> for JsLabel {
    fn label(&self, item: &JsValue, index: usize) -> String {
        self.get_label
            .as_ref()
            .and_then(|f| f.call2(&JsValue::NULL, item, &JsValue::from(index as u32)).ok())
            .and_then(|value| value.as_string())
            .unwrap_or_else(|| PositionalLabel.label(item, index))
    }
}

/// Handle returned by [`create_drag_drop_sort`]
#[wasm_bindgen]
pub struct DragDropSort {
    binding: ListBinding<JsValue, JsRowRenderer, JsLabel>,
}

#[wasm_bindgen]
impl DragDropSort {
    /// Replace the items and re-render. Any grab is dropped.
    pub fn refresh(&self, items: Array) -> Result<(), JsValue> {
        self.binding.refresh(items.iter().collect())
    }

    /// Current order as a new array
    #[wasm_bindgen(js_name = getItems)]
    pub fn get_items(&self) -> Result<Array, JsValue> {
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

    /// Detach SortableJS and the key listeners, empty the container and remove
    /// the live region.
    pub fn destroy(&mut self) -> Result<(), JsValue> {
        self.binding.destroy()
    }
}

/// Render `options.items` through `options.renderItem` and make the rows
/// reorderable.
///
/// Required: `container`, `items`, `renderItem(item, index)`,
/// `onReorder(items)`. Optional: `onRemove(item, index)`,
/// `getItemLabel(item, index)` and the plain settings of `SortOptions`.
#[wasm_bindgen(js_name = createDragDropSort)]
pub fn create_drag_drop_sort(options: &JsValue) -> Result<DragDropSort, JsValue> {
    let container = config::container(options)?;
    let document = container
        .owner_document()
        .ok_or_else(|| JsValue::from_str("No document available"))?;
    let items: Vec<JsValue> = config::array(options, "items")?.iter().collect();
    let settings: SortOptions = config::settings(options, SORT_OPTION_KEYS)?;

    let renderer = JsRowRenderer::new(config::required_function(options, "renderItem")?);
    let callbacks = Callbacks {
        on_reorder: config::required_function(options, "onReorder")?,
        on_remove: config::optional_function(options, "onRemove")?,
    };
    let labeler = JsLabel {
        get_label: config::optional_function(options, "getItemLabel")?,
    };

    let surface = DomSurface::new(document, container, renderer, settings.announce_delay_ms);
    let list = SortableList::new(surface, items, settings, labeler).map_err(to_js)?;

    Ok(DragDropSort {
        binding: ListBinding::attach(list, callbacks)?,
    })
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    fn container() -> HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let container: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
        document.body().unwrap().append_child(&container).unwrap();
        container
    }

    fn build(container: &HtmlElement, extra: &str) -> JsValue {
        let make = Function::new_with_args(
            "container",
            &format!(
                "return {{ container, items: ['A', 'B', 'C'], \
                 renderItem: (item) => {{ const el = document.createElement('div'); el.textContent = item; return el; }}, \
                 onReorder: () => {{}} {} }};",
                extra
            ),
        );
        make.call1(&JsValue::NULL, container).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_missing_render_item_is_an_error() {
        let options = Function::new_no_args(
            "return { container: document.body, items: [], onReorder: () => {} };",
        )
        .call0(&JsValue::NULL)
        .unwrap();
        let err = create_drag_drop_sort(&options).err().unwrap();
        assert_eq!(err.as_string().as_deref(), Some("Missing renderItem callback"));
    }

    #[wasm_bindgen_test]
    fn test_custom_labels_and_attribute() {
        let container = container();
        let options = build(
            &container,
            ", getItemLabel: (item) => `Page ${item}`, itemDataAttribute: 'data-slot'",
        );
        let mut list = create_drag_drop_sort(&options).unwrap();

        let first = container.children().item(0).unwrap();
        assert_eq!(first.get_attribute("data-slot").as_deref(), Some("0"));
        assert!(first
            .get_attribute("aria-label")
            .unwrap()
            .starts_with("Page A. Position 1 of 3."));
        assert_eq!(list.item_count().unwrap(), 3);
        assert_eq!(list.grabbed_index().unwrap(), None);

        list.destroy().unwrap();
        assert!(list.item_count().is_err());
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_label_callback_reading_handle_gets_busy_error() {
        let container = container();
        let seen = Array::new();
        let holder = Object::new();
        Reflect::set(&holder, &"seen".into(), &seen).unwrap();
        let get_label = Function::new_with_args(
            "item",
            "if (this.handle) { \
               try { this.seen.push(this.handle.getItems().length); } \
               catch (e) { this.seen.push(String(e)); } \
             } \
             return `Page ${item}`;",
        )
        .bind(&holder);

        let options = build(&container, "");
        Reflect::set(&options, &"getItemLabel".into(), &get_label).unwrap();
        let handle = JsValue::from(create_drag_drop_sort(&options).unwrap());
        Reflect::set(&holder, &"handle".into(), &handle).unwrap();

        let call = |name: &str, args: &Array| {
            let method: Function = Reflect::get(&handle, &name.into())
                .unwrap()
                .dyn_into()
                .unwrap();
            Reflect::apply(&method, &handle, args)
        };

        let refreshed = Array::of2(&"X".into(), &"Y".into());
        call("refresh", &Array::of1(&refreshed)).unwrap();

        assert_eq!(seen.length(), 2);
        assert_eq!(seen.get(0).as_string().as_deref(), Some("List is busy"));
        let items: Array = call("getItems", &Array::new()).unwrap().dyn_into().unwrap();
        assert_eq!(items.length(), 2);
        assert!(container
            .children()
            .item(1)
            .unwrap()
            .get_attribute("aria-label")
            .unwrap()
            .starts_with("Page Y."));

        call("destroy", &Array::new()).unwrap();
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_invalid_settings_are_rejected() {
        let container = container();
        let options = build(&container, ", itemDataAttribute: 'slot'");
        assert!(create_drag_drop_sort(&options).is_err());
        container.remove();
    }
}
