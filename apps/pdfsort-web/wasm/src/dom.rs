//! web-sys implementation of the list surface
//!
//! Rows are direct children of the container, so a row's position among the
//! container's children is its index.

use js_sys::Function;
use pdfsort_core::{
    surface::{ROLE_LIST, ROLE_LISTITEM},
    GrabMark, ItemAttributes, ListSurface, KEYBOARD_GRABBED_CLASS,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::live_region::LiveRegion;

/// Class every row carries regardless of how it was rendered
pub const ROW_CLASS: &str = "sortable-item";

/// Builds the element for one item
pub trait RowRenderer<T> {
    fn render(&self, document: &Document, item: &T, index: usize) -> Result<HtmlElement, JsValue>;
}

/// Calls a page-supplied `renderItem(item, index)` function
pub struct JsRowRenderer {
    render: Function,
}

impl JsRowRenderer {
    pub fn new(render: Function) -> Self {
        Self { render }
    }
}

impl RowRenderer<JsValue> for JsRowRenderer {
    fn render(
        &self,
        _document: &Document,
        item: &JsValue,
        index: usize,
    ) -> Result<HtmlElement, JsValue> {
        let element = self
            .render
            .call2(&JsValue::NULL, item, &JsValue::from(index as u32))?;
        element
            .dyn_into::<HtmlElement>()
            .map_err(|_| JsValue::from_str("renderItem must return an HTMLElement"))
    }
}

pub struct DomSurface<R> {
    document: Document,
    container: HtmlElement,
    renderer: R,
    live_region: LiveRegion,
}

impl<R> DomSurface<R> {
    pub fn new(
        document: Document,
        container: HtmlElement,
        renderer: R,
        announce_delay_ms: u32,
    ) -> Self {
        Self {
            document,
            container,
            renderer,
            live_region: LiveRegion::new(announce_delay_ms),
        }
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    fn row(&self, index: usize) -> Result<Element, JsValue> {
        self.container
            .children()
            .item(index as u32)
            .ok_or_else(|| JsValue::from_str(&format!("No row at index {}", index)))
    }
}

impl<T, R> ListSurface<T> for DomSurface<R>
where
    R: RowRenderer<T>,
{
    type Error = JsValue;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.container.set_inner_html("");
        Ok(())
    }

    fn set_container_label(&mut self, label: &str) -> Result<(), Self::Error> {
        self.container.set_attribute("role", ROLE_LIST)?;
        self.container.set_attribute("aria-label", label)
    }

    fn append_item(&mut self, item: &T, attrs: &ItemAttributes) -> Result<(), Self::Error> {
        let row = self.renderer.render(&self.document, item, attrs.index)?;
        row.class_list().add_1(ROW_CLASS)?;
        row.set_attribute("role", ROLE_LISTITEM)?;
        row.set_attribute("tabindex", "0")?;
        row.set_draggable(true);
        row.set_attribute("aria-grabbed", GrabMark::Released.aria_grabbed())?;
        row.set_attribute(&attrs.index_attribute, &attrs.index.to_string())?;
        row.set_attribute("aria-label", &attrs.aria_label)?;
        self.container.append_child(&row)?;
        Ok(())
    }

    fn relabel_item(&mut self, attrs: &ItemAttributes) -> Result<(), Self::Error> {
        let row = self.row(attrs.index)?;
        row.set_attribute(&attrs.index_attribute, &attrs.index.to_string())?;
        row.set_attribute("aria-label", &attrs.aria_label)
    }

    fn set_grabbed(&mut self, index: usize, mark: GrabMark) -> Result<(), Self::Error> {
        let row = self.row(index)?;
        row.set_attribute("aria-grabbed", mark.aria_grabbed())?;
        row.class_list()
            .toggle_with_force(KEYBOARD_GRABBED_CLASS, mark == GrabMark::Keyboard)?;
        Ok(())
    }

    fn focus_item(&mut self, index: usize) -> Result<(), Self::Error> {
        self.row(index)?.dyn_into::<HtmlElement>()?.focus()
    }

    fn announce(&mut self, message: &str) -> Result<(), Self::Error> {
        self.live_region.announce(&self.document, message)
    }

    fn teardown(&mut self) -> Result<(), Self::Error> {
        self.container.set_inner_html("");
        self.live_region.remove();
        Ok(())
    }
}

/// The row (a direct child of `container` carrying `index_attribute`) that an
/// event target sits in, with its index.
pub fn locate_row(
    container: &HtmlElement,
    target: &Element,
    index_attribute: &str,
) -> Option<(Element, usize)> {
    let row = target
        .closest(&format!("[{}]", index_attribute))
        .ok()
        .flatten()?;
    let is_direct_child = row
        .parent_element()
        .map(|parent| container.is_same_node(Some(parent.as_ref())))
        .unwrap_or(false);
    if !is_direct_child {
        return None;
    }
    let index = row.get_attribute(index_attribute)?.parse().ok()?;
    Some((row, index))
}

/// Whether `target` is a control nested inside `row` rather than the row
pub fn is_nested_control(row: &Element, target: &Element) -> bool {
    if target == row {
        return false;
    }
    target
        .closest("button, input, select, textarea, a[href]")
        .ok()
        .flatten()
        .filter(|control| control != row)
        .map(|control| row.contains(Some(control.as_ref())))
        .unwrap_or(false)
}
