//! Shared live region for screen reader announcements

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

const VISUALLY_HIDDEN: &str = "position:absolute;width:1px;height:1px;padding:0;margin:-1px;overflow:hidden;clip:rect(0,0,0,0);white-space:nowrap;border:0;";

/// One polite live region per list, created on the first announcement and
/// removed when the list is destroyed.
pub struct LiveRegion {
    element: Option<HtmlElement>,
    delay_ms: i32,
}

impl LiveRegion {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            element: None,
            delay_ms: i32::try_from(delay_ms).unwrap_or(i32::MAX),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.element.is_some()
    }

    fn ensure(&mut self, document: &Document) -> Result<HtmlElement, JsValue> {
        if let Some(element) = &self.element {
            return Ok(element.clone());
        }

        let element: HtmlElement = document.create_element("div")?.dyn_into()?;
        element.set_attribute("role", "status")?;
        element.set_attribute("aria-live", "polite")?;
        element.set_attribute("aria-atomic", "true")?;
        element.set_class_name("sr-only");
        element.style().set_css_text(VISUALLY_HIDDEN);

        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("No document body available"))?;
        body.append_child(&element)?;

        self.element = Some(element.clone());
        Ok(element)
    }

    /// Clear the region now and write `message` after the configured delay,
    /// so the text changes even when the message repeats.
    pub fn announce(&mut self, document: &Document, message: &str) -> Result<(), JsValue> {
        let region = self.ensure(document)?;
        region.set_text_content(Some(""));

        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
        let message = message.to_string();
        let write = Closure::once_into_js(move || {
            region.set_text_content(Some(&message));
        });
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            write.unchecked_ref(),
            self.delay_ms,
        )?;
        Ok(())
    }

    pub fn remove(&mut self) {
        if let Some(element) = self.element.take() {
            element.remove();
        }
    }
}
