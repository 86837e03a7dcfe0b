//! JavaScript bindings for SortableJS
//!
//! Pointer dragging, ghost rendering and the drop animation are left to
//! SortableJS, loaded by the page as the global `Sortable`. It moves the row
//! in the DOM itself and then reports the old and new index.

use js_sys::{Object, Reflect};
use pdfsort_core::SortOptions;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Sortable)]
    pub type Sortable;

    /// `Sortable.create(element, options)`
    #[wasm_bindgen(static_method_of = Sortable, catch)]
    pub fn create(element: &HtmlElement, options: &JsValue) -> Result<Sortable, JsValue>;

    #[wasm_bindgen(method)]
    pub fn destroy(this: &Sortable);

    /// Event object passed to `onStart` / `onEnd`
    pub type SortableEvent;

    #[wasm_bindgen(method, getter, js_name = oldIndex)]
    pub fn old_index(this: &SortableEvent) -> Option<u32>;

    #[wasm_bindgen(method, getter, js_name = newIndex)]
    pub fn new_index(this: &SortableEvent) -> Option<u32>;
}

/// Whether the page has loaded SortableJS
pub fn is_available() -> bool {
    Reflect::has(&js_sys::global(), &JsValue::from_str("Sortable")).unwrap_or(false)
}

/// A live SortableJS instance and the closures it calls into
pub struct SortableEngine {
    sortable: Sortable,
    _on_start: Closure<dyn FnMut(SortableEvent)>,
    _on_end: Closure<dyn FnMut(SortableEvent)>,
}

impl SortableEngine {
    /// Attach SortableJS to `container`.
    ///
    /// `on_start` receives the index of the picked-up row; `on_end` receives
    /// the old and new index after SortableJS has moved the row.
    pub fn attach<S, E>(
        container: &HtmlElement,
        options: &SortOptions,
        mut on_start: S,
        mut on_end: E,
    ) -> Result<Self, JsValue>
    where
        S: FnMut(Option<usize>) + 'static,
        E: FnMut(Option<usize>, Option<usize>) + 'static,
    {
        let on_start = Closure::wrap(Box::new(move |event: SortableEvent| {
            on_start(event.old_index().map(|i| i as usize));
        }) as Box<dyn FnMut(SortableEvent)>);

        let on_end = Closure::wrap(Box::new(move |event: SortableEvent| {
            on_end(
                event.old_index().map(|i| i as usize),
                event.new_index().map(|i| i as usize),
            );
        }) as Box<dyn FnMut(SortableEvent)>);

        let config = engine_options(options)?;
        Reflect::set(&config, &"onStart".into(), on_start.as_ref())?;
        Reflect::set(&config, &"onEnd".into(), on_end.as_ref())?;

        let sortable = Sortable::create(container, &config)?;

        Ok(Self {
            sortable,
            _on_start: on_start,
            _on_end: on_end,
        })
    }

    /// Detach from the container and release the callbacks.
    pub fn destroy(self) {
        self.sortable.destroy();
    }
}

/// SortableJS configuration without the event hooks
fn engine_options(options: &SortOptions) -> Result<Object, JsValue> {
    let config = Object::new();
    Reflect::set(&config, &"animation".into(), &options.animation.into())?;
    Reflect::set(&config, &"easing".into(), &options.easing.as_str().into())?;
    Reflect::set(&config, &"ghostClass".into(), &options.ghost_class.as_str().into())?;
    Reflect::set(&config, &"chosenClass".into(), &options.chosen_class.as_str().into())?;
    Reflect::set(&config, &"dragClass".into(), &options.drag_class.as_str().into())?;
    Reflect::set(&config, &"forceFallback".into(), &JsValue::FALSE)?;
    if let Some(handle) = &options.handle {
        Reflect::set(&config, &"handle".into(), &handle.as_str().into())?;
    }
    Ok(config)
}
