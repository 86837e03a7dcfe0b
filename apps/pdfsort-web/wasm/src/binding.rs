//! Glue between a [`SortableList`] and the live page
//!
//! The list sits in an `Rc<RefCell<Option<..>>>` shared by the container
//! listeners and the SortableJS hooks. Every handler takes the borrow, runs one
//! controller operation, drops the borrow and only then calls into JavaScript,
//! so `onReorder` / `onRemove` may call `refresh` or `destroy` on the handle.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function};
use pdfsort_core::{ItemLabel, KeyInput, ListEvent, SortError, SortOptions, SortableList};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Element, Event, HtmlElement, KeyboardEvent};

use crate::dom::{is_nested_control, locate_row, DomSurface, RowRenderer};
use crate::sortable::{self, SortableEngine};

type SharedList<T, R, L> = Rc<RefCell<Option<SortableList<T, DomSurface<R>, L>>>>;
type Listener = Closure<dyn FnMut(Event)>;

/// Selector for the per-row remove button
pub const REMOVE_ACTION_SELECTOR: &str = "[data-action=\"remove\"]";

/// Page callbacks
pub struct Callbacks {
    pub on_reorder: Function,
    pub on_remove: Option<Function>,
}

impl Callbacks {
    /// Deliver an event to the page. Exceptions thrown by the callback are
    /// logged and swallowed so the list stays usable.
    pub fn dispatch<T: Into<JsValue>>(&self, event: ListEvent<T>) {
        let result = match event {
            ListEvent::Reordered(items) => {
                let order: Array = items.into_iter().map(Into::<JsValue>::into).collect();
                self.on_reorder.call1(&JsValue::NULL, &order)
            }
            ListEvent::Removed { item, index } => match &self.on_remove {
                Some(on_remove) => {
                    on_remove.call2(&JsValue::NULL, &item.into(), &JsValue::from(index as u32))
                }
                None => Ok(JsValue::UNDEFINED),
            },
        };

        if let Err(err) = result {
            console::error_2(&JsValue::from_str("[pdfsort] callback threw:"), &err);
        }
    }
}

/// Map a controller error onto the JavaScript boundary
pub fn to_js(err: SortError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn report(err: SortError) {
    console::error_1(&JsValue::from_str(&format!("[pdfsort] {}", err)));
}

fn destroyed() -> JsValue {
    JsValue::from_str("List has been destroyed")
}

fn busy() -> JsValue {
    JsValue::from_str("List is busy")
}

/// Run `f` on the list unless it is destroyed or already borrowed further up
/// the stack.
fn with_list<T, R, L, O>(
    list: &SharedList<T, R, L>,
    f: impl FnOnce(&mut SortableList<T, DomSurface<R>, L>) -> O,
) -> Option<O> {
    let mut guard = list.try_borrow_mut().ok()?;
    guard.as_mut().map(f)
}

/// A list attached to its container
pub struct ListBinding<T, R, L> {
    list: SharedList<T, R, L>,
    container: HtmlElement,
    engine: Option<SortableEngine>,
    listeners: Vec<(&'static str, Listener)>,
}

impl<T, R, L> ListBinding<T, R, L>
where
    T: Clone + Into<JsValue> + 'static,
    R: RowRenderer<T> + 'static,
    L: ItemLabel<T> + 'static,
{
    /// Wire keyboard, remove-button and drag handling for an already rendered
    /// list.
    pub fn attach(
        mut list: SortableList<T, DomSurface<R>, L>,
        callbacks: Callbacks,
    ) -> Result<Self, JsValue> {
        list.set_removable(callbacks.on_remove.is_some());

        let container = list.surface().container().clone();
        let index_attribute = list.options().index_attribute().to_string();
        let options = list.options().clone();
        let list = Rc::new(RefCell::new(Some(list)));
        let callbacks = Rc::new(callbacks);

        let mut binding = Self {
            list,
            container,
            engine: None,
            listeners: Vec::new(),
        };

        let keydown = binding.keydown_listener(&index_attribute, Rc::clone(&callbacks));
        binding.listen("keydown", keydown)?;
        let click = binding.click_listener(&index_attribute, Rc::clone(&callbacks));
        binding.listen("click", click)?;

        if sortable::is_available() {
            binding.engine = Some(binding.attach_engine(&options, callbacks)?);
        } else {
            console::warn_1(&JsValue::from_str(
                "[pdfsort] SortableJS not found; pointer dragging disabled, keyboard reordering still works",
            ));
        }

        Ok(binding)
    }

    fn listen(&mut self, name: &'static str, listener: Listener) -> Result<(), JsValue> {
        self.container
            .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
        self.listeners.push((name, listener));
        Ok(())
    }

    fn keydown_listener(&self, index_attribute: &str, callbacks: Rc<Callbacks>) -> Listener {
        let list = Rc::clone(&self.list);
        let container = self.container.clone();
        let index_attribute = index_attribute.to_string();

        Closure::wrap(Box::new(move |event: Event| {
            let event = match event.dyn_into::<KeyboardEvent>() {
                Ok(event) => event,
                Err(_) => return,
            };
            let target = match event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                Some(target) => target,
                None => return,
            };
            let (row, index) = match locate_row(&container, &target, &index_attribute) {
                Some(found) => found,
                None => return,
            };
            let input = match KeyInput::parse(&event.key(), is_nested_control(&row, &target)) {
                Some(input) => input,
                None => return,
            };

            let response = match with_list(&list, |list| list.handle_key(index, input)) {
                Some(result) => result,
                None => return,
            };

            match response {
                Ok(response) => {
                    if response.handled {
                        event.prevent_default();
                    }
                    if let Some(list_event) = response.event {
                        callbacks.dispatch(list_event);
                    }
                }
                Err(err) => report(err),
            }
        }) as Box<dyn FnMut(Event)>)
    }

    fn click_listener(&self, index_attribute: &str, callbacks: Rc<Callbacks>) -> Listener {
        let list = Rc::clone(&self.list);
        let container = self.container.clone();
        let index_attribute = index_attribute.to_string();

        Closure::wrap(Box::new(move |event: Event| {
            let target = match event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                Some(target) => target,
                None => return,
            };
            let button = match target.closest(REMOVE_ACTION_SELECTOR).ok().flatten() {
                Some(button) => button,
                None => return,
            };
            let index = match locate_row(&container, &button, &index_attribute) {
                Some((_, index)) => index,
                None => return,
            };
            event.stop_propagation();

            let result = match with_list(&list, |list| list.request_removal(index)) {
                Some(result) => result,
                None => return,
            };

            match result {
                Ok(Some(list_event)) => callbacks.dispatch(list_event),
                Ok(None) => {}
                Err(err) => report(err),
            }
        }) as Box<dyn FnMut(Event)>)
    }

    fn attach_engine(
        &self,
        options: &SortOptions,
        callbacks: Rc<Callbacks>,
    ) -> Result<SortableEngine, JsValue> {
        let on_start_list = Rc::clone(&self.list);
        let on_end_list = Rc::clone(&self.list);

        SortableEngine::attach(
            &self.container,
            options,
            move |old_index| {
                let result = with_list(&on_start_list, |list| list.drag_start(old_index));
                let result = match result {
                    Some(result) => result,
                    None => return,
                };
                if let Err(err) = result {
                    report(err);
                }
            },
            move |old_index, new_index| {
                let result = with_list(&on_end_list, |list| list.drag_end(old_index, new_index));
                let result = match result {
                    Some(result) => result,
                    None => return,
                };
                match result {
                    Ok(Some(list_event)) => callbacks.dispatch(list_event),
                    Ok(None) => {}
                    Err(err) => report(err),
                }
            },
        )
    }

    /// Replace the items and re-render.
    pub fn refresh(&self, items: Vec<T>) -> Result<(), JsValue> {
        let mut guard = self.list.try_borrow_mut().map_err(|_| busy())?;
        let list = guard.as_mut().ok_or_else(destroyed)?;
        list.refresh(items).map_err(to_js)
    }

    /// Copy of the current order
    pub fn items(&self) -> Result<Vec<T>, JsValue> {
        self.read(|list| list.to_vec())
    }

    pub fn len(&self) -> Result<usize, JsValue> {
        self.read(|list| list.len())
    }

    pub fn grabbed_index(&self) -> Result<Option<usize>, JsValue> {
        self.read(|list| list.grabbed_index())
    }

    pub fn is_destroyed(&self) -> bool {
        self.list.try_borrow().map(|list| list.is_none()).unwrap_or(false)
    }

    /// Calls from page code that runs mid-operation (`renderItem`,
    /// `getItemLabel`, `formatFileSize`) find the list borrowed and get an
    /// error instead of a panic.
    fn read<O>(
        &self,
        f: impl FnOnce(&SortableList<T, DomSurface<R>, L>) -> O,
    ) -> Result<O, JsValue> {
        let guard = self.list.try_borrow().map_err(|_| busy())?;
        let list = guard.as_ref().ok_or_else(destroyed)?;
        Ok(f(list))
    }

    /// Tear everything down. A second call does nothing.
    pub fn destroy(&mut self) -> Result<(), JsValue> {
        if self.list.try_borrow_mut().is_err() {
            return Err(busy());
        }
        if let Some(engine) = self.engine.take() {
            engine.destroy();
        }
        for (name, listener) in self.listeners.drain(..) {
            self.container
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
        }

        let list = self.list.try_borrow_mut().map_err(|_| busy())?.take();
        match list {
            Some(list) => list.destroy().map(|_| ()).map_err(to_js),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use crate::dom::JsRowRenderer;
    use pdfsort_core::PositionalLabel;
    use wasm_bindgen_test::*;
    use web_sys::{Document, KeyboardEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    fn setup() -> (Document, HtmlElement) {
        let document = web_sys::window().unwrap().document().unwrap();
        let container: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
        document.body().unwrap().append_child(&container).unwrap();
        (document, container)
    }

    fn press(row: &Element, key: &str) {
        let init = KeyboardEventInit::new();
        init.set_key(key);
        init.set_bubbles(true);
        init.set_cancelable(true);
        let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        row.dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_keyboard_reorder_reaches_callback() {
        let (document, container) = setup();
        let renderer = JsRowRenderer::new(Function::new_with_args(
            "item",
            "const el = document.createElement('div'); el.textContent = item; return el;",
        ));
        let surface = DomSurface::new(document, container.clone(), renderer, 0);
        let items: Vec<JsValue> = vec!["A".into(), "B".into(), "C".into()];
        let list = SortableList::new(surface, items, SortOptions::default(), PositionalLabel)
            .unwrap();

        let seen = Array::new();
        let on_reorder = Function::new_with_args("order", "this.push(order);").bind(&seen);
        let mut binding = ListBinding::attach(
            list,
            Callbacks {
                on_reorder,
                on_remove: None,
            },
        )
        .unwrap();

        press(&container.children().item(0).unwrap(), " ");
        press(&container.children().item(0).unwrap(), "ArrowDown");
        assert_eq!(binding.grabbed_index().unwrap(), Some(1));
        press(&container.children().item(1).unwrap(), " ");

        assert_eq!(seen.length(), 1);
        let order: Vec<String> = binding
            .items()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_string())
            .collect();
        assert_eq!(order, vec!["B", "A", "C"]);
        assert_eq!(binding.grabbed_index().unwrap(), None);

        binding.destroy().unwrap();
        assert!(binding.is_destroyed());
        assert!(binding.items().is_err());
        assert!(binding.destroy().is_ok());
        container.remove();
    }
}
