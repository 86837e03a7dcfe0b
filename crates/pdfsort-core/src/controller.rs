//! Reorderable list controller
//!
//! Owns the authoritative item order and the grab state, and keeps the
//! rendered rows and their ARIA metadata in step with both. Pointer drags and
//! keyboard moves end in the same [`move_item`] call.
//!
//! Callbacks are not invoked from here. Operations that change the order or
//! membership return a [`ListEvent`] and the caller dispatches it once it no
//! longer holds the list, so a callback is free to call back into the list.

use tracing::{debug, trace};

use crate::error::SortError;
use crate::keyboard::{Direction, KeyAction, KeyInput};
use crate::messages::{ItemLabel, PositionalLabel};
use crate::options::SortOptions;
use crate::order::move_item;
use crate::surface::{GrabMark, ItemAttributes, ListSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabSource {
    Keyboard,
    Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Grabbed { index: usize, via: GrabSource },
}

/// Something the owning page has to hear about
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent<T> {
    /// The order changed; carries the full new order
    Reordered(Vec<T>),
    /// The user removed an item
    Removed { item: T, index: usize },
}

/// Result of delivering a key press
#[derive(Debug, Clone, PartialEq)]
pub struct KeyResponse<T> {
    /// The key was consumed and its default action should be suppressed
    pub handled: bool,
    pub event: Option<ListEvent<T>>,
}

impl<T> KeyResponse<T> {
    fn ignored() -> Self {
        Self {
            handled: false,
            event: None,
        }
    }

    fn handled() -> Self {
        Self {
            handled: true,
            event: None,
        }
    }

    fn with_event(event: ListEvent<T>) -> Self {
        Self {
            handled: true,
            event: Some(event),
        }
    }
}

pub struct SortableList<T, S, L = PositionalLabel> {
    items: Vec<T>,
    state: InteractionState,
    surface: S,
    labeler: L,
    options: SortOptions,
    removable: bool,
}

impl<T, S, L> SortableList<T, S, L>
where
    T: Clone,
    S: ListSurface<T>,
    L: ItemLabel<T>,
{
    /// Validate `options`, discard whatever the surface currently shows and
    /// render `items` into it.
    pub fn new(
        surface: S,
        items: Vec<T>,
        options: SortOptions,
        labeler: L,
    ) -> Result<Self, SortError> {
        options.validate()?;

        let mut list = Self {
            items,
            state: InteractionState::Idle,
            surface,
            labeler,
            options,
            removable: false,
        };
        list.render_all()?;

        debug!(count = list.items.len(), flavor = ?list.options.flavor, "sortable list created");
        Ok(list)
    }

    /// Accept Delete/Backspace and remove-button requests. Off by default.
    pub fn set_removable(&mut self, removable: bool) {
        self.removable = removable;
    }

    pub fn is_removable(&self) -> bool {
        self.removable
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Owned copy of the current order
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn grabbed_index(&self) -> Option<usize> {
        match self.state {
            InteractionState::Idle => None,
            InteractionState::Grabbed { index, .. } => Some(index),
        }
    }

    pub fn options(&self) -> &SortOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct access for backends that mirror changes made outside the
    /// controller, such as the drag engine moving a row.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Replace the whole collection. Any grab is dropped.
    pub fn refresh(&mut self, items: Vec<T>) -> Result<(), SortError> {
        self.items = items;
        self.state = InteractionState::Idle;
        self.render_all()?;
        debug!(count = self.items.len(), "sortable list refreshed");
        Ok(())
    }

    /// Remove the item at `index`, re-render and announce it.
    pub fn remove(&mut self, index: usize) -> Result<T, SortError> {
        if index >= self.items.len() {
            return Err(SortError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }

        let name = self.spoken_name(index);
        let item = self.items.remove(index);
        self.state = InteractionState::Idle;
        self.render_all()?;
        self.announce(&self.options.flavor.removed(&name))?;

        debug!(index, remaining = self.items.len(), "item removed");
        Ok(item)
    }

    /// User asked to remove the row at `index` (Delete key or remove button).
    /// Ignored unless removal is enabled.
    pub fn request_removal(&mut self, index: usize) -> Result<Option<ListEvent<T>>, SortError> {
        if !self.removable || index >= self.items.len() {
            return Ok(None);
        }
        let item = self.remove(index)?;
        Ok(Some(ListEvent::Removed { item, index }))
    }

    /// Deliver a key press that arrived on the row at `index`.
    pub fn handle_key(
        &mut self,
        index: usize,
        input: KeyInput,
    ) -> Result<KeyResponse<T>, SortError> {
        if index >= self.items.len() {
            return Ok(KeyResponse::ignored());
        }

        match input.action {
            KeyAction::Toggle => {
                if input.from_control {
                    return Ok(KeyResponse::ignored());
                }
                match self.state {
                    InteractionState::Idle => self.keyboard_grab(index),
                    InteractionState::Grabbed {
                        index: grabbed,
                        via: GrabSource::Keyboard,
                    } => self.keyboard_drop(grabbed),
                    InteractionState::Grabbed { .. } => Ok(KeyResponse::ignored()),
                }
            }
            KeyAction::Move(direction) => match self.state {
                InteractionState::Grabbed {
                    index: grabbed,
                    via: GrabSource::Keyboard,
                } if grabbed == index => self.keyboard_move(grabbed, direction),
                _ => Ok(KeyResponse::ignored()),
            },
            KeyAction::Cancel => match self.state {
                InteractionState::Grabbed {
                    index: grabbed,
                    via: GrabSource::Keyboard,
                } => self.keyboard_cancel(grabbed),
                _ => Ok(KeyResponse::ignored()),
            },
            KeyAction::Remove => {
                if input.from_control {
                    return Ok(KeyResponse::ignored());
                }
                match self.request_removal(index)? {
                    Some(event) => Ok(KeyResponse::with_event(event)),
                    None => Ok(KeyResponse::ignored()),
                }
            }
        }
    }

    /// The drag engine picked up the row at `old_index`.
    pub fn drag_start(&mut self, old_index: Option<usize>) -> Result<(), SortError> {
        let Some(index) = old_index.filter(|&i| i < self.items.len()) else {
            return Ok(());
        };

        if let InteractionState::Grabbed {
            index: held,
            via: GrabSource::Keyboard,
        } = self.state
        {
            if held != index {
                self.mark(held, GrabMark::Released)?;
            }
        }

        self.state = InteractionState::Grabbed {
            index,
            via: GrabSource::Pointer,
        };
        self.mark(index, GrabMark::Pointer)?;
        let name = self.spoken_name(index);
        self.announce(&self.options.flavor.drag_started(&name, index))?;

        debug!(index, "pointer drag started");
        Ok(())
    }

    /// The drag engine dropped a row. The engine has already moved the row
    /// from `old_index` to `new_index` in the container.
    pub fn drag_end(
        &mut self,
        old_index: Option<usize>,
        new_index: Option<usize>,
    ) -> Result<Option<ListEvent<T>>, SortError> {
        let held = match self.state {
            InteractionState::Grabbed {
                index,
                via: GrabSource::Pointer,
            } => Some(index),
            _ => None,
        };
        self.state = InteractionState::Idle;
        let len = self.items.len();

        match (old_index, new_index) {
            (Some(from), Some(to)) if from != to && from < len && to < len => {
                self.mark(to, GrabMark::Released)?;
                move_item(&mut self.items, from, to);
                self.relabel_all()?;

                let name = self.spoken_name(to);
                self.announce(&self.options.flavor.drag_moved(&name, to, len))?;

                debug!(from, to, "pointer drag reordered list");
                Ok(Some(ListEvent::Reordered(self.items.clone())))
            }
            (Some(from), _) if from < len => {
                self.mark(from, GrabMark::Released)?;
                let name = self.spoken_name(from);
                self.announce(&self.options.flavor.drag_in_place(&name))?;
                Ok(None)
            }
            _ => {
                if let Some(held) = held.filter(|&i| i < len) {
                    self.mark(held, GrabMark::Released)?;
                }
                Ok(None)
            }
        }
    }

    /// Tear down the rendered rows and live region, handing back the surface.
    pub fn destroy(mut self) -> Result<S, SortError> {
        self.surface.teardown().map_err(SortError::surface)?;
        debug!("sortable list destroyed");
        Ok(self.surface)
    }

    fn keyboard_grab(&mut self, index: usize) -> Result<KeyResponse<T>, SortError> {
        self.state = InteractionState::Grabbed {
            index,
            via: GrabSource::Keyboard,
        };
        self.mark(index, GrabMark::Keyboard)?;
        let name = self.spoken_name(index);
        self.announce(&self.options.flavor.grabbed(&name))?;

        debug!(index, "keyboard grab");
        Ok(KeyResponse::handled())
    }

    fn keyboard_drop(&mut self, index: usize) -> Result<KeyResponse<T>, SortError> {
        self.state = InteractionState::Idle;
        self.mark(index, GrabMark::Released)?;
        let name = self.spoken_name(index);
        self.announce(&self.options.flavor.dropped(&name, index))?;

        debug!(index, "keyboard drop");
        Ok(KeyResponse::handled())
    }

    fn keyboard_cancel(&mut self, index: usize) -> Result<KeyResponse<T>, SortError> {
        self.state = InteractionState::Idle;
        self.mark(index, GrabMark::Released)?;
        let name = self.spoken_name(index);
        self.announce(&self.options.flavor.cancelled(&name, index))?;

        debug!(index, "keyboard grab cancelled");
        Ok(KeyResponse::handled())
    }

    fn keyboard_move(
        &mut self,
        from: usize,
        direction: Direction,
    ) -> Result<KeyResponse<T>, SortError> {
        let len = self.items.len();
        let Some(to) = direction.step(from, len) else {
            // Blocked at the edge: order unchanged, grab kept
            self.announce(&self.options.flavor.at_boundary(direction))?;
            return Ok(KeyResponse::handled());
        };

        move_item(&mut self.items, from, to);
        self.render_all()?;

        // Rows were rebuilt, so the grab and focus go onto the new node
        self.state = InteractionState::Grabbed {
            index: to,
            via: GrabSource::Keyboard,
        };
        self.mark(to, GrabMark::Keyboard)?;
        self.surface.focus_item(to).map_err(SortError::surface)?;

        let name = self.spoken_name(to);
        self.announce(&self.options.flavor.moved(&name, to, len))?;

        debug!(from, to, "keyboard move");
        Ok(KeyResponse::with_event(ListEvent::Reordered(self.items.clone())))
    }

    fn render_all(&mut self) -> Result<(), SortError> {
        self.surface.clear().map_err(SortError::surface)?;
        self.surface
            .set_container_label(&self.options.flavor.container_label(self.items.len()))
            .map_err(SortError::surface)?;

        for index in 0..self.items.len() {
            let attrs = self.attributes(index);
            self.surface
                .append_item(&self.items[index], &attrs)
                .map_err(SortError::surface)?;
        }
        Ok(())
    }

    fn relabel_all(&mut self) -> Result<(), SortError> {
        self.surface
            .set_container_label(&self.options.flavor.container_label(self.items.len()))
            .map_err(SortError::surface)?;

        for index in 0..self.items.len() {
            let attrs = self.attributes(index);
            self.surface.relabel_item(&attrs).map_err(SortError::surface)?;
        }
        Ok(())
    }

    fn attributes(&self, index: usize) -> ItemAttributes {
        let label = self.labeler.label(&self.items[index], index);
        ItemAttributes {
            index,
            index_attribute: self.options.index_attribute().to_string(),
            aria_label: self.options.flavor.item_label(&label, index, self.items.len()),
        }
    }

    fn mark(&mut self, index: usize, mark: GrabMark) -> Result<(), SortError> {
        self.surface.set_grabbed(index, mark).map_err(SortError::surface)
    }

    fn spoken_name(&self, index: usize) -> String {
        self.labeler.spoken_name(&self.items[index], index)
    }

    fn announce(&mut self, message: &str) -> Result<(), SortError> {
        trace!(text = message, "announce");
        self.surface.announce(message).map_err(SortError::surface)
    }
}
