//! In-memory list surface
//!
//! Keeps rows, attributes, focus and live-region output as plain data so the
//! controller can run headless. Also used to simulate the drag engine, which
//! moves a row before the controller hears about it.

use std::collections::{BTreeMap, BTreeSet};

use crate::surface::{
    GrabMark, ItemAttributes, ListSurface, KEYBOARD_GRABBED_CLASS, ROLE_LIST, ROLE_LISTITEM,
};

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryRow<T> {
    pub item: T,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
}

impl<T> MemoryRow<T> {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn aria_label(&self) -> &str {
        self.attribute("aria-label").unwrap_or_default()
    }

    pub fn is_grabbed(&self) -> bool {
        self.attribute("aria-grabbed") == Some("true")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

#[derive(Debug, Clone)]
pub struct MemorySurface<T> {
    container: BTreeMap<String, String>,
    rows: Vec<MemoryRow<T>>,
    focused: Option<usize>,
    live_region: Option<String>,
    live_regions_created: usize,
    announcements: Vec<String>,
    row_class: Option<String>,
}

impl<T> Default for MemorySurface<T> {
    fn default() -> Self {
        Self {
            container: BTreeMap::new(),
            rows: Vec::new(),
            focused: None,
            live_region: None,
            live_regions_created: 0,
            announcements: Vec::new(),
            row_class: None,
        }
    }
}

impl<T: Clone> MemorySurface<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Class added to every rendered row
    pub fn with_row_class(mut self, class: &str) -> Self {
        self.row_class = Some(class.to_string());
        self
    }

    /// Pre-populate the container as if a page had left content behind.
    pub fn with_stale_rows(mut self, items: &[T]) -> Self {
        self.rows = items
            .iter()
            .map(|item| MemoryRow {
                item: item.clone(),
                attributes: BTreeMap::new(),
                classes: BTreeSet::new(),
            })
            .collect();
        self
    }

    pub fn rows(&self) -> &[MemoryRow<T>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&MemoryRow<T>> {
        self.rows.get(index)
    }

    /// Items in visual order
    pub fn rendered_items(&self) -> Vec<T> {
        self.rows.iter().map(|row| row.item.clone()).collect()
    }

    pub fn container_attribute(&self, name: &str) -> Option<&str> {
        self.container.get(name).map(String::as_str)
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Current live-region text, `None` when no region exists
    pub fn live_region(&self) -> Option<&str> {
        self.live_region.as_deref()
    }

    pub fn live_regions_created(&self) -> usize {
        self.live_regions_created
    }

    pub fn announcements(&self) -> &[String] {
        &self.announcements
    }

    pub fn last_announcement(&self) -> Option<&str> {
        self.announcements.last().map(String::as_str)
    }

    pub fn grabbed_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_grabbed())
            .map(|(index, _)| index)
            .collect()
    }

    /// Move a row the way the drag engine does before reporting `onEnd`.
    pub fn simulate_engine_move(&mut self, from: usize, to: usize) {
        if from < self.rows.len() && to < self.rows.len() && from != to {
            let row = self.rows.remove(from);
            self.rows.insert(to, row);
        }
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut MemoryRow<T>, String> {
        let len = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or_else(|| format!("no row at {} (have {})", index, len))
    }
}

impl<T: Clone> ListSurface<T> for MemorySurface<T> {
    type Error = String;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.rows.clear();
        self.focused = None;
        Ok(())
    }

    fn set_container_label(&mut self, label: &str) -> Result<(), Self::Error> {
        self.container.insert("role".to_string(), ROLE_LIST.to_string());
        self.container.insert("aria-label".to_string(), label.to_string());
        Ok(())
    }

    fn append_item(&mut self, item: &T, attrs: &ItemAttributes) -> Result<(), Self::Error> {
        if attrs.index != self.rows.len() {
            return Err(format!(
                "appending index {} after {} rows",
                attrs.index,
                self.rows.len()
            ));
        }

        let mut attributes = BTreeMap::new();
        attributes.insert("role".to_string(), ROLE_LISTITEM.to_string());
        attributes.insert("tabindex".to_string(), "0".to_string());
        attributes.insert("draggable".to_string(), "true".to_string());
        attributes.insert("aria-grabbed".to_string(), "false".to_string());
        attributes.insert(attrs.index_attribute.clone(), attrs.index.to_string());
        attributes.insert("aria-label".to_string(), attrs.aria_label.clone());

        let mut classes = BTreeSet::new();
        if let Some(class) = &self.row_class {
            classes.insert(class.clone());
        }

        self.rows.push(MemoryRow {
            item: item.clone(),
            attributes,
            classes,
        });
        Ok(())
    }

    fn relabel_item(&mut self, attrs: &ItemAttributes) -> Result<(), Self::Error> {
        let row = self.row_mut(attrs.index)?;
        row.attributes.insert(attrs.index_attribute.clone(), attrs.index.to_string());
        row.attributes.insert("aria-label".to_string(), attrs.aria_label.clone());
        Ok(())
    }

    fn set_grabbed(&mut self, index: usize, mark: GrabMark) -> Result<(), Self::Error> {
        let row = self.row_mut(index)?;
        row.attributes.insert("aria-grabbed".to_string(), mark.aria_grabbed().to_string());
        if mark == GrabMark::Keyboard {
            row.classes.insert(KEYBOARD_GRABBED_CLASS.to_string());
        } else {
            row.classes.remove(KEYBOARD_GRABBED_CLASS);
        }
        Ok(())
    }

    fn focus_item(&mut self, index: usize) -> Result<(), Self::Error> {
        self.row_mut(index)?;
        self.focused = Some(index);
        Ok(())
    }

    fn announce(&mut self, message: &str) -> Result<(), Self::Error> {
        if self.live_region.is_none() {
            self.live_regions_created += 1;
        }
        // The browser clears first and writes after a delay; in memory the
        // write lands immediately.
        self.live_region = Some(message.to_string());
        self.announcements.push(message.to_string());
        Ok(())
    }

    fn teardown(&mut self) -> Result<(), Self::Error> {
        self.rows.clear();
        self.focused = None;
        self.live_region = None;
        Ok(())
    }
}
