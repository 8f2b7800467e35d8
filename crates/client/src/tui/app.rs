//! Picker state
//!
//! Holds the items, the active filter and the selection. The selection is
//! an index into the filtered view; [`PickerApp::selected_item`] maps it
//! back to the caller's item index.

use crate::picker::PickItem;

/// Input mode for the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Typing a filter after `/`
    Filter,
    /// Showing help overlay
    Help,
}

/// Result of handling one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    /// Keep going
    None,
    /// User chose the item at this index into the original items
    Select(usize),
    /// User backed out
    Cancel,
}

pub struct PickerApp {
    pub title: String,
    pub items: Vec<PickItem>,
    /// Indices into `items` that pass the filter, in order
    pub visible: Vec<usize>,
    /// Position within `visible`
    pub selected: usize,
    pub filter: String,
    pub input_mode: InputMode,
}

impl PickerApp {
    pub fn new(title: impl Into<String>, items: Vec<PickItem>) -> Self {
        let visible = (0..items.len()).collect();
        Self {
            title: title.into(),
            items,
            visible,
            selected: 0,
            filter: String::new(),
            input_mode: InputMode::Normal,
        }
    }

    pub fn navigate_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn navigate_down(&mut self) {
        if !self.visible.is_empty() && self.selected < self.visible.len() - 1 {
            self.selected += 1;
        }
    }

    pub fn navigate_first(&mut self) {
        self.selected = 0;
    }

    pub fn navigate_last(&mut self) {
        self.selected = self.visible.len().saturating_sub(1);
    }

    /// Index into `items` of the highlighted entry
    pub fn selected_item(&self) -> Option<usize> {
        self.visible.get(self.selected).copied()
    }

    pub fn highlighted(&self) -> Option<&PickItem> {
        self.selected_item().map(|i| &self.items[i])
    }

    pub fn confirm(&self) -> PickerAction {
        match self.selected_item() {
            Some(index) => PickerAction::Select(index),
            None => PickerAction::None,
        }
    }

    pub fn start_filter(&mut self) {
        self.input_mode = InputMode::Filter;
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.apply_filter();
    }

    pub fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.apply_filter();
    }

    /// Leave filter mode keeping the current filter
    pub fn accept_filter(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Leave filter mode and show every item again
    pub fn clear_filter(&mut self) {
        let current = self.selected_item();
        self.filter.clear();
        self.apply_filter();
        if let Some(index) = current {
            self.selected = index;
        }
        self.input_mode = InputMode::Normal;
    }

    fn apply_filter(&mut self) {
        let needle = self.filter.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.matches(&needle))
            .map(|(i, _)| i)
            .collect();
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn close_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// `"shown/total"` when filtered, else the total
    pub fn count_text(&self) -> String {
        if self.filter.is_empty() {
            format!("{}", self.items.len())
        } else {
            format!("{}/{}", self.visible.len(), self.items.len())
        }
    }
}
