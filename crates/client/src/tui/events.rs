//! TUI event handling
//!
//! Handles keyboard input using crossterm and turns it into picker actions.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

use super::app::{InputMode, PickerAction, PickerApp};

/// Event handler for TUI input
pub struct EventHandler {
    /// Tick rate for polling events
    tick_rate: Duration,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    /// Create a new event handler
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
        }
    }

    /// Poll for next event
    ///
    /// Returns Some(Event) if an event occurred, None if tick timeout elapsed.
    pub fn poll(&self) -> io::Result<Option<Event>> {
        if event::poll(self.tick_rate)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Handle a key event and return the resulting action
    pub fn handle_key(&self, app: &mut PickerApp, key: KeyEvent) -> PickerAction {
        // Windows reports releases too
        if key.kind == KeyEventKind::Release {
            return PickerAction::None;
        }

        // Ctrl+C cancels from any mode
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return PickerAction::Cancel;
        }

        match app.input_mode {
            InputMode::Normal => self.handle_normal_mode(app, key),
            InputMode::Filter => self.handle_filter_mode(app, key),
            InputMode::Help => self.handle_help_mode(app, key),
        }
    }

    /// Handle key events in normal navigation mode
    fn handle_normal_mode(&self, app: &mut PickerApp, key: KeyEvent) -> PickerAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => PickerAction::Cancel,

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => {
                app.navigate_up();
                PickerAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.navigate_down();
                PickerAction::None
            }
            KeyCode::Home | KeyCode::Char('g') => {
                app.navigate_first();
                PickerAction::None
            }
            KeyCode::End | KeyCode::Char('G') => {
                app.navigate_last();
                PickerAction::None
            }

            KeyCode::Enter => app.confirm(),

            KeyCode::Char('/') => {
                app.start_filter();
                PickerAction::None
            }
            KeyCode::Char('?') => {
                app.show_help();
                PickerAction::None
            }

            _ => PickerAction::None,
        }
    }

    /// Handle key events while typing a filter
    fn handle_filter_mode(&self, app: &mut PickerApp, key: KeyEvent) -> PickerAction {
        match key.code {
            KeyCode::Esc => {
                app.clear_filter();
                PickerAction::None
            }
            KeyCode::Enter => {
                app.accept_filter();
                PickerAction::None
            }
            KeyCode::Backspace => {
                app.pop_filter_char();
                PickerAction::None
            }
            KeyCode::Up => {
                app.navigate_up();
                PickerAction::None
            }
            KeyCode::Down => {
                app.navigate_down();
                PickerAction::None
            }
            KeyCode::Char(c) => {
                app.push_filter_char(c);
                PickerAction::None
            }
            _ => PickerAction::None,
        }
    }

    /// Handle key events in help overlay mode
    fn handle_help_mode(&self, app: &mut PickerApp, key: KeyEvent) -> PickerAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q') => {
                app.close_help();
                PickerAction::None
            }
            _ => PickerAction::None,
        }
    }
}
