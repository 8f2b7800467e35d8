//! Terminal User Interface
//!
//! A full-screen single-choice list used by the interactive attach and
//! detach workflows.
//!
//! # Layout
//!
//! - **Top Panel**: Title, item count and the active filter
//! - **Center Panel**: The items, highlighted entry marked with `>`
//! - **Details Panel**: Extra lines for the highlighted entry
//! - **Bottom Panel**: Help bar with mode-sensitive keybindings
//!
//! # Keybindings
//!
//! - `j/k` or arrow keys: Navigate
//! - `Enter`: Choose
//! - `/`: Filter by label or description
//! - `q`, `Esc` or `Ctrl+C`: Cancel
//! - `?`: Show help

pub mod app;
pub mod events;
pub mod ui;

use common::{Error, Result};
use crossterm::{
    event::Event,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use tracing::debug;

use crate::picker::{PickItem, Picker};

pub use app::{InputMode, PickerAction, PickerApp};
pub use events::EventHandler;

/// Picker backed by the terminal
#[derive(Debug, Default)]
pub struct TuiPicker;

impl TuiPicker {
    pub fn new() -> Self {
        Self
    }
}

impl Picker for TuiPicker {
    fn pick(&mut self, title: &str, items: &[PickItem]) -> Result<Option<usize>> {
        let mut session = TerminalSession::enter()?;
        let mut app = PickerApp::new(title, items.to_vec());
        let choice = run_loop(&mut session.terminal, &mut app, &EventHandler::new());
        drop(session);

        debug!("Picker '{}' finished: {:?}", title, choice);
        choice
    }
}

/// Raw mode plus alternate screen for as long as it lives
///
/// Dropping it restores the terminal, so every exit path out of the picker
/// (including errors) leaves the shell usable.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        enable_raw_mode().map_err(|e| terminal_error("Failed to enable raw mode", e))?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(terminal_error("Failed to enter alternate screen", e));
        }

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                Err(terminal_error("Failed to create terminal", e))
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut PickerApp,
    events: &EventHandler,
) -> Result<Option<usize>> {
    loop {
        terminal
            .draw(|f| ui::render(f, app))
            .map_err(|e| terminal_error("Failed to draw", e))?;

        let Some(event) = events
            .poll()
            .map_err(|e| terminal_error("Failed to read input", e))?
        else {
            continue;
        };

        // Resize is picked up by the next draw
        let Event::Key(key) = event else {
            continue;
        };

        match events.handle_key(app, key) {
            PickerAction::None => {}
            PickerAction::Select(index) => return Ok(Some(index)),
            PickerAction::Cancel => return Ok(None),
        }
    }
}

fn terminal_error(what: &str, e: io::Error) -> Error {
    Error::Terminal(format!("{}: {}", what, e))
}
