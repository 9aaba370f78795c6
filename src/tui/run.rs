//! TUI entry point and terminal setup.

use std::{io, path::Path};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}
};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::error::Result;
use crate::storage::FileStore;
use crate::store::TaskStore;
use crate::tui::app::App;

/// Open the task list stored in `dir` and run the terminal user interface
/// until the user quits.
pub fn run_tui(dir: &Path) -> Result<()> {
    // Open the store before touching the terminal so errors print normally.
    let store = TaskStore::open(FileStore::open(dir)?);
    let mut app = App::new(store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(result?)
}
