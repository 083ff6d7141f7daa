pub mod app;
pub mod colors;
pub mod search;
pub mod table;
pub mod ui;

use crate::app::StoriesApp;
use crate::client::StoryFetcher;
use crate::config::AppConfig;
use crate::storage::KeyValueStore;
use crate::StoriesError;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;

/// Entry point: run the terminal UI until the user quits
pub fn run<S: KeyValueStore>(
    store: S,
    config: &AppConfig,
    fetcher: Arc<dyn StoryFetcher>,
) -> crate::Result<()> {
    let stories = StoriesApp::new(store, config, fetcher);
    let mut app = app::App::new(stories, config.auto_focus);

    enable_raw_mode().map_err(terminal_error)?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(terminal_error(e));
    }

    // Leave the terminal usable if drawing panics
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let result = Terminal::new(CrosstermBackend::new(io::stdout()))
        .map_err(terminal_error)
        .and_then(|mut terminal| {
            let result = app.run(&mut terminal);
            let _ = terminal.show_cursor();
            result
        });

    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    result
}

fn terminal_error(e: io::Error) -> StoriesError {
    StoriesError::Terminal(e.to_string())
}
