use crate::app::StoriesApp;
use crate::list::StoryList;
use crate::storage::KeyValueStore;
use crate::story::Story;
use crate::tui::search::SearchInput;
use crate::tui::table::TableState;
use crate::tui::ui;
use crate::StoriesError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub struct App<S: KeyValueStore> {
    pub stories: StoriesApp<S>,

    // Sub-states
    pub input: SearchInput,
    pub table: TableState,

    pub status_message: String,
    pub should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(stories: StoriesApp<S>, auto_focus: bool) -> Self {
        let input = SearchInput::new(stories.term(), auto_focus);
        let mut table = TableState::default();
        table.reset(stories.state().data.len());

        Self {
            stories,
            input,
            table,
            status_message: "Ready".to_string(),
            should_quit: false,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        self.stories.mount();

        loop {
            terminal
                .draw(|frame| ui::draw(frame, self))
                .map_err(|e| StoriesError::Terminal(e.to_string()))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.process_messages();
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    pub fn process_messages(&mut self) {
        let was_loading = self.stories.state().is_loading();
        if self.stories.process_messages() == 0 {
            return;
        }

        let state = self.stories.state();
        if was_loading && !state.is_loading() {
            if state.is_error() {
                self.status_message = "Fetch failed, press Enter to retry".to_string();
            } else {
                self.status_message = format!("{} stories", state.data.len());
            }
            self.table.reset(state.data.len());
        }
    }

    pub fn submit(&mut self) {
        if self.stories.submit() {
            self.status_message = format!("Searching for '{}'...", self.stories.term());
        } else {
            self.status_message = "Type a search term first".to_string();
        }
    }

    /// Dismiss the selected row through the list's removal callback.
    pub fn dismiss_selected(&mut self) {
        let Some(index) = self.table.selected else {
            return;
        };

        let mut removed: Option<Story> = None;
        {
            let mut list = StoryList::new(&self.stories.state().data, |story: &Story| {
                removed = Some(story.clone());
            });
            list.dismiss(index);
        }

        if let Some(story) = removed {
            self.stories.dismiss(&story);
            self.table.clamp(self.stories.state().data.len());
            self.status_message = format!("Dismissed '{}'", story.title);
        }
    }

    pub fn open_selected(&mut self) {
        let Some(story) = self
            .table
            .selected
            .and_then(|i| self.stories.state().data.get(i))
        else {
            return;
        };

        let url = story.link().to_string();
        if url.is_empty() {
            self.status_message = "Story has no link".to_string();
            return;
        }
        match open::that(&url) {
            Ok(()) => {
                info!(url = %url, "opened story");
                self.status_message = format!("Opened {}", url);
            }
            Err(e) => {
                warn!(url = %url, error = %e, "could not open story");
                self.status_message = format!("Could not open {}: {}", url, e);
            }
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global keys
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.should_quit = true;
                return;
            }
            KeyCode::Esc => {
                if self.input.focused && !self.stories.term().is_empty() {
                    let input = &mut self.input;
                    self.stories.search_mut().edit(|term| input.clear(term));
                } else if self.input.focused {
                    self.input.focused = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            _ => {}
        }

        if self.input.focused {
            self.handle_search_key(key);
        } else {
            self.handle_table_key(key);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let input = &mut self.input;
        let search = self.stories.search_mut();
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                search.edit(|term| input.insert(term, c));
            }
            KeyCode::Backspace => search.edit(|term| input.backspace(term)),
            KeyCode::Delete => search.edit(|term| input.delete(term)),
            KeyCode::Left => input.move_left(search.term()),
            KeyCode::Right => input.move_right(search.term()),
            KeyCode::Home => input.home(),
            KeyCode::End => input.end(search.term()),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                input.focused = false;
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        let total = self.stories.state().data.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.table.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.table.select_next(total),
            KeyCode::PageUp => self.table.page_up(),
            KeyCode::PageDown => self.table.page_down(total),
            KeyCode::Home => self.table.select_first(total),
            KeyCode::End => self.table.select_last(total),

            KeyCode::Char('d') | KeyCode::Delete => self.dismiss_selected(),
            KeyCode::Enter | KeyCode::Char('o') => self.open_selected(),
            KeyCode::Char('r') => self.submit(),

            KeyCode::Tab | KeyCode::Char('/') => {
                self.input.focused = true;
                self.input.end(self.stories.term());
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StoryFetcher;
    use crate::config::AppConfig;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    struct NoNetwork;

    impl StoryFetcher for NoNetwork {
        fn fetch(&self, _url: &str) -> crate::Result<Vec<Story>> {
            Err(StoriesError::FetchFailed("offline".into()))
        }
    }

    fn demo_app() -> App<MemoryStore> {
        let config = AppConfig {
            demo: true,
            ..AppConfig::default()
        };
        let stories = StoriesApp::new(MemoryStore::new(), &config, Arc::new(NoNetwork));
        App::new(stories, true)
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn typing_edits_the_persisted_term() {
        let mut app = demo_app();
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.stories.term(), "Reaco");
        assert_eq!(
            app.stories.search().store().get("search").unwrap().as_deref(),
            Some("Reaco")
        );
        // Typing alone never starts a fetch
        assert!(!app.stories.state().is_loading());
    }

    #[test]
    fn dismiss_key_removes_selected_story() {
        let mut app = demo_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));

        let ids: Vec<_> = app
            .stories
            .state()
            .data
            .iter()
            .map(|s| s.object_id.as_str())
            .collect();
        assert_eq!(ids, ["0"]);
        assert_eq!(app.table.selected, Some(0));
    }

    #[test]
    fn enter_on_empty_term_does_nothing() {
        let mut app = demo_app();
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.stories.term(), "");
        press(&mut app, KeyCode::Enter);
        assert!(!app.stories.state().is_loading());
        assert_eq!(app.stories.state().data.len(), 2);
    }
}
