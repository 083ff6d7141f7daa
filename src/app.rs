//! Controller shared by the front-ends
//!
//! Owns the search context and the fetch lifecycle. Fetches run on worker
//! threads and report back over a channel; `process_messages` applies them on
//! the caller's (UI) thread.

use crate::client::StoryFetcher;
use crate::config::AppConfig;
use crate::lifecycle::{FetchLifecycle, RequestTicket, StoriesState};
use crate::search::SearchContext;
use crate::storage::{KeyValueStore, MemoryStore};
use crate::story::Story;
use crate::{Result, StoriesError};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Run one search outside any front-end and return its stories.
///
/// The term goes through a throwaway in-memory store, so the remembered term
/// is left alone.
pub fn search_once(
    config: &AppConfig,
    fetcher: Arc<dyn StoryFetcher>,
    term: &str,
    timeout: Duration,
) -> Result<Vec<Story>> {
    if term.is_empty() {
        return Err(StoriesError::EmptyTerm);
    }

    let mut app = StoriesApp::new(MemoryStore::new(), config, fetcher);
    app.search_mut().input(term);
    app.submit();
    if !app.wait_for_fetch(timeout) {
        return Err(StoriesError::Timeout);
    }

    let state = app.state();
    if state.is_error() {
        return Err(StoriesError::FetchFailed(format!("search for '{}' failed", term)));
    }
    Ok(state.data.clone())
}

/// Messages from worker threads
pub enum BgMessage {
    FetchComplete {
        generation: u64,
        outcome: Result<Vec<Story>>,
    },
}

/// Called by a worker after it posted its result (e.g. to wake a GUI).
pub type Notifier = Arc<dyn Fn() + Send + Sync>;

pub struct StoriesApp<S: KeyValueStore> {
    search: SearchContext<S>,
    lifecycle: FetchLifecycle,
    fetcher: Arc<dyn StoryFetcher>,
    notifier: Option<Notifier>,
    demo: bool,

    bg_sender: Sender<BgMessage>,
    bg_receiver: Receiver<BgMessage>,
}

impl<S: KeyValueStore> StoriesApp<S> {
    pub fn new(store: S, config: &AppConfig, fetcher: Arc<dyn StoryFetcher>) -> Self {
        let search = SearchContext::new(
            store,
            &config.storage_key,
            &config.initial_term,
            config.endpoint.clone(),
        );
        let state = if config.demo {
            StoriesState::with_stories(Story::seed())
        } else {
            StoriesState::new()
        };
        let (tx, rx) = unbounded();

        Self {
            search,
            lifecycle: FetchLifecycle::new(state),
            fetcher,
            notifier: None,
            demo: config.demo,
            bg_sender: tx,
            bg_receiver: rx,
        }
    }

    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Issue the request for the restored term. Demo mode starts from the
    /// seed stories and skips it.
    pub fn mount(&mut self) {
        if self.demo {
            info!("demo mode, initial fetch skipped");
            return;
        }
        if let Some(url) = self.search.request_url().map(str::to_string) {
            self.start_fetch(url);
        }
    }

    pub fn search(&self) -> &SearchContext<S> {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchContext<S> {
        &mut self.search
    }

    pub fn term(&self) -> &str {
        self.search.term()
    }

    pub fn state(&self) -> &StoriesState {
        self.lifecycle.state()
    }

    pub fn lifecycle_mut(&mut self) -> &mut FetchLifecycle {
        &mut self.lifecycle
    }

    /// Submit the live term. Returns `false` (and changes nothing) for an
    /// empty term.
    pub fn submit(&mut self) -> bool {
        match self.search.submit() {
            Some(url) => {
                self.start_fetch(url);
                true
            }
            None => {
                debug!("empty search term, submit ignored");
                false
            }
        }
    }

    /// Dismiss callback target: removes the story by its id.
    pub fn dismiss(&mut self, story: &Story) {
        self.lifecycle.remove_item(&story.object_id);
    }

    fn start_fetch(&mut self, url: String) -> RequestTicket {
        let ticket = self.lifecycle.commit(url);

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.bg_sender.clone();
        let notifier = self.notifier.clone();
        let generation = ticket.generation;
        let url = ticket.url.clone();

        thread::spawn(move || {
            let outcome = fetcher.fetch(&url);
            let _ = tx.send(BgMessage::FetchComplete {
                generation,
                outcome,
            });
            if let Some(notify) = notifier {
                notify();
            }
        });

        ticket
    }

    /// Apply every pending worker message without blocking.
    /// Returns how many messages changed the state.
    pub fn process_messages(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.bg_receiver.try_recv() {
            if self.handle_message(msg) {
                applied += 1;
            }
        }
        applied
    }

    /// Block until the current request settles or `timeout` passes.
    /// Returns `false` on timeout.
    pub fn wait_for_fetch(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.lifecycle.state().is_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.bg_receiver.recv_timeout(remaining) {
                Ok(msg) => {
                    self.handle_message(msg);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return false;
                }
            }
        }
        true
    }

    fn handle_message(&mut self, msg: BgMessage) -> bool {
        match msg {
            BgMessage::FetchComplete {
                generation,
                outcome,
            } => self.lifecycle.complete(generation, outcome),
        }
    }
}
