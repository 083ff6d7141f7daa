//! Story fetch lifecycle
//!
//! `StoriesState` is the story collection plus the outcome of the most recent
//! fetch. It only changes through [`StoriesAction`]s. `FetchLifecycle` wraps
//! it with request generations so a completion from a superseded request is
//! dropped instead of overwriting newer results.

use crate::story::{Story, StoryId};
use crate::{Result, StoriesError};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Outcome of the most recent fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// State transitions accepted by [`StoriesState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoriesAction {
    FetchInit,
    FetchSuccess(Vec<Story>),
    FetchFailure,
    RemoveStory(StoryId),
}

impl StoriesAction {
    /// Parse a textual action name.
    ///
    /// `REMOVE_STORY` takes the id after a colon (`REMOVE_STORY:1`).
    /// `STORIES_FETCH_SUCCESS` carries the seed stories as its payload.
    pub fn from_name(name: &str) -> Result<Self> {
        let (kind, arg) = match name.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg)),
            None => (name, None),
        };

        match (kind, arg) {
            ("STORIES_FETCH_INIT", None) => Ok(StoriesAction::FetchInit),
            ("STORIES_FETCH_SUCCESS", None) => Ok(StoriesAction::FetchSuccess(Story::seed())),
            ("STORIES_FETCH_FAILURE", None) => Ok(StoriesAction::FetchFailure),
            ("REMOVE_STORY", Some(id)) if !id.is_empty() => {
                Ok(StoriesAction::RemoveStory(StoryId::from(id)))
            }
            _ => Err(StoriesError::UnknownAction(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StoriesAction::FetchInit => "STORIES_FETCH_INIT",
            StoriesAction::FetchSuccess(_) => "STORIES_FETCH_SUCCESS",
            StoriesAction::FetchFailure => "STORIES_FETCH_FAILURE",
            StoriesAction::RemoveStory(_) => "REMOVE_STORY",
        }
    }
}

/// The story collection as the UI sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoriesState {
    pub data: Vec<Story>,
    pub phase: Phase,
}

impl StoriesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start populated, e.g. with [`Story::seed`].
    pub fn with_stories(data: Vec<Story>) -> Self {
        Self {
            data,
            phase: Phase::Idle,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn is_error(&self) -> bool {
        self.phase == Phase::Error
    }

    pub fn apply(&mut self, action: StoriesAction) {
        match action {
            StoriesAction::FetchInit => {
                // Keep showing the old stories while the new ones load
                self.phase = Phase::Loading;
            }
            StoriesAction::FetchSuccess(payload) => {
                self.data = payload;
                self.phase = Phase::Success;
            }
            StoriesAction::FetchFailure => {
                self.phase = Phase::Error;
            }
            StoriesAction::RemoveStory(id) => {
                if let Some(pos) = self.data.iter().position(|s| s.object_id == id) {
                    self.data.remove(pos);
                }
            }
        }
    }

    pub fn begin(&mut self) {
        self.apply(StoriesAction::FetchInit);
    }

    pub fn succeed(&mut self, payload: Vec<Story>) {
        self.apply(StoriesAction::FetchSuccess(payload));
    }

    pub fn fail(&mut self) {
        self.apply(StoriesAction::FetchFailure);
    }

    pub fn remove_item(&mut self, id: &StoryId) {
        self.apply(StoriesAction::RemoveStory(id.clone()));
    }
}

/// Identifies one issued request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub generation: u64,
    pub url: String,
}

type Listener = Box<dyn FnMut(&StoriesState)>;

/// Owns the story state and decides which completions may touch it.
#[derive(Default)]
pub struct FetchLifecycle {
    state: StoriesState,
    generation: u64,
    request_url: Option<String>,
    listeners: Vec<Listener>,
}

impl FetchLifecycle {
    pub fn new(state: StoriesState) -> Self {
        Self {
            state,
            ..Default::default()
        }
    }

    pub fn state(&self) -> &StoriesState {
        &self.state
    }

    /// URL of the most recently committed request, if any.
    pub fn request_url(&self) -> Option<&str> {
        self.request_url.as_deref()
    }

    /// Called after every transition with the new state.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoriesState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Commit a request URL: enter `loading` and hand out the ticket the
    /// caller must present on completion. Any older ticket becomes stale.
    pub fn commit(&mut self, url: impl Into<String>) -> RequestTicket {
        let url = url.into();
        self.generation += 1;
        self.request_url = Some(url.clone());
        info!(generation = self.generation, url = %url, "fetch started");
        self.dispatch(StoriesAction::FetchInit);

        RequestTicket {
            generation: self.generation,
            url,
        }
    }

    /// Apply the outcome of a request. Returns `false` when the ticket was
    /// superseded (or already completed) and the result was dropped.
    pub fn complete(&mut self, generation: u64, outcome: Result<Vec<Story>>) -> bool {
        if generation != self.generation || !self.state.is_loading() {
            debug!(
                generation,
                current = self.generation,
                "dropping stale fetch result"
            );
            return false;
        }

        match outcome {
            Ok(stories) => {
                info!(generation, count = stories.len(), "fetch succeeded");
                self.dispatch(StoriesAction::FetchSuccess(stories));
            }
            Err(e) => {
                warn!(generation, error = %e, "fetch failed");
                self.dispatch(StoriesAction::FetchFailure);
            }
        }
        true
    }

    /// Drop one story by id. Independent of the fetch phase.
    pub fn remove_item(&mut self, id: &StoryId) {
        debug!(id = %id, "removing story");
        self.dispatch(StoriesAction::RemoveStory(id.clone()));
    }

    fn dispatch(&mut self, action: StoriesAction) {
        self.state.apply(action);
        for listener in &mut self.listeners {
            listener(&self.state);
        }
    }
}
