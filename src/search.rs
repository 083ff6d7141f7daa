//! Search term and committed request URL
//!
//! The live term is mirrored to storage on every edit. The request URL only
//! moves when the term is submitted.

use crate::client::request_url;
use crate::mirror::PersistentMirror;
use crate::storage::KeyValueStore;

pub struct SearchContext<S: KeyValueStore> {
    term: PersistentMirror<S>,
    endpoint: String,
    request_url: Option<String>,
}

impl<S: KeyValueStore> SearchContext<S> {
    /// Restore the term from `store`. The initial request URL is built from
    /// the restored term, or left unset when that term is empty.
    pub fn new(store: S, key: &str, initial_term: &str, endpoint: impl Into<String>) -> Self {
        let term = PersistentMirror::new(store, key, initial_term);
        let endpoint = endpoint.into();
        let request_url = if term.value().is_empty() {
            None
        } else {
            Some(request_url(&endpoint, term.value()))
        };

        Self {
            term,
            endpoint,
            request_url,
        }
    }

    pub fn term(&self) -> &str {
        self.term.value()
    }

    /// Replace the live term. No request is made.
    pub fn input(&mut self, term: impl Into<String>) {
        self.term.set(term);
    }

    /// Edit the live term in place. No request is made.
    pub fn edit(&mut self, edit: impl FnOnce(&mut String)) {
        self.term.update(edit);
    }

    pub fn can_submit(&self) -> bool {
        !self.term.value().is_empty()
    }

    /// Commit the live term. Returns the new request URL, or `None` when the
    /// term is empty and nothing was committed.
    pub fn submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        let url = request_url(&self.endpoint, self.term.value());
        self.request_url = Some(url.clone());
        Some(url)
    }

    pub fn request_url(&self) -> Option<&str> {
        self.request_url.as_deref()
    }

    pub fn store(&self) -> &S {
        self.term.store()
    }

    pub fn store_mut(&mut self) -> &mut S {
        self.term.store_mut()
    }
}
