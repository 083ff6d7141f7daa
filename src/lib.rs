//! hacker-stories - Hacker News story search
//!
//! A search box over the Hacker News search API with a dismissable result
//! list and a search term that survives restarts.
//!
//! # Features
//!
//! - **Fetch lifecycle**: idle / loading / success / error, stale responses dropped
//! - **Persistent search term**: restored on start, written back on every edit
//! - **Terminal UI**: ratatui front-end
//! - **Desktop UI**: eframe front-end (`gui` feature)
//!
//! # Example
//!
//! ```no_run
//! use hacker_stories::{AppConfig, HttpFetcher, MemoryStore, StoriesApp};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! fn main() -> hacker_stories::Result<()> {
//!     let config = AppConfig::default();
//!     let fetcher = Arc::new(HttpFetcher::new(config.request_timeout)?);
//!     let mut app = StoriesApp::new(MemoryStore::new(), &config, fetcher);
//!
//!     app.search_mut().input("Rust");
//!     app.submit();
//!     app.wait_for_fetch(Duration::from_secs(10));
//!
//!     for story in &app.state().data {
//!         println!("{} ({} points)", story.title, story.points);
//!     }
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod client;
pub mod config;
pub mod error;
#[cfg(feature = "gui")]
pub mod gui;
pub mod lifecycle;
pub mod list;
pub mod logging;
pub mod mirror;
pub mod search;
pub mod storage;
pub mod story;
pub mod tui;

// Re-export main types
pub use app::{search_once, StoriesApp};
pub use client::{request_url, HttpFetcher, StoryFetcher};
pub use config::AppConfig;
pub use error::{Result, StoriesError};
pub use lifecycle::{FetchLifecycle, Phase, StoriesAction, StoriesState};
pub use list::{StoryList, StoryRow};
pub use mirror::PersistentMirror;
pub use search::SearchContext;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use story::{Story, StoryId};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Open the configured file store, falling back to memory when it is unusable.
pub fn open_store(config: &AppConfig) -> Box<dyn KeyValueStore> {
    match FileStore::open(&config.store_path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(
                error = %e,
                "persistent storage unavailable, search term will not be saved"
            );
            Box::new(MemoryStore::new())
        }
    }
}
