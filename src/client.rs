//! Search endpoint client

use crate::story::{decode_response, Story};
use crate::{Result, StoriesError};
use std::time::Duration;
use tracing::debug;

/// Something that turns a request URL into stories.
///
/// Implementations run on worker threads and block until the request resolves.
pub trait StoryFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<Story>>;
}

/// Build the request URL for a search term.
pub fn request_url(endpoint: &str, term: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(term.as_bytes()).collect();
    format!("{}{}", endpoint, encoded)
}

/// Blocking HTTP fetcher with a bounded per-request timeout.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hacker-stories/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                StoriesError::FetchFailed(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl StoryFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<Story>> {
        debug!(url, "GET");
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(StoriesError::HttpStatus(status.as_u16()));
        }
        let body = resp.bytes()?;
        decode_response(&body)
    }
}
