//! Story records and search response decoding

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Stable identity of a story (`objectID` on the wire).
///
/// The search API sends string ids, the bundled seed data uses small integers;
/// both decode to the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    pub fn new(id: impl Into<String>) -> Self {
        StoryId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for StoryId {
    fn from(id: u64) -> Self {
        StoryId(id.to_string())
    }
}

impl From<&str> for StoryId {
    fn from(id: &str) -> Self {
        StoryId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for StoryId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => StoryId(s),
            RawId::Number(n) => StoryId(n.to_string()),
        })
    }
}

/// A single search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    /// Self posts (Ask HN and friends) carry `"url": null`; the key itself is required.
    #[serde(deserialize_with = "required_nullable")]
    pub url: Option<String>,
    pub author: String,
    pub num_comments: u64,
    pub points: u64,
    #[serde(rename = "objectID")]
    pub object_id: StoryId,
}

fn required_nullable<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

impl Story {
    /// Link target for the title, empty for self posts
    pub fn link(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    /// The two demo stories shipped with the app.
    pub fn seed() -> Vec<Story> {
        vec![
            Story {
                title: "React".to_string(),
                url: Some("https://reactjs.org/".to_string()),
                author: "Jordan Walke".to_string(),
                num_comments: 3,
                points: 4,
                object_id: StoryId::from(0),
            },
            Story {
                title: "Redux".to_string(),
                url: Some("https://redux.js.org/".to_string()),
                author: "Dan Abramov, Andrew Clark".to_string(),
                num_comments: 2,
                points: 5,
                object_id: StoryId::from(1),
            },
        ]
    }
}

/// Body of a search endpoint response. Everything except `hits` is ignored.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub hits: Vec<Story>,
}

/// Decode a raw response body. A single malformed hit fails the whole response.
pub fn decode_response(body: &[u8]) -> crate::Result<Vec<Story>> {
    let response: SearchResponse = serde_json::from_slice(body)?;
    Ok(response.hits)
}
