//! Remote character catalog.
//!
//! This module defines the catalog data model shared by every layer of the
//! application, and the [`CatalogProvider`] trait implemented by the HTTP
//! client in [`marvel`]. Items are immutable once fetched.

pub mod auth;
pub mod error;
pub mod filter;
pub mod marvel;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HerodexError, Result};

pub use filter::{DisplayPolicy, PLACEHOLDER_THUMBNAIL};
pub use marvel::MarvelClient;

/// Stable catalog identifier of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub u64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CharacterId {
    type Err = HerodexError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(CharacterId)
            .map_err(|_| HerodexError::InvalidInput(format!("invalid character id '{s}'")))
    }
}

/// Image reference split the way the catalog returns it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub extension: String,
}

impl Thumbnail {
    pub fn new(path: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            extension: extension.into(),
        }
    }

    /// Full image URL (`path.extension`)
    pub fn url(&self) -> String {
        format!("{}.{}", self.path, self.extension)
    }
}

/// A named entry inside a related collection (a comic, a story, ...)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedItem {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "resourceURI")]
    pub resource_uri: String,
    /// Story type (`cover`, `interiorStory`), only present on stories
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Summary of a related collection; `items` is bounded by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelatedCollection {
    #[serde(default)]
    pub available: u32,
    #[serde(default)]
    pub returned: u32,
    #[serde(default)]
    pub items: Vec<RelatedItem>,
}

impl RelatedCollection {
    pub fn is_empty(&self) -> bool {
        self.available == 0 && self.items.is_empty()
    }
}

/// External link attached to a character (detail page, wiki, comic link)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Last modification timestamp as reported by the catalog (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default)]
    pub comics: RelatedCollection,
    #[serde(default)]
    pub series: RelatedCollection,
    #[serde(default)]
    pub stories: RelatedCollection,
    #[serde(default)]
    pub events: RelatedCollection,
    #[serde(default)]
    pub urls: Vec<ExternalLink>,
}

impl Character {
    /// Minimal character with only an id and a name
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: CharacterId(id),
            name: name.into(),
            description: String::new(),
            modified: None,
            thumbnail: None,
            comics: RelatedCollection::default(),
            series: RelatedCollection::default(),
            stories: RelatedCollection::default(),
            events: RelatedCollection::default(),
            urls: Vec::new(),
        }
    }

    pub fn with_thumbnail(mut self, path: &str, extension: &str) -> Self {
        self.thumbnail = Some(Thumbnail::new(path, extension));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Thumbnail URL, if the character carries a usable one
    pub fn thumbnail_url(&self) -> Option<String> {
        self.thumbnail
            .as_ref()
            .filter(|t| filter::is_usable_thumbnail(t))
            .map(Thumbnail::url)
    }
}

/// One page window worth of display-worthy items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogPage {
    /// At most `limit` items, all passing the client's display policy
    pub items: Vec<Character>,
    /// The remote source's own count of raw records
    pub total: u64,
    /// Raw offset the next page window should start from
    pub next_offset: u64,
    /// True when the remote ran dry before `limit` items were collected
    pub exhausted: bool,
}

/// Read-only access to a remote character catalog
///
/// Every call is a fresh remote request. Failures are returned as errors so
/// callers can tell "no results" apart from "fetch failed".
pub trait CatalogProvider: Send + Sync {
    /// Fetch up to `limit` display-worthy characters starting at raw `offset`
    fn fetch_page(
        &self,
        limit: u32,
        offset: u64,
    ) -> impl std::future::Future<Output = Result<CatalogPage>> + Send;

    /// Fetch display-worthy characters whose name starts with `text`
    fn search_by_name_prefix(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Character>>> + Send;

    /// Fetch a single character by id
    fn fetch_character(
        &self,
        id: CharacterId,
    ) -> impl std::future::Future<Output = Result<Character>> + Send;
}
