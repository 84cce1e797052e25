//! HTTP client for the Marvel public catalog API.
//!
//! # Security Note - Logging
//!
//! Requests are authenticated with query parameters rather than headers. The
//! private key itself is never sent: only its digest is, and it lives in a
//! `SecretBox` inside [`Credentials`]. Debug logs include the request path and
//! paging parameters but never the signing parameters.

use std::time::Duration;

use reqwest::{Client, header};
use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::error::{HerodexError, Result};

use super::auth::Credentials;
use super::error::ApiError;
use super::{CatalogPage, CatalogProvider, Character, CharacterId, DisplayPolicy};

/// Largest `limit` the catalog accepts on a single request
pub const MAX_REQUEST_LIMIT: u32 = 100;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// `{"code": 200, "data": {...}}` response envelope
#[derive(Debug, Deserialize)]
struct DataWrapper {
    data: DataContainer,
}

#[derive(Debug, Deserialize)]
struct DataContainer {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    results: Vec<Character>,
}

/// Marvel catalog provider
pub struct MarvelClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
    policy: DisplayPolicy,
    batch_size: u32,
    search_limit: u32,
}

impl MarvelClient {
    /// Create a client from configuration
    ///
    /// Fails with an auth error when the key pair is not configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let credentials = config.credentials()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("herodex/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(&config.base_url)?,
            credentials,
            policy: config.display_policy,
            batch_size: config.fetch_batch_size.clamp(1, MAX_REQUEST_LIMIT),
            search_limit: config.search_limit.max(1),
        })
    }

    /// Create a client for `base_url` with default tuning
    pub fn new(base_url: &str, credentials: Credentials, policy: DisplayPolicy) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            credentials,
            policy,
            batch_size: MAX_REQUEST_LIMIT,
            search_limit: MAX_REQUEST_LIMIT,
        })
    }

    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size.clamp(1, MAX_REQUEST_LIMIT);
        self
    }

    pub fn with_search_limit(mut self, search_limit: u32) -> Self {
        self.search_limit = search_limit.max(1);
        self
    }

    pub fn policy(&self) -> DisplayPolicy {
        self.policy
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| HerodexError::Config(format!("invalid catalog path '{path}': {e}")))
    }

    /// Issue one signed GET and decode the data container
    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<DataContainer> {
        Ok(self.request(path, params).await??)
    }

    /// Signed GET; the outer error is transport or decoding, the inner one
    /// a non-success status from the catalog
    async fn request(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<std::result::Result<DataContainer, ApiError>> {
        let url = self.endpoint(path)?;
        tracing::debug!(path, ?params, "catalog request");

        let auth = self.credentials.sign_now();
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .query(&auth.as_query())
            .query(params)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(path, "catalog transport failure: {e}");
                HerodexError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            let error = ApiError::from_response(status, retry_after, &body);
            tracing::warn!(path, status = status.as_u16(), "catalog request failed: {error}");
            return Ok(Err(error));
        }

        let wrapper: DataWrapper = response.json().await?;
        Ok(Ok(wrapper.data))
    }
}

impl CatalogProvider for MarvelClient {
    /// Over-fetches raw batches until `limit` admitted characters are
    /// collected or the catalog runs dry.
    async fn fetch_page(&self, limit: u32, offset: u64) -> Result<CatalogPage> {
        let wanted = limit as usize;
        let mut page = CatalogPage {
            next_offset: offset,
            ..CatalogPage::default()
        };
        if wanted == 0 {
            return Ok(page);
        }

        let batch_limit = match self.policy {
            // Nothing is filtered out, so one window-sized request suffices
            DisplayPolicy::Any => limit.min(MAX_REQUEST_LIMIT),
            _ => self.batch_size,
        };

        loop {
            let data = self
                .get(
                    "characters",
                    &[
                        ("limit", batch_limit.to_string()),
                        ("offset", page.next_offset.to_string()),
                    ],
                )
                .await?;
            page.total = data.total;

            let received = data.results.len() as u64;
            if received == 0 {
                page.exhausted = true;
                break;
            }

            let mut consumed = 0u64;
            for character in data.results {
                consumed += 1;
                if self.policy.admits(&character) {
                    page.items.push(character);
                    if page.items.len() == wanted {
                        break;
                    }
                }
            }
            page.next_offset += consumed;

            let short_batch = received < u64::from(batch_limit);
            let at_end = short_batch || page.next_offset >= page.total;
            if page.items.len() == wanted {
                page.exhausted = at_end && consumed == received;
                break;
            }
            if at_end {
                page.exhausted = true;
                break;
            }
        }

        tracing::debug!(
            offset,
            next_offset = page.next_offset,
            kept = page.items.len(),
            total = page.total,
            exhausted = page.exhausted,
            "page window fetched"
        );
        Ok(page)
    }

    async fn search_by_name_prefix(&self, text: &str) -> Result<Vec<Character>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let data = self
            .get(
                "characters",
                &[
                    ("nameStartsWith", text.to_string()),
                    (
                        "limit",
                        self.search_limit.min(MAX_REQUEST_LIMIT).to_string(),
                    ),
                ],
            )
            .await?;

        let mut results = self.policy.filter(data.results);
        results.truncate(self.search_limit as usize);
        tracing::debug!(query = text, kept = results.len(), "search completed");
        Ok(results)
    }

    async fn fetch_character(&self, id: CharacterId) -> Result<Character> {
        let data = match self.request(&format!("characters/{id}"), &[]).await? {
            Ok(data) => data,
            Err(error) if error.is_not_found() => {
                return Err(HerodexError::CharacterNotFound(id.0));
            }
            Err(error) => return Err(error.into()),
        };

        data.results
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(HerodexError::CharacterNotFound(id.0))
    }
}

/// Parse the API root, ensuring a trailing slash so relative joins append
fn parse_base_url(base_url: &str) -> Result<Url> {
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    };
    Url::parse(&normalized)
        .map_err(|e| HerodexError::Config(format!("invalid base_url '{base_url}': {e}")))
}
