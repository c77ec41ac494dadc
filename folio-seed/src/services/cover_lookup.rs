//! Book cover lookup
//!
//! Best-effort: a failed lookup is logged and treated as "no cover", never
//! as a stage failure.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const GOOGLE_BOOKS_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";
const USER_AGENT: &str = concat!("folio-seed/", env!("CARGO_PKG_VERSION"));

/// Cover lookup errors
#[derive(Debug, Error)]
pub enum CoverLookupError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API returned status {0}")]
    Api(u16),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Source of cover image URLs
#[async_trait]
pub trait CoverLookup: Send + Sync {
    /// Short name for logs
    fn source_id(&self) -> &'static str;

    /// Cover URL for a book, or `None` when nothing usable was found
    async fn find_cover(&self, title: &str, author: &str) -> Option<String>;
}

/// Lookup that never finds anything (lookups disabled)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCoverLookup;

#[async_trait]
impl CoverLookup for NoCoverLookup {
    fn source_id(&self) -> &'static str {
        "none"
    }

    async fn find_cover(&self, _title: &str, _author: &str) -> Option<String> {
        None
    }
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageLinks {
    extra_large: Option<String>,
    large: Option<String>,
    medium: Option<String>,
    thumbnail: Option<String>,
}

impl ImageLinks {
    /// Largest available image
    fn best(self) -> Option<String> {
        [self.extra_large, self.large, self.medium, self.thumbnail]
            .into_iter()
            .flatten()
            .find(|url| !url.trim().is_empty())
    }
}

/// Google Books volumes API client, rate limited
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    rate_limiter: RateLimiter<
        governor::state::direct::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
}

impl GoogleBooksClient {
    /// Client allowing `requests_per_second` lookups (0 is treated as 1)
    pub fn new(
        api_key: Option<String>,
        requests_per_second: u32,
    ) -> Result<Self, CoverLookupError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| CoverLookupError::Network(e.to_string()))?;

        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);

        Ok(Self {
            client,
            base_url: GOOGLE_BOOKS_BASE_URL.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            rate_limiter: RateLimiter::direct(Quota::per_second(rate)),
        })
    }

    /// Point at a different endpoint (local test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Query the volumes API for the best cover of `title` by `author`
    pub async fn lookup(
        &self,
        title: &str,
        author: &str,
    ) -> Result<Option<String>, CoverLookupError> {
        self.rate_limiter.until_ready().await;

        let query = format!("{} {}", title, author);
        let mut params = vec![("q", query.as_str()), ("maxResults", "1")];
        if let Some(key) = &self.api_key {
            params.push(("key", key.as_str()));
        }

        debug!(title = %title, author = %author, "Querying Google Books");

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| CoverLookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoverLookupError::Api(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CoverLookupError::Network(e.to_string()))?;

        parse_cover_url(&body)
    }
}

#[async_trait]
impl CoverLookup for GoogleBooksClient {
    fn source_id(&self) -> &'static str {
        "google-books"
    }

    async fn find_cover(&self, title: &str, author: &str) -> Option<String> {
        match self.lookup(title, author).await {
            Ok(cover) => cover,
            Err(e) => {
                warn!(title = %title, error = %e, "Cover lookup failed");
                None
            }
        }
    }
}

/// Pick the cover URL out of a volumes response body
fn parse_cover_url(body: &str) -> Result<Option<String>, CoverLookupError> {
    let response: VolumesResponse =
        serde_json::from_str(body).map_err(|e| CoverLookupError::Parse(e.to_string()))?;

    Ok(response
        .items
        .into_iter()
        .next()
        .and_then(|volume| volume.volume_info.image_links)
        .and_then(ImageLinks::best)
        .map(|url| upgrade_to_https(&url)))
}

/// Rewrite a leading `http://` as `https://`
pub fn upgrade_to_https(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_largest_image() {
        let body = r#"{
            "items": [{
                "volumeInfo": {
                    "imageLinks": {
                        "thumbnail": "http://books.google.com/thumb",
                        "large": "http://books.google.com/large",
                        "medium": "http://books.google.com/medium"
                    }
                }
            }]
        }"#;

        assert_eq!(
            parse_cover_url(body).unwrap(),
            Some("https://books.google.com/large".to_string())
        );
    }

    #[test]
    fn test_thumbnail_fallback() {
        let body = r#"{"items":[{"volumeInfo":{"imageLinks":{"thumbnail":"https://t"}}}]}"#;
        assert_eq!(parse_cover_url(body).unwrap(), Some("https://t".to_string()));
    }

    #[test]
    fn test_no_items_or_links_is_none() {
        assert_eq!(parse_cover_url(r#"{"totalItems": 0}"#).unwrap(), None);
        assert_eq!(parse_cover_url(r#"{"items":[{"volumeInfo":{}}]}"#).unwrap(), None);
        assert_eq!(parse_cover_url(r#"{"items":[{}]}"#).unwrap(), None);
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        assert!(matches!(parse_cover_url("<html>"), Err(CoverLookupError::Parse(_))));
    }

    #[test]
    fn test_upgrade_to_https() {
        assert_eq!(upgrade_to_https("http://x/y"), "https://x/y");
        assert_eq!(upgrade_to_https("https://x/y"), "https://x/y");
        assert_eq!(upgrade_to_https("ftp://x"), "ftp://x");
    }

    #[tokio::test]
    async fn test_no_cover_lookup() {
        assert_eq!(NoCoverLookup.find_cover("T", "A").await, None);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_yields_none() {
        let client = GoogleBooksClient::new(None, 5)
            .unwrap()
            .with_base_url("http://127.0.0.1:9/volumes");

        assert_eq!(client.find_cover("Deep Learning", "Ian Goodfellow").await, None);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_live_lookup() {
        let client = GoogleBooksClient::new(None, 1).unwrap();
        let cover = client.lookup("Deep Learning", "Ian Goodfellow").await.unwrap();
        if let Some(url) = cover {
            assert!(url.starts_with("https://"));
        }
    }
}
