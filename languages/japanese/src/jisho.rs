use std::time::Duration;

use async_trait::async_trait;
use kanji_lookup::{DefinitionSource, LookupError, LookupKind, SourceMetadata};
use reqwest::Url;

use crate::extract::extract_definition;

pub const DEFAULT_BASE_URL: &str = "https://jisho.org/search";
pub const DEFAULT_KANJI_MARKER: &str = "#kanji";

/// Definitions scraped from jisho.org search pages
#[derive(Clone)]
pub struct JishoSource {
    client: reqwest::Client,
    base_url: Url,
    kanji_marker: String,
}

impl JishoSource {
    pub fn new(base_url: &str) -> Result<Self, LookupError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Build a source with its own HTTP client. Without a timeout a stalled
    /// request blocks the lookup indefinitely.
    pub fn with_settings(
        base_url: &str,
        timeout: Option<Duration>,
        user_agent: &str,
    ) -> Result<Self, LookupError> {
        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_client(builder.build()?, base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, LookupError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| LookupError::InvalidUrl(format!("{base_url}: {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(LookupError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            client,
            base_url,
            kanji_marker: DEFAULT_KANJI_MARKER.to_string(),
        })
    }

    pub fn with_kanji_marker(mut self, marker: impl Into<String>) -> Self {
        self.kanji_marker = marker.into();
        self
    }

    /// Search URL for `term`. Single kanji get the kanji marker appended to
    /// the search text; compounds are searched as-is.
    pub fn request_url(&self, term: &str, kind: LookupKind) -> Result<Url, LookupError> {
        let query = match kind {
            LookupKind::SingleCharacter => format!("{} {}", term, self.kanji_marker),
            LookupKind::Compound => term.to_string(),
        };

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(&query);
        Ok(url)
    }
}

#[async_trait]
impl DefinitionSource for JishoSource {
    async fn lookup(&self, term: &str) -> Result<String, LookupError> {
        let kind = LookupKind::for_term(term);
        let url = self.request_url(term, kind)?;
        tracing::debug!("GET {} ({} lookup)", url, kind.as_str());

        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(LookupError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let page = response.text().await?;
        extract_definition(&page, term, kind)
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Jisho".to_string(),
            base_url: self.base_url.to_string(),
        }
    }
}
